use tracing::debug;

use crate::agent::Agent;
use crate::checkers::{Board, Color, Move};

use super::search::{minimax_search, plan_chain, AlphaBetaConfig};

pub struct MinimaxAgent {
    color: Color,
    config: AlphaBetaConfig,

    // hops of the last returned move as resolved by the chain lookahead
    planned_chain: Vec<Move>,
}

impl MinimaxAgent {
    pub fn new(color: Color, config: AlphaBetaConfig) -> Self {
        MinimaxAgent {
            color,
            config,
            planned_chain: Vec::new(),
        }
    }

    pub fn with_depth(color: Color, depth: u32) -> Self {
        MinimaxAgent::new(
            color,
            AlphaBetaConfig {
                depth,
                ..AlphaBetaConfig::default()
            },
        )
    }

    pub fn planned_chain(&self) -> &[Move] {
        &self.planned_chain
    }
}

impl Agent for MinimaxAgent {
    fn color(&self) -> Color {
        self.color
    }

    fn get_move(&mut self, board: &Board) -> Option<Move> {
        self.planned_chain.clear();

        let legal_moves = board.get_all_moves(self.color);
        let fallback_move = *legal_moves.first()?;

        // a zero-depth search yields no move, play the first legal one instead
        let best_move = minimax_search(board, self.color, self.config)
            .best_move
            .unwrap_or(fallback_move);

        self.planned_chain = plan_chain(board, best_move, self.config.chain_policy);

        if self.planned_chain.len() > 1 {
            debug!(color = %self.color, chain = ?self.planned_chain, "resolved forced jump chain");
        }

        Some(best_move)
    }
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use crate::agent::Agent;
    use crate::checkers::{Board, Cell, Color, Move};
    use crate::minimax::MinimaxAgent;

    #[test]
    fn test_agent_returns_legal_move() {
        let board = Board::new();
        let mut agent = MinimaxAgent::with_depth(Color::White, 2);

        let move_ = agent.get_move(&board).unwrap();
        assert!(board.get_all_moves(Color::White).contains(&move_));
        assert_eq!(agent.planned_chain(), &[move_]);
    }

    #[test]
    fn test_agent_depth_zero_plays_first_move() {
        let board = Board::new();
        let mut agent = MinimaxAgent::with_depth(Color::Black, 0);

        assert_eq!(agent.get_move(&board), board.get_all_moves(Color::Black).first().copied());
    }

    #[test]
    fn test_agent_without_moves() {
        let mut board = Board::empty();
        board.set_cell((6, 0), Cell::Man(Color::Black));
        board.set_cell((7, 0), Cell::Man(Color::White));
        board.set_cell((6, 1), Cell::Man(Color::White));
        board.set_cell((6, 2), Cell::Man(Color::White));
        board.set_cell((5, 0), Cell::Man(Color::White));

        let mut agent = MinimaxAgent::with_depth(Color::Black, 3);
        assert_eq!(agent.get_move(&board), None);
    }

    #[test]
    fn test_agent_plans_longest_chain() {
        let mut board = Board::empty();
        board.set_cell((6, 2), Cell::Man(Color::White));
        board.set_cell((5, 2), Cell::Man(Color::Black));
        board.set_cell((4, 1), Cell::Man(Color::Black));
        board.set_cell((4, 3), Cell::Man(Color::Black));
        board.set_cell((3, 4), Cell::Man(Color::Black));

        let mut agent = MinimaxAgent::with_depth(Color::White, 1);
        let move_ = agent.get_move(&board).unwrap();

        assert_eq!(move_, Move::new((6, 2), (4, 2)));
        assert_eq!(agent.planned_chain().len(), 3);
        assert_eq!(agent.planned_chain().last().unwrap().end, (2, 4));
        // the agent only looks, the board is untouched
        assert_eq!(board.count(Color::Black), 4);
    }
}
