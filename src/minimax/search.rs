use tracing::debug;

use crate::checkers::{material_valuation, Board, ChainPolicy, Color, Move, ValuationFn};

/// search parameters of the alpha-beta agent
#[derive(Clone, Copy)]
pub struct AlphaBetaConfig {
    pub depth: u32,
    pub alpha_beta_prune: bool,
    pub chain_policy: ChainPolicy,
    pub valuation_fn: ValuationFn,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        AlphaBetaConfig {
            depth: 3,
            alpha_beta_prune: true,
            chain_policy: ChainPolicy::Longest,
            valuation_fn: material_valuation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// material score from the searching color's perspective
    pub value: i32,
    /// None at depth 0, on decided positions and when the side to move is stuck
    pub best_move: Option<Move>,
    pub nodes_visited: u64,
}

/*====================================================================================================================*/

struct MinimaxWorker {
    color: Color,
    config: AlphaBetaConfig,

    total_nodes_visited: u64,
}

impl MinimaxWorker {
    fn new(color: Color, config: AlphaBetaConfig) -> Self {
        MinimaxWorker {
            color,
            config,
            total_nodes_visited: 0,
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        remaining_depth: u32,
        maximizing: bool,
        alpha: i32,
        beta: i32,
    ) -> (i32, Option<Move>) {
        self.total_nodes_visited += 1;

        if remaining_depth == 0 || board.check_winner().is_some() {
            return ((self.config.valuation_fn)(board, self.color), None);
        }

        let player = if maximizing { self.color } else { !self.color };
        let legal_moves = board.get_all_moves(player);

        if legal_moves.is_empty() {
            return ((self.config.valuation_fn)(board, self.color), None);
        }

        let mut best_move = None;
        let mut best_value = if maximizing { i32::MIN } else { i32::MAX };

        let mut alpha = alpha;
        let mut beta = beta;

        let mut board_after_move = board.clone();

        for move_ in legal_moves {
            board_after_move.clone_from(board);
            board_after_move.move_piece(move_.start, move_.end);

            let (value, _) = self.minimax(&board_after_move, remaining_depth - 1, !maximizing, alpha, beta);

            // strict comparison: the first move reaching the best value is kept
            if maximizing {
                if value > best_value {
                    best_value = value;
                    best_move = Some(move_);
                }
                alpha = alpha.max(value);
            } else {
                if value < best_value {
                    best_value = value;
                    best_move = Some(move_);
                }
                beta = beta.min(value);
            }

            if self.config.alpha_beta_prune && beta <= alpha {
                break;
            }
        }

        (best_value, best_move)
    }
}

/*====================================================================================================================*/

/// depth-limited minimax for `color` to move on `board`, exploring private copies only
pub fn minimax_search(board: &Board, color: Color, config: AlphaBetaConfig) -> SearchResult {
    let mut root = board.clone();
    root.set_chain_policy(config.chain_policy);

    let mut worker = MinimaxWorker::new(color, config);
    let (value, best_move) = worker.minimax(&root, config.depth, true, i32::MIN, i32::MAX);

    debug!(
        %color,
        depth = config.depth,
        alpha_beta_prune = config.alpha_beta_prune,
        nodes = worker.total_nodes_visited,
        value,
        best_move = ?best_move,
        "minimax search finished"
    );

    SearchResult {
        value,
        best_move,
        nodes_visited: worker.total_nodes_visited,
    }
}

/// all hops the rules engine will play for `move_` when continuing with `chain_policy`
pub fn plan_chain(board: &Board, move_: Move, chain_policy: ChainPolicy) -> Vec<Move> {
    let mut preview = board.clone();
    preview.set_chain_policy(chain_policy);
    preview.move_piece(move_.start, move_.end);

    preview.last_move().to_vec()
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{minimax_search, plan_chain, AlphaBetaConfig};
    use crate::checkers::{piece_count_valuation, Board, Cell, ChainPolicy, Color, Move};
    use crate::util::advance_random;

    #[test]
    fn test_depth_zero_returns_static_value() {
        let mut board = Board::new();
        board.set_cell((1, 0), Cell::Empty);

        let config = AlphaBetaConfig {
            depth: 0,
            ..AlphaBetaConfig::default()
        };
        let result = minimax_search(&board, Color::White, config);

        assert_eq!(result.value, 1);
        assert_eq!(result.best_move, None);
        assert_eq!(result.nodes_visited, 1);
    }

    #[test]
    fn test_custom_valuation_fn() {
        let mut board = Board::empty();
        board.set_cell((7, 0), Cell::King(Color::White));
        board.set_cell((0, 7), Cell::Man(Color::Black));

        let material = AlphaBetaConfig {
            depth: 0,
            ..AlphaBetaConfig::default()
        };
        let piece_count = AlphaBetaConfig {
            valuation_fn: piece_count_valuation,
            ..material
        };

        assert_eq!(minimax_search(&board, Color::White, material).value, 4);
        assert_eq!(minimax_search(&board, Color::White, piece_count).value, 0);
    }

    #[test]
    fn test_takes_free_piece() {
        let mut board = Board::empty();
        board.set_cell((6, 0), Cell::Man(Color::White));
        board.set_cell((6, 6), Cell::Man(Color::White));
        board.set_cell((5, 6), Cell::Man(Color::Black));
        board.set_cell((1, 1), Cell::Man(Color::Black));

        let result = minimax_search(&board, Color::White, AlphaBetaConfig::default());

        assert_eq!(result.best_move, Some(Move::new((6, 6), (4, 6))));
    }

    #[test]
    fn test_avoids_hanging_piece() {
        // stepping forward to (3,3) lets the black man on (2,3) jump it
        let mut board = Board::empty();
        board.set_cell((4, 3), Cell::Man(Color::White));
        board.set_cell((2, 3), Cell::Man(Color::Black));
        board.set_cell((0, 0), Cell::Man(Color::Black));

        let config = AlphaBetaConfig {
            depth: 2,
            ..AlphaBetaConfig::default()
        };
        let result = minimax_search(&board, Color::White, config);

        assert_eq!(result.best_move, Some(Move::new((4, 3), (4, 2))));
        assert_eq!(result.value, -1);
    }

    #[test]
    fn test_pruning_does_not_change_result() {
        let mut rng = StdRng::seed_from_u64(3);

        for plies in [0, 4, 9, 14, 20] {
            let mut board = Board::new();
            let to_move = advance_random(&mut board, plies, &mut rng);

            if board.check_winner().is_some() {
                continue;
            }

            for depth in 1..=3 {
                let pruned = AlphaBetaConfig {
                    depth,
                    ..AlphaBetaConfig::default()
                };
                let unpruned = AlphaBetaConfig {
                    alpha_beta_prune: false,
                    ..pruned
                };

                let a = minimax_search(&board, to_move, pruned);
                let b = minimax_search(&board, to_move, unpruned);

                assert_eq!(a.value, b.value, "value differs at depth {} on\n{}", depth, board);
                assert_eq!(a.best_move, b.best_move, "move differs at depth {} on\n{}", depth, board);
                assert!(a.nodes_visited <= b.nodes_visited);
            }
        }
    }

    #[test]
    fn test_ties_keep_first_move() {
        // lone pieces far apart: every move scores the same, the first in scan order wins
        let mut board = Board::empty();
        board.set_cell((6, 3), Cell::Man(Color::White));
        board.set_cell((0, 7), Cell::Man(Color::Black));

        let config = AlphaBetaConfig {
            depth: 1,
            ..AlphaBetaConfig::default()
        };
        let result = minimax_search(&board, Color::White, config);

        assert_eq!(result.best_move, Some(board.get_all_moves(Color::White)[0]));
    }

    #[test]
    fn test_plan_chain() {
        let mut board = Board::empty();
        board.set_cell((6, 2), Cell::Man(Color::White));
        board.set_cell((5, 2), Cell::Man(Color::Black));
        board.set_cell((4, 1), Cell::Man(Color::Black));
        board.set_cell((4, 3), Cell::Man(Color::Black));
        board.set_cell((3, 4), Cell::Man(Color::Black));

        let move_ = Move::new((6, 2), (4, 2));

        assert_eq!(
            plan_chain(&board, move_, ChainPolicy::Longest),
            vec![move_, Move::new((4, 2), (4, 4)), Move::new((4, 4), (2, 4))]
        );
        assert_eq!(
            plan_chain(&board, move_, ChainPolicy::First),
            vec![move_, Move::new((4, 2), (4, 0))]
        );
        // the original board is untouched
        assert_eq!(board.count(Color::Black), 4);
    }
}
