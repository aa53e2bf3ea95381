use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::agent::Agent;
use crate::checkers::{Board, Color, Move};

/// uniform choice among the legal moves of `color`, also the rollout policy of the tree search
pub fn random_move<R: Rng + ?Sized>(board: &Board, color: Color, rng: &mut R) -> Option<Move> {
    board.get_all_moves(color).choose(rng).copied()
}

pub struct RandomAgent {
    color: Color,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(color: Color, seed: u64) -> Self {
        RandomAgent {
            color,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn color(&self) -> Color {
        self.color
    }

    fn get_move(&mut self, board: &Board) -> Option<Move> {
        random_move(board, self.color, &mut self.rng)
    }
}

/*====================================================================================================================*/
