use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::agent::Agent;
use crate::checkers::{Board, Color, Move};

use super::search::{MctsConfig, Search};

pub struct MctsAgent {
    color: Color,
    config: MctsConfig,

    rng: StdRng,
}

impl MctsAgent {
    pub fn new(color: Color, config: MctsConfig, seed: u64) -> Self {
        MctsAgent {
            color,
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_simulations(color: Color, simulations: u32, seed: u64) -> Self {
        MctsAgent::new(
            color,
            MctsConfig {
                simulations,
                ..MctsConfig::default()
            },
            seed,
        )
    }
}

impl Agent for MctsAgent {
    fn color(&self) -> Color {
        self.color
    }

    fn get_move(&mut self, board: &Board) -> Option<Move> {
        // fresh tree per decision, nothing is reused across turns
        Search::new(board, self.color, self.config, &mut self.rng).run()
    }
}

/*====================================================================================================================*/
