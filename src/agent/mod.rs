mod base_agent;
mod random_agent;

pub use base_agent::Agent;
pub use random_agent::{random_move, RandomAgent};
