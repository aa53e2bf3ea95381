mod mcts_agent;
mod node;
mod search;

pub use mcts_agent::MctsAgent;
pub use node::{Node, NodeId, Tree};
pub use search::{rollout, MctsConfig, Perspective, Search};
