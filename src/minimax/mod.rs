mod minimax_agent;
mod search;

pub use minimax_agent::MinimaxAgent;
pub use search::{minimax_search, plan_chain, AlphaBetaConfig, SearchResult};
