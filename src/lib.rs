//! Rules engine and search agents for an orthogonal-move draughts variant on an 8x8 board.
//!
//! The [`checkers::Board`] owns the rules: per-piece move generation, the global forced-capture rule, automatic jump
//! chain continuation, promotion and terminal detection. Agents implement [`agent::Agent`] and only ever explore
//! private copies of the board they are handed.

pub mod agent;
pub mod checkers;
pub mod game;
pub mod mcts;
pub mod minimax;
pub mod util;

pub use agent::Agent;
pub use checkers::{Board, Cell, Color, Move};
