mod board;
pub mod valuation;

pub use board::{Board, Cell, ChainPolicy, Color, Coord, Move, SIZE};
pub use valuation::{material_valuation, piece_count_valuation, MaterialWeights, ValuationFn};
