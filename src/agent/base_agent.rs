use crate::checkers::{Board, Color, Move};

pub trait Agent {
    fn color(&self) -> Color;

    /// first hop of the chosen move, None exactly when `color()` has no legal move on `board`
    ///
    /// the board is never mutated, further forced hops are resolved by `Board::move_piece`
    fn get_move(&mut self, board: &Board) -> Option<Move>;
}
