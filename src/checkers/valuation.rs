use crate::checkers::{Board, Cell, Color};

/// static score of a position from the perspective of the given color
pub type ValuationFn = fn(&Board, Color) -> i32;

/// piece values of the material heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialWeights {
    pub man: i32,
    pub king: i32,
}

impl Default for MaterialWeights {
    fn default() -> Self {
        MaterialWeights { man: 1, king: 5 }
    }
}

impl MaterialWeights {
    /// material balance from the perspective of `color`: own pieces count positive, enemy pieces negative
    pub fn evaluate(&self, board: &Board, color: Color) -> i32 {
        board
            .cells()
            .iter()
            .flatten()
            .map(|cell| {
                let value = match cell {
                    Cell::Empty => return 0,
                    Cell::Man(_) => self.man,
                    Cell::King(_) => self.king,
                };

                if cell.color() == Some(color) {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

pub fn material_valuation(board: &Board, color: Color) -> i32 {
    MaterialWeights::default().evaluate(board, color)
}

/// kings count the same as men
pub fn piece_count_valuation(board: &Board, color: Color) -> i32 {
    MaterialWeights { man: 1, king: 1 }.evaluate(board, color)
}

/*====================================================================================================================*/
