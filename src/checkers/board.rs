use std::fmt::{Debug, Display};

use tracing::trace;

pub const SIZE: usize = 8;

/// (row, col); row 0 is the edge white is moving towards
pub type Coord = (usize, usize);

type Direction = (isize, isize);

const KING_DIRECTIONS: [Direction; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// row on which a man of this color gets crowned
    pub fn promotion_row(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => SIZE - 1,
        }
    }

    fn forward(&self) -> Direction {
        match self {
            Color::White => (-1, 0),
            Color::Black => (1, 0),
        }
    }

    fn man_directions(&self) -> [Direction; 3] {
        [self.forward(), (0, -1), (0, 1)]
    }
}

// flip the color, i.e. White -> Black and Black -> White
impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Man(Color),
    King(Color),
}

impl Cell {
    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Man(color) | Cell::King(color) => Some(*color),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }

    pub fn is_king(&self) -> bool {
        matches!(self, Cell::King(_))
    }

    fn is_enemy_of(&self, color: Color) -> bool {
        self.color() == Some(!color)
    }

    fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Man(Color::White) => 'w',
            Cell::Man(Color::Black) => 'b',
            Cell::King(Color::White) => 'W',
            Cell::King(Color::Black) => 'B',
        }
    }
}

/*====================================================================================================================*/

/// a single step or a single hop of a jump chain
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub start: Coord,
    pub end: Coord,
}

impl Move {
    pub fn new(start: Coord, end: Coord) -> Self {
        Move { start, end }
    }

    /// number of squares covered, moves are always orthogonal
    pub fn distance(&self) -> usize {
        self.start.0.abs_diff(self.end.0) + self.start.1.abs_diff(self.end.1)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{})->({},{})",
            self.start.0, self.start.1, self.end.0, self.end.1
        )
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Move({:?}, {:?})", self.start, self.end)
    }
}

/*====================================================================================================================*/

/// how the rules engine picks the next hop when a capture leaves more than one continuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainPolicy {
    /// first continuation in generation order
    #[default]
    First,
    /// continuation that allows the most further hops, earliest one on ties
    Longest,
}

impl ChainPolicy {
    pub fn select(&self, board: &Board, from: Coord, options: &[Coord]) -> Option<Coord> {
        match self {
            ChainPolicy::First => options.first().copied(),
            ChainPolicy::Longest => {
                let mut best: Option<(Coord, usize)> = None;

                for &option in options {
                    let mut lookahead = board.clone();
                    lookahead.apply_hop(from, option);
                    let further_hops = lookahead.count_further_hops(option);

                    if best.map_or(true, |(_, best_hops)| further_hops > best_hops) {
                        best = Some((option, further_hops));
                    }
                }

                best.map(|(option, _)| option)
            }
        }
    }
}

/*====================================================================================================================*/

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],

    // hops of the most recent move_piece call
    last_move: Vec<Move>,

    chain_policy: ChainPolicy,
}

impl Board {
    /// starting position: black men on rows 1 and 2, white men on rows 5 and 6
    pub fn new() -> Self {
        let mut board = Board::empty();

        for col in 0..SIZE {
            for row in [1, 2] {
                board.cells[row][col] = Cell::Man(Color::Black);
            }
            for row in [5, 6] {
                board.cells[row][col] = Cell::Man(Color::White);
            }
        }

        board
    }

    pub fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; SIZE]; SIZE],
            last_move: Vec::new(),
            chain_policy: ChainPolicy::default(),
        }
    }

    pub fn cells(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    pub fn cell(&self, (row, col): Coord) -> Cell {
        self.cells[row][col]
    }

    pub fn set_cell(&mut self, (row, col): Coord, cell: Cell) {
        self.cells[row][col] = cell;
    }

    pub fn last_move(&self) -> &[Move] {
        &self.last_move
    }

    pub fn chain_policy(&self) -> ChainPolicy {
        self.chain_policy
    }

    /// copies of this board inherit the policy
    pub fn set_chain_policy(&mut self, chain_policy: ChainPolicy) {
        self.chain_policy = chain_policy;
    }

    pub fn is_within_bounds(row: isize, col: isize) -> bool {
        (0..SIZE as isize).contains(&row) && (0..SIZE as isize).contains(&col)
    }

    fn step((row, col): Coord, (dr, dc): Direction) -> Option<Coord> {
        let (row, col) = (row as isize + dr, col as isize + dc);

        if Board::is_within_bounds(row, col) {
            Some((row as usize, col as usize))
        } else {
            None
        }
    }

    fn squares() -> impl Iterator<Item = Coord> {
        (0..SIZE).flat_map(|row| (0..SIZE).map(move |col| (row, col)))
    }

    fn squares_of(&self, color: Color) -> impl Iterator<Item = Coord> + '_ {
        Board::squares().filter(move |&square| self.cell(square).color() == Some(color))
    }

    pub fn count(&self, color: Color) -> usize {
        self.squares_of(color).count()
    }

    pub fn count_kings(&self, color: Color) -> usize {
        self.squares_of(color).filter(|&square| self.cell(square).is_king()).count()
    }

    /// legal destinations of the piece on `from`, empty if there is none
    pub fn get_valid_moves(&self, from: Coord, only_captures: bool) -> Vec<Coord> {
        let mut moves = Vec::new();

        if !Board::is_within_bounds(from.0 as isize, from.1 as isize) {
            return moves;
        }

        let piece = self.cell(from);
        let Some(color) = piece.color() else {
            return moves;
        };

        if piece.is_king() {
            for direction in KING_DIRECTIONS {
                let mut jumped = false;
                let mut current = from;

                while let Some(next) = Board::step(current, direction) {
                    let target = self.cell(next);

                    if target.is_empty() {
                        // flying king: every empty square behind the jumped piece is a landing square
                        if jumped || !only_captures {
                            moves.push(next);
                        }
                    } else if !jumped && target.is_enemy_of(color) {
                        jumped = true;
                    } else {
                        break;
                    }

                    current = next;
                }
            }
        } else {
            for direction in color.man_directions() {
                let Some(next) = Board::step(from, direction) else {
                    continue;
                };
                let target = self.cell(next);

                if target.is_empty() {
                    if !only_captures {
                        moves.push(next);
                    }
                } else if target.is_enemy_of(color) {
                    if let Some(landing) = Board::step(next, direction) {
                        if self.cell(landing).is_empty() {
                            moves.push(landing);
                        }
                    }
                }
            }
        }

        moves
    }

    /// all moves of `color` in row-major order; only captures if any piece can capture
    pub fn get_all_moves(&self, color: Color) -> Vec<Move> {
        let mut captures = Vec::new();
        let mut simple_moves = Vec::new();

        for square in self.squares_of(color) {
            let piece_captures = self.get_valid_moves(square, true);

            if !piece_captures.is_empty() {
                captures.extend(piece_captures.into_iter().map(|end| Move::new(square, end)));
            } else if captures.is_empty() {
                simple_moves.extend(
                    self.get_valid_moves(square, false)
                        .into_iter()
                        .map(|end| Move::new(square, end)),
                );
            }
        }

        if captures.is_empty() {
            simple_moves
        } else {
            captures
        }
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        self.squares_of(color)
            .any(|square| !self.get_valid_moves(square, false).is_empty())
    }

    /// moves a single hop without chain continuation, returns the square of the captured piece if any
    pub fn apply_hop(&mut self, start: Coord, end: Coord) -> Option<Coord> {
        let piece = self.cell(start);
        self.set_cell(start, Cell::Empty);

        let mut captured = None;

        if let Some(color) = piece.color() {
            if Move::new(start, end).distance() > 1 {
                let direction = (
                    (end.0 as isize - start.0 as isize).signum(),
                    (end.1 as isize - start.1 as isize).signum(),
                );

                let mut current = start;
                while let Some(next) = Board::step(current, direction) {
                    if next == end {
                        break;
                    }

                    if self.cell(next).is_enemy_of(color) {
                        self.set_cell(next, Cell::Empty);
                        captured = Some(next);
                        break;
                    }

                    current = next;
                }
            }

            let landed = match piece {
                Cell::Man(color) if end.0 == color.promotion_row() => Cell::King(color),
                _ => piece,
            };
            self.set_cell(end, landed);
        }

        self.last_move.push(Move::new(start, end));

        captured
    }

    /// applies a move and, if it captured, every forced continuation picked by the chain policy
    ///
    /// returns whether anything was captured and the final landing square. A king sliding over several empty squares
    /// removes nothing, so it is a plain move and never continues a chain.
    pub fn move_piece(&mut self, start: Coord, end: Coord) -> (bool, Coord) {
        self.last_move.clear();

        let captured_any = self.apply_hop(start, end).is_some();
        let mut landing = end;

        if captured_any {
            loop {
                let options = self.get_valid_moves(landing, true);
                let Some(next) = self.chain_policy.select(self, landing, &options) else {
                    break;
                };

                trace!(from = ?landing, to = ?next, "continuing jump chain");

                self.apply_hop(landing, next);
                landing = next;
            }
        }

        (captured_any, landing)
    }

    /// number of hops the piece on `from` can still make, always taking the first continuation
    pub fn count_further_hops(&self, from: Coord) -> usize {
        let mut board = self.clone();
        let mut current = from;
        let mut total = 0;

        while let Some(&next) = board.get_valid_moves(current, true).first() {
            board.apply_hop(current, next);
            current = next;
            total += 1;
        }

        total
    }

    /// the color whose opponent is out of pieces or out of moves, White's side is checked first
    pub fn check_winner(&self) -> Option<Color> {
        for color in [Color::White, Color::Black] {
            if self.count(color) == 0 || !self.has_legal_move(color) {
                return Some(!color);
            }
        }

        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  ")?;
        for col in 0..SIZE {
            write!(f, " {}", col)?;
        }

        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "\n{} ", row)?;
            for cell in cells {
                write!(f, " {}", cell.symbol())?;
            }
        }

        Ok(())
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/*====================================================================================================================*/
