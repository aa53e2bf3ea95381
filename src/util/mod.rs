use rand::Rng;

use crate::agent::random_move;
use crate::checkers::{Board, Color};

/// plays up to `num_moves` random plies from `board` with White starting, returns the color to move next
pub fn advance_random<R: Rng>(board: &mut Board, num_moves: usize, rng: &mut R) -> Color {
    let mut current_player = Color::White;

    for _ in 0..num_moves {
        if board.check_winner().is_some() {
            break;
        }

        let Some(move_) = random_move(board, current_player, rng) else {
            break;
        };

        board.move_piece(move_.start, move_.end);
        current_player = !current_player;
    }

    current_player
}

/// independent seed for the `index`-th game or agent derived from one base seed
pub fn derive_seed(base: u64, index: u64) -> u64 {
    // splitmix64 step
    let mut z = base.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/*====================================================================================================================*/
