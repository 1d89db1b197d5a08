//! AI controller: one call that turns a game position into a chosen move.

pub mod evaluator;

pub use evaluator::{select_move, Difficulty, ParseDifficultyError};

use rand::Rng;

use crate::board::{Board, Color};
use crate::movegen::{generate_all_moves, Placement};
use crate::pieces::PieceSet;
use crate::players::PlayerMode;

/// Decides a move for `color`, or `None` when the color has no legal move
/// and the caller should pass it over.
///
/// `neutral_holder` names the party playing the neutral color in
/// three-party games; the other topologies ignore it.
#[allow(clippy::too_many_arguments)]
pub fn choose_move<R: Rng>(
    board: &Board,
    color: Color,
    difficulty: Difficulty,
    used: &[PieceSet; 4],
    first_move: &[bool; 4],
    mode: PlayerMode,
    neutral_holder: u8,
    rng: &mut R,
) -> Option<Placement> {
    let is_first = first_move[color as usize];
    let moves = generate_all_moves(board, color, &used[color as usize], is_first);
    if moves.is_empty() {
        return None;
    }
    let allies = mode.ally_colors(color, neutral_holder);
    let opponents = mode.opponent_colors(color, neutral_holder);
    select_move(
        &moves, board, color, difficulty, used, is_first, mode, &allies, &opponents, rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PIECE_COUNT;
    use crate::rules::validate;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_chosen_move_is_legal() {
        let board = Board::new();
        let used: [PieceSet; 4] = Default::default();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let mv = choose_move(
            &board,
            0,
            Difficulty::Advanced,
            &used,
            &[true; 4],
            PlayerMode::FourParty,
            0,
            &mut rng,
        )
        .expect("empty board must offer a first move");
        assert_eq!(validate(&board, mv.row, mv.col, mv.shape(), 0, true), Ok(()));
    }

    #[test]
    fn test_no_pieces_left_yields_none() {
        let board = Board::new();
        let mut used: [PieceSet; 4] = Default::default();
        for id in 0..PIECE_COUNT {
            used[0].insert(id);
        }
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let mv = choose_move(
            &board,
            0,
            Difficulty::Novice,
            &used,
            &[false; 4],
            PlayerMode::FourParty,
            0,
            &mut rng,
        );
        assert_eq!(mv, None);
    }
}
