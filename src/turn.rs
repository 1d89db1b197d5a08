//! Turn order: advancing between colors, marking exhausted colors out, and
//! rotating the neutral color between parties in three-party games.

use crate::board::{Board, Color, NUM_COLORS};
use crate::movegen::has_any_valid_move;
use crate::pieces::PieceSet;
use crate::players::{PlayerMode, NEUTRAL_COLOR};

/// Whose turn it is and which colors are still in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnState {
    /// Color to move. A placeholder once `terminal` is set.
    pub active: Color,
    /// Party that plays the neutral color the next time it comes around
    /// (three-party games only).
    pub neutral_pointer: u8,
    /// Sticky per-color flags: once out, a color stays out.
    pub out: [bool; NUM_COLORS],
    /// Set once all four colors are out.
    pub terminal: bool,
}

impl TurnState {
    /// Game start: color 0 to move, nobody out.
    pub fn initial() -> TurnState {
        TurnState {
            active: 0,
            neutral_pointer: 0,
            out: [false; NUM_COLORS],
            terminal: false,
        }
    }
}

/// Result of advancing the turn from some color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub next: Color,
    pub out: [bool; NUM_COLORS],
    pub neutral_pointer: u8,
    /// Party holding the neutral color for `next`'s move, set when `next`
    /// is the neutral color.
    pub neutral_holder: Option<u8>,
    pub terminal: bool,
}

/// Walks forward from `current` in fixed cyclic color order and returns the
/// first color that still has a legal move. Colors probed without success
/// are marked out permanently; colors already out are passed over without a
/// probe. When every color is exhausted the outcome is terminal and `next`
/// only reports the last color checked.
pub fn advance_turn(
    mode: PlayerMode,
    current: Color,
    board: &Board,
    used: &[PieceSet; NUM_COLORS],
    first_move: &[bool; NUM_COLORS],
    out: [bool; NUM_COLORS],
    neutral_pointer: u8,
) -> TurnOutcome {
    let mut out = out;
    let mut pointer = neutral_pointer;
    let mut candidate = current;

    for _ in 0..NUM_COLORS {
        candidate = (candidate + 1) % NUM_COLORS as Color;
        let holder_now = pointer;
        if mode == PlayerMode::ThreeParty && candidate == NEUTRAL_COLOR {
            // The hold rotates whenever the walk passes the neutral slot,
            // whether the slot is skipped or played.
            pointer = (pointer + 1) % 3;
        }
        if out[candidate as usize] {
            continue;
        }
        if has_any_valid_move(
            board,
            candidate,
            &used[candidate as usize],
            first_move[candidate as usize],
        ) {
            let neutral_holder = (mode == PlayerMode::ThreeParty && candidate == NEUTRAL_COLOR)
                .then_some(holder_now);
            return TurnOutcome {
                next: candidate,
                out,
                neutral_pointer: pointer,
                neutral_holder,
                terminal: false,
            };
        }
        out[candidate as usize] = true;
    }

    TurnOutcome {
        next: candidate,
        out,
        neutral_pointer: pointer,
        neutral_holder: None,
        terminal: true,
    }
}
