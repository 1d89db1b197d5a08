//! Legal move enumeration: the full generator and the existence probe.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Board, Color, BOARD_SIZE};
use crate::pieces::{catalog, PieceSet, PIECE_COUNT};
use crate::rules::validate;
use crate::transform::{Orientation, Shape};

/// Anchors are scanned this far beyond every board edge. The anchor is an
/// orientation's bounding-box origin, not a filled cell; the scan covers
/// every origin a piece grid could take and leaves it to the validator to
/// reject whatever does not land fully on the board.
pub const ANCHOR_MARGIN: i32 = 4;

/// A candidate or committed placement: a piece in one orientation anchored
/// at a board position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Placement {
    /// Piece id in the catalog.
    pub piece: usize,
    /// Index into the piece's orientation list.
    pub orientation: usize,
    /// Bounding-box origin row; may be negative.
    pub row: i32,
    /// Bounding-box origin column; may be negative.
    pub col: i32,
}

impl Placement {
    pub fn new(piece: usize, orientation: usize, row: i32, col: i32) -> Self {
        Placement {
            piece,
            orientation,
            row,
            col,
        }
    }

    /// The oriented variant this placement uses.
    pub fn oriented(&self) -> &'static Orientation {
        &catalog().piece(self.piece).orientations[self.orientation]
    }

    /// The oriented cell matrix this placement puts on the board.
    pub fn shape(&self) -> &'static Shape {
        &self.oriented().shape
    }

    /// Board cells covered by this placement.
    pub fn cells(&self) -> Vec<(i32, i32)> {
        self.shape()
            .filled()
            .map(|(dr, dc)| (self.row + dr, self.col + dc))
            .collect()
    }

    pub fn cell_count(&self) -> usize {
        catalog().piece(self.piece).cell_count
    }

    /// Bounding-box height of the oriented shape.
    pub fn height(&self) -> usize {
        self.shape().rows()
    }

    /// Bounding-box width of the oriented shape.
    pub fn width(&self) -> usize {
        self.shape().cols()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.piece, self.orientation, self.row, self.col
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePlacementError {
    #[error("expected format: (piece, orientation, row, col)")]
    Format,
    #[error("invalid number: {0}")]
    Number(String),
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or(ParsePlacementError::Format)?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ParsePlacementError::Format);
        }
        let piece = parts[0]
            .parse::<usize>()
            .map_err(|_| ParsePlacementError::Number(parts[0].to_string()))?;
        let orientation = parts[1]
            .parse::<usize>()
            .map_err(|_| ParsePlacementError::Number(parts[1].to_string()))?;
        let row = parts[2]
            .parse::<i32>()
            .map_err(|_| ParsePlacementError::Number(parts[2].to_string()))?;
        let col = parts[3]
            .parse::<i32>()
            .map_err(|_| ParsePlacementError::Number(parts[3].to_string()))?;
        Ok(Placement::new(piece, orientation, row, col))
    }
}

const ANCHOR_RANGE: std::ops::Range<i32> = -ANCHOR_MARGIN..(BOARD_SIZE as i32 + ANCHOR_MARGIN);

/// Enumerates every legal placement for `color`: every unused piece, every
/// orientation, every anchor in the overhang range. An empty result means
/// the color has no legal move right now.
pub fn generate_all_moves(
    board: &Board,
    color: Color,
    used: &PieceSet,
    is_first_move: bool,
) -> Vec<Placement> {
    let mut moves = Vec::new();
    for piece in catalog().pieces() {
        if used.contains(piece.id) {
            continue;
        }
        for (oi, orientation) in piece.orientations.iter().enumerate() {
            for row in ANCHOR_RANGE {
                for col in ANCHOR_RANGE {
                    if validate(board, row, col, &orientation.shape, color, is_first_move).is_ok() {
                        moves.push(Placement::new(piece.id, oi, row, col));
                    }
                }
            }
        }
    }
    moves
}

/// Cheap probe for "does this color have any legal move at all".
///
/// Pieces are tried smallest-first since a small piece is the most likely
/// to still fit, and the scan stops at the first hit. Every anchor is
/// visited, so a false result is authoritative and the caller may mark the
/// color out.
pub fn has_any_valid_move(
    board: &Board,
    color: Color,
    used: &PieceSet,
    is_first_move: bool,
) -> bool {
    let mut ids: Vec<usize> = (0..PIECE_COUNT).filter(|id| !used.contains(*id)).collect();
    ids.sort_by_key(|id| catalog().piece(*id).cell_count);
    for id in ids {
        for orientation in &catalog().piece(id).orientations {
            for row in ANCHOR_RANGE {
                for col in ANCHOR_RANGE {
                    if validate(board, row, col, &orientation.shape, color, is_first_move).is_ok() {
                        return true;
                    }
                }
            }
        }
    }
    false
}
