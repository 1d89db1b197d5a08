//! Placement legality.
//!
//! Checks run in a fixed order and stop at the first failure: bounds,
//! overlap, corner contact, edge exclusion. A first move must cover the
//! color's starting corner instead of touching an earlier piece, and the
//! edge-exclusion check does not apply to it.

use thiserror::Error;

use crate::board::{Board, Color, DIAG_NEIGHBORS, EDGE_NEIGHBORS};
use crate::pieces::start_corner;
use crate::transform::Shape;

/// Why a candidate placement is illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("a cell falls outside the board")]
    OutOfBounds,
    #[error("a cell lands on an occupied square")]
    Overlap,
    #[error("no corner contact with the color's own pieces")]
    MissingCornerTouch,
    #[error("shares an edge with a same-color piece")]
    EdgeAdjacency,
}

/// Decides whether `shape` anchored at (`row`, `col`) is a legal placement
/// for `color`. The anchor is the bounding-box origin and may be negative as
/// long as every filled cell lands on the board. Never mutates the board.
pub fn validate(
    board: &Board,
    row: i32,
    col: i32,
    shape: &Shape,
    color: Color,
    is_first_move: bool,
) -> Result<(), PlacementError> {
    for (dr, dc) in shape.filled() {
        if !Board::in_bounds(row + dr, col + dc) {
            return Err(PlacementError::OutOfBounds);
        }
    }

    for (dr, dc) in shape.filled() {
        if board.color_at(row + dr, col + dc).is_some() {
            return Err(PlacementError::Overlap);
        }
    }

    if is_first_move {
        let corner = start_corner(color);
        let covers_corner = shape
            .filled()
            .any(|(dr, dc)| (row + dr, col + dc) == corner);
        if !covers_corner {
            return Err(PlacementError::MissingCornerTouch);
        }
        return Ok(());
    }

    let corner_touch = shape.filled().any(|(dr, dc)| {
        DIAG_NEIGHBORS
            .iter()
            .any(|(nr, nc)| board.color_at(row + dr + nr, col + dc + nc) == Some(color))
    });
    if !corner_touch {
        return Err(PlacementError::MissingCornerTouch);
    }

    let edge_contact = shape.filled().any(|(dr, dc)| {
        EDGE_NEIGHBORS
            .iter()
            .any(|(nr, nc)| board.color_at(row + dr + nr, col + dc + nc) == Some(color))
    });
    if edge_contact {
        return Err(PlacementError::EdgeAdjacency);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::catalog;

    fn mono() -> &'static Shape {
        &catalog().piece(0).shape
    }

    #[test]
    fn test_first_move_on_corner_is_valid() {
        let board = Board::new();
        assert_eq!(validate(&board, 0, 0, mono(), 0, true), Ok(()));
    }

    #[test]
    fn test_first_move_off_corner_is_rejected() {
        let board = Board::new();
        assert_eq!(
            validate(&board, 0, 1, mono(), 0, true),
            Err(PlacementError::MissingCornerTouch)
        );
        assert_eq!(
            validate(&board, 1, 1, mono(), 0, true),
            Err(PlacementError::MissingCornerTouch)
        );
    }

    #[test]
    fn test_each_color_has_its_own_corner() {
        let board = Board::new();
        assert_eq!(validate(&board, 0, 19, mono(), 1, true), Ok(()));
        assert_eq!(validate(&board, 19, 19, mono(), 2, true), Ok(()));
        assert_eq!(validate(&board, 19, 0, mono(), 3, true), Ok(()));
        assert_eq!(
            validate(&board, 0, 0, mono(), 1, true),
            Err(PlacementError::MissingCornerTouch)
        );
    }

    #[test]
    fn test_out_of_bounds_cell() {
        let board = Board::new();
        let bar = &catalog().piece(3).shape; // 1x3
        assert_eq!(
            validate(&board, 0, 18, bar, 0, true),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            validate(&board, -1, 0, mono(), 0, true),
            Err(PlacementError::OutOfBounds)
        );
    }

    #[test]
    fn test_overlap_reported_before_corner_rules() {
        let mut board = Board::new();
        board.place(&[(0, 0)], 1);
        assert_eq!(
            validate(&board, 0, 0, mono(), 0, true),
            Err(PlacementError::Overlap)
        );
    }

    #[test]
    fn test_diagonal_contact_is_valid_edge_contact_is_not() {
        let mut board = Board::new();
        board.place(&[(0, 0)], 0);
        assert_eq!(
            validate(&board, 1, 0, mono(), 0, false),
            Err(PlacementError::EdgeAdjacency)
        );
        assert_eq!(validate(&board, 1, 1, mono(), 0, false), Ok(()));
    }

    #[test]
    fn test_edge_adjacency_beats_valid_corner_contact() {
        // The 1x2 bar at (1, 0) touches (0, 0) diagonally through its second
        // cell but shares an edge through its first; it must be rejected for
        // the edge contact.
        let mut board = Board::new();
        board.place(&[(0, 0)], 0);
        let bar = &catalog().piece(1).shape;
        assert_eq!(
            validate(&board, 1, 0, bar, 0, false),
            Err(PlacementError::EdgeAdjacency)
        );
    }

    #[test]
    fn test_other_color_edge_contact_is_allowed() {
        let mut board = Board::new();
        board.place(&[(0, 0)], 0);
        board.place(&[(2, 2)], 1);
        // Touches color 1 orthogonally, own color only diagonally.
        assert_eq!(validate(&board, 1, 1, mono(), 0, false), Ok(()));
    }

    #[test]
    fn test_no_contact_at_all_is_missing_corner() {
        let mut board = Board::new();
        board.place(&[(0, 0)], 0);
        assert_eq!(
            validate(&board, 5, 5, mono(), 0, false),
            Err(PlacementError::MissingCornerTouch)
        );
    }
}
