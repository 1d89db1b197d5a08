//! Shape matrices and the orientation generator.
//!
//! A shape is a tight rectangular 0/1 matrix. Orientations are its images
//! under rotation and mirroring, deduplicated structurally so symmetric
//! shapes collapse to the few variants that actually differ.

use std::collections::HashSet;

/// Rectangular 0/1 cell matrix with a tight bounding box.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Shape {
    cells: Vec<Vec<u8>>,
}

impl Shape {
    /// Builds a shape from row slices. Rows must be non-empty and rectangular.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let cells: Vec<Vec<u8>> = rows.iter().map(|row| row.to_vec()).collect();
        debug_assert!(!cells.is_empty() && !cells[0].is_empty());
        debug_assert!(cells.iter().all(|row| row.len() == cells[0].len()));
        Shape { cells }
    }

    /// Bounding-box height.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Bounding-box width.
    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] != 0
    }

    /// Offsets of the filled cells relative to the bounding-box origin,
    /// in row-major order.
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v != 0)
                .map(move |(c, _)| (r as i32, c as i32))
        })
    }

    /// Number of filled cells.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().flatten().filter(|v| **v != 0).count()
    }

    /// Image of the shape rotated 90 degrees clockwise.
    pub fn rotated_cw(&self) -> Shape {
        let (h, w) = (self.rows(), self.cols());
        let mut out = vec![vec![0u8; h]; w];
        for r in 0..h {
            for c in 0..w {
                out[c][h - 1 - r] = self.cells[r][c];
            }
        }
        Shape { cells: out }
    }

    /// Mirror image (columns reversed).
    pub fn mirrored(&self) -> Shape {
        let cells = self
            .cells
            .iter()
            .map(|row| row.iter().rev().copied().collect())
            .collect();
        Shape { cells }
    }

    /// Canonical row-major form used to deduplicate orientations.
    pub fn key(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| if *v != 0 { '1' } else { '0' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// One orientation of a shape.
///
/// The rotation and mirror tags are display metadata only. They do not
/// compose across repeated transforms; the cell matrix is the authoritative
/// geometry everywhere.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Orientation {
    pub shape: Shape,
    /// Quarter-turn label in degrees: 0, 90, 180 or 270.
    pub rotation: u16,
    pub mirrored: bool,
}

/// Returns the deduplicated images of `base` under rotation and mirror.
///
/// Mirror is the outer loop, quarter-turns the inner one; each step rotates
/// the previous result clockwise. The first structurally new matrix wins,
/// so a fully symmetric shape yields one orientation and a fully asymmetric
/// one yields all eight.
pub fn orientations(base: &Shape) -> Vec<Orientation> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for &mirrored in &[false, true] {
        let mut current = if mirrored {
            base.mirrored()
        } else {
            base.clone()
        };
        for step in 0..4u16 {
            if step > 0 {
                current = current.rotated_cw();
            }
            if seen.insert(current.key()) {
                out.push(Orientation {
                    shape: current.clone(),
                    rotation: step * 90,
                    mirrored,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> Shape {
        Shape::from_rows(&[&[1, 0], &[1, 0], &[1, 1]])
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        let shape = l_shape();
        let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(shape, back);
    }

    #[test]
    fn test_double_mirror_restores_shape() {
        let shape = l_shape();
        assert_eq!(shape, shape.mirrored().mirrored());
    }

    #[test]
    fn test_square_collapses_to_one_orientation() {
        let square = Shape::from_rows(&[&[1, 1], &[1, 1]]);
        let variants = orientations(&square);
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].rotation, 0);
        assert!(!variants[0].mirrored);
    }

    #[test]
    fn test_asymmetric_shape_yields_eight() {
        assert_eq!(orientations(&l_shape()).len(), 8);
    }

    #[test]
    fn test_rotation_geometry() {
        let bar = Shape::from_rows(&[&[1, 1, 1]]);
        let rotated = bar.rotated_cw();
        assert_eq!(rotated.rows(), 3);
        assert_eq!(rotated.cols(), 1);
        assert_eq!(rotated.cell_count(), 3);
    }

    #[test]
    fn test_filled_offsets_are_row_major() {
        let shape = Shape::from_rows(&[&[0, 1], &[1, 1]]);
        let offsets: Vec<_> = shape.filled().collect();
        assert_eq!(offsets, vec![(0, 1), (1, 0), (1, 1)]);
    }
}
