//! The canonical piece table: 21 shapes from one to five cells, their
//! precomputed orientations, and each color's fixed starting corner.

use once_cell::sync::Lazy;

use crate::board::{Color, NUM_COLORS};
use crate::transform::{orientations, Orientation, Shape};

/// Number of distinct pieces per color.
pub const PIECE_COUNT: usize = 21;

/// Total cells across a full set of pieces.
pub const TOTAL_PIECE_CELLS: usize = 89;

/// Fixed starting corner per color, indexed by color id.
pub const START_CORNERS: [(i32, i32); NUM_COLORS] = [(0, 0), (0, 19), (19, 19), (19, 0)];

/// Starting corner a color's first placement must cover.
pub fn start_corner(color: Color) -> (i32, i32) {
    START_CORNERS[color as usize]
}

/// A canonical piece plus its precomputed unique orientations.
#[derive(Debug)]
pub struct PieceDef {
    pub id: usize,
    pub name: &'static str,
    pub shape: Shape,
    pub orientations: Vec<Orientation>,
    pub cell_count: usize,
}

/// The full piece table, built once on first use and shared everywhere.
#[derive(Debug)]
pub struct Catalog {
    pieces: Vec<PieceDef>,
}

impl Catalog {
    pub fn pieces(&self) -> &[PieceDef] {
        &self.pieces
    }

    pub fn piece(&self, id: usize) -> &PieceDef {
        &self.pieces[id]
    }
}

#[rustfmt::skip]
const RAW_SHAPES: [(&str, &[&[u8]]); PIECE_COUNT] = [
    ("O1", &[&[1]]),                                    // 1 square
    ("I2", &[&[1, 1]]),                                 // 2 bar
    ("V3", &[&[1, 0], &[1, 1]]),                        // 3 corner
    ("I3", &[&[1, 1, 1]]),                              // 3 bar
    ("O4", &[&[1, 1], &[1, 1]]),                        // 4 square
    ("I4", &[&[1, 1, 1, 1]]),                           // 4 bar
    ("S4", &[&[1, 1, 0], &[0, 1, 1]]),                  // 4 S
    ("T4", &[&[1, 1, 1], &[0, 1, 0]]),                  // 4 T
    ("L4", &[&[1, 0], &[1, 0], &[1, 1]]),               // 4 L
    ("I5", &[&[1, 1, 1, 1, 1]]),                        // 5 bar
    ("L5", &[&[1, 0], &[1, 0], &[1, 0], &[1, 1]]),      // 5 L
    ("P5", &[&[1, 1], &[1, 1], &[1, 0]]),               // 5 P
    ("U5", &[&[1, 0, 1], &[1, 1, 1]]),                  // 5 U
    ("T5", &[&[1, 1, 1], &[0, 1, 0], &[0, 1, 0]]),      // 5 T
    ("V5", &[&[1, 0, 0], &[1, 0, 0], &[1, 1, 1]]),      // 5 V
    ("F5", &[&[0, 1, 1], &[1, 1, 0], &[0, 1, 0]]),      // 5 F
    ("N5", &[&[0, 1], &[0, 1], &[1, 1], &[1, 0]]),      // 5 N
    ("X5", &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]]),      // 5 X
    ("Z5", &[&[1, 1, 0], &[0, 1, 0], &[0, 1, 1]]),      // 5 Z
    ("W5", &[&[1, 0, 0], &[1, 1, 0], &[0, 1, 1]]),      // 5 W
    ("Y5", &[&[0, 1], &[1, 1], &[0, 1], &[0, 1]]),      // 5 Y
];

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    let pieces = RAW_SHAPES
        .iter()
        .enumerate()
        .map(|(id, &(name, rows))| {
            let shape = Shape::from_rows(rows);
            let cell_count = shape.cell_count();
            let orientations = orientations(&shape);
            PieceDef {
                id,
                name,
                shape,
                orientations,
                cell_count,
            }
        })
        .collect();
    Catalog { pieces }
});

/// The shared piece table.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Pieces a color has already placed, in placement order.
///
/// Holding the placement order lets callers ask for a color's most recent
/// pieces; membership still behaves like a set since a piece id can be
/// recorded at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PieceSet {
    placed: Vec<usize>,
}

impl PieceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.placed.contains(&id)
    }

    /// Records a placed piece. Returns false if the id was already present.
    pub fn insert(&mut self, id: usize) -> bool {
        if self.contains(id) {
            return false;
        }
        self.placed.push(id);
        true
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.placed.iter().copied()
    }

    /// The most recently placed `n` piece ids, oldest first.
    pub fn recent(&self, n: usize) -> &[usize] {
        &self.placed[self.placed.len().saturating_sub(n)..]
    }

    /// Board cells covered by the placed pieces.
    pub fn cell_total(&self) -> usize {
        self.iter().map(|id| catalog().piece(id).cell_count).sum()
    }

    /// Cells still in hand. This is the standard score; lower is better.
    pub fn remaining_cells(&self) -> usize {
        TOTAL_PIECE_CELLS - self.cell_total()
    }
}
