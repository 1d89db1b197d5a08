//! # Four-color territory placement engine
//!
//! Rules and AI for a territory placement game on a fixed 20x20 grid. Four
//! colors each hold 21 polyomino pieces; a piece must touch the owner's
//! earlier pieces at a corner and never along an edge, and the first piece
//! of a color must cover its assigned board corner. Two, three or four
//! parties drive the four colors depending on topology.
//!
//! ## Components
//! - [`pieces`]: the canonical piece table and per-color starting corners
//! - [`transform`]: shape matrices and orientation generation
//! - [`rules`]: placement legality with tagged rejection reasons
//! - [`movegen`]: full legal-move enumeration and a cheap existence probe
//! - [`ai`]: tiered heuristic move selection behind one controller call
//! - [`players`]: party topologies and ally/opponent derivation
//! - [`turn`]: turn advancement, out tracking and end-of-game detection
//! - [`session`]: the authoritative state owner with snapshot undo
//!
//! ## Determinism
//! The engine is synchronous and single-threaded. All randomness flows
//! through a caller-supplied [`rand::Rng`], so a fixed seed replays the
//! same game move for move.

pub mod ai;
pub mod board;
pub mod movegen;
pub mod pieces;
pub mod players;
pub mod rules;
pub mod session;
pub mod transform;
pub mod turn;

pub use ai::{choose_move, select_move, Difficulty};
pub use board::{Board, Color, BOARD_SIZE, NUM_COLORS};
pub use movegen::{generate_all_moves, has_any_valid_move, Placement, ANCHOR_MARGIN};
pub use pieces::{catalog, start_corner, PieceSet, PIECE_COUNT, START_CORNERS};
pub use players::{PlayerMode, NEUTRAL_COLOR};
pub use rules::{validate, PlacementError};
pub use session::{GameSession, GameSnapshot, MoveError};
pub use transform::{orientations, Orientation, Shape};
pub use turn::{advance_turn, TurnOutcome, TurnState};
