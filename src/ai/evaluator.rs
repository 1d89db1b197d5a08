//! Heuristic scoring and selection of legal placements.
//!
//! The three difficulty tiers share a pool of scoring primitives and differ
//! in which ones they apply, how they weight them, and how much randomness
//! they mix in. Every candidate is scored independently against a scratch
//! copy of the board, the list is sorted by score, and the final pick is
//! uniform among the tier's top slice so equally strong games still vary.
//!
//! All randomness comes from the generator handed in by the caller; scoring
//! the same position with the same seed picks the same move.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

use crate::board::{Board, Color, BOARD_SIZE, DIAG_NEIGHBORS};
use crate::movegen::Placement;
use crate::pieces::PieceSet;
use crate::players::PlayerMode;

/// AI strength setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Novice,
    Balanced,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Novice => "novice",
            Difficulty::Balanced => "balanced",
            Difficulty::Advanced => "advanced",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown difficulty {0:?}; expected novice, balanced or advanced")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "novice" => Ok(Difficulty::Novice),
            "balanced" => Ok(Difficulty::Balanced),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Stage of the game, derived from how many pieces are on the board overall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Early,
    Mid,
    Late,
}

const BOARD_CENTER: (f64, f64) = (10.0, 10.0);

const NOVICE_SIZE_WEIGHT: f64 = 8.0;
const NOVICE_CENTER_RADIUS: f64 = 20.0;
const NOVICE_CENTER_WEIGHT: f64 = 0.6;
const NOVICE_CORNER_WEIGHT: f64 = 1.0;
const NOVICE_JITTER: f64 = 6.0;

const BALANCED_SIZE_WEIGHT: f64 = 6.0;
const BALANCED_CENTER_RADIUS: f64 = 25.0;
const BALANCED_CENTER_WEIGHT: f64 = 1.0;
const BALANCED_EDGE_PENALTY: f64 = 8.0;
const BALANCED_CORNER_WEIGHT: f64 = 2.5;
const BALANCED_TERRITORY_WEIGHT: f64 = 0.8;
const BALANCED_JITTER: f64 = 3.0;

const ADVANCED_SIZE_WEIGHT: f64 = 7.0;
const ADVANCED_CENTER_RADIUS: f64 = 25.0;
const ADVANCED_CENTER_RADIUS_LATE: f64 = 20.0;
const ADVANCED_CENTER_WEIGHT: f64 = 1.2;
const ADVANCED_CORNER_WEIGHT: f64 = 3.0;
const ADVANCED_TERRITORY_WEIGHT: f64 = 1.0;
const ADVANCED_BLOCKING_WEIGHT: f64 = 2.0;
const ADVANCED_BLOCKING_3P_FACTOR: f64 = 1.5;
const ADVANCED_ALLY_LINK_WEIGHT: f64 = 1.5;
const ADVANCED_SYNERGY_WEIGHT: f64 = 0.05;
const ADVANCED_VARIETY_WEIGHT: f64 = 0.5;
const ADVANCED_JITTER: f64 = 1.5;

/// Scores `moves` for `color` under the given tier and picks one.
///
/// Returns `None` only for an empty move list; the caller should then pass
/// the turn. `used` carries the placement record of all four colors so the
/// tiers can read the overall game phase and the opponents' recent pieces.
#[allow(clippy::too_many_arguments)]
pub fn select_move<R: Rng>(
    moves: &[Placement],
    board: &Board,
    color: Color,
    difficulty: Difficulty,
    used: &[PieceSet; 4],
    is_first_move: bool,
    mode: PlayerMode,
    allies: &[Color],
    opponents: &[Color],
    rng: &mut R,
) -> Option<Placement> {
    if moves.is_empty() {
        return None;
    }

    let total_placed: usize = used.iter().map(PieceSet::len).sum();
    let mut scored: Vec<(f64, &Placement)> = Vec::with_capacity(moves.len());
    for mv in moves {
        let score = score_move(
            mv,
            board,
            color,
            difficulty,
            used,
            is_first_move,
            mode,
            allies,
            opponents,
            total_placed,
            rng,
        );
        scored.push((score, mv));
    }
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let k = match difficulty {
        Difficulty::Novice => ((scored.len() * 2) / 5).max(1),
        Difficulty::Balanced => scored.len().min(5),
        Difficulty::Advanced => scored.len().min(3),
    };
    let pick = rng.random_range(0..k);
    Some(*scored[pick].1)
}

#[allow(clippy::too_many_arguments)]
fn score_move<R: Rng>(
    mv: &Placement,
    board: &Board,
    color: Color,
    difficulty: Difficulty,
    used: &[PieceSet; 4],
    is_first_move: bool,
    mode: PlayerMode,
    allies: &[Color],
    opponents: &[Color],
    total_placed: usize,
    rng: &mut R,
) -> f64 {
    let phase = phase_for(difficulty, total_placed, is_first_move);
    let cells = mv.cells();
    let mut after = board.clone();
    after.place(&cells, color);

    let mut score = 0.0;
    match difficulty {
        Difficulty::Novice => {
            score += NOVICE_SIZE_WEIGHT * mv.cell_count() as f64;
            score += center_bonus(&cells, NOVICE_CENTER_RADIUS, NOVICE_CENTER_WEIGHT);
            score += NOVICE_CORNER_WEIGHT * corner_connectivity(&after, &cells, color, allies) as f64;
            score += rng.random::<f64>() * NOVICE_JITTER;
        }
        Difficulty::Balanced => {
            score += size_preference(mv.cell_count(), phase, BALANCED_SIZE_WEIGHT);
            score += center_bonus(&cells, BALANCED_CENTER_RADIUS, BALANCED_CENTER_WEIGHT);
            if touches_rim(mv) {
                score -= BALANCED_EDGE_PENALTY;
            }
            score += BALANCED_CORNER_WEIGHT * corner_connectivity(&after, &cells, color, allies) as f64;
            score += BALANCED_TERRITORY_WEIGHT * territory(&after, allies) as f64;
            score += rng.random::<f64>() * BALANCED_JITTER;
        }
        Difficulty::Advanced => {
            score += size_preference(mv.cell_count(), phase, ADVANCED_SIZE_WEIGHT);
            let radius = if phase == Phase::Late {
                ADVANCED_CENTER_RADIUS_LATE
            } else {
                ADVANCED_CENTER_RADIUS
            };
            score += center_bonus(&cells, radius, ADVANCED_CENTER_WEIGHT);
            score += ADVANCED_CORNER_WEIGHT * corner_connectivity(&after, &cells, color, allies) as f64;
            score += ADVANCED_TERRITORY_WEIGHT * territory(&after, allies) as f64;
            let blocking_weight = if mode.party_count() == 3 {
                ADVANCED_BLOCKING_WEIGHT * ADVANCED_BLOCKING_3P_FACTOR
            } else {
                ADVANCED_BLOCKING_WEIGHT
            };
            score += blocking_weight * blocking_value(board, &cells, opponents) as f64;
            if phase == Phase::Late {
                score += ADVANCED_ALLY_LINK_WEIGHT * ally_contact(board, &cells, allies) as f64;
            }
            if mode.party_count() == 2 {
                score += ADVANCED_SYNERGY_WEIGHT * ally_synergy(&after, allies);
            }
            score += variety_bonus(mv.piece, color, used, opponents);
            score += rng.random::<f64>() * ADVANCED_JITTER;
        }
    }
    score
}

fn phase_for(difficulty: Difficulty, total_placed: usize, is_first_move: bool) -> Phase {
    if is_first_move {
        return Phase::Early;
    }
    match difficulty {
        // Novice plays the opening heuristic for the whole game.
        Difficulty::Novice => Phase::Early,
        Difficulty::Balanced => {
            if total_placed < 20 {
                Phase::Early
            } else {
                Phase::Late
            }
        }
        Difficulty::Advanced => {
            if total_placed < 16 {
                Phase::Early
            } else if total_placed < 48 {
                Phase::Mid
            } else {
                Phase::Late
            }
        }
    }
}

/// Big pieces early to claim ground and save the small ones; small pieces
/// late to squeeze into what is left.
fn size_preference(cell_count: usize, phase: Phase, weight: f64) -> f64 {
    let n = cell_count as f64;
    match phase {
        Phase::Early => weight * n,
        Phase::Mid => weight * 0.5 * n,
        Phase::Late => weight * (6.0 - n),
    }
}

/// Bounded bonus for playing toward the middle, zero past `radius`.
fn center_bonus(cells: &[(i32, i32)], radius: f64, weight: f64) -> f64 {
    let n = cells.len() as f64;
    let cr = cells.iter().map(|(r, _)| *r as f64).sum::<f64>() / n;
    let cc = cells.iter().map(|(_, c)| *c as f64).sum::<f64>() / n;
    let dist = ((cr - BOARD_CENTER.0).powi(2) + (cc - BOARD_CENTER.1).powi(2)).sqrt();
    if dist >= radius {
        0.0
    } else {
        weight * (radius - dist)
    }
}

/// True when the bounding box comes within one cell of the board edge.
fn touches_rim(mv: &Placement) -> bool {
    let last = BOARD_SIZE as i32 - 1;
    mv.row <= 1
        || mv.col <= 1
        || mv.row + mv.height() as i32 - 1 >= last - 1
        || mv.col + mv.width() as i32 - 1 >= last - 1
}

/// Diagonal neighbors of the placed cells that stay usable afterwards:
/// empty squares, or squares held by an allied color other than our own.
/// A proxy for how many follow-up placements the move leaves open.
fn corner_connectivity(
    after: &Board,
    cells: &[(i32, i32)],
    color: Color,
    allies: &[Color],
) -> usize {
    let mut seen = HashSet::new();
    for &(r, c) in cells {
        for &(dr, dc) in &DIAG_NEIGHBORS {
            let (nr, nc) = (r + dr, c + dc);
            if !Board::in_bounds(nr, nc) {
                continue;
            }
            match after.color_at(nr, nc) {
                None => {
                    seen.insert((nr, nc));
                }
                Some(held) if held != color && allies.contains(&held) => {
                    seen.insert((nr, nc));
                }
                _ => {}
            }
        }
    }
    seen.len()
}

/// Empty cells one diagonal step from any allied cell, counted once each.
/// Measures expansion room, not a full reachability sweep.
fn territory(after: &Board, allies: &[Color]) -> usize {
    let mut count = 0;
    for r in 0..BOARD_SIZE as i32 {
        for c in 0..BOARD_SIZE as i32 {
            if after.color_at(r, c).is_some() {
                continue;
            }
            let reachable = DIAG_NEIGHBORS.iter().any(|&(dr, dc)| {
                matches!(after.color_at(r + dr, c + dc), Some(held) if allies.contains(&held))
            });
            if reachable {
                count += 1;
            }
        }
    }
    count
}

/// Newly occupied cells that sit diagonally next to an opponent piece,
/// denying the opponent that expansion corner.
fn blocking_value(board: &Board, cells: &[(i32, i32)], opponents: &[Color]) -> usize {
    cells
        .iter()
        .filter(|&&(r, c)| {
            DIAG_NEIGHBORS.iter().any(|&(dr, dc)| {
                matches!(board.color_at(r + dr, c + dc), Some(held) if opponents.contains(&held))
            })
        })
        .count()
}

/// Allied cells already on the board that the move touches diagonally.
fn ally_contact(board: &Board, cells: &[(i32, i32)], allies: &[Color]) -> usize {
    let mut seen = HashSet::new();
    for &(r, c) in cells {
        for &(dr, dc) in &DIAG_NEIGHBORS {
            if matches!(board.color_at(r + dr, c + dc), Some(held) if allies.contains(&held)) {
                seen.insert((r + dr, c + dc));
            }
        }
    }
    seen.len()
}

/// Pairwise proximity between the two allied colors, each pair within a
/// 7x7 window contributing more the closer it sits.
fn ally_synergy(after: &Board, allies: &[Color]) -> f64 {
    if allies.len() != 2 {
        return 0.0;
    }
    let (a, b) = (allies[0], allies[1]);
    let mut bonus = 0.0;
    for r in 0..BOARD_SIZE as i32 {
        for c in 0..BOARD_SIZE as i32 {
            if after.color_at(r, c) != Some(a) {
                continue;
            }
            for dr in -3..=3 {
                for dc in -3..=3 {
                    if after.color_at(r + dr, c + dc) == Some(b) {
                        let dist = dr.abs() + dc.abs();
                        bonus += f64::max(0.0, 7.0 - dist as f64);
                    }
                }
            }
        }
    }
    bonus
}

/// Small bonus discouraging echoes of an opponent's recent piece choices.
fn variety_bonus(piece: usize, color: Color, used: &[PieceSet; 4], opponents: &[Color]) -> f64 {
    let base = ADVANCED_VARIETY_WEIGHT * (color as f64 + 1.0);
    let echoed = opponents
        .iter()
        .any(|&op| used[op as usize].recent(3).contains(&piece));
    if echoed {
        base * 0.25
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::generate_all_moves;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn fresh_used() -> [PieceSet; 4] {
        Default::default()
    }

    #[test]
    fn test_empty_move_list_yields_none() {
        let board = Board::new();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let picked = select_move(
            &[],
            &board,
            0,
            Difficulty::Balanced,
            &fresh_used(),
            true,
            PlayerMode::FourParty,
            &[0],
            &[1, 2, 3],
            &mut rng,
        );
        assert_eq!(picked, None);
    }

    #[test]
    fn test_single_candidate_is_always_picked() {
        let board = Board::new();
        let only = Placement::new(0, 0, 0, 0);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        for difficulty in [Difficulty::Novice, Difficulty::Balanced, Difficulty::Advanced] {
            let picked = select_move(
                &[only],
                &board,
                0,
                difficulty,
                &fresh_used(),
                true,
                PlayerMode::FourParty,
                &[0],
                &[1, 2, 3],
                &mut rng,
            );
            assert_eq!(picked, Some(only));
        }
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let board = Board::new();
        let used = fresh_used();
        let mode = PlayerMode::FourParty;
        let moves = generate_all_moves(&board, 0, &used[0], true);
        let sample = &moves[..10];
        let pick = |seed: u64| {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            select_move(
                sample,
                &board,
                0,
                Difficulty::Advanced,
                &used,
                true,
                mode,
                &mode.ally_colors(0, 0),
                &mode.opponent_colors(0, 0),
                &mut rng,
            )
        };
        let first = pick(99);
        assert!(first.is_some());
        assert_eq!(first, pick(99));
        assert_eq!(pick(7), pick(7));
    }

    #[test]
    fn test_territory_counts_diagonal_reach_once() {
        let mut board = Board::new();
        board.place(&[(5, 5)], 0);
        assert_eq!(territory(&board, &[0]), 4);
        let mut corner = Board::new();
        corner.place(&[(0, 0)], 0);
        assert_eq!(territory(&corner, &[0]), 1);
    }

    #[test]
    fn test_blocking_value_sees_opponent_corners() {
        let mut board = Board::new();
        board.place(&[(5, 5)], 1);
        assert_eq!(blocking_value(&board, &[(4, 4)], &[1]), 1);
        assert_eq!(blocking_value(&board, &[(4, 5)], &[1]), 0);
        assert_eq!(blocking_value(&board, &[(4, 4)], &[2]), 0);
    }

    #[test]
    fn test_corner_connectivity_excludes_own_and_opponent_cells() {
        let mut board = Board::new();
        board.place(&[(5, 5)], 0);
        board.place(&[(4, 4)], 1);
        // Of (5, 5)'s diagonals, (4, 4) is an opponent; the other three are
        // open.
        assert_eq!(corner_connectivity(&board, &[(5, 5)], 0, &[0]), 3);
        // With color 1 as an ally the occupied diagonal counts again.
        assert_eq!(corner_connectivity(&board, &[(5, 5)], 0, &[0, 1]), 4);
    }

    #[test]
    fn test_size_preference_flips_between_phases() {
        assert!(size_preference(5, Phase::Early, 1.0) > size_preference(1, Phase::Early, 1.0));
        assert!(size_preference(1, Phase::Late, 1.0) > size_preference(5, Phase::Late, 1.0));
    }

    #[test]
    fn test_center_bonus_is_bounded_and_decays() {
        let mid = center_bonus(&[(10, 10)], 20.0, 1.0);
        let rim = center_bonus(&[(0, 0)], 20.0, 1.0);
        assert!(mid > rim);
        assert!(rim > 0.0);
        assert_eq!(center_bonus(&[(0, 0)], 10.0, 1.0), 0.0);
    }

    #[test]
    fn test_variety_bonus_drops_on_recent_echo() {
        let mut used = fresh_used();
        used[1].insert(3);
        used[1].insert(7);
        let fresh = variety_bonus(5, 0, &used, &[1]);
        let echoed = variety_bonus(7, 0, &used, &[1]);
        assert!(echoed < fresh);
    }
}
