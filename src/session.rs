//! Authoritative game state: the single owner of the live board, the
//! per-color bookkeeping, and the undo history.
//!
//! The session is the one place game state mutates. Every committed
//! placement is validated first, a full snapshot is pushed for undo, and
//! the turn resolver runs afterwards, so outside of the very first turn the
//! active color always has at least one legal move or the game is over.
//! Everything else in the crate works on immutable views or clones.

use rand::Rng;
use thiserror::Error;

use crate::ai::{choose_move, Difficulty};
use crate::board::{Board, Color, NUM_COLORS};
use crate::movegen::{generate_all_moves, Placement};
use crate::pieces::PieceSet;
use crate::players::{PlayerMode, NEUTRAL_COLOR};
use crate::rules::{validate, PlacementError};
use crate::turn::{advance_turn, TurnState};

/// Why a commit attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("that piece was already placed by this color")]
    PieceAlreadyUsed,
    #[error(transparent)]
    Rule(#[from] PlacementError),
}

/// Immutable copy of everything a turn can change. One snapshot is pushed
/// per committed placement; undo pops one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub used: [PieceSet; NUM_COLORS],
    pub first_move: [bool; NUM_COLORS],
    pub turn: TurnState,
}

impl GameSnapshot {
    fn initial() -> GameSnapshot {
        GameSnapshot {
            board: Board::new(),
            used: Default::default(),
            first_move: [true; NUM_COLORS],
            turn: TurnState::initial(),
        }
    }
}

/// Owns the live game and its history stack.
#[derive(Clone, Debug)]
pub struct GameSession {
    mode: PlayerMode,
    state: GameSnapshot,
    history: Vec<GameSnapshot>,
    /// Party playing the neutral color on the current turn (three-party
    /// games only; mirrors the resolver's pointer otherwise).
    neutral_holder: u8,
}

impl GameSession {
    pub fn new(mode: PlayerMode) -> GameSession {
        GameSession {
            mode,
            state: GameSnapshot::initial(),
            history: Vec::new(),
            neutral_holder: 0,
        }
    }

    pub fn mode(&self) -> PlayerMode {
        self.mode
    }

    pub fn get_board(&self) -> &Board {
        &self.state.board
    }

    pub fn get_state(&self) -> &GameSnapshot {
        &self.state
    }

    pub fn active_color(&self) -> Color {
        self.state.turn.active
    }

    pub fn is_over(&self) -> bool {
        self.state.turn.terminal
    }

    /// Number of committed placements still undoable.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Party whose alliance applies to the current turn. For a party-owned
    /// color this is the resolver's pointer (it says who holds the neutral
    /// color right now); for the neutral color itself it is the party the
    /// resolver picked when the turn began.
    pub fn current_neutral_holder(&self) -> u8 {
        if self.mode == PlayerMode::ThreeParty && self.state.turn.active == NEUTRAL_COLOR {
            self.neutral_holder
        } else {
            self.state.turn.neutral_pointer
        }
    }

    /// Legal moves for the color to move.
    pub fn legal_moves(&self) -> Vec<Placement> {
        if self.is_over() {
            return Vec::new();
        }
        let color = self.state.turn.active;
        generate_all_moves(
            &self.state.board,
            color,
            &self.state.used[color as usize],
            self.state.first_move[color as usize],
        )
    }

    /// Validates and commits a placement for the active color, then advances
    /// the turn. A snapshot is pushed first so the commit can be undone.
    pub fn try_place(&mut self, mv: &Placement) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let color = self.state.turn.active;
        if self.state.used[color as usize].contains(mv.piece) {
            return Err(MoveError::PieceAlreadyUsed);
        }
        validate(
            &self.state.board,
            mv.row,
            mv.col,
            mv.shape(),
            color,
            self.state.first_move[color as usize],
        )?;

        self.history.push(self.state.clone());
        self.state.board.place(&mv.cells(), color);
        self.state.used[color as usize].insert(mv.piece);
        self.state.first_move[color as usize] = false;
        self.advance();
        Ok(())
    }

    fn advance(&mut self) {
        let turn = self.state.turn;
        let outcome = advance_turn(
            self.mode,
            turn.active,
            &self.state.board,
            &self.state.used,
            &self.state.first_move,
            turn.out,
            turn.neutral_pointer,
        );
        self.state.turn = TurnState {
            active: outcome.next,
            neutral_pointer: outcome.neutral_pointer,
            out: outcome.out,
            terminal: outcome.terminal,
        };
        if let Some(holder) = outcome.neutral_holder {
            self.neutral_holder = holder;
        }
    }

    /// Asks the AI to pick and commit a move for the active color. `None`
    /// means the game is over or the color had nothing to play.
    pub fn play_ai_turn<R: Rng>(&mut self, difficulty: Difficulty, rng: &mut R) -> Option<Placement> {
        if self.is_over() {
            return None;
        }
        let mv = choose_move(
            &self.state.board,
            self.state.turn.active,
            difficulty,
            &self.state.used,
            &self.state.first_move,
            self.mode,
            self.current_neutral_holder(),
            rng,
        )?;
        let committed = self.try_place(&mv);
        debug_assert!(committed.is_ok(), "evaluator chose an illegal move {mv}");
        committed.ok().map(|_| mv)
    }

    /// Reverts to the snapshot taken before the last committed placement.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.state = snapshot;
                true
            }
            None => false,
        }
    }

    /// Cells a color still has in hand. Standard scoring, lower is better.
    pub fn remaining_cells(&self, color: Color) -> usize {
        self.state.used[color as usize].remaining_cells()
    }

    /// Per-party standings as (party, cells left across owned colors). The
    /// three-party neutral color belongs to nobody and is not counted.
    pub fn party_scores(&self) -> Vec<(u8, usize)> {
        (0..self.mode.party_count() as u8)
            .map(|party| {
                let total = self
                    .mode
                    .colors_of_party(party)
                    .iter()
                    .map(|&c| self.remaining_cells(c))
                    .sum();
                (party, total)
            })
            .collect()
    }

    /// Winning party once the game is over; `None` while in progress or on
    /// a shared best score.
    pub fn winner(&self) -> Option<u8> {
        if !self.is_over() {
            return None;
        }
        let scores = self.party_scores();
        let best = scores.iter().map(|(_, s)| *s).min()?;
        let mut leaders = scores.iter().filter(|(_, s)| *s == best);
        let first = *leaders.next()?;
        if leaders.next().is_some() {
            None
        } else {
            Some(first.0)
        }
    }
}
