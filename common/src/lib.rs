pub mod game;
pub mod solver;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NR_PEGS: usize = 3;

/// Largest ring count `start` accepts. The solution trace has `2^rings`
/// entries, so this bound keeps solve requests from untrusted callers within
/// a few megabytes.
pub const MAX_RINGS: u8 = 20;

/// Ring size. Rings are numbered `1..=rings`, 1 being the smallest.
pub type Ring = u8;

/// A single ring move between two pegs.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Move {
    pub src: usize,
    pub dst: usize,
}

#[derive(Error, Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameError {
    #[error("peg index out of range, pegs are numbered 0 to 2")]
    InvalidPeg,
    #[error("source and destination are the same peg")]
    SamePeg,
    #[error("no rings on the source peg")]
    EmptySource,
    #[error("cannot place a ring on a smaller one")]
    RingTooLarge,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("ring count must be between 1 and {MAX_RINGS}")]
    InvalidConfiguration,
    #[error("no game in progress, start one first")]
    GameNotStarted,
}

/// The full three-peg configuration. Each peg lists its ring sizes from
/// bottom to top, so a peg is valid iff its entries strictly decrease.
///
/// Serializes as a plain list of three ring lists.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    pegs: [Vec<Ring>; NR_PEGS],
}

impl Board {
    /// All rings stacked on peg 0, largest at the bottom.
    pub fn start_position(rings: Ring) -> Board {
        let mut pegs: [Vec<Ring>; NR_PEGS] = Default::default();
        pegs[0] = (1..=rings).rev().collect();
        Board { pegs }
    }

    /// All rings stacked on peg 2, largest at the bottom.
    pub fn solved_position(rings: Ring) -> Board {
        let mut pegs: [Vec<Ring>; NR_PEGS] = Default::default();
        pegs[2] = (1..=rings).rev().collect();
        Board { pegs }
    }

    /// Parse a board from a compact text form: three peg descriptions
    /// separated by `|`, each listing ring digits from bottom to top.
    /// `.` and spaces mark empty space, so `"321|.|."` is the three-ring
    /// start position. Digits only, which limits the notation to nine rings.
    ///
    /// Panics on malformed input, this is meant for test fixtures.
    pub fn parse(s: &str) -> Board {
        let mut pegs = Vec::with_capacity(NR_PEGS);
        for part in s.split('|') {
            let mut peg = Vec::new();
            for c in part.chars() {
                match c {
                    ' ' | '.' => {}
                    '1'..='9' => peg.push(c as u8 - b'0'),
                    _ => panic!("invalid char {c:?} in board string"),
                }
            }
            pegs.push(peg);
        }

        let pegs: [Vec<Ring>; NR_PEGS] = pegs
            .try_into()
            .unwrap_or_else(|_| panic!("board string must have exactly {NR_PEGS} pegs"));
        Board { pegs }
    }

    pub fn pegs(&self) -> &[Vec<Ring>; NR_PEGS] {
        &self.pegs
    }

    /// Number of rings currently on the board, across all pegs.
    pub fn ring_count(&self) -> usize {
        self.pegs.iter().map(Vec::len).sum()
    }

    /// The single legality rule of the puzzle: one ring at a time, from the
    /// top of a non-empty peg, onto a different peg that is either empty or
    /// topped by a larger ring.
    pub fn check_move(&self, mv: Move) -> Result<(), GameError> {
        if mv.src >= NR_PEGS || mv.dst >= NR_PEGS {
            return Err(GameError::InvalidPeg);
        }
        if mv.src == mv.dst {
            return Err(GameError::SamePeg);
        }
        let Some(&moved) = self.pegs[mv.src].last() else {
            return Err(GameError::EmptySource);
        };
        if let Some(&target) = self.pegs[mv.dst].last() {
            if moved >= target {
                return Err(GameError::RingTooLarge);
            }
        }
        Ok(())
    }

    /// Check the move and carry it out. A rejected move leaves the board
    /// untouched.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), GameError> {
        self.check_move(mv)?;
        let ring = self.pegs[mv.src]
            .pop()
            .expect("source peg was checked to be non-empty");
        self.pegs[mv.dst].push(ring);
        Ok(())
    }

    /// The win condition: peg 2 holds all rings in strictly descending
    /// order from bottom to top.
    pub fn is_solved(&self, rings: Ring) -> bool {
        *self == Board::solved_position(rings)
    }
}
