use crate::{solver, Board, GameError, Move, Ring, MAX_RINGS};

/// A running game: the configured ring count, the live board, and the
/// snapshot history that backs undo.
///
/// Invariant: `history` is never empty, its first entry is the start
/// position and its last entry equals `board`.
#[derive(Clone, PartialEq, Eq, Debug)]
struct Session {
    rings: Ring,
    board: Board,
    history: Vec<Board>,
}

/// The Tower of Hanoi engine.
///
/// A fresh `Game` is uninitialized: every operation except [`Game::start`]
/// fails with [`GameError::GameNotStarted`] until a game has been started.
/// `start` can also be called on a running game to begin over, possibly with
/// a different ring count.
#[derive(Clone, Debug, Default)]
pub struct Game {
    session: Option<Session>,
}

impl Game {
    pub fn new() -> Game {
        Game { session: None }
    }

    fn session(&self) -> Result<&Session, GameError> {
        self.session.as_ref().ok_or(GameError::GameNotStarted)
    }

    fn session_mut(&mut self) -> Result<&mut Session, GameError> {
        self.session.as_mut().ok_or(GameError::GameNotStarted)
    }

    /// Begin a game with the given number of rings, all stacked on peg 0.
    /// Any previous game state and history is discarded.
    pub fn start(&mut self, rings: Ring) -> Result<&Board, GameError> {
        if rings == 0 || rings > MAX_RINGS {
            return Err(GameError::InvalidConfiguration);
        }

        let board = Board::start_position(rings);
        let session = self.session.insert(Session {
            rings,
            history: vec![board.clone()],
            board,
        });
        Ok(&session.board)
    }

    /// The current board.
    pub fn board(&self) -> Result<&Board, GameError> {
        Ok(&self.session()?.board)
    }

    /// The configured ring count.
    pub fn rings(&self) -> Result<Ring, GameError> {
        Ok(self.session()?.rings)
    }

    /// Move the top ring of `src` onto `dst`. On success the resulting
    /// board is recorded in the history; a rejected move changes nothing.
    pub fn move_ring(&mut self, mv: Move) -> Result<(), GameError> {
        let session = self.session_mut()?;
        session.board.apply_move(mv)?;
        session.history.push(session.board.clone());
        Ok(())
    }

    /// Take back the most recent move.
    pub fn undo(&mut self) -> Result<(), GameError> {
        let session = self.session_mut()?;
        if session.history.len() <= 1 {
            return Err(GameError::NothingToUndo);
        }

        session.history.pop();
        session.board = session
            .history
            .last()
            .expect("history always keeps the start snapshot")
            .clone();
        Ok(())
    }

    /// Compute the optimal solution for the configured ring count: the full
    /// sequence of `2^rings` boards from the start position to the solved
    /// one, start included.
    ///
    /// This is a pure query against a private working board. The live board
    /// and the undo history are left untouched, whatever position the game
    /// is in; applying any of it is up to the caller.
    pub fn solve(&self) -> Result<Vec<Board>, GameError> {
        Ok(solver::solution_trace(self.session()?.rings))
    }

    /// Has the puzzle been completed, i.e. are all rings on peg 2?
    pub fn is_solved(&self) -> Result<bool, GameError> {
        let session = self.session()?;
        Ok(session.board.is_solved(session.rings))
    }

    pub fn can_undo(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.history.len() > 1)
    }

    /// Every board reached so far, oldest first. The first entry is the
    /// start position and the last one is the current board.
    pub fn history(&self) -> Result<&[Board], GameError> {
        Ok(&self.session()?.history)
    }
}
