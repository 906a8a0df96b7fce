//! Session module - the game state machine
//!
//! A [`Session`] owns the board, the current and next pieces, the score and
//! the level. It moves between three states:
//!
//! - **Running**: gravity ticks and movement intents apply.
//! - **Paused**: everything except pause toggling and reset is inert.
//! - **GameOver**: terminal; only reset leaves it.
//!
//! The session keeps no clock of its own. Whoever drives it calls
//! [`Session::tick`] once per gravity period and reads
//! [`Session::drop_interval_ms`] to know how long that period is.

use serde::Serialize;
use tracing::{debug, info};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::Result;
use crate::piece::{hard_drop_distance, rotate, spawn, try_move, Piece};
use crate::rng::{PieceSource, RandomPieces};
use crate::scoring::{
    drop_interval_ms, format_score, hard_drop_points, level_for_score, line_clear_points,
};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{GameAction, MIN_LEVEL};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SessionState {
    Running,
    Paused,
    GameOver,
}

/// What happened when a piece landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub lines_cleared: usize,
    /// Points awarded for the cleared rows
    pub points: u32,
    pub level_changed: bool,
    /// The piece that replaced the landed one does not fit
    pub game_over: bool,
}

/// Result of one gravity tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Ignored,
    /// The current piece moved down one row
    Fell,
    /// The current piece could not fall and was merged into the board
    Landed(Landing),
    /// The current piece does not fit where it is (blocked spawn)
    ToppedOut,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Session<S = RandomPieces> {
    board: Board,
    current: Piece,
    next: Piece,
    score: u32,
    level: u32,
    state: SessionState,
    source: S,
}

impl Session<RandomPieces> {
    /// Validate `config` and start a game with uniformly random pieces
    pub fn new(config: &GameConfig) -> Result<Self> {
        let source = match config.seed {
            Some(seed) => RandomPieces::new(seed),
            None => RandomPieces::from_entropy(),
        };
        Self::with_source(config, source)
    }
}

impl<S: PieceSource> Session<S> {
    /// Validate `config` and start a game drawing pieces from `source`
    pub fn with_source(config: &GameConfig, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_board(
            Board::new(config.width, config.height),
            source,
        ))
    }

    /// Start a running game on an existing board.
    ///
    /// Spawns `current` and `next` immediately. If the board already blocks
    /// the spawn, the first tick ends the game.
    pub fn with_board(board: Board, mut source: S) -> Self {
        let current = spawn(&mut source, board.width());
        let next = spawn(&mut source, board.width());
        Self {
            board,
            current,
            next,
            score: 0,
            level: MIN_LEVEL,
            state: SessionState::Running,
            source,
        }
    }

    /// Restore a score; the level is derived from it
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self.level = level_for_score(score);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Score zero-padded for display
    pub fn score_display(&self) -> String {
        format_score(self.score)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// Gravity period for the current level
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Apply one gravity tick
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }

        if !self.current.fits(&self.board) {
            self.end_game();
            return TickOutcome::ToppedOut;
        }

        match try_move(&self.current, &self.board, 0, 1) {
            Some(moved) => {
                self.current = moved;
                TickOutcome::Fell
            }
            None => TickOutcome::Landed(self.land()),
        }
    }

    /// Merge the current piece, clear rows, score, and bring in the next piece
    fn land(&mut self) -> Landing {
        self.board.merge(&self.current);
        let lines_cleared = self.board.clear_full_rows();

        let mut points = 0;
        let mut level_changed = false;
        if lines_cleared > 0 {
            let score_before = self.score;
            points = line_clear_points(lines_cleared, self.level);
            self.score = self.score.saturating_add(points);

            // Level follows the score as it was before this award.
            let level = level_for_score(score_before);
            if level != self.level {
                info!(from = self.level, to = level, "level changed");
                level_changed = true;
                self.level = level;
            }
        }

        debug!(
            kind = self.current.kind.as_str(),
            x = self.current.position.x,
            y = self.current.position.y,
            lines_cleared,
            points,
            score = self.score,
            "piece landed"
        );

        self.current = self.next;
        self.next = spawn(&mut self.source, self.board.width());

        let game_over = !self.current.fits(&self.board);
        if game_over {
            self.end_game();
        }

        Landing {
            lines_cleared,
            points,
            level_changed,
            game_over,
        }
    }

    fn end_game(&mut self) {
        self.state = SessionState::GameOver;
        info!(score = self.score, level = self.level, "game over");
    }

    fn shift(&mut self, dx: i32, dy: i32) -> bool {
        if !self.is_running() {
            return false;
        }
        match try_move(&self.current, &self.board, dx, dy) {
            Some(moved) => {
                self.current = moved;
                true
            }
            None => false,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1, 0)
    }

    /// Move down one row if possible. Never lands the piece.
    pub fn soft_drop(&mut self) -> bool {
        self.shift(0, 1)
    }

    /// Rotate clockwise; returns whether the shape changed
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let rotated = rotate(&self.current, &self.board);
        let changed = rotated != self.current;
        self.current = rotated;
        changed
    }

    /// Drop the current piece to its resting row and return the points earned.
    ///
    /// The piece is only repositioned; it lands on the next tick.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_running() {
            return 0;
        }
        let distance = hard_drop_distance(&self.current, &self.board);
        self.current = self.current.shifted(0, distance as i32);
        let points = hard_drop_points(distance);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Flip between Running and Paused. Has no effect after game over.
    pub fn toggle_pause(&mut self) -> bool {
        let paused = !self.is_paused();
        self.set_paused(paused)
    }

    /// Enter or leave Paused; returns whether the state changed
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let target = match (self.state, paused) {
            (SessionState::Running, true) => SessionState::Paused,
            (SessionState::Paused, false) => SessionState::Running,
            _ => return false,
        };
        self.state = target;
        debug!(paused, "pause toggled");
        true
    }

    /// Start over: empty board, zero score, level 1, fresh pieces
    pub fn reset(&mut self) {
        self.board.reset();
        self.score = 0;
        self.level = MIN_LEVEL;
        self.state = SessionState::Running;
        self.current = spawn(&mut self.source, self.board.width());
        self.next = spawn(&mut self.source, self.board.width());
        info!("session reset");
    }

    /// Apply a player intent; returns whether anything changed
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if action.is_movement() && !self.is_running() {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => {
                let before = self.current;
                self.hard_drop();
                before != self.current
            }
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.current = PieceSnapshot::from(self.current);
        out.next = PieceSnapshot::from(self.next);
        out.score = self.score;
        out.level = self.level;
        out.paused = self.is_paused();
        out.game_over = self.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
