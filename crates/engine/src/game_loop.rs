//! Single-threaded event loop
//!
//! [`GameLoop`] owns one [`Session`] and its [`GravityTimer`]. Gravity ticks
//! and player intents are applied one at a time, each to completion, so the
//! session is never observed mid-update.
//!
//! After every event the timer is brought back in line with the session:
//! cancelled while paused or after game over, started on resume, and
//! restarted when the level changes or the game is reset.

use tracing::debug;

use neon_tetris_core::{PieceSource, Session, SessionState, TickOutcome};
use neon_tetris_types::GameAction;

use crate::clock::GravityTimer;

/// Session plus its gravity timer
#[derive(Debug)]
pub struct GameLoop<S> {
    session: Session<S>,
    timer: GravityTimer,
}

impl<S: PieceSource> GameLoop<S> {
    pub fn new(session: Session<S>) -> Self {
        let mut game = Self {
            session,
            timer: GravityTimer::new(),
        };
        game.sync_timer(false);
        game
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn timer(&self) -> &GravityTimer {
        &self.timer
    }

    pub fn into_session(self) -> Session<S> {
        self.session
    }

    /// Time until the next gravity tick, or `None` while the timer is stopped
    pub fn next_tick_in_ms(&self) -> Option<u32> {
        self.timer.remaining_ms()
    }

    /// Let `elapsed_ms` pass, firing every gravity tick that falls due.
    ///
    /// Returns the number of ticks applied.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let mut budget = elapsed_ms;
        let mut ticks = 0;

        while let Some(remaining) = self.timer.remaining_ms() {
            if budget < remaining {
                self.timer.advance(budget);
                break;
            }
            budget -= remaining;
            self.timer.advance(remaining);

            let level = self.session.level();
            let outcome = self.session.tick();
            ticks += 1;

            if let TickOutcome::Landed(landing) = outcome {
                if landing.lines_cleared > 0 {
                    debug!(
                        lines = landing.lines_cleared,
                        points = landing.points,
                        "rows cleared"
                    );
                }
            }
            self.sync_timer(self.session.level() != level);
        }

        ticks
    }

    /// Apply a player intent. Returns whether the session changed.
    pub fn handle(&mut self, action: GameAction) -> bool {
        let level = self.session.level();
        let changed = self.session.apply_action(action);
        let restart = action == GameAction::Reset || self.session.level() != level;
        self.sync_timer(restart);
        changed
    }

    fn sync_timer(&mut self, restart: bool) {
        let interval = self.session.drop_interval_ms();
        match self.session.state() {
            SessionState::Running if restart => {
                debug!(interval_ms = interval, "gravity timer restarted");
                self.timer.restart(interval);
            }
            SessionState::Running => {
                if !self.timer.is_running() {
                    debug!(interval_ms = interval, "gravity timer started");
                    self.timer.start(interval);
                }
            }
            SessionState::Paused | SessionState::GameOver => {
                if self.timer.is_running() {
                    debug!("gravity timer cancelled");
                    self.timer.cancel();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neon_tetris_core::{Board, FixedPieces, Position};
    use neon_tetris_types::{Color, PieceKind};

    fn o_loop() -> GameLoop<FixedPieces> {
        GameLoop::new(Session::with_board(
            Board::standard(),
            FixedPieces::repeat(PieceKind::O),
        ))
    }

    #[test]
    fn test_timer_armed_at_level_speed() {
        let game = o_loop();
        assert_eq!(game.next_tick_in_ms(), Some(800));
    }

    #[test]
    fn test_advance_fires_due_ticks() {
        let mut game = o_loop();
        assert_eq!(game.advance(799), 0);
        assert_eq!(game.session().current().position, Position::new(4, 0));
        assert_eq!(game.advance(1), 1);
        assert_eq!(game.session().current().position, Position::new(4, 1));
        assert_eq!(game.advance(1600), 2);
        assert_eq!(game.session().current().position, Position::new(4, 3));
    }

    #[test]
    fn test_pause_cancels_and_resume_restarts() {
        let mut game = o_loop();
        game.advance(500);
        assert!(game.handle(GameAction::TogglePause));
        assert_eq!(game.next_tick_in_ms(), None);
        assert_eq!(game.advance(10_000), 0);

        assert!(game.handle(GameAction::TogglePause));
        assert_eq!(game.next_tick_in_ms(), Some(800));
    }

    #[test]
    fn test_reset_restarts_timer() {
        let mut game = o_loop();
        game.advance(600);
        assert_eq!(game.next_tick_in_ms(), Some(200));
        game.handle(GameAction::Reset);
        assert_eq!(game.next_tick_in_ms(), Some(800));
    }

    #[test]
    fn test_movement_keeps_timer_progress() {
        let mut game = o_loop();
        game.advance(300);
        game.handle(GameAction::MoveLeft);
        assert_eq!(game.next_tick_in_ms(), Some(500));
    }

    #[test]
    fn test_level_change_reconfigures_speed() {
        // Score 1950 is still level 2; the next clear re-derives level from it.
        let mut board = Board::standard();
        for x in 0..8 {
            board.set(x, 19, Some(Color::from_hex(0x808080)));
        }
        let session =
            Session::with_board(board, FixedPieces::repeat(PieceKind::O)).with_score(1950);
        let mut game = GameLoop::new(session);
        assert_eq!(game.next_tick_in_ms(), Some(700));

        for _ in 0..4 {
            game.handle(GameAction::MoveRight);
        }
        game.handle(GameAction::HardDrop);
        // 18 rows * 2 = 36 points from the hard drop.
        assert_eq!(game.session().score(), 1986);

        game.advance(700);
        assert_eq!(game.session().score(), 1986 + 200);
        assert_eq!(game.session().level(), 2);
        assert_eq!(game.next_tick_in_ms(), Some(700));
    }

    #[test]
    fn test_level_up_restarts_with_faster_period() {
        let mut board = Board::standard();
        for x in 0..8 {
            board.set(x, 19, Some(Color::from_hex(0x808080)));
        }
        let session =
            Session::with_board(board, FixedPieces::repeat(PieceKind::O)).with_score(999);
        let mut game = GameLoop::new(session);
        for _ in 0..4 {
            game.handle(GameAction::MoveRight);
        }
        game.handle(GameAction::HardDrop);
        // 999 + 36 = 1035 before the award; level derives from that.
        game.advance(800);
        assert_eq!(game.session().level(), 2);
        assert_eq!(game.next_tick_in_ms(), Some(700));
    }

    #[test]
    fn test_game_over_cancels_timer() {
        let mut board = Board::standard();
        for x in 0..10 {
            if x != 0 {
                board.set(x, 0, Some(Color::from_hex(0x808080)));
            }
        }
        let mut game = GameLoop::new(Session::with_board(
            board,
            FixedPieces::repeat(PieceKind::O),
        ));
        assert_eq!(game.advance(800), 1);
        assert!(game.session().is_game_over());
        assert_eq!(game.next_tick_in_ms(), None);
        assert_eq!(game.advance(5_000), 0);

        game.handle(GameAction::Reset);
        assert!(game.session().is_running());
        assert_eq!(game.next_tick_in_ms(), Some(800));
    }
}
