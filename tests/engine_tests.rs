//! Engine tests - timer-driven play through the facade crate

use std::time::Duration;

use neon_tetris::core::{Board, FixedPieces, Session, TickOutcome};
use neon_tetris::engine::{spawn, GameLoop};
use neon_tetris::types::{GameAction, PieceKind};

fn o_session() -> Session<FixedPieces> {
    Session::with_board(Board::standard(), FixedPieces::repeat(PieceKind::O))
}

#[test]
fn gravity_alone_lands_a_piece() {
    let mut game = GameLoop::new(o_session());
    // 18 falls plus the landing tick.
    assert_eq!(game.advance(19 * 800), 19);
    assert_eq!(game.session().board().filled_count(), 4);
    assert_eq!(game.session().current().position.y, 0);
}

#[test]
fn hard_drop_then_one_tick_lands() {
    let mut game = GameLoop::new(o_session());
    game.handle(GameAction::HardDrop);
    assert_eq!(game.session().board().filled_count(), 0);
    game.advance(800);
    assert_eq!(game.session().board().filled_count(), 4);
}

#[test]
fn intents_between_ticks_do_not_shift_the_deadline() {
    let mut game = GameLoop::new(o_session());
    game.advance(100);
    game.handle(GameAction::MoveLeft);
    game.handle(GameAction::Rotate);
    game.handle(GameAction::SoftDrop);
    assert_eq!(game.next_tick_in_ms(), Some(700));
}

#[test]
fn loop_hands_back_its_session() {
    let mut game = GameLoop::new(o_session());
    game.advance(800);
    let mut session = game.into_session();
    assert_eq!(session.current().position.y, 1);
    assert_eq!(session.tick(), TickOutcome::Fell);
}

#[tokio::test(start_paused = true)]
async fn actor_plays_until_shutdown() {
    let handle = spawn(o_session());
    assert!(handle.send(GameAction::HardDrop).await);
    tokio::time::sleep(Duration::from_millis(801)).await;

    let snap = handle.snapshot();
    assert_eq!(snap.cells.iter().filter(|c| c.is_some()).count(), 4);
    assert_eq!(snap.score, 36);
    assert_eq!(snap.current.y, 0);

    let session = handle.shutdown().await.unwrap();
    assert_eq!(session.score(), 36);
}
