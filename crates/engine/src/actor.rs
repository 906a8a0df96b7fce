//! Session actor for multi-threaded hosts
//!
//! One tokio task owns the [`GameLoop`]. Other tasks talk to it through a
//! [`GameHandle`]: intents go in over an `mpsc` channel and snapshots come
//! out over a `watch` channel. Gravity is a `tokio::time` sleep re-armed from
//! the loop's next deadline after every event.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::debug;

use neon_tetris_core::{GameSnapshot, PieceSource, Session};
use neon_tetris_types::GameAction;

use crate::game_loop::GameLoop;

/// Pending intents buffered before senders wait
pub const INTENT_QUEUE_DEPTH: usize = 64;

/// Client side of a running session actor
#[derive(Debug)]
pub struct GameHandle<S> {
    intents: mpsc::Sender<GameAction>,
    snapshots: watch::Receiver<GameSnapshot>,
    task: JoinHandle<Session<S>>,
}

impl<S> GameHandle<S> {
    /// Queue an intent. Returns `false` once the actor has stopped.
    pub async fn send(&self, action: GameAction) -> bool {
        self.intents.send(action).await.is_ok()
    }

    /// Most recently published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Independent receiver for render tasks
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the actor and take the session back
    pub async fn shutdown(self) -> Option<Session<S>> {
        drop(self.intents);
        self.task.await.ok()
    }
}

/// Run `session` on its own tokio task
pub fn spawn<S>(session: Session<S>) -> GameHandle<S>
where
    S: PieceSource + Send + 'static,
{
    let (intent_tx, intent_rx) = mpsc::channel(INTENT_QUEUE_DEPTH);
    let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
    let task = tokio::spawn(run(GameLoop::new(session), intent_rx, snapshot_tx));

    GameHandle {
        intents: intent_tx,
        snapshots: snapshot_rx,
        task,
    }
}

async fn run<S: PieceSource>(
    mut game: GameLoop<S>,
    mut intents: mpsc::Receiver<GameAction>,
    snapshots: watch::Sender<GameSnapshot>,
) -> Session<S> {
    let mut last = Instant::now();

    loop {
        let deadline = game.next_tick_in_ms();
        let wait = Duration::from_millis(deadline.unwrap_or(0) as u64);

        let intent = tokio::select! {
            intent = intents.recv() => match intent {
                Some(action) => Some(action),
                None => break,
            },
            _ = sleep(wait), if deadline.is_some() => None,
        };

        // Consume whole milliseconds only so sub-millisecond remainders carry over.
        let elapsed = last.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last += Duration::from_millis(elapsed as u64);
        let mut changed = game.advance(elapsed) > 0;

        if let Some(action) = intent {
            changed |= game.handle(action);
        }

        if changed {
            snapshots.send_modify(|snap| game.session().snapshot_into(snap));
        }
    }

    debug!("session actor stopped");
    game.into_session()
}

#[cfg(test)]
mod tests {
    use super::*;
    use neon_tetris_core::{Board, FixedPieces};
    use neon_tetris_types::PieceKind;

    fn o_session() -> Session<FixedPieces> {
        Session::with_board(Board::standard(), FixedPieces::repeat(PieceKind::O))
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_initial_snapshot() {
        let handle = spawn(o_session());
        let snap = handle.snapshot();
        assert_eq!(snap.current.kind, PieceKind::O);
        assert_eq!((snap.current.x, snap.current.y), (4, 0));
        assert_eq!(snap.score, 0);
        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn gravity_ticks_on_schedule() {
        let handle = spawn(o_session());
        sleep(Duration::from_millis(799)).await;
        assert_eq!(handle.snapshot().current.y, 0);
        sleep(Duration::from_millis(2)).await;
        assert_eq!(handle.snapshot().current.y, 1);
        sleep(Duration::from_millis(1600)).await;
        assert_eq!(handle.snapshot().current.y, 3);
        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn intents_are_applied_in_order() {
        let handle = spawn(o_session());
        assert!(handle.send(GameAction::MoveLeft).await);
        assert!(handle.send(GameAction::MoveLeft).await);
        assert!(handle.send(GameAction::HardDrop).await);
        sleep(Duration::from_millis(10)).await;

        let snap = handle.snapshot();
        assert_eq!((snap.current.x, snap.current.y), (2, 18));
        assert_eq!(snap.score, 36);

        let session = handle.shutdown().await.unwrap();
        assert_eq!(session.board().filled_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_gravity() {
        let handle = spawn(o_session());
        handle.send(GameAction::TogglePause).await;
        sleep(Duration::from_secs(10)).await;

        let snap = handle.snapshot();
        assert!(snap.paused);
        assert_eq!(snap.current.y, 0);

        handle.send(GameAction::TogglePause).await;
        sleep(Duration::from_millis(801)).await;
        assert_eq!(handle.snapshot().current.y, 1);
        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_changes() {
        let handle = spawn(o_session());
        let mut rx = handle.subscribe();

        handle.send(GameAction::MoveRight).await;
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().current.x, 5);
        handle.shutdown().await.unwrap();
    }
}
