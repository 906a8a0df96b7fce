//! Terminal Tetris runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer.
//! Gravity and key presses are serialized onto one thread: the loop sleeps in
//! `event::poll` until either a key arrives or the next gravity tick is due.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{info, Level};

use neon_tetris::core::{GameConfig, GameSnapshot, RandomPieces, Session};
use neon_tetris::engine::GameLoop;
use neon_tetris::input::{handle_key_event, should_quit};
use neon_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use neon_tetris::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Poll interval while gravity is stopped (paused or game over)
const IDLE_POLL: Duration = Duration::from_millis(250);

/// neon-tetris - terminal Tetris
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = BOARD_WIDTH)]
    width: usize,

    /// Board height in cells
    #[arg(long, default_value_t = BOARD_HEIGHT)]
    height: usize,

    /// Seed for the piece generator (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> GameConfig {
        let config = GameConfig::new().with_size(self.width, self.height);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout belongs to the renderer, so logs only go to a file.
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(Level::DEBUG)
            .init();
    }

    let config = args.config();
    let session = Session::new(&config).context("Invalid game configuration")?;
    info!(
        width = config.width,
        height = config.height,
        seed = ?config.seed,
        "starting game"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, GameLoop::new(session));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut game: GameLoop<RandomPieces>) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last = Instant::now();

    loop {
        // Render.
        game.session().snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Wait for input, but no longer than the next gravity tick.
        let timeout = game
            .next_tick_in_ms()
            .map_or(IDLE_POLL, |ms| Duration::from_millis(ms as u64));
        let event = if event::poll(timeout)? {
            Some(event::read()?)
        } else {
            None
        };

        // Gravity first, so an intent always sees the up-to-date board.
        let elapsed = last.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last += Duration::from_millis(elapsed as u64);
        game.advance(elapsed);

        match event {
            Some(Event::Key(key)) => {
                if should_quit(key) {
                    info!(score = game.session().score(), "quit");
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    game.handle(action);
                }
            }
            Some(Event::Resize(..)) => term.invalidate(),
            _ => {}
        }
    }
}
