//! Terminal runner (default binary).
//!
//! Owns the frame clock: every `FRAME_MS` it samples held keys, advances the
//! simulation by one tick and redraws.
//!
//! Environment:
//! - `BLOCKFALL_DROP_INTERVAL`, `BLOCKFALL_SEED`, `BLOCKFALL_ON_BLOCKED`: see
//!   `GameConfig::from_env`
//! - `BLOCKFALL_LOG_PATH`: append log records to this file (nothing is logged otherwise)
//! - `RUST_LOG`: log filter, default `info`

use std::fs::OpenOptions;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use blockfall::core::{GameConfig, GameSnapshot};
use blockfall::engine::Game;
use blockfall::input::{should_quit, should_restart, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameEvent, FRAME_MS};

const LOG_PATH_VAR: &str = "BLOCKFALL_LOG_PATH";

#[derive(Debug, Default)]
struct SessionStats {
    locked: u32,
    rows_cleared: u32,
    blocked: u32,
}

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env().context("invalid configuration")?;
    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut game = Game::with_seed(config, seed).context("cannot start game")?;
    info!(
        "starting: seed={} drop_interval={} on_blocked={}",
        seed,
        config.drop_interval,
        config.on_blocked.as_str()
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;
    debug!("keyboard release events: {}", term.keyboard_enhanced());

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var(LOG_PATH_VAR)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {path}"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap: GameSnapshot = game.snapshot();
    let mut stats = SessionStats::default();

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut next_frame = Instant::now() + frame;

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next frame is due.
        while event::poll(next_frame.saturating_duration_since(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        if should_quit(key) {
                            info!(
                                "quit: {} pieces locked, {} rows cleared, {} blocked spawns",
                                stats.locked, stats.rows_cleared, stats.blocked
                            );
                            return Ok(());
                        }
                        if should_restart(key) {
                            game.restart();
                            input.reset();
                            continue;
                        }
                    }
                    input.handle_key_event(key);
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Fell behind (e.g. suspended): resync instead of running a burst of ticks.
        let now = Instant::now();
        next_frame += frame;
        if next_frame < now {
            next_frame = now + frame;
        }

        // Tick.
        for event in game.tick(input.sample(FRAME_MS)) {
            match event {
                GameEvent::Locked { rows_cleared, .. } => {
                    stats.locked += 1;
                    stats.rows_cleared += rows_cleared as u32;
                }
                GameEvent::PlacementBlocked => stats.blocked += 1,
            }
        }
    }
}
