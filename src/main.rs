//! Terminal tile-matching runner (default binary).
//!
//! Keyboard moves a cursor and collects the group under it; a left click
//! collects the group under the mouse. Configuration comes from `TILE_POP_*`
//! environment variables, and logs go to `TILE_POP_LOG_PATH` when set (the
//! terminal itself is busy drawing the board).

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use tile_pop::core::{EventLog, GridSnapshot, SimpleRng};
use tile_pop::engine::{ClickOutcome, Session, SessionConfig};
use tile_pop::input::{handle_key_event, primary_click, should_quit};
use tile_pop::term::{FrameBuffer, GameView, StatusView, TerminalRenderer, Viewport};
use tile_pop::types::TICK_MS;

type GameSession = Session<SimpleRng, EventLog>;

fn main() -> Result<()> {
    let config = SessionConfig::from_env();
    init_logging(&config)?;

    let session = Session::new(&config, EventLog::new(), SimpleRng::new(config.seed))
        .context("invalid board configuration")?;
    info!("seed {}", config.seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(config: &SessionConfig) -> Result<()> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("cannot open log file {path}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, mut session: GameSession) -> Result<()> {
    let view = GameView::default();
    let mut snap = GridSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        session.snapshot_into(&mut snap);
        let status = StatusView {
            cursor: Some(session.cursor()),
            busy: session.is_busy(),
            no_moves: session.no_moves(),
            collects: session.collects(),
        };
        view.render_into(&snap, &status, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if let Some(outcome) = session.apply_action(action)? {
                            log_outcome(&outcome);
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some((x, y)) = primary_click(mouse) {
                        if let Some(pos) = view.cell_at(&snap, viewport, x, y) {
                            session.set_cursor(pos)?;
                            log_outcome(&session.click(pos.row, pos.col)?);
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            session.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }

        for event in session.sink_mut().drain() {
            debug!("{event:?}");
        }
    }
}

fn log_outcome(outcome: &ClickOutcome) {
    match outcome {
        ClickOutcome::Collected(cells) => info!("collected {} tiles", cells.len()),
        ClickOutcome::NoMatch => debug!("no group under cursor"),
        ClickOutcome::Busy => debug!("board busy, click ignored"),
    }
}
