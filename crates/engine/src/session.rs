//! Session module - orchestrates a board over time
//!
//! The grid engine only knows synchronous steps. The session strings them
//! together the way the game plays: a click collects a group, the board pauses
//! so the removal can be shown, then it refills, and if no move is left it
//! redraws the board with a pause between attempts.
//!
//! Time only moves through [`Session::tick`], so tests fast-forward by passing
//! large elapsed values instead of sleeping. While any of those steps is in
//! progress the session is busy and ignores clicks.

use log::{debug, info};

use tile_pop_core::{
    EventSink, GridConfig, GridEngine, GridError, GridSnapshot, PassStep, RandomSource,
    SolvabilityPass,
};

use crate::config::SessionConfig;
use crate::types::{CellPos, Direction, GridAction};

/// What the session is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a click
    Idle,
    /// Showing a removed group before the refill
    Clearing { remaining_ms: u32 },
    /// Showing "no moves" between regeneration attempts
    Regenerating { remaining_ms: u32 },
}

/// Result of a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The group was removed; a refill is scheduled
    Collected(Vec<CellPos>),
    /// Empty cell or group below the minimum size
    NoMatch,
    /// A refill or regeneration is in progress; the click was ignored
    Busy,
}

/// A running board plus its pacing.
pub struct Session<R: RandomSource, S: EventSink> {
    engine: GridEngine<S>,
    rng: R,
    phase: Phase,
    pass: Option<SolvabilityPass>,
    cursor: CellPos,
    collect_pause_ms: u32,
    regen_pause_ms: u32,
    no_moves: bool,
    /// Number of successful collects since the last restart
    collects: u32,
}

impl<R: RandomSource, S: EventSink> Session<R, S> {
    /// Deal a board and start its solvability pass.
    ///
    /// If the first board has no move, the session starts out busy in
    /// [`Phase::Regenerating`].
    pub fn new(config: &SessionConfig, sink: S, mut rng: R) -> Result<Self, GridError> {
        let engine = GridEngine::populate(config.grid, sink, &mut rng)?;
        let mut session = Self {
            engine,
            rng,
            phase: Phase::Idle,
            pass: None,
            cursor: CellPos::new(0, 0),
            collect_pause_ms: config.collect_pause_ms,
            regen_pause_ms: config.regen_pause_ms,
            no_moves: false,
            collects: 0,
        };
        session.begin_pass();
        info!(
            "session started: {}x{} board, {} colors",
            config.grid.rows, config.grid.columns, config.grid.palette_size
        );
        Ok(session)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// True while the board is being regenerated for lack of moves
    pub fn no_moves(&self) -> bool {
        self.no_moves
    }

    pub fn cursor(&self) -> CellPos {
        self.cursor
    }

    pub fn collects(&self) -> u32 {
        self.collects
    }

    pub fn config(&self) -> &GridConfig {
        self.engine.config()
    }

    pub fn engine(&self) -> &GridEngine<S> {
        &self.engine
    }

    pub fn sink_mut(&mut self) -> &mut S {
        self.engine.sink_mut()
    }

    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        self.engine.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.engine.snapshot()
    }

    /// Apply a player action. Cursor moves are always allowed.
    pub fn apply_action(&mut self, action: GridAction) -> Result<Option<ClickOutcome>, GridError> {
        match action {
            GridAction::MoveCursor(dir) => {
                self.move_cursor(dir);
                Ok(None)
            }
            GridAction::Collect => self.click(self.cursor.row, self.cursor.col).map(Some),
            GridAction::Restart => {
                self.restart();
                Ok(None)
            }
        }
    }

    /// Move the cursor one cell, stopping at the edges
    pub fn move_cursor(&mut self, dir: Direction) {
        if let Some(next) = self.cursor.step(dir) {
            if self.engine.grid().contains(next) {
                self.cursor = next;
            }
        }
    }

    /// Put the cursor on a cell (e.g. the one under the mouse)
    pub fn set_cursor(&mut self, pos: CellPos) -> Result<(), GridError> {
        self.engine.cell(pos.row, pos.col)?;
        self.cursor = pos;
        Ok(())
    }

    /// Collect the group at (row, col) unless the session is busy.
    pub fn click(&mut self, row: usize, col: usize) -> Result<ClickOutcome, GridError> {
        if self.is_busy() {
            // Bounds are still checked so callers learn about bad coordinates.
            self.engine.cell(row, col)?;
            return Ok(ClickOutcome::Busy);
        }

        let removed = self.engine.collect_group(row, col)?;
        if removed.is_empty() {
            return Ok(ClickOutcome::NoMatch);
        }

        self.collects += 1;
        self.phase = Phase::Clearing {
            remaining_ms: self.collect_pause_ms,
        };
        Ok(ClickOutcome::Collected(removed))
    }

    /// Advance pending pauses by `elapsed_ms`.
    ///
    /// Leftover time carries into the next pause, so one large tick can run
    /// several steps.
    pub fn tick(&mut self, elapsed_ms: u32) {
        let mut budget = elapsed_ms;

        loop {
            match self.phase {
                Phase::Idle => return,
                Phase::Clearing { remaining_ms } | Phase::Regenerating { remaining_ms }
                    if budget < remaining_ms =>
                {
                    self.set_remaining(remaining_ms - budget);
                    return;
                }
                Phase::Clearing { remaining_ms } => {
                    budget -= remaining_ms;
                    self.engine.compact_and_fill(&mut self.rng);
                    self.begin_pass();
                }
                Phase::Regenerating { remaining_ms } => {
                    budget -= remaining_ms;
                    self.step_pass();
                }
            }
        }
    }

    /// Redraw the whole board and start over.
    ///
    /// Cancels any pending refill or regeneration.
    pub fn restart(&mut self) {
        self.engine.regenerate_all(&mut self.rng);
        self.cursor = CellPos::new(0, 0);
        self.collects = 0;
        self.pass = None;
        self.no_moves = false;
        self.begin_pass();
        debug!("session restarted");
    }

    fn begin_pass(&mut self) {
        self.pass = Some(SolvabilityPass::for_engine(&self.engine));
        self.step_pass();
    }

    fn step_pass(&mut self) {
        let Some(pass) = self.pass.as_mut() else {
            self.phase = Phase::Idle;
            return;
        };

        match pass.step(&mut self.engine, &mut self.rng) {
            PassStep::Regenerated { .. } => {
                self.no_moves = true;
                self.phase = Phase::Regenerating {
                    remaining_ms: self.regen_pause_ms,
                };
            }
            PassStep::Solvable { .. } | PassStep::Exhausted { .. } => {
                self.no_moves = false;
                self.pass = None;
                self.phase = Phase::Idle;
            }
        }
    }

    fn set_remaining(&mut self, remaining: u32) {
        match &mut self.phase {
            Phase::Clearing { remaining_ms } | Phase::Regenerating { remaining_ms } => {
                *remaining_ms = remaining;
            }
            Phase::Idle => {}
        }
    }
}
