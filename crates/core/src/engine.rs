//! Grid engine - owns the board and every rule that mutates it
//!
//! The engine ties together the grid, the matcher, the random source and the
//! event sink. It never sleeps: each operation is a bounded synchronous step,
//! and any visible pause between steps is the caller's business.

use std::cell::RefCell;

use log::{debug, trace};

use crate::error::{ConfigIssue, GridError};
use crate::events::{EventSink, NullSink};
use crate::grid::Grid;
use crate::matching::{self, FloodScratch};
use crate::rng::RandomSource;
use crate::snapshot::GridSnapshot;
use crate::solvability::{SolvabilityOutcome, SolvabilityPass};
use crate::types::{
    Cell, CellPos, ColorId, DEFAULT_COLUMNS, DEFAULT_PALETTE_SIZE, DEFAULT_ROWS,
    MAX_REGEN_ATTEMPTS, MIN_GROUP_SIZE,
};

/// Board dimensions and rule parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
    pub palette_size: u8,
    pub min_group_size: usize,
    pub max_regen_attempts: u32,
}

impl GridConfig {
    pub fn new(rows: usize, columns: usize, palette_size: u8) -> Self {
        Self {
            rows,
            columns,
            palette_size,
            min_group_size: MIN_GROUP_SIZE,
            max_regen_attempts: MAX_REGEN_ATTEMPTS,
        }
    }

    pub fn with_min_group_size(mut self, min_group_size: usize) -> Self {
        self.min_group_size = min_group_size;
        self
    }

    pub fn with_max_regen_attempts(mut self, attempts: u32) -> Self {
        self.max_regen_attempts = attempts;
        self
    }

    /// Reject boards that could never satisfy the solvability guarantee
    pub fn validate(&self) -> Result<(), GridError> {
        let issue = if self.rows == 0 {
            Some(ConfigIssue::ZeroRows)
        } else if self.columns == 0 {
            Some(ConfigIssue::ZeroColumns)
        } else if self.min_group_size == 0 {
            Some(ConfigIssue::ZeroMinGroupSize)
        } else if (self.palette_size as usize) < self.min_group_size {
            Some(ConfigIssue::PaletteTooSmall {
                palette_size: self.palette_size,
                min_group_size: self.min_group_size,
            })
        } else {
            None
        };

        match issue {
            Some(issue) => Err(GridError::InvalidConfiguration(issue)),
            None => Ok(()),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS, DEFAULT_PALETTE_SIZE)
    }
}

/// What a click at a cell would do, without doing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupProbe {
    /// The cell is unoccupied
    Empty,
    /// The group exists but is below the minimum size
    TooSmall(usize),
    /// The group would be collected
    Removable(usize),
}

/// The tile grid and its rules.
#[derive(Debug)]
pub struct GridEngine<S: EventSink = NullSink> {
    config: GridConfig,
    grid: Grid,
    /// Flood-fill buffers shared by every query; queries take `&self`
    scratch: RefCell<FloodScratch>,
    sink: S,
}

impl<S: EventSink> GridEngine<S> {
    /// Build a fully populated board that has at least one move.
    ///
    /// Runs the solvability guarantee before returning; if its attempt budget
    /// runs out the board is returned anyway (check [`Self::has_any_match`]).
    pub fn initialize<R: RandomSource>(
        config: GridConfig,
        sink: S,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let mut engine = Self::populate(config, sink, rng)?;
        engine.ensure_solvable(config.min_group_size, rng);
        Ok(engine)
    }

    /// Build a fully populated board without checking for moves.
    ///
    /// For orchestrators that run the guarantee one step at a time through
    /// [`SolvabilityPass`].
    pub fn populate<R: RandomSource>(
        config: GridConfig,
        sink: S,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        config.validate()?;
        let mut engine = Self {
            config,
            grid: Grid::new(config.rows, config.columns),
            scratch: RefCell::new(FloodScratch::new(config.rows * config.columns)),
            sink,
        };
        engine.fill_all(rng);
        debug!(
            "populated {}x{} grid with {} colors",
            config.rows, config.columns, config.palette_size
        );
        Ok(engine)
    }

    /// Wrap an existing grid. No events are raised and no check for moves runs.
    pub fn from_grid(grid: Grid, palette_size: u8, sink: S) -> Result<Self, GridError> {
        let config = GridConfig::new(grid.rows(), grid.columns(), palette_size);
        config.validate()?;
        let out_of_palette = grid
            .cells()
            .iter()
            .flatten()
            .any(|&color| color >= palette_size);
        if out_of_palette {
            return Err(GridError::InvalidConfiguration(
                ConfigIssue::ColorOutsidePalette,
            ));
        }

        Ok(Self {
            config,
            scratch: RefCell::new(FloodScratch::new(grid.len())),
            grid,
            sink,
        })
    }

    /// Replace the rule parameters that do not depend on board shape.
    pub fn with_rules(mut self, min_group_size: usize, max_regen_attempts: u32) -> Result<Self, GridError> {
        let config = self
            .config
            .with_min_group_size(min_group_size)
            .with_max_regen_attempts(max_regen_attempts);
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<CellPos, GridError> {
        let pos = CellPos::new(row, col);
        if self.grid.contains(pos) {
            Ok(pos)
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.grid.rows(),
                columns: self.grid.columns(),
            })
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        let pos = self.check_bounds(row, col)?;
        Ok(self.grid.color_at(pos))
    }

    pub fn occupied_count(&self) -> usize {
        self.grid.occupied_count()
    }

    /// Collect the group under (row, col).
    ///
    /// Returns the removed cells, or an empty vector when the cell is empty or
    /// its group is smaller than the minimum size. Nothing changes in that case.
    pub fn collect_group(&mut self, row: usize, col: usize) -> Result<Vec<CellPos>, GridError> {
        let seed = self.check_bounds(row, col)?;
        if !self.grid.is_occupied(row, col) {
            return Ok(Vec::new());
        }

        let scratch = self.scratch.get_mut();
        scratch.reset(self.grid.len());
        let mut group = Vec::new();
        matching::collect_group(&self.grid, seed, scratch, &mut group);

        if group.len() < self.config.min_group_size {
            trace!("group at ({row}, {col}) has {} cells, ignored", group.len());
            return Ok(Vec::new());
        }

        for pos in &group {
            self.grid.set(pos.row, pos.col, None);
        }
        self.sink.on_cells_removed(&group);
        debug!("collected {} cells from ({row}, {col})", group.len());
        Ok(group)
    }

    /// Classify the group under (row, col) without touching the board.
    pub fn probe_group(&self, row: usize, col: usize) -> Result<GroupProbe, GridError> {
        let seed = self.check_bounds(row, col)?;
        if !self.grid.is_occupied(row, col) {
            return Ok(GroupProbe::Empty);
        }

        let mut scratch = self.scratch.borrow_mut();
        scratch.reset(self.grid.len());
        let size = matching::group_size(&self.grid, seed, &mut scratch, None);
        if size < self.config.min_group_size {
            Ok(GroupProbe::TooSmall(size))
        } else {
            Ok(GroupProbe::Removable(size))
        }
    }

    /// True if some group of at least `min_group_size` cells exists.
    pub fn has_any_match(&self, min_group_size: usize) -> bool {
        matching::has_group_of(&self.grid, min_group_size, &mut self.scratch.borrow_mut())
    }

    /// Compact every column towards row 0 and fill the gaps left on top.
    ///
    /// Does not run the solvability guarantee; see [`Self::refill`].
    pub fn compact_and_fill<R: RandomSource>(&mut self, rng: &mut R) {
        let mut moved = 0usize;
        let mut created = 0usize;

        for col in 0..self.grid.columns() {
            let sink = &mut self.sink;
            let free_row = self.grid.compact_column(col, |to_row, from_row| {
                sink.on_cell_moved(CellPos::new(to_row, col), from_row);
                moved += 1;
            });

            for row in free_row..self.grid.rows() {
                self.create_cell(CellPos::new(row, col), rng);
                created += 1;
            }
        }

        trace!("refill moved {moved} tiles and created {created}");
    }

    /// Compact, refill, then make sure the board still has a move.
    pub fn refill<R: RandomSource>(&mut self, rng: &mut R) -> SolvabilityOutcome {
        self.compact_and_fill(rng);
        self.ensure_solvable(self.config.min_group_size, rng)
    }

    /// Regenerate the board until a group of `min_group_size` exists or the
    /// attempt budget runs out. Exhausting the budget is not an error.
    pub fn ensure_solvable<R: RandomSource>(
        &mut self,
        min_group_size: usize,
        rng: &mut R,
    ) -> SolvabilityOutcome {
        let mut pass = SolvabilityPass::new(min_group_size, self.config.max_regen_attempts);
        pass.run(self, rng)
    }

    /// Discard every tile and draw a fresh board.
    pub fn regenerate_all<R: RandomSource>(&mut self, rng: &mut R) {
        self.grid.clear();
        self.fill_all(rng);
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut snap = GridSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.fill_from(&self.grid);
    }

    pub(crate) fn notify_no_moves(&mut self, active: bool) {
        self.sink.on_no_moves_state(active);
    }

    /// Column-major fill of every cell
    fn fill_all<R: RandomSource>(&mut self, rng: &mut R) {
        for col in 0..self.grid.columns() {
            for row in 0..self.grid.rows() {
                self.create_cell(CellPos::new(row, col), rng);
            }
        }
    }

    fn create_cell<R: RandomSource>(&mut self, pos: CellPos, rng: &mut R) {
        let color = self.draw_color(rng);
        self.grid.set(pos.row, pos.col, Some(color));
        self.sink.on_cell_created(pos, color);
    }

    fn draw_color<R: RandomSource>(&self, rng: &mut R) -> ColorId {
        rng.next_in_range(0, self.config.palette_size as u32) as ColorId
    }
}
