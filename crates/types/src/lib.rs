//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the grid engine, the session orchestrator and the terminal front end alike.
//!
//! # Coordinates
//!
//! Cells are addressed as `(row, col)`:
//!
//! - **Row 0** is the bottom row, rows grow upwards
//! - **Column 0** is the leftmost column
//!
//! Tiles fall towards row 0 during compaction and new tiles enter from the top.
//!
//! # Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 6 | Board height used when nothing is configured |
//! | `DEFAULT_COLUMNS` | 5 | Board width used when nothing is configured |
//! | `DEFAULT_PALETTE_SIZE` | 4 | Number of tile colors |
//! | `MIN_GROUP_SIZE` | 3 | Smallest removable group |
//! | `MAX_REGEN_ATTEMPTS` | 50 | Regeneration budget of the solvability guarantee |
//! | `TICK_MS` | 16 | Fixed timestep of the terminal loop |
//! | `COLLECT_PAUSE_MS` | 1000 | Pause between a collect and the refill |
//! | `REGEN_PAUSE_MS` | 2000 | Pause between regeneration attempts |
//!
//! # Examples
//!
//! ```
//! use tile_pop_types::{CellPos, GridAction, Direction, MIN_GROUP_SIZE};
//!
//! let pos = CellPos::new(2, 3);
//! assert_eq!(pos.up(), Some(CellPos::new(3, 3)));
//! assert_eq!(CellPos::new(0, 0).down(), None);
//!
//! assert_eq!(GridAction::from_str("collect"), Some(GridAction::Collect));
//! assert_eq!(
//!     GridAction::from_str("left"),
//!     Some(GridAction::MoveCursor(Direction::Left))
//! );
//! assert_eq!(MIN_GROUP_SIZE, 3);
//! ```

/// Default board height in rows
pub const DEFAULT_ROWS: usize = 6;

/// Default board width in columns
pub const DEFAULT_COLUMNS: usize = 5;

/// Default number of tile colors
pub const DEFAULT_PALETTE_SIZE: u8 = 4;

/// Smallest group that can be collected
pub const MIN_GROUP_SIZE: usize = 3;

/// Maximum number of full-board regenerations per solvability pass
pub const MAX_REGEN_ATTEMPTS: u32 = 50;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Pause after a successful collect before the board is refilled
pub const COLLECT_PAUSE_MS: u32 = 1000;

/// Pause between two regeneration attempts while the "no moves" indicator is shown
pub const REGEN_PAUSE_MS: u32 = 2000;


/// Color of a tile, an opaque index into the palette
pub type ColorId = u8;

/// A cell on the grid
///
/// - `None`: unoccupied (no tile, no meaningful color)
/// - `Some(ColorId)`: occupied by a tile of that color
pub type Cell = Option<ColorId>;

/// Logical grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbor one row up (no upper bound check)
    pub fn up(self) -> Option<Self> {
        self.row.checked_add(1).map(|row| Self::new(row, self.col))
    }

    /// Neighbor one row down, `None` on row 0
    pub fn down(self) -> Option<Self> {
        self.row.checked_sub(1).map(|row| Self::new(row, self.col))
    }

    /// Neighbor one column left, `None` on column 0
    pub fn left(self) -> Option<Self> {
        self.col.checked_sub(1).map(|col| Self::new(self.row, col))
    }

    /// Neighbor one column right (no upper bound check)
    pub fn right(self) -> Option<Self> {
        self.col.checked_add(1).map(|col| Self::new(self.row, col))
    }

    pub fn step(self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::Up => self.up(),
            Direction::Down => self.down(),
            Direction::Left => self.left(),
            Direction::Right => self.right(),
        }
    }
}

impl From<(usize, usize)> for CellPos {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// The four flood-fill directions (no diagonals)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Player actions understood by the session
///
/// Produced by keyboard/mouse mapping and consumed by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    /// Move the board cursor one cell
    MoveCursor(Direction),
    /// Collect the group under the cursor
    Collect,
    /// Throw the board away and start over
    Restart,
}

impl GridAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_pop_types::{Direction, GridAction};
    ///
    /// assert_eq!(GridAction::from_str("UP"), Some(GridAction::MoveCursor(Direction::Up)));
    /// assert_eq!(GridAction::from_str("restart"), Some(GridAction::Restart));
    /// assert_eq!(GridAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(GridAction::MoveCursor(Direction::Up)),
            "down" => Some(GridAction::MoveCursor(Direction::Down)),
            "left" => Some(GridAction::MoveCursor(Direction::Left)),
            "right" => Some(GridAction::MoveCursor(Direction::Right)),
            "collect" => Some(GridAction::Collect),
            "restart" => Some(GridAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GridAction::MoveCursor(Direction::Up) => "up",
            GridAction::MoveCursor(Direction::Down) => "down",
            GridAction::MoveCursor(Direction::Left) => "left",
            GridAction::MoveCursor(Direction::Right) => "right",
            GridAction::Collect => "collect",
            GridAction::Restart => "restart",
        }
    }
}

/// Notification raised by the grid engine for the visual layer
///
/// The engine only speaks in logical coordinates; translating them into
/// screen placement or animation is left to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// A new tile was populated (initial fill, refill or regeneration)
    CellCreated { pos: CellPos, color: ColorId },
    /// An existing tile fell from `from_row` to `pos` during compaction
    CellMoved { pos: CellPos, from_row: usize },
    /// A group was collected
    CellsRemoved(Vec<CellPos>),
    /// The solvability guarantee started (`true`) or ended (`false`) regenerating
    NoMovesState(bool),
}
