//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules of the tile grid: group matching, removal,
//! gravity compaction, refill, and the guarantee that a move is always left.
//! It has **no dependencies** on rendering, input, or timing, making it:
//!
//! - **Deterministic**: Same random source produces identical boards
//! - **Testable**: Every rule is a synchronous step a test can drive directly
//! - **Portable**: Runs headless, in the terminal front end, or in benches
//!
//! # Module Structure
//!
//! - [`grid`]: rows x columns cell storage and per-column compaction
//! - [`matching`]: iterative 4-directional flood fill
//! - [`engine`]: [`GridEngine`], the public operations on a board
//! - [`solvability`]: bounded regeneration loop, steppable or run to completion
//! - [`rng`]: [`RandomSource`] and deterministic generators
//! - [`events`]: [`EventSink`] notifications for the visual layer
//! - [`snapshot`]: read-only board copies for renderers
//!
//! # Example
//!
//! ```
//! use tile_pop_core::{EventLog, GridConfig, GridEngine, SimpleRng};
//!
//! let mut rng = SimpleRng::new(12345);
//! let mut engine = GridEngine::initialize(GridConfig::default(), EventLog::new(), &mut rng)
//!     .expect("default config is valid");
//!
//! // A fresh board always offers a move.
//! assert!(engine.has_any_match(3));
//!
//! // Clicking may or may not hit a large enough group.
//! let removed = engine.collect_group(0, 0).unwrap();
//! if !removed.is_empty() {
//!     engine.refill(&mut rng);
//! }
//! assert_eq!(engine.occupied_count(), 30);
//! ```

pub mod engine;
pub mod error;
pub mod events;
pub mod grid;
pub mod matching;
pub mod rng;
pub mod snapshot;
pub mod solvability;

pub use tile_pop_types as types;

// Re-export commonly used types for convenience
pub use engine::{GridConfig, GridEngine, GroupProbe};
pub use error::{ConfigIssue, GridError};
pub use events::{EventLog, EventSink, NullSink};
pub use grid::Grid;
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use snapshot::GridSnapshot;
pub use solvability::{PassStep, SolvabilityOutcome, SolvabilityPass};
