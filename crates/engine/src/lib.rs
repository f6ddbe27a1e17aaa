//! Session orchestration for the tile grid.
//!
//! The core engine exposes discrete steps; this crate paces them. It owns the
//! "busy" state that keeps clicks out while a refill or regeneration is on
//! screen, and reads its configuration from the environment.

pub mod config;
pub mod session;

pub use tile_pop_core as core;
pub use tile_pop_types as types;

pub use config::SessionConfig;
pub use session::{ClickOutcome, Phase, Session};
