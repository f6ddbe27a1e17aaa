//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into [`crate::types::GridAction`]s
//! and screen clicks. Translating a click into a grid cell is the view's job.

pub mod map;

pub use tile_pop_types as types;

pub use map::{handle_key_event, primary_click, should_quit};
