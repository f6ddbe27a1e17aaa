//! Tile Pop (workspace facade crate).
//!
//! Re-exports the workspace crates as `tile_pop::{core,engine,input,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use tile_pop_core as core;
pub use tile_pop_engine as engine;
pub use tile_pop_input as input;
pub use tile_pop_term as term;
pub use tile_pop_types as types;
