//! Terminal rendering for the tile board.
//!
//! Rendering goes through a plain framebuffer instead of a widget toolkit:
//! `GameView` draws a `GridSnapshot` into a `FrameBuffer`, and
//! `TerminalRenderer` flushes the changed glyphs with crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tile_pop_core as core;
pub use tile_pop_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{tile_color, GameView, StatusView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
