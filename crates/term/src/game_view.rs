//! GameView: maps a `GridSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It also owns the inverse mapping, from a
//! screen position back to a grid cell, so mouse clicks land on the tile that
//! was drawn there.
//!
//! Board geometry is computed in `u32` screen space. Boards larger than the
//! viewport are clipped: only tiles whose origin is on screen are drawn.

use crate::core::GridSnapshot;
use crate::fb::{FrameBuffer, GlyphStyle, Rgb};
use crate::types::{CellPos, ColorId};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Session state shown around the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusView {
    pub cursor: Option<CellPos>,
    pub busy: bool,
    /// The board is being redrawn because it ran out of moves
    pub no_moves: bool,
    pub collects: u32,
}

/// Screen rectangle of the board frame (border included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

const TILE_COLORS: [Rgb; 8] = [
    Rgb::new(220, 80, 80),
    Rgb::new(80, 120, 220),
    Rgb::new(100, 220, 120),
    Rgb::new(240, 220, 80),
    Rgb::new(200, 120, 220),
    Rgb::new(80, 220, 220),
    Rgb::new(255, 165, 0),
    Rgb::new(235, 235, 235),
];

/// Display color for a palette entry; wraps for large palettes.
pub fn tile_color(color: ColorId) -> Rgb {
    TILE_COLORS[color as usize % TILE_COLORS.len()]
}

/// Clamp a screen coordinate into the framebuffer's range.
/// `u16::MAX` is never a valid column or row, so such writes are dropped.
#[inline]
fn screen(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

#[inline]
fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// A lightweight terminal renderer for the tile board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 keeps tiles roughly square and easy to hit with the mouse.
        Self {
            cell_w: 4,
            cell_h: 2,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame(&self, snap: &GridSnapshot, viewport: Viewport) -> Frame {
        let w = count(snap.columns)
            .saturating_mul(self.cell_w as u32)
            .saturating_add(2);
        let h = count(snap.rows)
            .saturating_mul(self.cell_h as u32)
            .saturating_add(2);
        Frame {
            x: (viewport.width as u32).saturating_sub(w) / 2,
            y: (viewport.height as u32).saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Top-left screen position of a grid cell. Row 0 is drawn at the bottom.
    fn cell_origin(&self, frame: Frame, rows: usize, pos: CellPos) -> (u32, u32) {
        let screen_row = count(rows.saturating_sub(pos.row + 1));
        (
            frame
                .x
                .saturating_add(1)
                .saturating_add(count(pos.col).saturating_mul(self.cell_w as u32)),
            frame
                .y
                .saturating_add(1)
                .saturating_add(screen_row.saturating_mul(self.cell_h as u32)),
        )
    }

    /// Number of tile columns and screen rows whose origin is inside the viewport.
    fn visible_extent(&self, snap: &GridSnapshot, frame: Frame, viewport: Viewport) -> (usize, usize) {
        let room_x = (viewport.width as u32).saturating_sub(frame.x.saturating_add(1));
        let room_y = (viewport.height as u32).saturating_sub(frame.y.saturating_add(1));
        let cols = room_x.div_ceil(self.cell_w as u32) as usize;
        let rows = room_y.div_ceil(self.cell_h as u32) as usize;
        (cols.min(snap.columns), rows.min(snap.rows))
    }

    /// Grid cell drawn at screen position (x, y), if any.
    pub fn cell_at(&self, snap: &GridSnapshot, viewport: Viewport, x: u16, y: u16) -> Option<CellPos> {
        if snap.rows == 0 || snap.columns == 0 {
            return None;
        }
        let frame = self.frame(snap, viewport);
        let inner_x = (x as u32).checked_sub(frame.x.saturating_add(1))?;
        let inner_y = (y as u32).checked_sub(frame.y.saturating_add(1))?;

        let col = (inner_x / self.cell_w as u32) as usize;
        let screen_row = (inner_y / self.cell_h as u32) as usize;
        if col >= snap.columns || screen_row >= snap.rows {
            return None;
        }
        Some(CellPos::new(snap.rows - 1 - screen_row, col))
    }

    /// Render the board into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GridSnapshot,
        status: &StatusView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(GlyphStyle::default().glyph(' '));
        if snap.rows == 0 || snap.columns == 0 {
            return;
        }

        let frame = self.frame(snap, viewport);
        fb.fill_rect(
            screen(frame.x.saturating_add(1)),
            screen(frame.y.saturating_add(1)),
            screen(frame.w.saturating_sub(2)),
            screen(frame.h.saturating_sub(2)),
            ' ',
            GlyphStyle::plain(Rgb::new(80, 80, 90), BOARD_BG),
        );
        draw_border(
            fb,
            frame,
            GlyphStyle::plain(Rgb::gray(200), Rgb::BLACK),
        );

        let (visible_cols, visible_rows) = self.visible_extent(snap, frame, viewport);
        for screen_row in 0..visible_rows {
            let row = snap.rows - 1 - screen_row;
            for col in 0..visible_cols {
                let pos = CellPos::new(row, col);
                let selected = status.cursor == Some(pos);
                let (x, y) = self.cell_origin(frame, snap.rows, pos);
                match snap.cell(row, col).flatten() {
                    Some(color) => self.draw_tile(fb, (x, y), color, selected),
                    None => self.draw_empty(fb, (x, y), selected),
                }
            }
        }

        self.draw_side_panel(fb, snap, status, viewport, frame);

        if status.no_moves {
            draw_overlay_text(fb, frame, viewport, "NO MOVES");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GridSnapshot, status: &StatusView, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, status, viewport, &mut fb);
        fb
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, (x, y): (u32, u32), color: ColorId, selected: bool) {
        let style = GlyphStyle::plain(tile_color(color), BOARD_BG).bold();
        let ch = if selected { '▓' } else { '█' };
        fb.fill_rect(screen(x), screen(y), self.cell_w, self.cell_h, ch, style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, (x, y): (u32, u32), selected: bool) {
        let style = GlyphStyle::plain(Rgb::new(90, 90, 100), BOARD_BG).dim_if(!selected);
        let ch = if selected { '░' } else { '·' };
        fb.fill_rect(screen(x), screen(y), self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GridSnapshot,
        status: &StatusView,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(10) > viewport.width as u32 {
            return;
        }
        let panel_x = screen(panel_x);

        let label = GlyphStyle::default().bold();
        let value = GlyphStyle::plain(Rgb::gray(200), Rgb::BLACK);

        let mut y = screen(frame.y);
        fb.put_str(panel_x, y, "CLEARED", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, status.collects, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TILES", label);
        y = y.saturating_add(1);
        let end = fb.put_u32(panel_x, y, count(snap.occupied), value);
        let end = fb.put_str(end, y, "/", value);
        fb.put_u32(end, y, count(snap.rows.saturating_mul(snap.columns)), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        let state = if status.no_moves {
            "shuffle"
        } else if status.busy {
            "busy"
        } else {
            "ready"
        };
        fb.put_str(panel_x, y, state, value);
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: GlyphStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }
    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);

    fb.put_char(screen(x), screen(y), '┌', style);
    fb.put_char(screen(right), screen(y), '┐', style);
    fb.put_char(screen(x), screen(bottom), '└', style);
    fb.put_char(screen(right), screen(bottom), '┘', style);

    // Edges stop at the framebuffer; the rest would be clipped anyway.
    let last_x = right.min(fb.width() as u32);
    for cx in x.saturating_add(1)..last_x {
        fb.put_char(screen(cx), screen(y), '─', style);
        fb.put_char(screen(cx), screen(bottom), '─', style);
    }
    let last_y = bottom.min(fb.height() as u32);
    for cy in y.saturating_add(1)..last_y {
        fb.put_char(screen(x), screen(cy), '│', style);
        fb.put_char(screen(right), screen(cy), '│', style);
    }
}

/// Center `text` on the visible part of the frame.
fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, viewport: Viewport, text: &str) {
    let visible_w = frame
        .x
        .saturating_add(frame.w)
        .min(viewport.width as u32)
        .saturating_sub(frame.x);
    let visible_h = frame
        .y
        .saturating_add(frame.h)
        .min(viewport.height as u32)
        .saturating_sub(frame.y);

    let text_w = count(text.chars().count());
    let x = frame.x.saturating_add(visible_w.saturating_sub(text_w) / 2);
    let y = frame.y.saturating_add(visible_h / 2);
    let style = GlyphStyle::plain(Rgb::gray(255), Rgb::BLACK).bold();
    fb.put_str(screen(x), screen(y), text, style);
}
