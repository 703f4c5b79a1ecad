//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Tile;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

/// Tile backgrounds indexed by log2(value) - 1, i.e. 2, 4, 8, ... 2048.
const TILE_BG: [Rgb; 11] = [
    Rgb::new(238, 228, 218),
    Rgb::new(237, 224, 200),
    Rgb::new(242, 177, 121),
    Rgb::new(245, 149, 99),
    Rgb::new(246, 124, 95),
    Rgb::new(246, 94, 59),
    Rgb::new(237, 207, 114),
    Rgb::new(237, 204, 97),
    Rgb::new(237, 200, 80),
    Rgb::new(237, 197, 63),
    Rgb::new(237, 194, 46),
];

/// Background for anything past the palette.
const SUPER_TILE_BG: Rgb = Rgb::new(60, 58, 50);

/// A lightweight terminal renderer for the puzzle grid.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 6x3 leaves room for four-digit values with padding and roughly
        // squares the tile with typical glyph aspect ratios.
        Self {
            cell_w: 6,
            cell_h: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the bordered grid for an `n` x `n` game.
    pub fn frame_size(&self, n: usize) -> (u16, u16) {
        let n = n as u16;
        (n * self.cell_w + 2, n * self.cell_h + 2)
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap.size);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..snap.size {
            for col in 0..snap.size {
                let px = start_x + 1 + col as u16 * self.cell_w;
                let py = start_y + 1 + row as u16 * self.cell_h;
                self.draw_tile(fb, px, py, snap.tile(row, col));
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        } else if snap.won {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "YOU WIN!");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, px: u16, py: u16, value: Tile) {
        let style = tile_style(value);
        // Inner block leaves a one-column gutter on the right so tiles read as separate.
        let inner_w = if self.cell_w > 2 { self.cell_w - 1 } else { self.cell_w };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::new(BOARD_BG, BOARD_BG));
        fb.fill_rect(px, py, inner_w, self.cell_h, ' ', style);

        let mid_y = py + self.cell_h / 2;
        if value == 0 {
            fb.put_str_centered(px, mid_y, inner_w, "·", style);
        } else {
            fb.put_str_centered(px, mid_y, inner_w, &tile_label(value, inner_w), style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = CellStyle::new(Rgb::new(120, 120, 130), Rgb::new(0, 0, 0));

        let mut y = start_y;
        for (name, amount) in [("SCORE", snap.score), ("BEST", snap.max_tile), ("MOVES", snap.moves)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u64(panel_x, y + 1, amount, value);
            y += 3;
        }

        for line in ["arrows/hjkl/wasd", "r restart", "q quit"] {
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = start_y.saturating_add(frame_h / 2);
        fb.put_str_centered(start_x, mid_y, frame_w, text, style);
    }
}

/// Colour tier for a tile value.
fn tile_style(value: Tile) -> CellStyle {
    if value == 0 {
        return CellStyle::new(DARK_TEXT, EMPTY_BG);
    }
    let exp = value.trailing_zeros() as usize;
    let bg = TILE_BG.get(exp.saturating_sub(1)).copied().unwrap_or(SUPER_TILE_BG);
    let fg = if value < 8 { DARK_TEXT } else { LIGHT_TEXT };
    CellStyle::new(fg, bg).bold()
}

/// Decimal label, or `2^k` when the number does not fit.
fn tile_label(value: Tile, width: u16) -> String {
    let decimal = value.to_string();
    if decimal.len() <= width as usize {
        decimal
    } else {
        format!("2^{}", value.trailing_zeros())
    }
}
