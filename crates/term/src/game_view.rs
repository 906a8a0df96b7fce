//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::Color;

/// Edge of the square the next-piece preview is drawn in, in board cells
const PREVIEW_CELLS: u16 = 4;

/// Narrowest side panel worth drawing
const MIN_PANEL_WIDTH: u16 = 12;

const WELL_BG: Rgb = Rgb::new(18, 18, 30);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const CONTROLS: [(&str, &str); 6] = [
    ("←→", "Move"),
    ("↑", "Rotate"),
    ("↓", "Soft drop"),
    ("Space", "Hard drop"),
    ("P", "Pause"),
    ("R", "Reset"),
];

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

/// Where the board frame landed in the last layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub x: u16,
    pub y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

/// A lightweight terminal renderer for the Tetris game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_controls: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            show_controls: true,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_controls(mut self, show: bool) -> Self {
        self.show_controls = show;
        self
    }

    /// Position of the board frame for a snapshot of this size.
    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> BoardLayout {
        let frame_w = (snap.width as u16).saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = (snap.height as u16).saturating_mul(self.cell_h).saturating_add(2);
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            x,
            y,
            frame_w,
            frame_h,
        }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let layout = self.layout(snap, viewport);
        let border = Style::new(Rgb::new(0, 200, 255), PANEL_BG);
        fb.draw_box(layout.x, layout.y, layout.frame_w, layout.frame_h, border);

        let empty = Style::new(Rgb::new(60, 60, 80), WELL_BG).dim();
        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.cell(x, y) {
                    Some(color) => self.draw_block(fb, &layout, x as u16, y as u16, color),
                    None => self.fill_cell(fb, &layout, x as u16, y as u16, '·', empty),
                }
            }
        }

        if !snap.game_over {
            self.draw_piece(fb, &layout, snap, &snap.current);
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.game_over {
            let score = snap.score_display();
            self.draw_overlay(fb, &layout, &["GAME OVER", score.as_str(), "R: again"]);
        } else if snap.paused {
            self.draw_overlay(fb, &layout, &["PAUSED"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        snap: &GameSnapshot,
        piece: &PieceSnapshot,
    ) {
        for &(x, y) in piece.board_cells().iter() {
            if x >= 0 && y >= 0 && (x as usize) < snap.width && (y as usize) < snap.height {
                self.draw_block(fb, layout, x as u16, y as u16, piece.color);
            }
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: &BoardLayout, x: u16, y: u16, color: Color) {
        let style = Style::new(Rgb::from(color), WELL_BG).bold();
        self.fill_cell(fb, layout, x, y, '█', style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: Style,
    ) {
        let px = layout.x + 1 + cell_x * self.cell_w;
        let py = layout.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < MIN_PANEL_WIDTH {
            return;
        }

        let label = Style::new(Rgb::new(0, 240, 120), PANEL_BG).bold();
        let value = Style::new(Rgb::new(230, 230, 230), PANEL_BG);

        let mut y = layout.y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, &snap.next);
        y = y.saturating_add(PREVIEW_CELLS * self.cell_h + 1);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &snap.score_display(), value.bold());
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &snap.level.to_string(), value.bold());
        y = y.saturating_add(2);

        if !self.show_controls {
            return;
        }
        fb.put_str(panel_x, y, "CONTROLS", label);
        y = y.saturating_add(1);
        let key = value.dim();
        for (keys, what) in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, keys, key);
            fb.put_str(panel_x + 6, y, what, value);
            y = y.saturating_add(1);
        }
    }

    /// Draw `piece`'s shape inside a fixed 4×4 cell area at (x, y).
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &PieceSnapshot) {
        let size = piece.shape.size() as u16;
        // Center smaller shapes inside the preview square.
        let off = PREVIEW_CELLS.saturating_sub(size) / 2;
        let style = Style::new(Rgb::from(piece.color), PANEL_BG).bold();
        for &(sx, sy) in piece.shape_cells().iter() {
            let px = x + (off + sx as u16) * self.cell_w;
            let py = y + (off + sy as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &BoardLayout, lines: &[&str]) {
        let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let top = (layout.y + layout.frame_h / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = layout.x + layout.frame_w.saturating_sub(text_w) / 2;
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_centers_standard_board() {
        let snap = GameSnapshot {
            width: 10,
            height: 20,
            cells: vec![None; 200],
            ..GameSnapshot::default()
        };
        let layout = GameView::default().layout(&snap, Viewport::new(80, 24));
        assert_eq!((layout.frame_w, layout.frame_h), (22, 22));
        assert_eq!((layout.x, layout.y), (29, 1));
    }

    #[test]
    fn top_anchor_pins_to_row_zero() {
        let snap = GameSnapshot {
            width: 6,
            height: 8,
            cells: vec![None; 48],
            ..GameSnapshot::default()
        };
        let view = GameView::new(1, 1).with_anchor_y(AnchorY::Top);
        let layout = view.layout(&snap, Viewport::new(40, 30));
        assert_eq!(layout.y, 0);
        assert_eq!((layout.frame_w, layout.frame_h), (8, 10));
    }
}
