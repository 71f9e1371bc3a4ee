/// Rendering backend: all terminal I/O lives here.
///
/// The world is 1080×720 units; the terminal is however many cells it is.
/// `Viewport` scales between the two and `TerminalRenderer` rasterises the
/// presentation layer's primitives into a cell buffer that is written out
/// in one pass per frame.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use glam::Vec2;

use crate::assets::Sprite;
use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::geometry::Rect;
use crate::render::Renderer;

// ── Viewport ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 / WINDOW_WIDTH as f32,
            self.rows as f32 / WINDOW_HEIGHT as f32,
        )
    }

    /// Cell containing a world point, if it is on screen.
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        let c = (p * self.scale()).floor();
        if c.x < 0.0 || c.y < 0.0 || c.x >= self.cols as f32 || c.y >= self.rows as f32 {
            return None;
        }
        Some((c.x as u16, c.y as u16))
    }

    /// World position of a cell's centre.
    pub fn to_world(&self, col: u16, row: u16) -> Vec2 {
        (Vec2::new(col as f32, row as f32) + 0.5) / self.scale()
    }

    /// Inclusive cell span `(col0, row0, col1, row1)` covered by `rect`,
    /// clipped to the screen. Every non-empty rect covers at least one cell.
    pub fn cell_span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let s = self.scale();
        let lo = (Vec2::new(rect.x as f32, rect.y as f32) * s).floor();
        let hi = (Vec2::new(rect.right() as f32, rect.bottom() as f32) * s).ceil() - 1.0;
        let hi = hi.max(lo);
        let max = Vec2::new(self.cols as f32 - 1.0, self.rows as f32 - 1.0);
        if hi.x < 0.0 || hi.y < 0.0 || lo.x > max.x || lo.y > max.y {
            return None;
        }
        let lo = lo.max(Vec2::ZERO);
        let hi = hi.min(max);
        Some((lo.x as u16, lo.y as u16, hi.x as u16, hi.y as u16))
    }
}

// ── Cell buffer ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::White,
    bg: Color::Black,
};

pub struct TerminalRenderer<W: Write> {
    out: W,
    viewport: Viewport,
    background: Color,
    cells: Vec<Cell>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        let len = viewport.cols as usize * viewport.rows as usize;
        TerminalRenderer {
            out,
            viewport,
            background: BLANK.bg,
            cells: vec![BLANK; len],
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.cells = vec![BLANK; viewport.cols as usize * viewport.rows as usize];
    }

    /// Current contents of a cell.
    pub fn cell(&self, col: u16, row: u16) -> Option<Cell> {
        self.index(col, row).map(|i| self.cells[i])
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.viewport.cols && row < self.viewport.rows)
            .then(|| row as usize * self.viewport.cols as usize + col as usize)
    }

    fn put(&mut self, col: u16, row: u16, ch: char, fg: Color) {
        let bg = self.background;
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell { ch, fg, bg };
        }
    }

    fn put_world(&mut self, p: Vec2, ch: char, fg: Color) {
        if let Some((col, row)) = self.viewport.to_cell(p) {
            self.put(col, row, ch, fg);
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self, color: Color) {
        self.background = color;
        let blank = Cell { bg: color, ..BLANK };
        self.cells.fill(blank);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((c0, r0, c1, r1)) = self.viewport.cell_span(&rect) else {
            return;
        };
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.put(col, row, '█', color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, _width: i32) {
        let Some((c0, r0, c1, r1)) = self.viewport.cell_span(&rect) else {
            return;
        };
        for col in c0..=c1 {
            self.put(col, r0, '─', color);
            self.put(col, r1, '─', color);
        }
        for row in r0..=r1 {
            self.put(c0, row, '│', color);
            self.put(c1, row, '│', color);
        }
        self.put(c0, r0, '┌', color);
        self.put(c1, r0, '┐', color);
        self.put(c0, r1, '└', color);
        self.put(c1, r1, '┘', color);
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let (Some(a), Some(b)) = (self.viewport.to_cell(from), self.viewport.to_cell(to)) else {
            return;
        };
        // Bresenham over cells.
        let (mut x, mut y) = (a.0 as i32, a.1 as i32);
        let (x1, y1) = (b.0 as i32, b.1 as i32);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x as u16, y as u16, '·', color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn circle(&mut self, center: Vec2, _radius: f32, color: Color) {
        // Any radius we draw is smaller than a cell.
        self.put_world(center, '•', color);
    }

    fn blit(&mut self, sprite: &Sprite, top_left: Vec2) {
        let center = top_left + Vec2::new(sprite.width as f32, sprite.height as f32) / 2.0;
        self.put_world(center, sprite.glyph(), sprite.color);
    }

    fn blit_rotated(&mut self, sprite: &Sprite, center: Vec2, degrees: f32) {
        self.put_world(center, sprite.glyph_at(degrees), sprite.color);
    }

    fn text(&mut self, text: &str, at: Vec2, color: Color) {
        let Some((col, row)) = self.viewport.to_cell(at) else {
            return;
        };
        for (i, ch) in text.chars().enumerate() {
            let Some(c) = col.checked_add(i as u16) else {
                break;
            };
            self.put(c, row, ch, color);
        }
    }

    fn present(&mut self) -> std::io::Result<()> {
        let mut fg = None;
        let mut bg = None;
        for row in 0..self.viewport.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.viewport.cols as usize;
            let end = start + self.viewport.cols as usize;
            for cell in &self.cells[start..end] {
                if fg != Some(cell.fg) {
                    self.out.queue(style::SetForegroundColor(cell.fg))?;
                    fg = Some(cell.fg);
                }
                if bg != Some(cell.bg) {
                    self.out.queue(style::SetBackgroundColor(cell.bg))?;
                    bg = Some(cell.bg);
                }
                self.out.queue(Print(cell.ch))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}
