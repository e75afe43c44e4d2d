//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Glyphs that represents what should be
//! displayed for one field. All drawing operations work on this buffer and
//! clip silently at its edges.

use crate::types::{Attr, BorderStyle, Glyph, Rect, Rgba};

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal glyphs.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default glyphs.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); size],
        }
    }

    /// Get buffer width.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get buffer height.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Check if coordinates are in bounds.
    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a glyph reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Glyph> {
        if self.in_bounds(x, y) {
            Some(&self.glyphs[self.index(x, y)])
        } else {
            None
        }
    }

    /// Iterate over glyphs with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Glyph)> {
        let width = self.width.max(1) as usize;
        self.glyphs.iter().enumerate().map(move |(i, glyph)| {
            ((i % width) as u16, (i / width) as u16, glyph)
        })
    }

    /// One row as a plain string, ignoring colors. Mostly for tests.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|glyph| glyph.ch)
            .collect()
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single glyph. Returns true if it landed inside the buffer.
    pub fn set_glyph(&mut self, x: u16, y: u16, ch: char, fg: Rgba, bg: Rgba, attrs: Attr) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }

        let idx = self.index(x, y);
        let glyph = &mut self.glyphs[idx];

        glyph.ch = ch;
        glyph.fg = fg;
        glyph.bg = Rgba::blend(bg, glyph.bg);
        glyph.attrs = attrs;
        true
    }

    /// Fill a rectangle with a background color.
    pub fn fill_rect(&mut self, rect: Rect, bg: Rgba) {
        let x2 = rect.x.saturating_add(rect.width).min(self.width);
        let y2 = rect.y.saturating_add(rect.height).min(self.height);

        for row in rect.y..y2 {
            for col in rect.x..x2 {
                self.set_glyph(col, row, ' ', Rgba::TERMINAL_DEFAULT, bg, Attr::NONE);
            }
        }
    }

    /// Draw one character centered within `rect`.
    pub fn draw_char_centered(&mut self, rect: Rect, ch: char, fg: Rgba, attrs: Attr) -> bool {
        if rect.width == 0 || rect.height == 0 {
            return false;
        }
        let x = rect.x + (rect.width - 1) / 2;
        let y = rect.y + (rect.height - 1) / 2;
        let bg = self.get(x, y).map_or(Rgba::TERMINAL_DEFAULT, |glyph| glyph.bg);
        self.set_glyph(x, y, ch, fg, bg, attrs)
    }

    /// Draw a border around a rectangle.
    pub fn draw_border(&mut self, rect: Rect, style: BorderStyle, color: Rgba) {
        if rect.width < 2 || rect.height < 2 || style == BorderStyle::None {
            return;
        }

        let glyphs = style.glyphs();
        let x2 = rect.x + rect.width - 1;
        let y2 = rect.y + rect.height - 1;

        let put = |buf: &mut Self, x: u16, y: u16, ch: char| {
            let bg = buf.get(x, y).map_or(Rgba::TERMINAL_DEFAULT, |glyph| glyph.bg);
            buf.set_glyph(x, y, ch, color, bg, Attr::NONE);
        };

        // Corners
        put(self, rect.x, rect.y, glyphs.top_left);
        put(self, x2, rect.y, glyphs.top_right);
        put(self, x2, y2, glyphs.bottom_right);
        put(self, rect.x, y2, glyphs.bottom_left);

        // Horizontal edges
        for col in (rect.x + 1)..x2 {
            put(self, col, rect.y, glyphs.horizontal);
            put(self, col, y2, glyphs.horizontal);
        }

        // Vertical edges
        for row in (rect.y + 1)..y2 {
            put(self, rect.x, row, glyphs.vertical);
            put(self, x2, row, glyphs.vertical);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
