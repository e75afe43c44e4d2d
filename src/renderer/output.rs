//! Terminal output for field frames.
//!
//! The TerminalRenderer compares each frame to the previous one and only
//! emits glyphs that changed. It tracks the last emitted colors and
//! attributes so escape codes are only written when state actually changes.
//!
//! Output goes through crossterm's `queue!`, so any `io::Write` works as a
//! target: stdout in the demo, a `Vec<u8>` in tests.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use super::buffer::FrameBuffer;
use crate::types::{Attr, Glyph, Rgba};

// =============================================================================
// Conversions
// =============================================================================

fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

fn queue_attrs<W: Write>(out: &mut W, attrs: Attr) -> io::Result<()> {
    const MAP: [(Attr, Attribute); 8] = [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::BLINK, Attribute::SlowBlink),
        (Attr::INVERSE, Attribute::Reverse),
        (Attr::HIDDEN, Attribute::Hidden),
        (Attr::STRIKETHROUGH, Attribute::CrossedOut),
    ];
    for (flag, attribute) in MAP {
        if attrs.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

// =============================================================================
// TerminalRenderer
// =============================================================================

/// Differential renderer placing a field frame at a fixed origin.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    origin: (u16, u16),
    previous: Option<FrameBuffer>,
    last_pos: Option<(u16, u16)>,
    last_fg: Option<Rgba>,
    last_bg: Option<Rgba>,
    last_attrs: Attr,
}

impl TerminalRenderer {
    /// Create a renderer drawing at terminal column `x`, row `y`.
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            origin: (x, y),
            ..Self::default()
        }
    }

    /// Terminal position of the frame's top-left corner.
    pub fn origin(&self) -> (u16, u16) {
        self.origin
    }

    /// Move the frame. Forces a full redraw on the next render.
    pub fn set_origin(&mut self, x: u16, y: u16) {
        if self.origin != (x, y) {
            self.origin = (x, y);
            self.invalidate();
        }
    }

    /// Forget the previous frame (e.g. after the screen was cleared).
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Render a frame, writing only glyphs that changed since the last one.
    ///
    /// Returns the number of glyphs written. The writer is flushed.
    pub fn render<W: Write>(&mut self, out: &mut W, frame: &FrameBuffer) -> io::Result<usize> {
        self.last_pos = None;
        self.last_fg = None;
        self.last_bg = None;

        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|prev| prev.width() == frame.width() && prev.height() == frame.height());

        let mut written = 0;
        for (x, y, glyph) in frame.iter() {
            let unchanged = same_size
                && self
                    .previous
                    .as_ref()
                    .and_then(|prev| prev.get(x, y))
                    .is_some_and(|prev| prev == glyph);
            if unchanged {
                continue;
            }
            self.render_glyph(out, x, y, glyph)?;
            written += 1;
        }

        if written > 0 {
            queue!(out, SetAttribute(Attribute::Reset))?;
            self.last_attrs = Attr::NONE;
        }
        out.flush()?;

        self.previous = Some(frame.clone());
        Ok(written)
    }

    fn render_glyph<W: Write>(
        &mut self,
        out: &mut W,
        x: u16,
        y: u16,
        glyph: &Glyph,
    ) -> io::Result<()> {
        // 1. Cursor movement (only if not sequential)
        let sequential = self.last_pos.is_some_and(|(lx, ly)| ly == y && lx + 1 == x);
        if !sequential {
            queue!(out, MoveTo(self.origin.0 + x, self.origin.1 + y))?;
        }

        // 2. Attributes (reset if changed, then apply new)
        if glyph.attrs != self.last_attrs {
            queue!(out, SetAttribute(Attribute::Reset))?;
            queue_attrs(out, glyph.attrs)?;
            // Reset also drops colors
            self.last_fg = None;
            self.last_bg = None;
            self.last_attrs = glyph.attrs;
        }

        // 3. Colors
        if self.last_fg != Some(glyph.fg) {
            queue!(out, SetForegroundColor(to_color(glyph.fg)))?;
            self.last_fg = Some(glyph.fg);
        }
        if self.last_bg != Some(glyph.bg) {
            queue!(out, SetBackgroundColor(to_color(glyph.bg)))?;
            self.last_bg = Some(glyph.bg);
        }

        // 4. The character
        queue!(out, Print(glyph.ch))?;
        self.last_pos = Some((x, y));
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
