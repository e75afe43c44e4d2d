//! Field configuration.
//!
//! Everything here is fixed for the lifetime of a field. Only `cell_count`
//! reaches the entry state machine; the rest is read by the layout pass and
//! the renderer.
//!
//! # Example
//!
//! ```
//! use spark_pin::{PinFieldConfig, Rgba};
//!
//! let config = PinFieldConfig::new(6)
//!     .with_spacing(2)
//!     .with_selected_border_color(Rgba::GREEN)
//!     .with_midpoint_gap(true);
//!
//! assert!(config.validate().is_ok());
//! assert!(config.splits_at_midpoint());
//! ```

use crate::error::{PinError, Result};
use crate::types::{Attr, BorderStyle, Rgba};

/// Largest supported cell count: the widest code whose integer form fits `u64`.
pub const MAX_CELL_COUNT: usize = 19;

/// Construction-time options for a [`PinField`](crate::PinField).
#[derive(Debug, Clone, PartialEq)]
pub struct PinFieldConfig {
    /// Number of digit cells.
    pub cell_count: usize,
    /// Attributes the digits are drawn with.
    pub font: Attr,
    /// Columns between adjacent cells.
    pub spacing: u16,
    /// Outer width of one cell, border included.
    pub cell_width: u16,
    /// Outer height of one cell, border included.
    pub cell_height: u16,
    pub border_color: Rgba,
    pub selected_border_color: Rgba,
    /// 0 = no border, 1 = light, 2+ = heavy.
    pub border_width: u8,
    pub selected_border_width: u8,
    /// Non-zero rounds the corners of light borders.
    pub corner_radius: u8,
    pub background_color: Rgba,
    pub text_color: Rgba,
    /// Split the row visually in two halves (even counts above 2 only).
    pub insert_midpoint_gap: bool,
    /// Draw filled cells with this character instead of the digit.
    pub mask: Option<char>,
}

impl PinFieldConfig {
    /// Create a config with default styling for `cell_count` cells.
    pub fn new(cell_count: usize) -> Self {
        Self {
            cell_count,
            font: Attr::BOLD,
            spacing: 1,
            cell_width: 5,
            cell_height: 3,
            border_color: Rgba::GRAY,
            selected_border_color: Rgba::BLUE,
            border_width: 1,
            selected_border_width: 2,
            corner_radius: 1,
            background_color: Rgba::TERMINAL_DEFAULT,
            text_color: Rgba::TERMINAL_DEFAULT,
            insert_midpoint_gap: false,
            mask: None,
        }
    }

    pub fn with_font(mut self, font: Attr) -> Self {
        self.font = font;
        self
    }

    pub fn with_spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_cell_size(mut self, width: u16, height: u16) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    pub fn with_border_color(mut self, color: Rgba) -> Self {
        self.border_color = color;
        self
    }

    pub fn with_selected_border_color(mut self, color: Rgba) -> Self {
        self.selected_border_color = color;
        self
    }

    pub fn with_border_width(mut self, width: u8) -> Self {
        self.border_width = width;
        self
    }

    pub fn with_selected_border_width(mut self, width: u8) -> Self {
        self.selected_border_width = width;
        self
    }

    pub fn with_corner_radius(mut self, radius: u8) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_background_color(mut self, color: Rgba) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_text_color(mut self, color: Rgba) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_midpoint_gap(mut self, enabled: bool) -> Self {
        self.insert_midpoint_gap = enabled;
        self
    }

    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Check the config before a field is built from it.
    pub fn validate(&self) -> Result<()> {
        if self.cell_count == 0 || self.cell_count > MAX_CELL_COUNT {
            return Err(PinError::InvalidCellCount {
                count: self.cell_count,
                max: MAX_CELL_COUNT,
            });
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(PinError::InvalidConfig(format!(
                "cell size must be non-zero, got {}x{}",
                self.cell_width, self.cell_height
            )));
        }
        // A bordered cell needs an interior column and row for the digit.
        if (self.border_width > 0 || self.selected_border_width > 0)
            && (self.cell_width < 3 || self.cell_height < 3)
        {
            return Err(PinError::InvalidConfig(format!(
                "bordered cells need at least 3x3, got {}x{}",
                self.cell_width, self.cell_height
            )));
        }
        Ok(())
    }

    /// Whether the layout inserts an extra gap between the two halves.
    pub fn splits_at_midpoint(&self) -> bool {
        self.insert_midpoint_gap && self.cell_count > 2 && self.cell_count % 2 == 0
    }

    /// Border style of an unselected cell.
    pub fn border_style(&self) -> BorderStyle {
        BorderStyle::from_width(self.border_width, self.corner_radius)
    }

    /// Border style of the selected cell.
    pub fn selected_border_style(&self) -> BorderStyle {
        BorderStyle::from_width(self.selected_border_width, self.corner_radius)
    }
}
