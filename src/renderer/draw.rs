//! Draw a field into a FrameBuffer.
//!
//! Pure function of the field state and its layout, so the caller can run it
//! inside an effect and re-render whenever a cell signal changes.

use super::buffer::FrameBuffer;
use crate::field::PinField;
use crate::layout::FieldLayout;

/// Render every cell of `field` at the positions in `layout`.
///
/// The selected cell gets the selected border style and color. Filled cells
/// show their digit, or the mask character when one is configured.
pub fn draw_field(field: &PinField, layout: &FieldLayout) -> FrameBuffer {
    let config = field.config();
    let mut buffer = FrameBuffer::new(layout.width, layout.height);

    for (cell, &rect) in field.cells().iter().zip(&layout.cells) {
        buffer.fill_rect(rect, config.background_color);

        let (style, color) = if cell.is_selected() {
            (config.selected_border_style(), config.selected_border_color)
        } else {
            (config.border_style(), config.border_color)
        };
        buffer.draw_border(rect, style, color);

        if let Some(digit) = cell.digit() {
            let ch = config
                .mask
                .or_else(|| char::from_digit(digit as u32, 10))
                .unwrap_or(' ');
            buffer.draw_char_centered(rect, ch, config.text_color, config.font);
        }
    }

    buffer
}
