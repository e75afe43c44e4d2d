//! Renderer - Field frames and terminal output
//!
//! - **buffer** - FrameBuffer grid and drawing primitives
//! - **draw** - Draws a PinField into a FrameBuffer
//! - **output** - Differential crossterm output

mod buffer;
mod draw;
mod output;

pub use buffer::FrameBuffer;
pub use draw::draw_field;
pub use output::TerminalRenderer;
