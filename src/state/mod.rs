//! State Module - Runtime interaction state
//!
//! - **Focus** - Which cell of a field is focused, focus/blur callbacks
//! - **Keyboard** - Backend-neutral key event types
//! - **Input** - crossterm event conversion, polling, routing into a field

mod focus;
mod input;
mod keyboard;

pub use focus::*;
pub use input::*;
pub use keyboard::*;
