//! # spark-pin
//!
//! Reactive PIN / one-time-code entry field for terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A [`PinField`] owns a fixed row of single-digit [`PinCell`]s. Cells only
//! classify their own content; every transition between cells (advance,
//! retreat, paste overflow) goes through the field, which also owns focus and
//! fires completion exactly once per fill.
//!
//! Cell content, focusable and selected flags all live in signals, so a
//! renderer can redraw from an effect:
//! ```text
//! key / paste → PinField → cell signals → draw_field → TerminalRenderer
//! ```
//!
//! ## Modules
//!
//! - [`field`] - The entry state machine and completion handlers
//! - [`cell`] - One digit slot and its content classification
//! - [`config`] - Construction-time options
//! - [`state`] - Focus, keyboard types, crossterm input bridge
//! - [`layout`] - Taffy row layout of the cells
//! - [`renderer`] - FrameBuffer drawing and diffing terminal output
//! - [`types`] - Colors, attributes, borders, rectangles

pub mod cell;
pub mod config;
pub mod error;
pub mod field;
pub mod layout;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use cell::{CellEvent, PinCell};
pub use config::{PinFieldConfig, MAX_CELL_COUNT};
pub use error::{PinError, Result};
pub use field::{CompletionHandler, PinCode, PinField};

pub use layout::{compute_field_layout, FieldLayout};
pub use renderer::{draw_field, FrameBuffer, TerminalRenderer};

pub use state::{
    // Focus
    FieldFocus, FocusCallbacks,
    // Keyboard
    KeyboardEvent, KeyState, Modifiers,
    // Input
    convert_event, convert_key_event, poll_event, read_event, route_event, InputEvent,
};
