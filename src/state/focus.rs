//! Focus System - which cell of a field holds input focus
//!
//! Each field owns one `FieldFocus`:
//! - `focused` signal (index of the focused cell, `None` when the field has no focus)
//! - Focus callbacks (on_focus/on_blur) per cell index
//!
//! Focus is per field instance. Nothing here is process-wide, so any number of
//! fields can live side by side.
//!
//! # Example
//!
//! ```ignore
//! use spark_pin::state::{FieldFocus, FocusCallbacks};
//!
//! let focus = FieldFocus::new();
//! let cleanup = focus.register_callbacks(0, FocusCallbacks {
//!     on_focus: Some(Box::new(|| println!("cell 0 focused"))),
//!     on_blur: None,
//! });
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use spark_signals::{signal, Signal};

// =============================================================================
// FOCUS CALLBACKS
// =============================================================================

/// Callbacks fired when a cell gains or loses focus
#[derive(Default)]
pub struct FocusCallbacks {
    pub on_focus: Option<Box<dyn Fn()>>,
    pub on_blur: Option<Box<dyn Fn()>>,
}

type CallbackRegistry = Rc<RefCell<HashMap<usize, Vec<(usize, FocusCallbacks)>>>>;

// =============================================================================
// FIELD FOCUS
// =============================================================================

/// Focus state of one field.
pub struct FieldFocus {
    focused: Signal<Option<usize>>,
    registry: CallbackRegistry,
    next_id: Cell<usize>,
}

impl Default for FieldFocus {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldFocus {
    pub fn new() -> Self {
        Self {
            focused: signal(None),
            registry: Rc::new(RefCell::new(HashMap::new())),
            next_id: Cell::new(0),
        }
    }

    /// Index of the focused cell, if any
    pub fn focused_index(&self) -> Option<usize> {
        self.focused.get()
    }

    /// Check if any cell is focused
    pub fn has_focus(&self) -> bool {
        self.focused_index().is_some()
    }

    /// Check if a specific cell is focused
    pub fn is_focused(&self, index: usize) -> bool {
        self.focused_index() == Some(index)
    }

    /// Register focus callbacks for a cell.
    /// Returns cleanup function to unregister.
    pub fn register_callbacks(
        &self,
        index: usize,
        callbacks: FocusCallbacks,
    ) -> impl FnOnce() + use<> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        self.registry
            .borrow_mut()
            .entry(index)
            .or_default()
            .push((id, callbacks));

        let registry = Rc::clone(&self.registry);
        move || {
            let mut reg = registry.borrow_mut();
            if let Some(list) = reg.get_mut(&index) {
                list.retain(|(cb_id, _)| *cb_id != id);
                if list.is_empty() {
                    reg.remove(&index);
                }
            }
        }
    }

    /// Move focus, firing blur on the old cell and focus on the new one.
    /// Returns true if focus changed.
    pub(crate) fn set(&self, new_index: Option<usize>) -> bool {
        let old_index = self.focused_index();

        // No change, no callbacks
        if old_index == new_index {
            return false;
        }

        if let Some(old) = old_index {
            self.fire(old, |cb| cb.on_blur.as_ref());
        }

        self.focused.set(new_index);

        if let Some(new) = new_index {
            self.fire(new, |cb| cb.on_focus.as_ref());
        }

        true
    }

    fn fire<F>(&self, index: usize, pick: F)
    where
        F: Fn(&FocusCallbacks) -> Option<&Box<dyn Fn()>>,
    {
        let reg = self.registry.borrow();
        if let Some(callbacks) = reg.get(&index) {
            for (_, cb) in callbacks {
                if let Some(handler) = pick(cb) {
                    handler();
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
