//! PinField - a row of digit cells that behaves as one numeric field.
//!
//! The field owns its cells outright and is the only place focus moves.
//! Cells report a [`CellEvent`] after each content change; the field looks
//! up the reporting cell's neighbours by index and reacts:
//!
//! ```text
//! Advance            → next cell takes focus, or completion at the last cell
//! Retreat            → previous cell takes focus (cleared first on backspace-on-empty)
//! Overflow(rest)     → rest is forwarded into the next cell(s)
//! ```
//!
//! Exactly one cell is focusable at a time. It is the entry target: typing
//! and backspace go to the focused cell, or to the focusable one when no
//! cell holds focus.
//!
//! # Example
//!
//! ```
//! use spark_pin::{PinField, PinFieldConfig};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut field = PinField::new(PinFieldConfig::new(4)).unwrap();
//! let received = Rc::new(RefCell::new(None));
//! let sink = received.clone();
//! let _stop = field.on_complete(move |code| {
//!     *sink.borrow_mut() = Some(code.value());
//! });
//!
//! field.insert("12");
//! field.insert("3");
//! field.insert("4");
//! assert_eq!(*received.borrow(), Some(1234));
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use spark_signals::{derived, Derived, Signal};
use tracing::{debug, info, warn};

use crate::cell::{CellEvent, PinCell};
use crate::config::PinFieldConfig;
use crate::error::{PinError, Result};
use crate::state::{FieldFocus, KeyState, KeyboardEvent};

// =============================================================================
// PinCode
// =============================================================================

/// A fully entered code, as handed to completion handlers.
#[derive(Clone, PartialEq, Eq)]
pub struct PinCode {
    digits: String,
}

impl PinCode {
    /// The digits in entry order, leading zeros included.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Integer form of the code. Leading zeros are lost here.
    pub fn value(&self) -> u64 {
        self.digits.parse().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

// Codes are secrets; keep them out of debug output.
impl fmt::Debug for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinCode").field("len", &self.digits.len()).finish()
    }
}

/// Handler for completed entry.
pub type CompletionHandler = Box<dyn Fn(&PinCode)>;

type HandlerRegistry = Rc<RefCell<Vec<(usize, CompletionHandler)>>>;

// =============================================================================
// PinField
// =============================================================================

/// The orchestrating control: fixed-size ordered cells plus focus state.
pub struct PinField {
    config: PinFieldConfig,
    cells: Vec<PinCell>,
    focus: FieldFocus,
    handlers: HandlerRegistry,
    next_handler_id: Cell<usize>,
    /// Completion fires once per fill; re-armed whenever a cell is empty.
    armed: bool,
}

impl PinField {
    /// Build a field with `config.cell_count` empty cells; cell 0 is focusable.
    pub fn new(config: PinFieldConfig) -> Result<Self> {
        config.validate()?;

        let cells: Vec<PinCell> = (0..config.cell_count).map(PinCell::new).collect();
        let field = Self {
            config,
            cells,
            focus: FieldFocus::new(),
            handlers: Rc::new(RefCell::new(Vec::new())),
            next_handler_id: Cell::new(0),
            armed: true,
        };
        field.make_focusable(0);

        debug!(cells = field.cells.len(), "pin field created");
        Ok(field)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn config(&self) -> &PinFieldConfig {
        &self.config
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Bounds-checked cell lookup. `None` means "no such sibling".
    pub fn cell(&self, index: usize) -> Option<&PinCell> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[PinCell] {
        &self.cells
    }

    /// Digits entered so far, in cell order. Empty cells contribute nothing,
    /// so a partial entry is shorter than `cell_count`; it is never padded.
    pub fn value(&self) -> String {
        self.cells.iter().filter_map(|cell| cell.digit()).map(|d| char::from(b'0' + d)).collect()
    }

    /// Integer form of [`value`](Self::value); `None` while nothing is entered.
    pub fn numeric_value(&self) -> Option<u64> {
        let value = self.value();
        if value.is_empty() {
            None
        } else {
            value.parse().ok()
        }
    }

    /// Reactive form of [`value`](Self::value).
    pub fn value_derived(&self) -> Derived<String> {
        let texts: Vec<Signal<String>> = self.cells.iter().map(|cell| cell.text_signal()).collect();
        derived(move || {
            texts
                .iter()
                .map(|text| text.get())
                .filter(|text| text.len() == 1 && text.chars().all(|c| c.is_ascii_digit()))
                .collect()
        })
    }

    /// Whether every cell holds a digit.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|cell| cell.digit().is_some())
    }

    /// Index of the cell currently eligible for input.
    pub fn focusable_index(&self) -> Option<usize> {
        self.cells.iter().position(|cell| cell.is_focusable())
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focus.focused_index()
    }

    pub fn has_focus(&self) -> bool {
        self.focus.has_focus()
    }

    /// Focus state, for registering per-cell focus callbacks.
    pub fn focus_state(&self) -> &FieldFocus {
        &self.focus
    }

    // =========================================================================
    // Completion
    // =========================================================================

    /// Subscribe to completed entry.
    /// Returns cleanup function.
    pub fn on_complete<F>(&self, handler: F) -> impl FnOnce() + use<F>
    where
        F: Fn(&PinCode) + 'static,
    {
        let id = self.next_handler_id.get();
        self.next_handler_id.set(id + 1);
        self.handlers.borrow_mut().push((id, Box::new(handler)));

        let handlers = Rc::clone(&self.handlers);
        move || {
            handlers.borrow_mut().retain(|(handler_id, _)| *handler_id != id);
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Content-change notification for cell `index`: its text became `text`.
    pub fn edit(&mut self, index: usize, text: &str) -> Result<()> {
        let event = self.cell_checked(index)?.edit(text);
        if let Some(event) = event {
            self.dispatch(index, event);
        }
        self.rearm();
        Ok(())
    }

    /// Type or paste `text` into the entry target.
    /// Returns false when there is no target.
    pub fn insert(&mut self, text: &str) -> bool {
        let Some(index) = self.take_entry_target() else {
            return false;
        };
        let mut content = self.cells[index].text();
        content.push_str(text);
        self.edit(index, &content).is_ok()
    }

    /// Backspace on the entry target.
    /// Returns false when there is no target.
    pub fn backspace(&mut self) -> bool {
        let Some(index) = self.take_entry_target() else {
            return false;
        };
        self.backspace_at(index).is_ok()
    }

    /// Backspace on cell `index`.
    ///
    /// On an empty cell this retreats and clears the previous cell. On a
    /// filled cell the digit is deleted in place and the cell stays the
    /// entry target, so the digit can be re-typed where it was.
    pub fn backspace_at(&mut self, index: usize) -> Result<()> {
        match self.cell_checked(index)?.delete_backward() {
            Some(event) => self.dispatch(index, event),
            None => {
                self.make_focusable(index);
                self.move_focus(Some(index));
            }
        }
        self.rearm();
        Ok(())
    }

    /// Route a key press: printable characters are typed, Backspace deletes.
    /// Returns true if the event was consumed.
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        if event.state == KeyState::Release || event.modifiers.is_chord() {
            return false;
        }
        if event.key == "Backspace" {
            return self.backspace();
        }
        match event.printable() {
            Some(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            None => false,
        }
    }

    // =========================================================================
    // Bulk operations
    // =========================================================================

    /// Clear every cell and return to the freshly constructed state.
    pub fn reset(&mut self) {
        for cell in &self.cells {
            cell.clear();
        }
        self.move_focus(None);
        self.make_focusable(0);
        self.armed = true;
        debug!("pin field reset");
    }

    /// Fill cells left to right from the decimal digits of `value`.
    pub fn set_value(&mut self, value: u64) -> Result<()> {
        self.set_digits(&value.to_string())
    }

    /// Fill cells left to right from `digits`; cells past the end are cleared.
    ///
    /// The cell after the last written digit becomes focusable, or the last
    /// written cell when the field is full. Rejected calls change nothing.
    /// Completion is not fired for programmatic fills.
    pub fn set_digits(&mut self, digits: &str) -> Result<()> {
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            warn!("rejected programmatic set: non-digit input");
            return Err(PinError::InvalidDigits(digits.to_string()));
        }
        let count = digits.chars().count();
        if count > self.cells.len() {
            warn!(
                digits = count,
                capacity = self.cells.len(),
                "rejected programmatic set: too many digits"
            );
            return Err(PinError::CapacityExceeded {
                digits: count,
                capacity: self.cells.len(),
            });
        }
        if count == 0 {
            self.reset();
            return Ok(());
        }

        let mut chars = digits.chars();
        for cell in &self.cells {
            match chars.next() {
                Some(c) => cell.set_text(c),
                None => cell.clear(),
            }
        }

        let last_written = count - 1;
        let target = if last_written + 1 < self.cells.len() {
            last_written + 1
        } else {
            last_written
        };
        self.make_focusable(target);
        // Focus follows the new entry target so the next keystroke lands there.
        if self.focus.has_focus() {
            self.move_focus(Some(target));
        }
        self.rearm();
        Ok(())
    }

    // =========================================================================
    // Whole-field focus
    // =========================================================================

    /// Focus the field: always lands on the first cell.
    ///
    /// Cell 0 takes focus without becoming focusable, so with digits already
    /// entered the next keystroke overflows from cell 0 into cell 1. Call
    /// [`reset`](Self::reset) first to start a fresh entry.
    pub fn focus(&mut self) {
        self.move_focus(Some(0));
    }

    /// Release focus. The field resigns as a whole, last cell included.
    pub fn unfocus(&mut self) {
        self.move_focus(None);
    }

    // =========================================================================
    // State machine
    // =========================================================================

    fn dispatch(&mut self, index: usize, event: CellEvent) {
        debug!(index, event = event.name(), "cell event");

        // A cell gives up input focus once it has reported.
        if self.focus.is_focused(index) {
            self.move_focus(None);
        }

        match event {
            CellEvent::Advance => self.advance(index),
            CellEvent::Retreat { remove_previous } => self.retreat(index, remove_previous),
            CellEvent::Overflow { remaining } => self.overflow(index, &remaining),
        }
    }

    fn advance(&mut self, index: usize) {
        if self.cell(index + 1).is_some() {
            self.make_focusable(index + 1);
            self.move_focus(Some(index + 1));
        } else {
            // Last cell stays correctable
            self.make_focusable(index);
            self.complete();
        }
    }

    fn retreat(&mut self, index: usize, remove_previous: bool) {
        match index.checked_sub(1).and_then(|prev| self.cell(prev).map(|_| prev)) {
            Some(prev) => {
                if remove_previous {
                    self.cells[prev].clear();
                }
                self.make_focusable(prev);
                self.move_focus(Some(prev));
            }
            None => self.make_focusable(index),
        }
    }

    fn overflow(&mut self, index: usize, remaining: &str) {
        let next = index + 1;
        if self.cell(next).is_none() {
            // Nowhere to forward: the last cell takes the newest character.
            if let Some(last) = remaining.chars().last() {
                self.cells[index].set_text(last);
            }
            self.make_focusable(index);
            self.complete();
            return;
        }

        let mut chars = remaining.chars();
        let Some(first) = chars.next() else {
            return;
        };
        let rest: String = chars.collect();

        self.cells[next].set_text(first);
        self.make_focusable(next);
        self.move_focus(Some(next));

        let next_is_last = next + 1 == self.cells.len();
        if next_is_last {
            if let Some(last) = rest.chars().last() {
                self.cells[next].set_text(last);
            }
            self.move_focus(None);
            self.make_focusable(next);
            self.complete();
        } else if !rest.is_empty() {
            // Pasted run: the next cell overflows in turn.
            self.move_focus(None);
            self.overflow(next, &rest);
        }
    }

    fn complete(&mut self) {
        if !self.is_complete() {
            debug!("last cell reached with empty cells, completion withheld");
            return;
        }
        if !self.armed {
            return;
        }
        self.armed = false;

        let code = PinCode { digits: self.value() };
        info!(len = code.len(), "pin entry complete");

        let handlers = self.handlers.borrow();
        for (_, handler) in handlers.iter() {
            handler(&code);
        }
    }

    fn rearm(&mut self) {
        if !self.is_complete() {
            self.armed = true;
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn cell_checked(&self, index: usize) -> Result<&PinCell> {
        self.cells.get(index).ok_or(PinError::NoSuchCell {
            index,
            count: self.cells.len(),
        })
    }

    /// Make `index` the only focusable cell.
    fn make_focusable(&self, index: usize) {
        for cell in &self.cells {
            cell.set_focusable(cell.index() == index);
        }
    }

    /// Move input focus and keep the selected flags in step with it.
    fn move_focus(&mut self, new_index: Option<usize>) {
        let old_index = self.focus.focused_index();
        if self.focus.set(new_index) {
            if let Some(cell) = old_index.and_then(|i| self.cells.get(i)) {
                cell.set_selected(false);
            }
            if let Some(cell) = new_index.and_then(|i| self.cells.get(i)) {
                cell.set_selected(true);
            }
        }
    }

    /// The focused cell, or else the focusable one, which then takes focus.
    fn take_entry_target(&mut self) -> Option<usize> {
        let target = self.focused_index().or_else(|| self.focusable_index())?;
        self.move_focus(Some(target));
        Some(target)
    }
}

impl fmt::Debug for PinField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinField")
            .field("cell_count", &self.cells.len())
            .field("filled", &self.value().len())
            .field("focusable", &self.focusable_index())
            .field("focused", &self.focused_index())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Modifiers;
    use spark_signals::effect;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup(count: usize) -> PinField {
        PinField::new(PinFieldConfig::new(count)).unwrap()
    }

    /// Completion counter plus the last value received.
    fn track(field: &PinField) -> (Rc<Cell<usize>>, Rc<RefCell<Option<String>>>) {
        let count = Rc::new(Cell::new(0));
        let last = Rc::new(RefCell::new(None));
        let count_clone = count.clone();
        let last_clone = last.clone();
        // Cleanup is dropped uncalled: the handler lives as long as the field
        let _ = field.on_complete(move |code| {
            count_clone.set(count_clone.get() + 1);
            *last_clone.borrow_mut() = Some(code.as_str().to_string());
        });
        (count, last)
    }

    fn focusable_flags(field: &PinField) -> Vec<bool> {
        field.cells().iter().map(|c| c.is_focusable()).collect()
    }

    fn assert_fresh(field: &PinField) {
        assert!(field.cells().iter().all(|c| c.is_empty()));
        assert_eq!(field.focusable_index(), Some(0));
        assert_eq!(focusable_flags(field).iter().filter(|f| **f).count(), 1);
        assert_eq!(field.focused_index(), None);
        assert!(field.cells().iter().all(|c| !c.is_selected()));
    }

    #[test]
    fn test_initial_state() {
        for count in 1..=8 {
            let field = setup(count);
            assert_eq!(field.cell_count(), count);
            assert_fresh(&field);
            for (i, cell) in field.cells().iter().enumerate() {
                assert_eq!(cell.index(), i);
            }
        }
    }

    #[test]
    fn test_invalid_count() {
        assert!(matches!(
            PinField::new(PinFieldConfig::new(0)),
            Err(PinError::InvalidCellCount { .. })
        ));
    }

    #[test]
    fn test_advance_moves_focus() {
        let mut field = setup(4);
        for i in 0..3 {
            field.edit(i, "5").unwrap();
            assert!(!field.cell(i).unwrap().is_focusable());
            assert!(field.cell(i + 1).unwrap().is_focusable());
            assert_eq!(field.focused_index(), Some(i + 1));
        }
    }

    #[test]
    fn test_non_digit_rejected() {
        let mut field = setup(4);
        field.edit(0, "1").unwrap();
        let before = focusable_flags(&field);

        field.edit(1, "a").unwrap();
        assert!(field.cell(1).unwrap().is_empty());
        assert_eq!(field.cell(0).unwrap().text(), "1");
        assert_eq!(focusable_flags(&field), before);

        // Rejecting again changes nothing either
        field.edit(1, "a").unwrap();
        assert_eq!(focusable_flags(&field), before);
        assert_eq!(field.value(), "1");
    }

    #[test]
    fn test_last_cell_completes_once() {
        let mut field = setup(3);
        let (count, last) = track(&field);

        field.edit(0, "1").unwrap();
        field.edit(1, "2").unwrap();
        assert_eq!(count.get(), 0);
        field.edit(2, "3").unwrap();

        assert_eq!(count.get(), 1);
        assert_eq!(last.borrow().as_deref(), Some("123"));
        assert!(field.cell(2).unwrap().is_focusable());
        assert_eq!(field.focused_index(), None);

        // Overwriting the last digit without clearing does not re-fire
        field.edit(2, "39").unwrap();
        assert_eq!(field.value(), "129");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_completion_rearms_after_clear() {
        let mut field = setup(2);
        let (count, last) = track(&field);

        field.insert("4");
        field.insert("2");
        assert_eq!(count.get(), 1);

        field.backspace_at(1).unwrap();
        assert_eq!(field.value(), "4");
        field.insert("7");
        assert_eq!(count.get(), 2);
        assert_eq!(last.borrow().as_deref(), Some("47"));
    }

    #[test]
    fn test_backspace_on_empty_retreats() {
        let mut field = setup(4);
        field.edit(0, "1").unwrap();
        field.edit(1, "2").unwrap();
        assert_eq!(field.focusable_index(), Some(2));

        field.backspace_at(2).unwrap();
        assert!(field.cell(1).unwrap().is_empty());
        assert_eq!(field.focusable_index(), Some(1));
        assert_eq!(field.focused_index(), Some(1));
        assert_eq!(field.value(), "1");
    }

    #[test]
    fn test_backspace_on_first_empty_cell() {
        let mut field = setup(4);
        field.backspace_at(0).unwrap();
        assert_eq!(field.focusable_index(), Some(0));
        assert!(field.cells().iter().all(|c| c.is_empty()));
        assert_eq!(focusable_flags(&field), vec![true, false, false, false]);
    }

    #[test]
    fn test_programmatic_erase_retreats_without_clearing() {
        let mut field = setup(4);
        field.edit(0, "1").unwrap();
        field.edit(1, "2").unwrap();

        field.edit(1, "").unwrap();
        assert_eq!(field.cell(0).unwrap().text(), "1");
        assert_eq!(field.focusable_index(), Some(0));
        assert_eq!(field.focused_index(), Some(0));
    }

    #[test]
    fn test_two_chars_overflow_into_next() {
        let mut field = setup(4);
        field.edit(0, "1").unwrap();
        field.edit(1, "2").unwrap();

        // Cell 1 already holds "2"; a second keystroke lands "28"
        field.edit(1, "28").unwrap();
        assert_eq!(field.cell(1).unwrap().text(), "2");
        assert_eq!(field.cell(2).unwrap().text(), "8");
        assert!(field.cell(2).unwrap().is_focusable());
        assert!(!field.cell(1).unwrap().is_focusable());
        assert_eq!(field.focused_index(), Some(2));
    }

    #[test]
    fn test_overflow_into_last_cell_completes() {
        let mut field = setup(3);
        let (count, last) = track(&field);
        field.edit(0, "1").unwrap();
        field.edit(1, "23").unwrap();

        assert_eq!(count.get(), 1);
        assert_eq!(last.borrow().as_deref(), Some("123"));
        assert!(field.cell(2).unwrap().is_focusable());
        assert_eq!(field.focused_index(), None);
    }

    #[test]
    fn test_overflow_at_last_cell_overwrites() {
        let mut field = setup(2);
        let (count, last) = track(&field);
        field.edit(0, "1").unwrap();
        field.edit(1, "45").unwrap();

        assert_eq!(field.cell(1).unwrap().text(), "5");
        assert_eq!(count.get(), 1);
        assert_eq!(last.borrow().as_deref(), Some("15"));
        assert!(field.cell(1).unwrap().is_focusable());
    }

    #[test]
    fn test_paste_cascades_across_cells() {
        let mut field = setup(6);
        let (count, last) = track(&field);

        assert!(field.insert("123456"));
        assert_eq!(field.value(), "123456");
        assert_eq!(count.get(), 1);
        assert_eq!(last.borrow().as_deref(), Some("123456"));
        assert_eq!(focusable_flags(&field).iter().filter(|f| **f).count(), 1);
        assert!(field.cell(5).unwrap().is_focusable());
    }

    #[test]
    fn test_short_paste_stops_midway() {
        let mut field = setup(6);
        let (count, _) = track(&field);

        field.insert("123");
        assert_eq!(field.value(), "123");
        assert_eq!(count.get(), 0);
        assert_eq!(field.focusable_index(), Some(2));
        assert_eq!(field.focused_index(), Some(2));
    }

    #[test]
    fn test_reset_round_trip() {
        let mut field = setup(4);
        field.insert("12");
        field.edit(2, "x").unwrap();
        field.backspace();
        field.focus();

        field.reset();
        assert_fresh(&field);
        assert_eq!(field.value(), "");
        assert_eq!(field.numeric_value(), None);
    }

    #[test]
    fn test_set_value_partial() {
        let mut field = setup(6);
        field.set_value(482).unwrap();
        assert_eq!(field.value(), "482");
        assert_eq!(field.numeric_value(), Some(482));
        assert_eq!(field.focusable_index(), Some(3));
        assert_eq!(focusable_flags(&field).iter().filter(|f| **f).count(), 1);
    }

    #[test]
    fn test_set_value_full() {
        let mut field = setup(4);
        let (count, _) = track(&field);
        field.set_value(1234).unwrap();
        assert!(field.is_complete());
        assert_eq!(field.focusable_index(), Some(3));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_set_value_over_capacity_is_noop() {
        let mut field = setup(4);
        field.set_value(12).unwrap();

        let err = field.set_value(12345).unwrap_err();
        assert!(matches!(err, PinError::CapacityExceeded { digits: 5, capacity: 4 }));
        assert_eq!(field.value(), "12");
        assert_eq!(field.focusable_index(), Some(2));
    }

    #[test]
    fn test_set_digits_keeps_leading_zero() {
        let mut field = setup(4);
        field.set_digits("0042").unwrap();
        assert_eq!(field.value(), "0042");
        assert_eq!(field.numeric_value(), Some(42));
        assert!(matches!(
            field.set_digits("12a"),
            Err(PinError::InvalidDigits(_))
        ));
    }

    #[test]
    fn test_set_shorter_clears_tail() {
        let mut field = setup(4);
        field.set_value(1234).unwrap();
        field.set_value(56).unwrap();
        assert_eq!(field.value(), "56");
        assert!(field.cell(2).unwrap().is_empty());
        assert!(field.cell(3).unwrap().is_empty());
    }

    #[test]
    fn test_focus_goes_to_first_cell() {
        let mut field = setup(4);
        field.set_value(12).unwrap();

        field.focus();
        assert_eq!(field.focused_index(), Some(0));
        assert!(field.cell(0).unwrap().is_selected());

        field.unfocus();
        assert!(!field.has_focus());
        assert!(field.cells().iter().all(|c| !c.is_selected()));
    }

    #[test]
    fn test_selected_follows_focus() {
        let mut field = setup(3);
        field.insert("1");
        assert!(!field.cell(0).unwrap().is_selected());
        assert!(field.cell(1).unwrap().is_selected());
    }

    #[test]
    fn test_no_such_cell() {
        let mut field = setup(2);
        assert!(matches!(
            field.edit(2, "1"),
            Err(PinError::NoSuchCell { index: 2, count: 2 })
        ));
        assert!(field.backspace_at(7).is_err());
    }

    #[test]
    fn test_single_cell_field() {
        let mut field = setup(1);
        let (count, last) = track(&field);

        field.insert("9");
        assert_eq!(count.get(), 1);
        assert_eq!(last.borrow().as_deref(), Some("9"));
        assert!(field.cell(0).unwrap().is_focusable());

        field.backspace();
        assert!(field.cell(0).unwrap().is_empty());
        field.backspace();
        assert!(field.cell(0).unwrap().is_focusable());
    }

    #[test]
    fn test_completion_cleanup() {
        let mut field = setup(1);
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let cleanup = field.on_complete(move |_| count_clone.set(count_clone.get() + 1));

        cleanup();
        field.insert("1");
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_handle_key() {
        let mut field = setup(3);

        assert!(field.handle_key(&KeyboardEvent::new("4")));
        assert!(field.handle_key(&KeyboardEvent::new("2")));
        assert_eq!(field.value(), "42");

        // Ctrl chords and named keys are not for us
        assert!(!field.handle_key(&KeyboardEvent::with_modifiers("r", Modifiers::ctrl())));
        assert!(!field.handle_key(&KeyboardEvent::new("Enter")));

        assert!(field.handle_key(&KeyboardEvent::new("Backspace")));
        assert_eq!(field.value(), "4");
    }

    #[test]
    fn test_set_value_moves_focus_to_new_target() {
        let mut field = setup(4);
        field.insert("1");
        assert_eq!(field.focused_index(), Some(1));

        field.set_value(123).unwrap();
        assert_eq!(field.focusable_index(), Some(3));
        assert_eq!(field.focused_index(), Some(3));
        assert!(field.cell(3).unwrap().is_selected());
        assert!(!field.cell(1).unwrap().is_selected());

        field.insert("9");
        assert_eq!(field.value(), "1239");
    }

    #[test]
    fn test_set_value_without_focus_leaves_field_unfocused() {
        let mut field = setup(4);
        field.set_value(12).unwrap();
        assert_eq!(field.focused_index(), None);
        assert_eq!(field.focusable_index(), Some(2));
    }

    #[test]
    fn test_refocus_after_entry_overflows_from_first_cell() {
        let mut field = setup(4);
        field.insert("1");
        field.insert("2");
        field.unfocus();

        field.focus();
        assert_eq!(field.focused_index(), Some(0));
        assert_eq!(field.focusable_index(), Some(2));
        assert!(!field.cell(0).unwrap().is_focusable());

        // "13" lands in cell 0: it keeps "1" and forwards "3" over cell 1
        field.insert("3");
        assert_eq!(field.value(), "13");
        assert_eq!(field.focusable_index(), Some(1));
        assert_eq!(field.focused_index(), Some(1));
    }

    #[test]
    fn test_value_derived_tracks_cells() {
        let mut field = setup(4);
        let value = field.value_derived();
        assert_eq!(value.get(), "");

        field.insert("7");
        field.insert("3");
        assert_eq!(value.get(), "73");

        field.reset();
        assert_eq!(value.get(), "");
    }

    #[test]
    fn test_cell_signals_are_reactive() {
        let mut field = setup(2);
        let runs = Rc::new(Cell::new(0));
        let runs_clone = runs.clone();
        let text = field.cell(1).unwrap().text_signal();
        let _stop = effect(move || {
            let _ = text.get();
            runs_clone.set(runs_clone.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        field.insert("1");
        assert_eq!(runs.get(), 1); // Cell 1 untouched

        field.insert("2");
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_pin_code_debug_hides_digits() {
        let code = PinCode { digits: "9876".to_string() };
        let debug = format!("{code:?}");
        assert!(!debug.contains("9876"));
        assert_eq!(code.to_string(), "9876");
        assert_eq!(code.value(), 9876);
    }
}
