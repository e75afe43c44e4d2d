//! PinCell - one single-digit slot of a field.
//!
//! A cell knows its own index and content, nothing about its siblings.
//! Every content change is classified into at most one [`CellEvent`], which
//! the owning [`PinField`](crate::PinField) turns into focus transitions.
//!
//! Classification of the content after a change:
//!
//! | content                      | outcome                              |
//! |------------------------------|--------------------------------------|
//! | empty                        | `Retreat { remove_previous: false }` |
//! | one ASCII digit              | `Advance`                            |
//! | anything with a non-digit    | cleared in place, no event           |
//! | two or more digits           | keeps the first, `Overflow` the rest |

use spark_signals::{signal, Signal};

/// What a cell reports to its field after a content change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellEvent {
    /// One digit was committed.
    Advance,
    /// The cell was emptied. `remove_previous` is set only for a backspace
    /// on an already-empty cell and asks the field to clear the cell before.
    Retreat { remove_previous: bool },
    /// More than one digit landed in the cell; `remaining` is everything
    /// after the retained first digit.
    Overflow { remaining: String },
}

impl CellEvent {
    /// Short name for logging. Payloads are digits of a secret and stay out.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Advance => "advance",
            Self::Retreat { .. } => "retreat",
            Self::Overflow { .. } => "overflow",
        }
    }
}

/// Result of classifying raw cell content.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Classified {
    Empty,
    Digit,
    Rejected,
    Overflow { first: char, remaining: String },
}

fn classify(text: &str) -> Classified {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return Classified::Empty;
    };
    if !text.chars().all(|c| c.is_ascii_digit()) {
        return Classified::Rejected;
    }
    let remaining: String = chars.collect();
    if remaining.is_empty() {
        Classified::Digit
    } else {
        Classified::Overflow { first, remaining }
    }
}

/// A single digit slot.
///
/// State lives in signals so a renderer can track it reactively. Only the
/// owning field mutates it.
pub struct PinCell {
    index: usize,
    text: Signal<String>,
    focusable: Signal<bool>,
    selected: Signal<bool>,
}

impl PinCell {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            text: signal(String::new()),
            focusable: signal(false),
            selected: signal(false),
        }
    }

    /// Position within the field (0-based).
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current content: empty or a single digit.
    pub fn text(&self) -> String {
        self.text.get()
    }

    /// The committed digit, if any.
    pub fn digit(&self) -> Option<u8> {
        let text = self.text.get();
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_digit(10).map(|d| d as u8),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.get().is_empty()
    }

    /// Whether this cell accepts the next keystroke.
    pub fn is_focusable(&self) -> bool {
        self.focusable.get()
    }

    /// Whether this cell is drawn with the selected border.
    pub fn is_selected(&self) -> bool {
        self.selected.get()
    }

    /// Reactive handle to the content.
    pub fn text_signal(&self) -> Signal<String> {
        self.text.clone()
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Content-change notification: the cell's text became `text`.
    pub(crate) fn edit(&self, text: &str) -> Option<CellEvent> {
        match classify(text) {
            Classified::Empty => {
                self.text.set(String::new());
                Some(CellEvent::Retreat { remove_previous: false })
            }
            Classified::Digit => {
                self.text.set(text.to_string());
                Some(CellEvent::Advance)
            }
            Classified::Rejected => {
                tracing::trace!(index = self.index, "rejected non-digit input");
                self.text.set(String::new());
                None
            }
            Classified::Overflow { first, remaining } => {
                self.text.set(first.to_string());
                Some(CellEvent::Overflow { remaining })
            }
        }
    }

    /// Backspace key on this cell.
    ///
    /// On an empty cell this is a retreat that also clears the previous cell.
    /// Otherwise the digit is deleted in place and no event is produced.
    pub(crate) fn delete_backward(&self) -> Option<CellEvent> {
        let mut text = self.text.get();
        if text.pop().is_none() {
            return Some(CellEvent::Retreat { remove_previous: true });
        }
        self.text.set(text);
        None
    }

    // -------------------------------------------------------------------------
    // Field-side mutation
    // -------------------------------------------------------------------------

    /// Replace the content without classifying it.
    pub(crate) fn set_text(&self, text: impl Into<String>) {
        self.text.set(text.into());
    }

    pub(crate) fn clear(&self) {
        self.text.set(String::new());
    }

    pub(crate) fn set_focusable(&self, focusable: bool) {
        self.focusable.set(focusable);
    }

    pub(crate) fn set_selected(&self, selected: bool) {
        self.selected.set(selected);
    }
}

impl std::fmt::Debug for PinCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinCell")
            .field("index", &self.index)
            .field("text", &self.text.get())
            .field("focusable", &self.focusable.get())
            .field("selected", &self.selected.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_empty() {
        let cell = PinCell::new(3);
        assert_eq!(cell.index(), 3);
        assert!(cell.is_empty());
        assert_eq!(cell.digit(), None);
        assert!(!cell.is_focusable());
        assert!(!cell.is_selected());
    }

    #[test]
    fn test_single_digit_advances() {
        let cell = PinCell::new(0);
        assert_eq!(cell.edit("7"), Some(CellEvent::Advance));
        assert_eq!(cell.text(), "7");
        assert_eq!(cell.digit(), Some(7));
    }

    #[test]
    fn test_non_digit_is_cleared_silently() {
        let cell = PinCell::new(0);
        assert_eq!(cell.edit("x"), None);
        assert!(cell.is_empty());

        // A stray character after a digit wipes the whole cell
        cell.edit("4");
        assert_eq!(cell.edit("4a"), None);
        assert!(cell.is_empty());
    }

    #[test]
    fn test_sign_and_unicode_digits_rejected() {
        let cell = PinCell::new(0);
        assert_eq!(cell.edit("-1"), None);
        assert!(cell.is_empty());
        assert_eq!(cell.edit("٣"), None);
        assert!(cell.is_empty());
    }

    #[test]
    fn test_empty_content_retreats() {
        let cell = PinCell::new(2);
        cell.edit("5");
        assert_eq!(
            cell.edit(""),
            Some(CellEvent::Retreat { remove_previous: false })
        );
        assert!(cell.is_empty());
    }

    #[test]
    fn test_overflow_keeps_first_digit() {
        let cell = PinCell::new(0);
        assert_eq!(
            cell.edit("47"),
            Some(CellEvent::Overflow { remaining: "7".to_string() })
        );
        assert_eq!(cell.text(), "4");

        assert_eq!(
            cell.edit("1234"),
            Some(CellEvent::Overflow { remaining: "234".to_string() })
        );
        assert_eq!(cell.text(), "1");
    }

    #[test]
    fn test_backspace_on_digit_deletes_in_place() {
        let cell = PinCell::new(1);
        cell.edit("9");
        assert_eq!(cell.delete_backward(), None);
        assert!(cell.is_empty());
    }

    #[test]
    fn test_backspace_on_empty_retreats_with_remove() {
        let cell = PinCell::new(1);
        assert_eq!(
            cell.delete_backward(),
            Some(CellEvent::Retreat { remove_previous: true })
        );
    }

    #[test]
    fn test_set_text_skips_classification() {
        let cell = PinCell::new(0);
        cell.set_text("3");
        assert_eq!(cell.digit(), Some(3));
        cell.clear();
        assert!(cell.is_empty());
    }
}
