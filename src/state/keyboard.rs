//! Keyboard Module - Key event types
//!
//! Backend-neutral key events. The crossterm bridge in [`super::input`]
//! produces them; [`PinField::handle_key`](crate::PinField::handle_key)
//! consumes them.
//!
//! Keys are named the way a browser names them: printable keys are the
//! character itself (`"7"`), everything else a word (`"Backspace"`,
//! `"Enter"`, `"ArrowLeft"`).

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// True when a chord modifier (not shift) is held
    pub fn is_chord(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "7", "Backspace", "Escape")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// The single printable character this key types, if any
    pub fn printable(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_press() {
        let event = KeyboardEvent::new("a");
        assert_eq!(event.state, KeyState::Press);
        assert_eq!(event.modifiers, Modifiers::default());
    }

    #[test]
    fn test_printable() {
        assert_eq!(KeyboardEvent::new("7").printable(), Some('7'));
        assert_eq!(KeyboardEvent::new("Backspace").printable(), None);
        assert_eq!(KeyboardEvent::new("").printable(), None);
        assert_eq!(KeyboardEvent::new("\t").printable(), None);
    }

    #[test]
    fn test_modifiers() {
        assert!(Modifiers::ctrl().is_chord());
        assert!(Modifiers { alt: true, ..Modifiers::default() }.is_chord());
        assert!(!Modifiers { shift: true, ..Modifiers::default() }.is_chord());
        let event = KeyboardEvent::with_modifiers("c", Modifiers::ctrl());
        assert!(event.modifiers.ctrl);
    }
}
