//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the keyboard types and a
//! [`PinField`].
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `convert_event` - Convert any crossterm Event to an InputEvent
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//! - `route_event` - Feed an event to a field
//!
//! # Example
//!
//! ```ignore
//! use spark_pin::state::{poll_event, route_event};
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         route_event(&mut field, event);
//!     }
//! }
//! ```

use crossterm::event::{
    Event as CrosstermEvent,
    KeyCode, KeyEventKind, KeyModifiers,
    KeyEvent as CrosstermKeyEvent,
    poll, read,
};
use std::time::Duration;

use super::keyboard::{KeyboardEvent, KeyState, Modifiers};
use crate::field::PinField;

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Keyboard event (key press, release, etc.)
    Key(KeyboardEvent),
    /// Bracketed paste (a one-time code pasted from the clipboard)
    Paste(String),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

// =============================================================================
// MODIFIER CONVERSION
// =============================================================================

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: mods.contains(KeyModifiers::META) || mods.contains(KeyModifiers::SUPER),
    }
}

/// Convert any crossterm event
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Paste(text) => InputEvent::Paste(text),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    Ok(convert_event(read()?))
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Feed an event to `field`.
/// Returns true if the field consumed it.
pub fn route_event(field: &mut PinField, event: InputEvent) -> bool {
    match event {
        InputEvent::Key(key) => field.handle_key(&key),
        InputEvent::Paste(text) => {
            // Pasted codes often carry separators ("123 456", "123-456")
            let digits: String = text.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
            !digits.is_empty() && field.insert(&digits)
        }
        InputEvent::Resize(..) | InputEvent::None => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PinFieldConfig;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn setup(cells: usize) -> PinField {
        PinField::new(PinFieldConfig::new(cells)).unwrap()
    }

    #[test]
    fn test_convert_key_char() {
        let event = convert_key_event(key(KeyCode::Char('5'), KeyModifiers::empty()));

        assert_eq!(event.key, "5");
        assert_eq!(event.state, KeyState::Press);
        assert!(!event.modifiers.ctrl);
    }

    #[test]
    fn test_convert_key_special() {
        let event = convert_key_event(key(KeyCode::Backspace, KeyModifiers::empty()));
        assert_eq!(event.key, "Backspace");

        let event = convert_key_event(key(KeyCode::Esc, KeyModifiers::empty()));
        assert_eq!(event.key, "Escape");
    }

    #[test]
    fn test_convert_modifiers() {
        let event = convert_key_event(key(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(event.modifiers.ctrl);
        assert!(!event.modifiers.alt);
    }

    #[test]
    fn test_convert_release() {
        let mut raw = key(KeyCode::Char('1'), KeyModifiers::empty());
        raw.kind = KeyEventKind::Release;
        assert_eq!(convert_key_event(raw).state, KeyState::Release);
    }

    #[test]
    fn test_convert_event_variants() {
        assert_eq!(
            convert_event(CrosstermEvent::Paste("1234".into())),
            InputEvent::Paste("1234".into())
        );
        assert_eq!(convert_event(CrosstermEvent::Resize(80, 24)), InputEvent::Resize(80, 24));
        assert_eq!(convert_event(CrosstermEvent::FocusGained), InputEvent::None);
    }

    #[test]
    fn test_route_keys_into_field() {
        let mut field = setup(4);
        for c in ['1', '2'] {
            let raw = key(KeyCode::Char(c), KeyModifiers::empty());
            let event = convert_event(CrosstermEvent::Key(raw));
            assert!(route_event(&mut field, event));
        }
        assert_eq!(field.value(), "12");
    }

    #[test]
    fn test_route_paste_strips_separators() {
        let mut field = setup(6);
        assert!(route_event(&mut field, InputEvent::Paste("123 456".into())));
        assert_eq!(field.value(), "123456");
        assert!(field.is_complete());
    }

    #[test]
    fn test_route_ignores_resize() {
        let mut field = setup(4);
        assert!(!route_event(&mut field, InputEvent::Resize(10, 10)));
        assert!(!route_event(&mut field, InputEvent::None));
    }
}
