#![forbid(unsafe_code)]

//! Event builders for driving models in tests.

use cform_core::event::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};

/// A plain key press.
pub fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code))
}

/// Ctrl + a character.
pub fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL))
}

/// One key press per character of `text`.
pub fn type_str(text: &str) -> Vec<Event> {
    text.chars().map(|c| press(KeyCode::Char(c))).collect()
}

/// A left-button press at (x, y).
pub fn click(x: u16, y: u16) -> Event {
    Event::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y))
}

/// A bracketed paste.
pub fn paste(text: &str) -> Event {
    Event::Paste(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_str_yields_one_event_per_char() {
        let events = type_str("ab");
        assert_eq!(events, vec![press(KeyCode::Char('a')), press(KeyCode::Char('b'))]);
    }

    #[test]
    fn ctrl_sets_modifier() {
        let Event::Key(key) = ctrl('s') else {
            panic!("expected key event");
        };
        assert!(key.ctrl());
        assert!(key.is_char('s'));
    }

    #[test]
    fn click_is_left_down() {
        let Event::Mouse(mouse) = click(3, 4) else {
            panic!("expected mouse event");
        };
        assert!(mouse.is_left_click());
        assert_eq!(mouse.position(), (3, 4));
    }
}
