#![forbid(unsafe_code)]

//! Input events for the form.
//!
//! crossterm events are translated once, in [`Event::from_crossterm`], into
//! the handful of shapes the form reacts to: keys, left clicks, pastes and
//! resizes. Terminal focus changes are dropped, and mouse motion, drags and
//! wheel scrolls collapse into [`MouseEventKind::Other`].

use bitflags::bitflags;
use crossterm::event as cte;

/// One unit of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Text delivered in one piece by bracketed paste.
    Paste(String),
    /// The terminal now has this many columns and rows.
    Resize { width: u16, height: u16 },
}

impl Event {
    /// Translate a crossterm event. `None` for input the form ignores.
    #[must_use]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => {
                let code = key_code(key.code)?;
                Some(Event::Key(KeyEvent {
                    code,
                    modifiers: key.modifiers.into(),
                    kind: key.kind.into(),
                }))
            }
            cte::Event::Mouse(mouse) => {
                let kind = match mouse.kind {
                    cte::MouseEventKind::Down(b) => MouseEventKind::Down(b.into()),
                    cte::MouseEventKind::Up(b) => MouseEventKind::Up(b.into()),
                    _ => MouseEventKind::Other,
                };
                Some(Event::Mouse(MouseEvent::new(kind, mouse.column, mouse.row)))
            }
            cte::Event::Paste(text) => Some(Event::Paste(text)),
            cte::Event::Resize(width, height) => Some(Event::Resize { width, height }),
            cte::Event::FocusGained | cte::Event::FocusLost => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A press of `code` with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.code == KeyCode::Char(c)
    }

    /// Press or auto-repeat; releases are ignored by all input handling.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }
}

/// Keys the form and its inputs act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    /// Shift+Tab.
    BackTab,
    Home,
    End,
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Also reported by terminals that cannot tell the kinds apart.
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Modifiers that change what a key means to the form.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CTRL = 0b01;
        const ALT  = 0b10;
    }
}

/// A mouse action at a cell, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }

    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// A left-button press, the only mouse action the form reacts to.
    #[must_use]
    pub const fn is_left_click(&self) -> bool {
        matches!(self.kind, MouseEventKind::Down(MouseButton::Left))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    /// Motion, drag or wheel.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

fn key_code(code: cte::KeyCode) -> Option<KeyCode> {
    Some(match code {
        cte::KeyCode::Char(c) => KeyCode::Char(c),
        cte::KeyCode::Enter => KeyCode::Enter,
        cte::KeyCode::Esc => KeyCode::Escape,
        cte::KeyCode::Backspace => KeyCode::Backspace,
        cte::KeyCode::Delete => KeyCode::Delete,
        cte::KeyCode::Tab => KeyCode::Tab,
        cte::KeyCode::BackTab => KeyCode::BackTab,
        cte::KeyCode::Home => KeyCode::Home,
        cte::KeyCode::End => KeyCode::End,
        cte::KeyCode::Up => KeyCode::Up,
        cte::KeyCode::Down => KeyCode::Down,
        cte::KeyCode::Left => KeyCode::Left,
        cte::KeyCode::Right => KeyCode::Right,
        _ => return None,
    })
}

impl From<cte::KeyModifiers> for Modifiers {
    fn from(mods: cte::KeyModifiers) -> Self {
        let mut out = Modifiers::empty();
        out.set(Modifiers::CTRL, mods.contains(cte::KeyModifiers::CONTROL));
        out.set(Modifiers::ALT, mods.contains(cte::KeyModifiers::ALT));
        out
    }
}

impl From<cte::KeyEventKind> for KeyEventKind {
    fn from(kind: cte::KeyEventKind) -> Self {
        match kind {
            cte::KeyEventKind::Press => KeyEventKind::Press,
            cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
            cte::KeyEventKind::Release => KeyEventKind::Release,
        }
    }
}

impl From<cte::MouseButton> for MouseButton {
    fn from(button: cte::MouseButton) -> Self {
        match button {
            cte::MouseButton::Left => MouseButton::Left,
            cte::MouseButton::Right => MouseButton::Right,
            cte::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ct_key(code: cte::KeyCode, mods: cte::KeyModifiers) -> Option<Event> {
        Event::from_crossterm(cte::Event::Key(cte::KeyEvent::new(code, mods)))
    }

    fn ct_mouse(kind: cte::MouseEventKind) -> Option<Event> {
        Event::from_crossterm(cte::Event::Mouse(cte::MouseEvent {
            kind,
            column: 12,
            row: 7,
            modifiers: cte::KeyModifiers::NONE,
        }))
    }

    #[test]
    fn release_is_not_press() {
        let key = KeyEvent::new(KeyCode::Enter);
        assert!(key.is_press());
        assert!(key.with_kind(KeyEventKind::Repeat).is_press());
        assert!(!key.with_kind(KeyEventKind::Release).is_press());
    }

    #[test]
    fn ctrl_s_keeps_char_and_modifier() {
        let Some(Event::Key(key)) = ct_key(cte::KeyCode::Char('s'), cte::KeyModifiers::CONTROL)
        else {
            panic!("expected a key event");
        };
        assert!(key.is_char('s'));
        assert!(key.ctrl());
        assert!(!key.alt());
    }

    #[test]
    fn shift_and_super_are_not_modifiers_here() {
        let mods = cte::KeyModifiers::SHIFT | cte::KeyModifiers::SUPER;
        assert_eq!(Modifiers::from(mods), Modifiers::empty());
    }

    #[test]
    fn esc_becomes_escape_and_unknown_keys_drop() {
        assert_eq!(
            ct_key(cte::KeyCode::Esc, cte::KeyModifiers::NONE),
            Some(Event::Key(KeyEvent::new(KeyCode::Escape)))
        );
        assert_eq!(ct_key(cte::KeyCode::F(5), cte::KeyModifiers::NONE), None);
        assert_eq!(ct_key(cte::KeyCode::CapsLock, cte::KeyModifiers::NONE), None);
    }

    #[test]
    fn left_press_is_a_click_and_wheel_is_other() {
        let Some(Event::Mouse(down)) =
            ct_mouse(cte::MouseEventKind::Down(cte::MouseButton::Left))
        else {
            panic!("expected a mouse event");
        };
        assert!(down.is_left_click());
        assert_eq!(down.position(), (12, 7));

        let Some(Event::Mouse(wheel)) = ct_mouse(cte::MouseEventKind::ScrollDown) else {
            panic!("expected a mouse event");
        };
        assert_eq!(wheel.kind, MouseEventKind::Other);
        assert!(!wheel.is_left_click());
    }

    #[test]
    fn paste_resize_and_focus() {
        assert_eq!(
            Event::from_crossterm(cte::Event::Paste("hi".into())),
            Some(Event::Paste("hi".into()))
        );
        assert_eq!(
            Event::from_crossterm(cte::Event::Resize(100, 30)),
            Some(Event::Resize {
                width: 100,
                height: 30
            })
        );
        assert_eq!(Event::from_crossterm(cte::Event::FocusLost), None);
    }
}
