#![forbid(unsafe_code)]

//! Text input widget.
//!
//! A single-line text input with a grapheme-aware cursor, horizontal
//! scrolling, placeholder text, an optional per-character input filter,
//! and an optional display transform.

use cform_core::event::{Event, KeyCode, KeyEvent};
use cform_core::geometry::Rect;
use cform_render::Style;
use cform_render::cell::{Cell, StyleFlags};
use cform_render::frame::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::Widget;

/// A single-line text input widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Text value.
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
    /// Placeholder text.
    placeholder: String,
    /// Characters rejected by the filter are never inserted.
    filter: Option<fn(char) -> bool>,
    /// Maps the value to the text shown on screen.
    display: Option<fn(&str) -> String>,
    /// Base style.
    style: Style,
    /// Placeholder style.
    placeholder_style: Style,
    /// Whether the input is focused (controls cursor output).
    focused: bool,
}

impl TextInput {
    /// Create a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text value (builder).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.grapheme_count();
        self
    }

    /// Set the placeholder text (builder).
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Only accept characters for which `filter` returns true (builder).
    ///
    /// Applies to typed and pasted input, not to [`set_value`](Self::set_value).
    pub fn with_filter(mut self, filter: fn(char) -> bool) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Render the value through `display` instead of verbatim (builder).
    ///
    /// The transform should map each character to exactly one character so the
    /// cursor stays aligned.
    pub fn with_display(mut self, display: fn(&str) -> String) -> Self {
        self.display = Some(display);
        self
    }

    /// Set base style (builder).
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set placeholder style (builder).
    pub fn with_placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    /// Set whether the input is focused (builder).
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set whether the input is focused.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether the input is focused.
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Set the base style.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value, clamping the cursor to the new length.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.cursor.min(self.grapheme_count());
    }

    /// Clear all text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Cursor position (grapheme index).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The text as it is shown on screen.
    pub fn display_value(&self) -> String {
        match self.display {
            Some(display) => display(&self.value),
            None => self.value.clone(),
        }
    }

    /// Screen position of the cursor inside `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let cursor_visual = self.cursor_visual_pos();
        let scroll = self.effective_scroll(area.width as usize);
        let rel_x = cursor_visual.saturating_sub(scroll);
        let x = area
            .x
            .saturating_add(rel_x as u16)
            .min(area.right().saturating_sub(1));
        (x, area.y)
    }

    /// Handle a terminal event.
    ///
    /// Returns `true` if the event was consumed. Enter is never consumed so
    /// the owner can treat it as a submit.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if key.is_press() => self.handle_key(key),
            Event::Paste(text) => self.insert_str(text),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.ctrl() && !key.alt() => {
                if self.accepts(c) {
                    self.insert_char(c);
                }
                // Rejected characters are swallowed, not passed on.
                true
            }
            KeyCode::Backspace => {
                self.delete_char_back();
                true
            }
            KeyCode::Delete => {
                self.delete_char_forward();
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.grapheme_count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.grapheme_count();
                true
            }
            _ => false,
        }
    }

    /// Insert text at the cursor, dropping line breaks and filtered characters.
    ///
    /// Returns `true` if anything was inserted.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let mut inserted = false;
        for c in text.chars() {
            if c == '\n' || c == '\r' || !self.accepts(c) {
                continue;
            }
            self.insert_char(c);
            inserted = true;
        }
        inserted
    }

    fn accepts(&self, c: char) -> bool {
        !c.is_control() && self.filter.is_none_or(|f| f(c))
    }

    fn insert_char(&mut self, c: char) {
        let before = self.grapheme_count();
        let byte_offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert(byte_offset, c);
        // A combining mark joins the previous grapheme instead of adding one.
        if self.grapheme_count() > before {
            self.cursor += 1;
        }
    }

    fn delete_char_back(&mut self) {
        if self.cursor > 0 {
            let byte_start = self.grapheme_byte_offset(self.cursor - 1);
            let byte_end = self.grapheme_byte_offset(self.cursor);
            self.value.drain(byte_start..byte_end);
            self.cursor -= 1;
        }
    }

    fn delete_char_forward(&mut self) {
        if self.cursor < self.grapheme_count() {
            let byte_start = self.grapheme_byte_offset(self.cursor);
            let byte_end = self.grapheme_byte_offset(self.cursor + 1);
            self.value.drain(byte_start..byte_end);
        }
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn cursor_visual_pos(&self) -> usize {
        self.value
            .graphemes(true)
            .take(self.cursor)
            .map(UnicodeWidthStr::width)
            .sum()
    }

    fn effective_scroll(&self, viewport_width: usize) -> usize {
        let cursor_visual = self.cursor_visual_pos();
        if viewport_width == 0 || cursor_visual < viewport_width {
            0
        } else {
            cursor_visual + 1 - viewport_width
        }
    }
}

impl Widget for TextInput {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.width < 1 || area.height < 1 {
            return;
        }

        frame.buffer.set_style(area, self.style);

        let viewport_width = area.width as usize;
        let scroll = self.effective_scroll(viewport_width);
        let y = area.y;

        let (text, style) = if self.value.is_empty() {
            (self.placeholder.clone(), self.style.patch(self.placeholder_style))
        } else {
            (self.display_value(), self.style)
        };

        let mut visual_x = 0usize;
        for g in text.graphemes(true) {
            let w = UnicodeWidthStr::width(g);
            if visual_x + w <= scroll {
                visual_x += w;
                continue;
            }
            let rel_x = visual_x - scroll.min(visual_x);
            if rel_x + w > viewport_width {
                break;
            }
            if let Some(c) = g.chars().next() {
                let mut cell = Cell::from_char(c);
                style.apply_to(&mut cell);
                frame.buffer.set(area.x + rel_x as u16, y, cell);
            }
            visual_x += w;
        }

        if self.focused {
            let (cx, cy) = self.cursor_position(area);
            if let Some(cell) = frame.buffer.get_mut(cx, cy) {
                cell.attrs ^= StyleFlags::REVERSE;
            }
            frame.set_cursor(Some((cx, cy)));
        }
    }
}
