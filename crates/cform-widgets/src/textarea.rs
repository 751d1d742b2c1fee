#![forbid(unsafe_code)]

//! Multi-line text editing widget.
//!
//! [`TextArea`] keeps its text as a list of lines with a (row, column)
//! cursor measured in graphemes. Rendering scrolls the viewport so the
//! cursor is always visible.
//!
//! ```
//! use cform_widgets::textarea::TextArea;
//!
//! let mut ta = TextArea::new();
//! ta.insert_text("Hello\nWorld");
//! assert_eq!(ta.line_count(), 2);
//! assert_eq!(ta.text(), "Hello\nWorld");
//! ```

use cform_core::event::{Event, KeyCode, KeyEvent};
use cform_core::geometry::Rect;
use cform_render::Style;
use cform_render::cell::{Cell, StyleFlags};
use cform_render::frame::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::Widget;

/// Multi-line text editor widget.
#[derive(Debug, Clone)]
pub struct TextArea {
    /// Never empty; an empty document is one empty line.
    lines: Vec<String>,
    cursor_row: usize,
    /// Grapheme index within the cursor row.
    cursor_col: usize,
    placeholder: String,
    focused: bool,
    style: Style,
    placeholder_style: Style,
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl TextArea {
    /// Create a new empty text area.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
            placeholder: String::new(),
            focused: false,
            style: Style::default(),
            placeholder_style: Style::default(),
        }
    }

    /// Handle a terminal event.
    ///
    /// Returns `true` if the event was consumed. `Up` on the first line and
    /// `Down` on the last line are not consumed, so the owner can move focus.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if key.is_press() => self.handle_key(key),
            Event::Paste(text) => {
                self.insert_text(text);
                !text.is_empty()
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.ctrl() && !key.alt() => {
                self.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.insert_newline();
                true
            }
            KeyCode::Backspace => {
                self.delete_backward();
                true
            }
            KeyCode::Delete => {
                self.delete_forward();
                true
            }
            KeyCode::Left => {
                self.move_left();
                true
            }
            KeyCode::Right => {
                self.move_right();
                true
            }
            KeyCode::Up if self.cursor_row > 0 => {
                self.move_up();
                true
            }
            KeyCode::Down if self.cursor_row + 1 < self.lines.len() => {
                self.move_down();
                true
            }
            KeyCode::Home => {
                self.move_to_line_start();
                true
            }
            KeyCode::End => {
                self.move_to_line_end();
                true
            }
            _ => false,
        }
    }

    /// Set initial text (builder).
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Set placeholder text (builder).
    #[must_use]
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set focus state (builder).
    #[must_use]
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set base style (builder).
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set placeholder style (builder).
    #[must_use]
    pub fn with_placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    /// Full text with lines joined by `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace all text and move the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.lines = vec![String::new()];
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.insert_text(text);
    }

    /// Number of lines (at least 1).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Cursor as (row, grapheme column).
    #[must_use]
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Whether the widget has input focus.
    #[must_use]
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Set focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Set the base style.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Insert text at the cursor. `\r\n` and lone `\r` become line breaks.
    pub fn insert_text(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        for c in normalized.chars() {
            if c == '\n' {
                self.insert_newline();
            } else {
                self.insert_char(c);
            }
        }
    }

    /// Insert one character at the cursor; control characters are ignored.
    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let line = &mut self.lines[self.cursor_row];
        let before = line.graphemes(true).count();
        let offset = byte_offset(line, self.cursor_col);
        line.insert(offset, ch);
        if line.graphemes(true).count() > before {
            self.cursor_col += 1;
        }
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor_row];
        let offset = byte_offset(line, self.cursor_col);
        let rest = line.split_off(offset);
        self.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
    }

    /// Delete the grapheme before the cursor, joining lines at column 0.
    pub fn delete_backward(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_row];
            let start = byte_offset(line, self.cursor_col - 1);
            let end = byte_offset(line, self.cursor_col);
            line.drain(start..end);
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            let line = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = grapheme_len(&self.lines[self.cursor_row]);
            self.lines[self.cursor_row].push_str(&line);
        }
    }

    /// Delete the grapheme after the cursor, joining lines at line end.
    pub fn delete_forward(&mut self) {
        let len = grapheme_len(&self.lines[self.cursor_row]);
        if self.cursor_col < len {
            let line = &mut self.lines[self.cursor_row];
            let start = byte_offset(line, self.cursor_col);
            let end = byte_offset(line, self.cursor_col + 1);
            line.drain(start..end);
        } else if self.cursor_row + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&next);
        }
    }

    /// Move left, wrapping to the end of the previous line.
    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = grapheme_len(&self.lines[self.cursor_row]);
        }
    }

    /// Move right, wrapping to the start of the next line.
    pub fn move_right(&mut self) {
        if self.cursor_col < grapheme_len(&self.lines[self.cursor_row]) {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    /// Move up one line, clamping the column.
    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.clamp_col();
        }
    }

    /// Move down one line, clamping the column.
    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.clamp_col();
        }
    }

    /// Move to the start of the current line.
    pub fn move_to_line_start(&mut self) {
        self.cursor_col = 0;
    }

    /// Move to the end of the current line.
    pub fn move_to_line_end(&mut self) {
        self.cursor_col = grapheme_len(&self.lines[self.cursor_row]);
    }

    fn clamp_col(&mut self) {
        self.cursor_col = self
            .cursor_col
            .min(grapheme_len(&self.lines[self.cursor_row]));
    }

    fn cursor_visual_col(&self) -> usize {
        self.lines[self.cursor_row]
            .graphemes(true)
            .take(self.cursor_col)
            .map(UnicodeWidthStr::width)
            .sum()
    }

    /// First visible line and first visible column for a viewport.
    fn scroll_for(&self, width: usize, height: usize) -> (usize, usize) {
        let top = if height == 0 || self.cursor_row < height {
            0
        } else {
            self.cursor_row + 1 - height
        };
        let visual = self.cursor_visual_col();
        let left = if width == 0 || visual < width {
            0
        } else {
            visual + 1 - width
        };
        (top, left)
    }
}

fn grapheme_len(line: &str) -> usize {
    line.graphemes(true).count()
}

fn byte_offset(line: &str, grapheme_idx: usize) -> usize {
    line.grapheme_indices(true)
        .nth(grapheme_idx)
        .map_or(line.len(), |(i, _)| i)
}

fn render_line(
    frame: &mut Frame,
    origin: (u16, u16),
    line: &str,
    skip: usize,
    width: usize,
    style: Style,
) {
    let (x, y) = origin;
    let mut visual = 0usize;
    for g in line.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if visual + w <= skip {
            visual += w;
            continue;
        }
        let rel = visual - skip.min(visual);
        if rel + w > width {
            break;
        }
        if let Some(c) = g.chars().next() {
            let mut cell = Cell::from_char(c);
            style.apply_to(&mut cell);
            frame.buffer.set(x + rel as u16, y, cell);
        }
        visual += w;
    }
}

impl Widget for TextArea {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        frame.buffer.set_style(area, self.style);

        let width = area.width as usize;
        let height = area.height as usize;

        if self.is_empty() && !self.placeholder.is_empty() {
            let style = self.style.patch(self.placeholder_style);
            for (i, line) in self.placeholder.lines().take(height).enumerate() {
                render_line(frame, (area.x, area.y + i as u16), line, 0, width, style);
            }
        } else {
            let (top, left) = self.scroll_for(width, height);
            for (i, line) in self.lines.iter().skip(top).take(height).enumerate() {
                render_line(
                    frame,
                    (area.x, area.y + i as u16),
                    line,
                    left,
                    width,
                    self.style,
                );
            }
        }

        if self.focused {
            let (top, left) = self.scroll_for(width, height);
            let cx = area.x + (self.cursor_visual_col() - left) as u16;
            let cy = area.y + (self.cursor_row - top) as u16;
            if let Some(cell) = frame.buffer.get_mut(cx, cy) {
                cell.attrs ^= StyleFlags::REVERSE;
            }
            frame.set_cursor(Some((cx, cy)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    #[test]
    fn new_textarea_is_empty() {
        let ta = TextArea::new();
        assert!(ta.is_empty());
        assert_eq!(ta.text(), "");
        assert_eq!(ta.line_count(), 1);
    }

    #[test]
    fn insert_text_and_newline() {
        let mut ta = TextArea::new();
        ta.insert_text("ab");
        ta.insert_newline();
        ta.insert_text("cd");
        assert_eq!(ta.text(), "ab\ncd");
        assert_eq!(ta.cursor(), (1, 2));
    }

    #[test]
    fn enter_key_inserts_newline() {
        let mut ta = TextArea::new().with_text("hello");
        ta.handle_event(&press(KeyCode::Left));
        ta.handle_event(&press(KeyCode::Left));
        assert!(ta.handle_event(&press(KeyCode::Enter)));
        assert_eq!(ta.text(), "hel\nlo");
    }

    #[test]
    fn backspace_joins_lines() {
        let mut ta = TextArea::new().with_text("ab\ncd");
        ta.move_to_line_start();
        ta.delete_backward();
        assert_eq!(ta.text(), "abcd");
        assert_eq!(ta.cursor(), (0, 2));
    }

    #[test]
    fn delete_forward_joins_lines() {
        let mut ta = TextArea::new().with_text("ab\ncd");
        ta.move_up();
        ta.move_to_line_end();
        ta.delete_forward();
        assert_eq!(ta.text(), "abcd");
    }

    #[test]
    fn left_right_wrap_across_lines() {
        let mut ta = TextArea::new().with_text("ab\ncd");
        ta.move_to_line_start();
        ta.move_left();
        assert_eq!(ta.cursor(), (0, 2));
        ta.move_right();
        assert_eq!(ta.cursor(), (1, 0));
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut ta = TextArea::new().with_text("a\nlonger");
        assert_eq!(ta.cursor(), (1, 6));
        ta.move_up();
        assert_eq!(ta.cursor(), (0, 1));
    }

    #[test]
    fn up_on_first_line_is_not_consumed() {
        let mut ta = TextArea::new().with_text("one\ntwo");
        assert!(ta.handle_event(&press(KeyCode::Up)));
        assert!(!ta.handle_event(&press(KeyCode::Up)));
        assert!(ta.handle_event(&press(KeyCode::Down)));
        assert!(!ta.handle_event(&press(KeyCode::Down)));
    }

    #[test]
    fn paste_normalizes_line_endings() {
        let mut ta = TextArea::new();
        ta.handle_event(&Event::Paste("a\r\nb\rc".into()));
        assert_eq!(ta.text(), "a\nb\nc");
    }

    #[test]
    fn set_text_resets() {
        let mut ta = TextArea::new().with_text("old\ntext");
        ta.set_text("new");
        assert_eq!(ta.text(), "new");
        assert_eq!(ta.cursor(), (0, 3));
    }

    #[test]
    fn placeholder_renders_when_empty() {
        let ta = TextArea::new().with_placeholder("Write...");
        let mut frame = Frame::new(10, 2);
        ta.render(Rect::new(0, 0, 10, 2), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "Write...  ");
    }

    #[test]
    fn scroll_follows_cursor() {
        let ta = TextArea::new().with_text("1\n2\n3\n4\n5").with_focused(true);
        let mut frame = Frame::new(4, 3);
        ta.render(Rect::new(0, 0, 4, 3), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "3   ");
        assert_eq!(frame.buffer.row_text(2), "5   ");
        assert_eq!(frame.cursor_position(), Some((1, 2)));
    }
}
