#![forbid(unsafe_code)]

//! Button widget.
//!
//! A single-line padded label that switches to its focused style when it
//! holds focus. The button does not handle input itself; the owner decides
//! which keys or clicks activate it and uses [`Button::hit_rect`] for mouse
//! hit testing.

use cform_core::geometry::Rect;
use cform_render::Style;
use cform_render::cell::Cell;
use cform_render::frame::Frame;

use crate::{Widget, text_width};

/// A clickable, focusable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button<'a> {
    label: &'a str,
    style: Style,
    focused_style: Style,
    focused: bool,
    pad: u16,
}

impl<'a> Button<'a> {
    /// Create a new button with 2 cells of padding on each side.
    #[must_use]
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            style: Style::default(),
            focused_style: Style::new().reverse(),
            focused: false,
            pad: 2,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Style patched over the base style while focused.
    #[must_use]
    pub fn with_focused_style(mut self, style: Style) -> Self {
        self.focused_style = style;
        self
    }

    #[must_use]
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, pad: u16) -> Self {
        self.pad = pad;
        self
    }

    #[must_use]
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// Display width in terminal cells (label width + padding).
    #[must_use]
    pub fn width(&self) -> u16 {
        (text_width(self.label) as u16).saturating_add(self.pad.saturating_mul(2))
    }

    /// The cells the button occupies when rendered into `area`.
    #[must_use]
    pub fn hit_rect(&self, area: Rect) -> Rect {
        Rect::new(area.x, area.y, self.width().min(area.width), area.height.min(1))
    }

    fn effective_style(&self) -> Style {
        if self.focused {
            self.style.patch(self.focused_style)
        } else {
            self.style
        }
    }
}

impl Widget for Button<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }

        let rect = self.hit_rect(area);
        let style = self.effective_style();
        let mut blank = Cell::from_char(' ');
        style.apply_to(&mut blank);
        frame.buffer.fill(rect, blank);
        frame.buffer.set_string(
            rect.x.saturating_add(self.pad),
            rect.y,
            self.label,
            style,
            rect.right(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cform_render::cell::{PackedRgba, StyleFlags};

    #[test]
    fn width_includes_padding() {
        assert_eq!(Button::new("OK").width(), 6);
        assert_eq!(Button::new("OK").with_padding(0).width(), 2);
    }

    #[test]
    fn renders_padded_label() {
        let mut frame = Frame::new(10, 1);
        Button::new("Submit").render(Rect::new(0, 0, 10, 1), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "  Submit  ");
    }

    #[test]
    fn hit_rect_is_clipped_to_area() {
        let button = Button::new("Submit");
        assert_eq!(button.hit_rect(Rect::new(3, 4, 20, 2)), Rect::new(3, 4, 10, 1));
        assert_eq!(button.hit_rect(Rect::new(0, 0, 5, 1)), Rect::new(0, 0, 5, 1));
    }

    #[test]
    fn focused_button_uses_focused_style() {
        let style = Style::new().bg(PackedRgba::rgb(0, 0, 200));
        let mut frame = Frame::new(8, 1);
        Button::new("Go")
            .with_style(style)
            .with_focused(true)
            .render(Rect::new(0, 0, 8, 1), &mut frame);
        let cell = frame.buffer.get(2, 0).copied().unwrap_or_default();
        assert!(cell.attrs.contains(StyleFlags::REVERSE));
        assert_eq!(cell.bg, PackedRgba::rgb(0, 0, 200));
    }

    #[test]
    fn unfocused_button_has_no_reverse() {
        let mut frame = Frame::new(8, 1);
        Button::new("Go").render(Rect::new(0, 0, 8, 1), &mut frame);
        let cell = frame.buffer.get(2, 0).copied().unwrap_or_default();
        assert!(!cell.attrs.contains(StyleFlags::REVERSE));
    }
}
