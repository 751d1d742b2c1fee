#![forbid(unsafe_code)]

//! Centered modal dialog chrome.
//!
//! [`Modal`] dims whatever is already in the frame, clears a centered box,
//! and draws a rounded border with a title on the left and a close glyph on
//! the right. Content is rendered by the caller into
//! [`ModalLayout::inner`]; [`ModalLayout::close`] is the click target of
//! the close glyph.

use cform_core::geometry::Rect;
use cform_render::Style;
use cform_render::cell::{Cell, StyleFlags};
use cform_render::frame::Frame;

use crate::Widget;
use crate::block::{Block, BorderType};

/// Glyph drawn in the top-right corner of the modal.
pub const CLOSE_GLYPH: &str = "×";

/// Where a modal lands inside a given area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalLayout {
    /// The bordered box.
    pub outer: Rect,
    /// Content area inside the border, with one column of padding.
    pub inner: Rect,
    /// Cells occupied by the close glyph and its surrounding spaces.
    pub close: Rect,
}

/// A centered dialog frame with a title and close glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modal<'a> {
    title: &'a str,
    width: u16,
    height: u16,
    style: Style,
    border_style: Style,
    title_style: Style,
    dim_backdrop: bool,
}

impl<'a> Modal<'a> {
    /// A modal of `width` x `height` cells, including its border.
    #[must_use]
    pub fn new(title: &'a str, width: u16, height: u16) -> Self {
        Self {
            title,
            width,
            height,
            style: Style::default(),
            border_style: Style::default(),
            title_style: Style::new().bold(),
            dim_backdrop: true,
        }
    }

    /// Style for the modal body (usually sets a background).
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    #[must_use]
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    /// Whether to dim the content behind the modal (default: true).
    #[must_use]
    pub fn dim_backdrop(mut self, dim: bool) -> Self {
        self.dim_backdrop = dim;
        self
    }

    /// Compute the modal's rectangles within `area`.
    #[must_use]
    pub fn layout(&self, area: Rect) -> ModalLayout {
        let outer = area.centered(self.width, self.height);
        let inner = self.block().inner(outer);
        let inner = Rect::new(
            inner.x.saturating_add(1),
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        let close = if outer.width >= 5 {
            Rect::new(outer.right() - 4, outer.y, 3, 1)
        } else {
            Rect::new(outer.x, outer.y, 0, 0)
        };
        ModalLayout {
            outer,
            inner,
            close,
        }
    }

    fn block(&self) -> Block<'a> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.style.patch(self.border_style))
            .title(self.title)
            .title_style(self.title_style)
            .style(self.style)
    }

    fn dim(area: Rect, frame: &mut Frame) {
        let clipped = frame.buffer.bounds().intersection(&area);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if let Some(cell) = frame.buffer.get_mut(x, y) {
                    cell.attrs |= StyleFlags::DIM;
                    if cell.fg.a() != 0 {
                        cell.fg = cell.fg.darken(0.5);
                    }
                    if cell.bg.a() != 0 {
                        cell.bg = cell.bg.darken(0.5);
                    }
                }
            }
        }
    }
}

impl Widget for Modal<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        if self.dim_backdrop {
            Self::dim(area, frame);
        }

        let layout = self.layout(area);
        if layout.outer.is_empty() {
            return;
        }

        let mut blank = Cell::from_char(' ');
        self.style.apply_to(&mut blank);
        frame.buffer.fill(layout.outer, blank);

        self.block().render(layout.outer, frame);

        if !layout.close.is_empty() {
            let style = self.style.patch(self.border_style).patch(self.title_style);
            frame.buffer.set_string(
                layout.close.x,
                layout.close.y,
                &format!(" {CLOSE_GLYPH} "),
                style,
                layout.close.right(),
            );
        }
    }
}
