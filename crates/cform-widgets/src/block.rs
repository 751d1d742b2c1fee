#![forbid(unsafe_code)]

//! A one-cell box with a title set into its top edge.
//!
//! The form panel and the summary dialog are both drawn with it. The title
//! starts just right of the top-left corner and is clipped before the
//! top-right one.

use cform_core::geometry::{Rect, Sides};
use cform_render::Style;
use cform_render::cell::Cell;
use cform_render::frame::Frame;

use crate::Widget;

/// Corner style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    #[default]
    Square,
    Rounded,
}

impl BorderType {
    /// Top-left, top-right, bottom-left and bottom-right corners.
    const fn corners(self) -> [char; 4] {
        match self {
            Self::Square => ['┌', '┐', '└', '┘'],
            Self::Rounded => ['╭', '╮', '╰', '╯'],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block<'a> {
    border_type: BorderType,
    border_style: Style,
    title: Option<&'a str>,
    title_style: Option<Style>,
    style: Style,
}

impl<'a> Block<'a> {
    pub fn bordered() -> Self {
        Self::default()
    }

    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Layered over the border style for the title text.
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = Some(style);
        self
    }

    /// Applied to every cell of the area before the border is drawn.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The area left inside the border.
    pub fn inner(&self, area: Rect) -> Rect {
        area.inner(Sides::all(1))
    }

    /// Border glyph for (x, y) on the edge of `area`.
    fn edge_glyph(&self, area: Rect, x: u16, y: u16) -> char {
        let [tl, tr, bl, br] = self.border_type.corners();
        let left = x == area.x;
        let right = x == area.right() - 1;
        let top = y == area.y;
        let bottom = y == area.bottom() - 1;
        match (top, bottom, left, right) {
            (true, _, true, _) => tl,
            (true, _, _, true) => tr,
            (_, true, true, _) => bl,
            (_, true, _, true) => br,
            (true, _, _, _) | (_, true, _, _) => '─',
            _ => '│',
        }
    }
}

impl Widget for Block<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        frame.buffer.set_style(area, self.style);

        let inner = self.inner(area);
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if inner.contains(x, y) {
                    continue;
                }
                let mut cell = Cell::from_char(self.edge_glyph(area, x, y));
                self.border_style.apply_to(&mut cell);
                frame.buffer.set(x, y, cell);
            }
        }

        if let Some(title) = self.title
            && area.width >= 3
        {
            let style = self
                .title_style
                .map_or(self.border_style, |s| self.border_style.patch(s));
            frame
                .buffer
                .set_string(area.x.saturating_add(1), area.y, title, style, area.right() - 1);
        }
    }
}
