#![forbid(unsafe_code)]

//! The cell grid widgets draw into.
//!
//! Cells are stored row-major. Writes outside the bounds are ignored, and a
//! wide character that does not fit entirely is not written at all.

use cform_core::geometry::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::cell::{Cell, CellContent, PackedRgba};
use crate::style::Style;

/// A 2D grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer filled with empty cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer area as a rectangle.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get the cell at (x, y) mutably.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Set the cell at (x, y).
    ///
    /// A transparent background keeps the background already in place. Wide
    /// characters also claim their trailing columns as continuations.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let width = cell.content.width().max(1);
        if x as usize + width > self.width as usize || y >= self.height {
            return;
        }
        let Some(idx) = self.index(x, y) else {
            return;
        };

        let existing_bg = self.cells[idx].bg;
        let bg = if cell.bg.a() == 0 { existing_bg } else { cell.bg };
        self.cells[idx] = Cell { bg, ..cell };

        for i in 1..width {
            let tail = idx + i;
            self.cells[tail] = Cell {
                bg,
                ..Cell::CONTINUATION
            };
        }
    }

    /// Fill a rectangular region with the given cell.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = self.bounds().intersection(&rect);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Apply a style to every cell in `rect`, preserving content.
    pub fn set_style(&mut self, rect: Rect, style: Style) {
        if style.is_empty() {
            return;
        }
        let clipped = self.bounds().intersection(&rect);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    style.apply_to(cell);
                }
            }
        }
    }

    /// Draw a string starting at (x, y), clipped at `max_x` (exclusive).
    ///
    /// Returns the column after the last drawn grapheme.
    pub fn set_string(&mut self, mut x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        for grapheme in text.graphemes(true) {
            let w = UnicodeWidthStr::width(grapheme);
            if w == 0 {
                continue;
            }
            if x as usize + w > max_x as usize {
                break;
            }
            if let Some(c) = grapheme.chars().next() {
                let mut cell = Cell::from_char(c);
                style.apply_to(&mut cell);
                self.set(x, y, cell);
            }
            x = x.saturating_add(w as u16);
        }
        x
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Reset every cell to the given background.
    pub fn clear_with_bg(&mut self, bg: PackedRgba) {
        self.cells.fill(Cell::default().with_bg(bg));
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells.
    ///
    /// Returns an empty slice when `y` is out of bounds.
    pub fn row_cells(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Text content of a row, with empty cells as spaces and continuations skipped.
    pub fn row_text(&self, y: u16) -> String {
        self.row_cells(y)
            .iter()
            .filter_map(|cell| match cell.content {
                CellContent::Empty => Some(' '),
                CellContent::Char(c) => Some(c),
                CellContent::Continuation => None,
            })
            .collect()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty() {
        let buf = Buffer::new(4, 2);
        assert_eq!(buf.cells().len(), 8);
        assert!(buf.cells().iter().all(Cell::is_empty));
    }

    #[test]
    fn out_of_bounds_set_is_ignored() {
        let mut buf = Buffer::new(2, 2);
        buf.set(5, 5, Cell::from_char('x'));
        assert!(buf.cells().iter().all(Cell::is_empty));
        assert!(buf.get(5, 5).is_none());
    }

    #[test]
    fn wide_char_claims_continuation() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('漢'));
        assert_eq!(buf.get(0, 0).map(|c| c.content), Some(CellContent::Char('漢')));
        assert!(buf.get(1, 0).is_some_and(Cell::is_continuation));
    }

    #[test]
    fn wide_char_that_does_not_fit_is_dropped() {
        let mut buf = Buffer::new(2, 1);
        buf.set(1, 0, Cell::from_char('漢'));
        assert!(buf.get(1, 0).is_some_and(Cell::is_empty));
    }

    #[test]
    fn transparent_bg_keeps_existing_bg() {
        let mut buf = Buffer::new(1, 1);
        let panel = PackedRgba::rgb(10, 20, 30);
        buf.clear_with_bg(panel);
        buf.set(0, 0, Cell::from_char('a'));
        assert_eq!(buf.get(0, 0).map(|c| c.bg), Some(panel));
    }

    #[test]
    fn set_string_clips_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.set_string(0, 0, "ABCDEF", Style::default(), 3);
        assert_eq!(end, 3);
        assert_eq!(buf.row_text(0), "ABC       ");
    }

    #[test]
    fn set_string_applies_style() {
        let mut buf = Buffer::new(3, 1);
        let style = Style::new().fg(PackedRgba::rgb(255, 0, 0));
        buf.set_string(0, 0, "hi", style, 3);
        assert_eq!(buf.get(1, 0).map(|c| c.fg), Some(PackedRgba::rgb(255, 0, 0)));
    }

    #[test]
    fn fill_is_clipped_to_bounds() {
        let mut buf = Buffer::new(3, 3);
        buf.fill(Rect::new(2, 2, 10, 10), Cell::from_char('#'));
        assert_eq!(buf.row_text(2), "  #");
        assert_eq!(buf.row_text(0), "   ");
    }

    #[test]
    fn set_style_keeps_content() {
        let mut buf = Buffer::new(2, 1);
        buf.set_string(0, 0, "ok", Style::default(), 2);
        buf.set_style(Rect::new(0, 0, 2, 1), Style::new().bold());
        assert_eq!(buf.row_text(0), "ok");
    }

    #[test]
    fn row_text_out_of_range_is_empty() {
        let buf = Buffer::new(2, 1);
        assert_eq!(buf.row_text(3), "");
    }
}
