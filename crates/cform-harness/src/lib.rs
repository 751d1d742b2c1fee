#![forbid(unsafe_code)]

//! Test helpers for the contact form.
//!
//! - **Text capture**: [`buffer_to_text`] flattens a rendered `Buffer` into
//!   plain lines so tests can assert on what the user would see.
//! - **Search**: [`find_text`] and [`row_containing`] locate rendered text,
//!   which is how tests find click targets without hard-coding layout.
//! - **Input**: the [`input`] module builds key, mouse, and paste events.
//!
//! ```ignore
//! let buf = sim.capture_frame(80, 24);
//! let text = buffer_to_text(buf);
//! assert!(text.contains("Form Data"));
//! let (x, y) = find_text(buf, "Close").unwrap();
//! sim.inject_event(input::click(x, y));
//! ```

pub mod input;

use cform_render::buffer::Buffer;

pub use cform_core::geometry::Rect;

/// Convert a `Buffer` to a plain text string.
///
/// Each row becomes one line. Empty cells become spaces. Continuation cells
/// are skipped so wide characters occupy their natural width in the output.
pub fn buffer_to_text(buf: &Buffer) -> String {
    let capacity = (buf.width() as usize + 1) * buf.height() as usize;
    let mut out = String::with_capacity(capacity);

    for y in 0..buf.height() {
        if y > 0 {
            out.push('\n');
        }
        out.push_str(&buf.row_text(y));
    }
    out
}

/// Cell coordinates of the first occurrence of `needle`, scanning rows top-down.
///
/// The x coordinate is a buffer column, so wide characters earlier on the
/// row are accounted for.
pub fn find_text(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
    if needle.is_empty() {
        return None;
    }
    let needle: Vec<char> = needle.chars().collect();

    for y in 0..buf.height() {
        // (column, char) for every cell that starts a glyph.
        let glyphs: Vec<(u16, char)> = buf
            .row_cells(y)
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_continuation())
            .map(|(x, cell)| (x as u16, cell.content.as_char().unwrap_or(' ')))
            .collect();

        if glyphs.len() < needle.len() {
            continue;
        }
        for start in 0..=glyphs.len() - needle.len() {
            let matched = glyphs[start..start + needle.len()]
                .iter()
                .zip(&needle)
                .all(|((_, c), n)| c == n);
            if matched {
                return Some((glyphs[start].0, y));
            }
        }
    }
    None
}

/// Index of the first row whose text contains `needle`.
pub fn row_containing(buf: &Buffer, needle: &str) -> Option<u16> {
    (0..buf.height()).find(|&y| buf.row_text(y).contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cform_render::cell::Cell;

    fn buffer_with(rows: &[&str]) -> Buffer {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u16;
        let mut buf = Buffer::new(width, rows.len() as u16);
        for (y, row) in rows.iter().enumerate() {
            let mut x = 0u16;
            for c in row.chars() {
                buf.set(x, y as u16, Cell::from_char(c));
                x += Cell::from_char(c).content.width() as u16;
            }
        }
        buf
    }

    #[test]
    fn text_has_one_line_per_row() {
        let buf = buffer_with(&["ab", "cd"]);
        assert_eq!(buffer_to_text(&buf), "ab\ncd");
    }

    #[test]
    fn empty_cells_become_spaces() {
        let buf = Buffer::new(3, 1);
        assert_eq!(buffer_to_text(&buf), "   ");
    }

    #[test]
    fn find_text_reports_cell_column() {
        let buf = buffer_with(&["....", "x Close"]);
        assert_eq!(find_text(&buf, "Close"), Some((2, 1)));
        assert_eq!(find_text(&buf, "Open"), None);
        assert_eq!(find_text(&buf, ""), None);
    }

    #[test]
    fn find_text_after_wide_char() {
        let mut buf = Buffer::new(6, 1);
        buf.set(0, 0, Cell::from_char('漢'));
        buf.set(2, 0, Cell::from_char('o'));
        buf.set(3, 0, Cell::from_char('k'));
        assert_eq!(find_text(&buf, "ok"), Some((2, 0)));
    }

    #[test]
    fn row_containing_finds_first_match() {
        let buf = buffer_with(&["one", "two", "two"]);
        assert_eq!(row_containing(&buf, "two"), Some(1));
        assert_eq!(row_containing(&buf, "six"), None);
    }
}
