#![forbid(unsafe_code)]

//! Diff computation between buffers.
//!
//! [`BufferDiff`] records every cell position whose contents differ between
//! the previously presented buffer and the next one. Positions are produced
//! by a row-major scan, so they come out sorted by `(y, x)` and can be
//! coalesced into [`ChangeRun`]s without sorting.
//!
//! ```
//! use cform_render::buffer::Buffer;
//! use cform_render::cell::Cell;
//! use cform_render::diff::BufferDiff;
//!
//! let old = Buffer::new(80, 24);
//! let mut new = Buffer::new(80, 24);
//! new.set(5, 5, Cell::from_char('X'));
//! new.set(6, 5, Cell::from_char('Y'));
//!
//! let diff = BufferDiff::compute(&old, &new);
//! assert_eq!(diff.len(), 2);
//! assert_eq!(diff.runs().len(), 1);
//! ```

use crate::buffer::Buffer;

/// A contiguous run of changed cells on a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    /// Row index.
    pub y: u16,
    /// Start column (inclusive).
    pub x0: u16,
    /// End column (inclusive).
    pub x1: u16,
}

impl ChangeRun {
    /// Create a new change run.
    #[inline]
    pub const fn new(y: u16, x0: u16, x1: u16) -> Self {
        debug_assert!(x0 <= x1);
        Self { y, x0, x1 }
    }

    /// Number of cells in this run.
    #[inline]
    pub const fn len(&self) -> u16 {
        self.x1 - self.x0 + 1
    }
}

/// The set of changed positions between two buffers.
#[derive(Debug, Clone, Default)]
pub struct BufferDiff {
    changes: Vec<(u16, u16)>,
}

impl BufferDiff {
    /// Compute the diff between two buffers of identical size.
    pub fn compute(old: &Buffer, new: &Buffer) -> Self {
        debug_assert_eq!(old.width(), new.width(), "buffer widths must match");
        debug_assert_eq!(old.height(), new.height(), "buffer heights must match");

        let width = old.width().min(new.width());
        let height = old.height().min(new.height());
        let mut changes = Vec::new();

        for y in 0..height {
            let old_row = old.row_cells(y);
            let new_row = new.row_cells(y);
            for x in 0..width {
                if old_row[x as usize] != new_row[x as usize] {
                    changes.push((x, y));
                }
            }
        }

        tracing::trace!(changes = changes.len(), "diff computed");
        Self { changes }
    }

    /// A diff that marks every cell of `buffer` as changed.
    ///
    /// Used for the first frame and after a resize, when the terminal
    /// contents are unknown.
    pub fn full(buffer: &Buffer) -> Self {
        let mut changes = Vec::with_capacity(buffer.cells().len());
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                changes.push((x, y));
            }
        }
        Self { changes }
    }

    /// Number of changed cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Check if no cells changed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Changed positions as `(x, y)`, in row-major order.
    #[inline]
    pub fn changes(&self) -> &[(u16, u16)] {
        &self.changes
    }

    /// Coalesce consecutive positions on the same row into runs.
    pub fn runs(&self) -> Vec<ChangeRun> {
        let mut runs = Vec::new();
        let mut iter = self.changes.iter().copied().peekable();

        while let Some((x0, y)) = iter.next() {
            let mut x1 = x0;
            while let Some(&(x, yy)) = iter.peek() {
                if yy != y || x != x1 + 1 {
                    break;
                }
                x1 = x;
                iter.next();
            }
            runs.push(ChangeRun::new(y, x0, x1));
        }

        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, PackedRgba};

    #[test]
    fn empty_diff_when_buffers_identical() {
        let a = Buffer::new(10, 10);
        let b = Buffer::new(10, 10);
        let diff = BufferDiff::compute(&a, &b);
        assert!(diff.is_empty());
        assert!(diff.runs().is_empty());
    }

    #[test]
    fn single_cell_change_detected() {
        let old = Buffer::new(10, 10);
        let mut new = Buffer::new(10, 10);
        new.set(5, 5, Cell::from_char('X'));
        let diff = BufferDiff::compute(&old, &new);
        assert_eq!(diff.changes(), &[(5, 5)]);
    }

    #[test]
    fn changes_are_row_major() {
        let old = Buffer::new(10, 10);
        let mut new = Buffer::new(10, 10);
        new.set(9, 9, Cell::from_char('B'));
        new.set(0, 0, Cell::from_char('A'));
        new.set(5, 3, Cell::from_char('C'));
        let diff = BufferDiff::compute(&old, &new);
        assert_eq!(diff.changes(), &[(0, 0), (5, 3), (9, 9)]);
    }

    #[test]
    fn style_only_change_detected() {
        let old = Buffer::new(3, 1);
        let mut new = Buffer::new(3, 1);
        if let Some(cell) = new.get_mut(1, 0) {
            cell.fg = PackedRgba::rgb(255, 0, 0);
        }
        assert_eq!(BufferDiff::compute(&old, &new).changes(), &[(1, 0)]);
    }

    #[test]
    fn runs_split_on_gaps_and_rows() {
        let old = Buffer::new(10, 3);
        let mut new = Buffer::new(10, 3);
        for x in [1, 2, 3, 6] {
            new.set(x, 0, Cell::from_char('x'));
        }
        new.set(0, 1, Cell::from_char('y'));
        let runs = BufferDiff::compute(&old, &new).runs();
        assert_eq!(
            runs,
            vec![
                ChangeRun::new(0, 1, 3),
                ChangeRun::new(0, 6, 6),
                ChangeRun::new(1, 0, 0),
            ]
        );
        assert_eq!(runs[0].len(), 3);
    }

    #[test]
    fn full_diff_covers_every_cell() {
        let buf = Buffer::new(4, 2);
        let diff = BufferDiff::full(&buf);
        assert_eq!(diff.len(), 8);
        assert_eq!(diff.runs(), vec![ChangeRun::new(0, 0, 3), ChangeRun::new(1, 0, 3)]);
    }
}
