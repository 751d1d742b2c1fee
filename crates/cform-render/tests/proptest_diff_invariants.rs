//! Property-based invariant tests for `BufferDiff`.
//!
//! 1. A buffer diffed against itself is empty.
//! 2. Applying the changed cells of `new` onto `old` reproduces `new`.
//! 3. Runs cover exactly the changed positions.

use cform_render::buffer::Buffer;
use cform_render::cell::Cell;
use cform_render::diff::BufferDiff;
use proptest::prelude::*;

fn buffer_strategy(width: u16, height: u16) -> impl Strategy<Value = Buffer> {
    proptest::collection::vec((0..width, 0..height, proptest::char::range('a', 'z')), 0..40)
        .prop_map(move |writes| {
            let mut buf = Buffer::new(width, height);
            for (x, y, c) in writes {
                buf.set(x, y, Cell::from_char(c));
            }
            buf
        })
}

proptest! {
    #[test]
    fn self_diff_is_empty(buf in buffer_strategy(12, 6)) {
        prop_assert!(BufferDiff::compute(&buf, &buf).is_empty());
    }

    #[test]
    fn applying_changes_reproduces_target(
        old in buffer_strategy(12, 6),
        new in buffer_strategy(12, 6),
    ) {
        let diff = BufferDiff::compute(&old, &new);
        let mut patched = old.clone();
        for &(x, y) in diff.changes() {
            if let (Some(src), Some(dst)) = (new.get(x, y).copied(), patched.get_mut(x, y)) {
                *dst = src;
            }
        }
        prop_assert_eq!(patched, new);
    }

    #[test]
    fn runs_cover_changes_exactly(
        old in buffer_strategy(12, 6),
        new in buffer_strategy(12, 6),
    ) {
        let diff = BufferDiff::compute(&old, &new);
        let expanded: Vec<(u16, u16)> = diff
            .runs()
            .iter()
            .flat_map(|run| (run.x0..=run.x1).map(move |x| (x, run.y)))
            .collect();
        prop_assert_eq!(expanded, diff.changes().to_vec());
    }
}
