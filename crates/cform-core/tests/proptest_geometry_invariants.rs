//! Property-based invariant tests for `Rect` and `Sides`.
//!
//! 1. Intersection is commutative.
//! 2. Intersection fits within both inputs.
//! 3. A centered rect always lies inside its container.
//! 4. Inner margin never grows a rectangle.

use cform_core::geometry::{Rect, Sides};
use proptest::prelude::*;

fn small_rect_strategy() -> impl Strategy<Value = Rect> {
    (0u16..=500, 0u16..=500, 0u16..=500, 0u16..=500).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn intersection_commutative(a in small_rect_strategy(), b in small_rect_strategy()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn intersection_within_both(a in small_rect_strategy(), b in small_rect_strategy()) {
        let i = a.intersection(&b);
        if !i.is_empty() {
            prop_assert!(i.x >= a.x && i.right() <= a.right());
            prop_assert!(i.y >= b.y && i.bottom() <= b.bottom());
        }
    }

    #[test]
    fn centered_inside_container(area in small_rect_strategy(), w in 0u16..=600, h in 0u16..=600) {
        let c = area.centered(w, h);
        prop_assert!(c.x >= area.x && c.right() <= area.right());
        prop_assert!(c.y >= area.y && c.bottom() <= area.bottom());
        prop_assert_eq!(c.width, w.min(area.width));
        prop_assert_eq!(c.height, h.min(area.height));
    }

    #[test]
    fn inner_never_grows(area in small_rect_strategy(), m in 0u16..=300) {
        let inner = area.inner(Sides::all(m));
        prop_assert!(inner.width <= area.width);
        prop_assert!(inner.height <= area.height);
    }
}
