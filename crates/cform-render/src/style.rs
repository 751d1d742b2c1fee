#![forbid(unsafe_code)]

//! Composable text styles.
//!
//! A [`Style`] is a sparse overlay: unset fields leave the underlying cell
//! untouched when applied.

use crate::cell::{Cell, PackedRgba, StyleFlags};

/// Optional foreground, background, and attribute overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color override.
    pub fg: Option<PackedRgba>,
    /// Background color override.
    pub bg: Option<PackedRgba>,
    /// Attributes added to the cell.
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// An empty style.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    fn with_flag(mut self, flag: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_default() | flag);
        self
    }

    /// Add bold.
    #[must_use]
    pub fn bold(self) -> Self {
        self.with_flag(StyleFlags::BOLD)
    }

    /// Add dim.
    #[must_use]
    pub fn dim(self) -> Self {
        self.with_flag(StyleFlags::DIM)
    }

    /// Add italic.
    #[must_use]
    pub fn italic(self) -> Self {
        self.with_flag(StyleFlags::ITALIC)
    }

    /// Add underline.
    #[must_use]
    pub fn underline(self) -> Self {
        self.with_flag(StyleFlags::UNDERLINE)
    }

    /// Add reverse video.
    #[must_use]
    pub fn reverse(self) -> Self {
        self.with_flag(StyleFlags::REVERSE)
    }

    /// True when applying this style changes nothing.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    /// Layer `other` on top of `self`; fields set in `other` win, flags merge.
    #[must_use]
    pub fn patch(self, other: Style) -> Self {
        let attrs = match (self.attrs, other.attrs) {
            (Some(a), Some(b)) => Some(a | b),
            (a, b) => b.or(a),
        };
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs,
        }
    }

    /// Apply this style to a cell, preserving its content.
    pub fn apply_to(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        if let Some(attrs) = self.attrs {
            cell.attrs |= attrs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        assert!(Style::new().is_empty());
        assert!(!Style::new().bold().is_empty());
    }

    #[test]
    fn flags_accumulate() {
        let style = Style::new().bold().underline();
        let attrs = style.attrs.unwrap_or_default();
        assert!(attrs.contains(StyleFlags::BOLD | StyleFlags::UNDERLINE));
    }

    #[test]
    fn patch_prefers_other_and_merges_flags() {
        let base = Style::new().fg(PackedRgba::rgb(1, 1, 1)).bold();
        let over = Style::new().fg(PackedRgba::rgb(2, 2, 2)).dim();
        let merged = base.patch(over);
        assert_eq!(merged.fg, Some(PackedRgba::rgb(2, 2, 2)));
        let attrs = merged.attrs.unwrap_or_default();
        assert!(attrs.contains(StyleFlags::BOLD | StyleFlags::DIM));
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let base = Style::new().bg(PackedRgba::rgb(9, 9, 9));
        let merged = base.patch(Style::new().bold());
        assert_eq!(merged.bg, Some(PackedRgba::rgb(9, 9, 9)));
    }

    #[test]
    fn apply_preserves_content() {
        let mut cell = Cell::from_char('Z');
        Style::new().fg(PackedRgba::rgb(1, 2, 3)).apply_to(&mut cell);
        assert_eq!(cell.content.as_char(), Some('Z'));
        assert_eq!(cell.fg, PackedRgba::rgb(1, 2, 3));
    }
}
