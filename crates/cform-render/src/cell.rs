#![forbid(unsafe_code)]

//! Cell types: the unit of the render grid.
//!
//! A [`Cell`] holds one character (or a continuation marker for the trailing
//! columns of a wide character), its colors, and its style flags.

use unicode_width::UnicodeWidthChar;

/// What a cell displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellContent {
    /// Nothing drawn; presented as a space.
    #[default]
    Empty,
    /// A single character.
    Char(char),
    /// Trailing column of a wide character to the left.
    Continuation,
}

impl CellContent {
    /// The character, if this cell holds one.
    #[inline]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Char(c) => Some(c),
            _ => None,
        }
    }

    /// Display width in columns (continuations are zero-width).
    pub fn width(self) -> usize {
        match self {
            Self::Empty => 1,
            Self::Char(c) => c.width().unwrap_or(0).max(1),
            Self::Continuation => 0,
        }
    }
}

/// RGBA color packed into a `u32` (`0xRRGGBBAA`).
///
/// Alpha zero means "unset": the presenter leaves the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (terminal default color).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha component.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Darken by `factor` in `0.0..=1.0` (1.0 = black). Alpha is preserved.
    pub fn darken(self, factor: f32) -> Self {
        let keep = 1.0 - factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * keep).round() as u8;
        Self::rgba(scale(self.r()), scale(self.g()), scale(self.b()), self.a())
    }
}

bitflags::bitflags! {
    /// Text attributes applied to a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold / increased intensity.
        const BOLD          = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM           = 0b0000_0010;
        /// Italic.
        const ITALIC        = 0b0000_0100;
        /// Underline.
        const UNDERLINE     = 0b0000_1000;
        /// Swap foreground and background.
        const REVERSE       = 0b0001_0000;
        /// Strikethrough.
        const STRIKETHROUGH = 0b0010_0000;
    }
}

/// A single cell in the render grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Displayed content.
    pub content: CellContent,
    /// Foreground color.
    pub fg: PackedRgba,
    /// Background color.
    pub bg: PackedRgba,
    /// Text attributes.
    pub attrs: StyleFlags,
}

impl Cell {
    /// Marker written into the trailing columns of a wide character.
    pub const CONTINUATION: Self = Self {
        content: CellContent::Continuation,
        fg: PackedRgba::TRANSPARENT,
        bg: PackedRgba::TRANSPARENT,
        attrs: StyleFlags::empty(),
    };

    /// Create a cell holding one character with default colors.
    #[inline]
    pub const fn from_char(c: char) -> Self {
        Self {
            content: CellContent::Char(c),
            fg: PackedRgba::TRANSPARENT,
            bg: PackedRgba::TRANSPARENT,
            attrs: StyleFlags::empty(),
        }
    }

    /// Whether this is the trailing half of a wide character.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }

    /// Whether nothing has been drawn here.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    /// Set the foreground color (builder).
    #[inline]
    pub const fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder).
    #[inline]
    pub const fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    /// Set the attributes (builder).
    #[inline]
    pub const fn with_attrs(mut self, attrs: StyleFlags) -> Self {
        self.attrs = attrs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_rgba_components() {
        let c = PackedRgba::rgba(10, 20, 30, 40);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (10, 20, 30, 40));
        assert_eq!(PackedRgba::rgb(1, 2, 3).a(), 255);
    }

    #[test]
    fn transparent_has_zero_alpha() {
        assert_eq!(PackedRgba::TRANSPARENT.a(), 0);
        assert_eq!(PackedRgba::default(), PackedRgba::TRANSPARENT);
    }

    #[test]
    fn darken_scales_channels() {
        let c = PackedRgba::rgb(200, 100, 50).darken(0.5);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (100, 50, 25, 255));
        assert_eq!(PackedRgba::WHITE.darken(1.0), PackedRgba::BLACK);
    }

    #[test]
    fn content_widths() {
        assert_eq!(CellContent::Char('a').width(), 1);
        assert_eq!(CellContent::Char('漢').width(), 2);
        assert_eq!(CellContent::Continuation.width(), 0);
        assert_eq!(CellContent::Empty.width(), 1);
    }

    #[test]
    fn default_cell_is_empty() {
        let cell = Cell::default();
        assert!(cell.is_empty());
        assert!(!cell.is_continuation());
        assert_eq!(cell.content.as_char(), None);
    }

    #[test]
    fn builders_set_fields() {
        let cell = Cell::from_char('x')
            .with_fg(PackedRgba::rgb(1, 1, 1))
            .with_bg(PackedRgba::rgb(2, 2, 2))
            .with_attrs(StyleFlags::BOLD);
        assert_eq!(cell.content.as_char(), Some('x'));
        assert_eq!(cell.fg, PackedRgba::rgb(1, 1, 1));
        assert_eq!(cell.bg, PackedRgba::rgb(2, 2, 2));
        assert!(cell.attrs.contains(StyleFlags::BOLD));
    }
}
