#![forbid(unsafe_code)]

//! Frame = Buffer + cursor for a render pass.
//!
//! The `Frame` is the render target that `Model::view()` writes to.
//!
//! ```
//! use cform_render::cell::Cell;
//! use cform_render::frame::Frame;
//!
//! let mut frame = Frame::new(80, 24);
//! frame.buffer.set(0, 0, Cell::from_char('H'));
//! frame.set_cursor(Some((1, 0)));
//! ```

use cform_core::geometry::Rect;

use crate::buffer::Buffer;

/// A render target for one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid.
    pub buffer: Buffer,
    cursor_position: Option<(u16, u16)>,
}

impl Frame {
    /// Create a frame of the given size with the cursor hidden.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            cursor_position: None,
        }
    }

    /// Frame width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height in cells.
    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// The full frame area.
    #[inline]
    pub fn area(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Place the terminal cursor, or hide it with `None`.
    ///
    /// Positions outside the frame hide the cursor.
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor_position = position.filter(|&(x, y)| self.area().contains(x, y));
    }

    /// Where the cursor should be shown, if anywhere.
    #[inline]
    pub fn cursor_position(&self) -> Option<(u16, u16)> {
        self.cursor_position
    }

    /// Consume the frame, keeping only its buffer.
    pub fn into_buffer(self) -> Buffer {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_hides_cursor() {
        let frame = Frame::new(10, 5);
        assert_eq!(frame.cursor_position(), None);
        assert_eq!(frame.area(), Rect::new(0, 0, 10, 5));
    }

    #[test]
    fn cursor_inside_is_kept() {
        let mut frame = Frame::new(10, 5);
        frame.set_cursor(Some((3, 4)));
        assert_eq!(frame.cursor_position(), Some((3, 4)));
        frame.set_cursor(None);
        assert_eq!(frame.cursor_position(), None);
    }

    #[test]
    fn cursor_outside_is_hidden() {
        let mut frame = Frame::new(10, 5);
        frame.set_cursor(Some((10, 0)));
        assert_eq!(frame.cursor_position(), None);
    }
}
