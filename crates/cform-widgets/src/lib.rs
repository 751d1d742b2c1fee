#![forbid(unsafe_code)]

//! Core widgets for the contact form.

pub mod block;
pub mod button;
pub mod input;
pub mod modal;
pub mod textarea;
pub mod validation_error;
pub mod wrap;

use cform_core::geometry::Rect;
use cform_render::frame::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub use block::{Block, BorderType};
pub use button::Button;
pub use input::TextInput;
pub use modal::Modal;
pub use textarea::TextArea;
pub use validation_error::ValidationErrorDisplay;
pub use wrap::wrap_lines;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Frame` within a given `Rect`, and may
/// place the frame cursor when they own keyboard focus.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Display width of a string in terminal cells.
pub(crate) fn text_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate `text` to fit in `max_width` cells, ending in `…` when cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for g in text.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if width + w + 1 > max_width {
            break;
        }
        out.push_str(g);
        width += w;
    }
    out.push('…');
    out
}
