#![forbid(unsafe_code)]

//! Inline validation error display widget.
//!
//! Renders a one-line error under a form field: an icon, a space, then the
//! message in the error color.
//!
//! # Example
//!
//! ```ignore
//! use cform_widgets::ValidationErrorDisplay;
//!
//! let error = ValidationErrorDisplay::new("Please enter a valid email");
//! error.render(area, &mut frame);
//! ```
//!
//! # Failure Modes
//!
//! | Scenario | Behavior |
//! |----------|----------|
//! | Empty message | Renders icon only |
//! | Zero-width area | No-op |
//! | Very narrow area | Truncates message with ellipsis |

use cform_core::geometry::Rect;
use cform_render::Style;
use cform_render::cell::PackedRgba;
use cform_render::frame::Frame;

use crate::{Widget, text_width, truncate_with_ellipsis};

/// Default error foreground color (red).
pub const ERROR_FG_DEFAULT: PackedRgba = PackedRgba::rgb(220, 60, 60);

/// Default error icon.
pub const ERROR_ICON_DEFAULT: &str = "⚠";

/// A widget for displaying inline validation errors.
#[derive(Debug, Clone)]
pub struct ValidationErrorDisplay {
    message: String,
    /// Optional error code (for programmatic handling).
    error_code: Option<&'static str>,
    icon: String,
    style: Style,
    icon_style: Style,
}

impl Default for ValidationErrorDisplay {
    fn default() -> Self {
        Self {
            message: String::new(),
            error_code: None,
            icon: ERROR_ICON_DEFAULT.to_string(),
            style: Style::new().fg(ERROR_FG_DEFAULT),
            icon_style: Style::new().fg(ERROR_FG_DEFAULT),
        }
    }
}

impl ValidationErrorDisplay {
    /// Create a new validation error display with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Create from an error code and message.
    #[must_use]
    pub fn with_code(error_code: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_code: Some(error_code),
            ..Default::default()
        }
    }

    /// Set a custom icon. An empty icon drops the separator too.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the error text style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the icon style.
    #[must_use]
    pub fn with_icon_style(mut self, style: Style) -> Self {
        self.icon_style = style;
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn error_code(&self) -> Option<&'static str> {
        self.error_code
    }

    /// Width needed to show icon and message without truncation.
    #[must_use]
    pub fn min_width(&self) -> u16 {
        let icon_width = text_width(&self.icon) as u16;
        if self.message.is_empty() {
            return icon_width;
        }
        let msg_width = text_width(&self.message) as u16;
        if icon_width == 0 {
            msg_width
        } else {
            icon_width.saturating_add(1).saturating_add(msg_width)
        }
    }
}

impl Widget for ValidationErrorDisplay {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }

        let y = area.y;
        let max_x = area.right();
        let mut x = frame
            .buffer
            .set_string(area.x, y, &self.icon, self.icon_style, max_x);

        if self.message.is_empty() {
            return;
        }
        if !self.icon.is_empty() {
            x = x.saturating_add(1);
        }
        if x >= max_x {
            return;
        }

        let remaining = max_x.saturating_sub(x) as usize;
        let text = truncate_with_ellipsis(&self.message, remaining);
        frame.buffer.set_string(x, y, &text, self.style, max_x);
    }
}
