#![forbid(unsafe_code)]

//! Colors and styles for the contact form.
//!
//! A light panel on a blue backdrop, indigo accents for focus and the
//! primary button, red for validation errors.

use cform_render::Style;
use cform_render::cell::PackedRgba;

pub mod color {
    use super::PackedRgba;

    pub const BACKDROP: PackedRgba = PackedRgba::rgb(59, 130, 246);
    pub const PANEL: PackedRgba = PackedRgba::rgb(239, 246, 255);
    pub const BORDER: PackedRgba = PackedRgba::rgb(209, 213, 219);
    pub const LABEL: PackedRgba = PackedRgba::rgb(55, 65, 81);
    pub const INPUT_BG: PackedRgba = PackedRgba::WHITE;
    pub const INPUT_FG: PackedRgba = PackedRgba::rgb(75, 85, 99);
    pub const PLACEHOLDER: PackedRgba = PackedRgba::rgb(156, 163, 175);
    pub const ACCENT: PackedRgba = PackedRgba::rgb(99, 102, 241);
    pub const BUTTON: PackedRgba = PackedRgba::rgb(79, 70, 229);
    pub const BUTTON_FOCUSED: PackedRgba = PackedRgba::rgb(67, 56, 202);
    pub const ERROR: PackedRgba = PackedRgba::rgb(239, 68, 68);
    pub const TITLE: PackedRgba = PackedRgba::BLACK;
}

pub fn backdrop() -> Style {
    Style::new().bg(color::BACKDROP)
}

pub fn panel() -> Style {
    Style::new().fg(color::LABEL).bg(color::PANEL)
}

pub fn panel_border() -> Style {
    Style::new().fg(color::BORDER)
}

pub fn label(focused: bool) -> Style {
    if focused {
        Style::new().fg(color::ACCENT).bold()
    } else {
        Style::new().fg(color::LABEL)
    }
}

pub fn input(focused: bool) -> Style {
    let style = Style::new().fg(color::INPUT_FG).bg(color::INPUT_BG);
    if focused { style.underline() } else { style }
}

pub fn placeholder() -> Style {
    Style::new().fg(color::PLACEHOLDER)
}

pub fn error() -> Style {
    Style::new().fg(color::ERROR)
}

pub fn button() -> Style {
    Style::new().fg(PackedRgba::WHITE).bg(color::BUTTON).bold()
}

pub fn button_focused() -> Style {
    Style::new().bg(color::BUTTON_FOCUSED).underline()
}

pub fn modal() -> Style {
    Style::new().fg(color::LABEL).bg(PackedRgba::WHITE)
}

pub fn modal_title() -> Style {
    Style::new().fg(color::TITLE).bold()
}

pub fn summary_label() -> Style {
    Style::new().fg(color::TITLE).bold()
}
