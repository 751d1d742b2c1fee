#![forbid(unsafe_code)]

//! Render kernel: cells, styles, buffers, diffs, and ANSI presentation.

pub mod buffer;
pub mod cell;
pub mod diff;
pub mod frame;
pub mod presenter;
pub mod style;

pub use style::Style;
