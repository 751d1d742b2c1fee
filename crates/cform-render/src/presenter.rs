#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! The presenter turns a [`BufferDiff`] into terminal output. It remembers
//! the last style and cursor position it emitted so that a run of identically
//! styled cells costs one cursor move and one SGR sequence.
//!
//! ```ignore
//! let mut presenter = Presenter::new(std::io::stdout());
//! let diff = BufferDiff::compute(&current, &next);
//! presenter.present(&next, &diff)?;
//! std::mem::swap(&mut current, &mut next);
//! ```

use std::io::{self, BufWriter, Write};

use crossterm::{cursor, queue, style, terminal};

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};
use crate::diff::BufferDiff;

const BUFFER_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    attrs: StyleFlags,
}

impl CellStyle {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            attrs: cell.attrs,
        }
    }
}

fn to_color(color: PackedRgba) -> style::Color {
    if color.a() == 0 {
        style::Color::Reset
    } else {
        style::Color::Rgb {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        }
    }
}

/// State-tracked ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    /// Current style state (None = unknown/reset).
    current_style: Option<CellStyle>,
    /// Current cursor position. None = unknown.
    cursor: Option<(u16, u16)>,
}

impl<W: Write> Presenter<W> {
    /// Create a new presenter over the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            current_style: None,
            cursor: None,
        }
    }

    /// Emit the cells named by `diff` from `buffer`, then flush.
    pub fn present(&mut self, buffer: &Buffer, diff: &BufferDiff) -> io::Result<()> {
        let span = tracing::trace_span!(
            "cform.present",
            width = buffer.width(),
            height = buffer.height(),
            changes = diff.len()
        );
        let _guard = span.enter();

        for run in diff.runs() {
            self.move_cursor_to(run.x0, run.y)?;
            for x in run.x0..=run.x1 {
                if let Some(cell) = buffer.get(x, run.y) {
                    self.emit_cell(cell)?;
                }
            }
        }

        queue!(self.writer, style::ResetColor, style::SetAttribute(style::Attribute::Reset))?;
        self.current_style = None;
        self.writer.flush()
    }

    fn emit_cell(&mut self, cell: &Cell) -> io::Result<()> {
        if cell.is_continuation() {
            return Ok(());
        }

        self.emit_style_changes(cell)?;

        let ch = cell.content.as_char().unwrap_or(' ');
        queue!(self.writer, style::Print(ch))?;

        if let Some((x, y)) = self.cursor {
            self.cursor = Some((x.saturating_add(cell.content.width() as u16), y));
        }
        Ok(())
    }

    fn emit_style_changes(&mut self, cell: &Cell) -> io::Result<()> {
        let next = CellStyle::from_cell(cell);
        if self.current_style == Some(next) {
            return Ok(());
        }

        // Reset then apply: simpler than diffing individual attributes.
        queue!(
            self.writer,
            style::SetAttribute(style::Attribute::Reset),
            style::SetForegroundColor(to_color(next.fg)),
            style::SetBackgroundColor(to_color(next.bg)),
        )?;

        let attrs = next.attrs;
        let pairs = [
            (StyleFlags::BOLD, style::Attribute::Bold),
            (StyleFlags::DIM, style::Attribute::Dim),
            (StyleFlags::ITALIC, style::Attribute::Italic),
            (StyleFlags::UNDERLINE, style::Attribute::Underlined),
            (StyleFlags::REVERSE, style::Attribute::Reverse),
            (StyleFlags::STRIKETHROUGH, style::Attribute::CrossedOut),
        ];
        for (flag, attr) in pairs {
            if attrs.contains(flag) {
                queue!(self.writer, style::SetAttribute(attr))?;
            }
        }

        self.current_style = Some(next);
        Ok(())
    }

    fn move_cursor_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        if self.cursor == Some((x, y)) {
            return Ok(());
        }
        queue!(self.writer, cursor::MoveTo(x, y))?;
        self.cursor = Some((x, y));
        Ok(())
    }

    /// Clear the entire screen and home the cursor.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        queue!(
            self.writer,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        self.cursor = Some((0, 0));
        self.writer.flush()
    }

    /// Show the cursor at `position`, or hide it.
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) -> io::Result<()> {
        match position {
            Some((x, y)) => {
                self.move_cursor_to(x, y)?;
                queue!(self.writer, cursor::Show)?;
            }
            None => queue!(self.writer, cursor::Hide)?,
        }
        self.writer.flush()
    }

    /// Forget tracked terminal state.
    ///
    /// Call after a resize or anything else that leaves the terminal state unknown.
    pub fn reset(&mut self) {
        self.current_style = None;
        self.cursor = None;
    }

    /// Get the inner writer, flushing buffered data first.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}
