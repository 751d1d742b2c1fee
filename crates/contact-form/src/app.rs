#![forbid(unsafe_code)]

//! The contact form as a runtime [`Model`].
//!
//! `ContactFormApp` maps keys and clicks onto [`FormController`] calls and
//! draws the form, inline errors, and the summary dialog.
//!
//! # Keys
//!
//! | Key | Form | Summary open |
//! |-----|------|--------------|
//! | `Tab` / `Down` | next control | ignored |
//! | `Shift+Tab` / `Up` | previous control | ignored |
//! | `Enter` | submit (newline in the message) | close |
//! | `Space` | submit when the button has focus | close |
//! | `Esc` | ignored | close |
//! | `Ctrl+S` | submit | ignored |
//! | `Ctrl+C` / `Ctrl+Q` | quit | quit |
//!
//! In the message area `Up`/`Down` move between lines and only change focus
//! from the first or last line.

use std::cell::RefCell;

use cform_core::event::{Event, KeyCode, KeyEvent, MouseEvent};
use cform_core::geometry::{Rect, Sides};
use cform_render::cell::Cell;
use cform_render::frame::Frame;
use cform_runtime::{Cmd, Model};
use cform_widgets::{
    Block, BorderType, Button, Modal, TextArea, TextInput, ValidationErrorDisplay, Widget,
    truncate_with_ellipsis, wrap_lines,
};
use tracing::{debug, info};

use crate::form::{Field, FormController};
use crate::theme;

/// Rows of the message area.
pub const MESSAGE_ROWS: u16 = 3;

/// Rows used by the form content: three single-line fields (label, input,
/// error), the message label and area, a spacer, and the button.
const CONTENT_HEIGHT: u16 = 3 * 3 + 1 + MESSAGE_ROWS + 1 + 1;

/// Border plus one cell of padding on every side of the panel.
const PANEL_INSET: u16 = 2;

/// Terminals narrower than this get the wide (90%) panel.
const NARROW_BREAKPOINT: u16 = 100;

const SUMMARY_WIDTH: u16 = 56;

/// Characters a numeric input admits while typing.
pub fn phone_key_filter(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')
}

/// Uppercase the first character of every word. Keeps the char count so the
/// cursor stays aligned with the stored value.
pub fn capitalize_words(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut word_start = true;
    for c in value.chars() {
        if word_start {
            out.push(c.to_uppercase().next().unwrap_or(c));
        } else {
            out.push(c);
        }
        word_start = c.is_whitespace();
    }
    out
}

/// Messages handled by [`ContactFormApp`].
#[derive(Debug, Clone)]
pub enum Msg {
    Input(Event),
    Submit,
    Quit,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        if let Event::Key(key) = &event
            && key.is_press()
            && key.ctrl()
        {
            if key.is_char('c') || key.is_char('q') {
                return Msg::Quit;
            }
            if key.is_char('s') {
                return Msg::Submit;
            }
        }
        Msg::Input(event)
    }
}

/// The control holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Submit,
}

impl Focus {
    const RING: [Focus; 5] = [
        Focus::Field(Field::Name),
        Focus::Field(Field::Email),
        Focus::Field(Field::PhoneNumber),
        Focus::Field(Field::Message),
        Focus::Submit,
    ];

    fn index(self) -> usize {
        Self::RING.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::RING[(self.index() + 1) % Self::RING.len()]
    }

    pub fn prev(self) -> Self {
        Self::RING[(self.index() + Self::RING.len() - 1) % Self::RING.len()]
    }
}

/// Where each control lands for a given terminal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    pub panel: Rect,
    pub labels: [Rect; 4],
    pub inputs: [Rect; 4],
    pub errors: [Rect; 4],
    pub submit: Rect,
}

impl FormLayout {
    pub fn compute(area: Rect) -> Self {
        let percent: u32 = if area.width < NARROW_BREAKPOINT { 90 } else { 40 };
        let panel_width = (u32::from(area.width) * percent / 100) as u16;
        let panel = area.centered(panel_width, CONTENT_HEIGHT + 2 * PANEL_INSET);
        let inner = panel.inner(Sides::all(PANEL_INSET));

        let band = |dy: u16, height: u16| {
            Rect::new(inner.x, inner.y.saturating_add(dy), inner.width, height).intersection(&inner)
        };

        let mut labels = [Rect::default(); 4];
        let mut inputs = [Rect::default(); 4];
        let mut errors = [Rect::default(); 4];
        for (i, field) in Field::ALL.iter().enumerate() {
            let top = i as u16 * 3;
            let input_rows = if *field == Field::Message { MESSAGE_ROWS } else { 1 };
            labels[i] = band(top, 1);
            inputs[i] = band(top + 1, input_rows);
            errors[i] = band(top + 1 + input_rows, 1);
        }

        Self {
            panel,
            labels,
            inputs,
            errors,
            submit: band(CONTENT_HEIGHT - 1, 1),
        }
    }

    fn index(field: Field) -> usize {
        Field::ALL.iter().position(|f| *f == field).unwrap_or(0)
    }

    pub fn label(&self, field: Field) -> Rect {
        self.labels[Self::index(field)]
    }

    pub fn input(&self, field: Field) -> Rect {
        self.inputs[Self::index(field)]
    }

    pub fn error(&self, field: Field) -> Rect {
        self.errors[Self::index(field)]
    }
}

/// Click targets recorded by the last `view`.
#[derive(Debug, Clone, Copy, Default)]
struct HitMap {
    fields: [Rect; 4],
    submit: Rect,
    close_button: Rect,
    close_glyph: Rect,
}

/// The contact form application model.
pub struct ContactFormApp {
    form: FormController,
    name: TextInput,
    email: TextInput,
    phone: TextInput,
    message: TextArea,
    focus: Focus,
    hits: RefCell<HitMap>,
}

impl Default for ContactFormApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactFormApp {
    pub fn new() -> Self {
        let single = |field: Field| {
            TextInput::new()
                .with_placeholder(field.placeholder())
                .with_placeholder_style(theme::placeholder())
        };
        let mut app = Self {
            form: FormController::new(),
            name: single(Field::Name).with_display(capitalize_words),
            email: single(Field::Email),
            phone: single(Field::PhoneNumber).with_filter(phone_key_filter),
            message: TextArea::new()
                .with_placeholder(Field::Message.placeholder())
                .with_placeholder_style(theme::placeholder()),
            focus: Focus::Field(Field::Name),
            hits: RefCell::new(HitMap::default()),
        };
        app.sync_focus();
        app
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Text currently held by the input for `field`.
    pub fn input_value(&self, field: Field) -> String {
        match field {
            Field::Name => self.name.value().to_string(),
            Field::Email => self.email.value().to_string(),
            Field::PhoneNumber => self.phone.value().to_string(),
            Field::Message => self.message.text(),
        }
    }

    fn sync_focus(&mut self) {
        let focused = |field| self.focus == Focus::Field(field);
        let (name, email, phone, message) = (
            focused(Field::Name),
            focused(Field::Email),
            focused(Field::PhoneNumber),
            focused(Field::Message),
        );
        self.name.set_focused(name);
        self.name.set_style(theme::input(name));
        self.email.set_focused(email);
        self.email.set_style(theme::input(email));
        self.phone.set_focused(phone);
        self.phone.set_style(theme::input(phone));
        self.message.set_focused(message);
        self.message.set_style(theme::input(message));
    }

    /// Move focus, validating the field being left.
    fn set_focus(&mut self, target: Focus) {
        if target == self.focus {
            return;
        }
        if let Focus::Field(field) = self.focus {
            let value = self.input_value(field);
            self.form.blur(field, &value);
        }
        debug!(from = ?self.focus, to = ?target, "focus moved");
        self.focus = target;
        self.sync_focus();
    }

    fn submit(&mut self) {
        if self.form.submit() {
            info!("form accepted");
        }
    }

    /// Route an editing event to the input for `field` and record the new value.
    fn edit(&mut self, field: Field, event: &Event) {
        let consumed = match field {
            Field::Name => self.name.handle_event(event),
            Field::Email => self.email.handle_event(event),
            Field::PhoneNumber => self.phone.handle_event(event),
            Field::Message => self.message.handle_event(event),
        };
        if consumed {
            let value = self.input_value(field);
            self.form.change(field, value);
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.is_press() => {
                if self.form.modal_open() {
                    self.handle_summary_key(key);
                } else {
                    self.handle_form_key(key);
                }
            }
            Event::Mouse(mouse) if mouse.is_left_click() => self.handle_click(mouse),
            Event::Paste(_) if !self.form.modal_open() => {
                if let Focus::Field(field) = self.focus {
                    self.edit(field, &event);
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let in_message = self.focus == Focus::Field(Field::Message);
        match key.code {
            KeyCode::Tab => self.set_focus(self.focus.next()),
            KeyCode::BackTab => self.set_focus(self.focus.prev()),
            KeyCode::Up | KeyCode::Down if in_message => {
                if !self.message.handle_event(&Event::Key(key)) {
                    let target = if key.code == KeyCode::Up {
                        self.focus.prev()
                    } else {
                        self.focus.next()
                    };
                    self.set_focus(target);
                }
            }
            KeyCode::Down => self.set_focus(self.focus.next()),
            KeyCode::Up => self.set_focus(self.focus.prev()),
            KeyCode::Enter if in_message => self.edit(Field::Message, &Event::Key(key)),
            KeyCode::Enter => self.submit(),
            KeyCode::Char(' ') if self.focus == Focus::Submit => self.submit(),
            _ => {
                if let Focus::Field(field) = self.focus {
                    self.edit(field, &Event::Key(key));
                }
            }
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Escape | KeyCode::Enter | KeyCode::Char(' ')) {
            self.form.close_summary();
        }
    }

    fn handle_click(&mut self, mouse: MouseEvent) {
        let (x, y) = mouse.position();
        let hits = *self.hits.borrow();

        if self.form.modal_open() {
            if hits.close_button.contains(x, y) || hits.close_glyph.contains(x, y) {
                self.form.close_summary();
            }
            return;
        }

        if let Some(i) = hits.fields.iter().position(|r| r.contains(x, y)) {
            self.set_focus(Focus::Field(Field::ALL[i]));
        } else if hits.submit.contains(x, y) {
            self.set_focus(Focus::Submit);
            self.submit();
        } else if let Focus::Field(field) = self.focus {
            // A click on empty space blurs the field but keeps focus on it.
            let value = self.input_value(field);
            self.form.blur(field, &value);
        }
    }

    fn render_form(&self, layout: &FormLayout, frame: &mut Frame, hits: &mut HitMap) {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme::panel_border())
            .style(theme::panel())
            .render(layout.panel, frame);

        for (i, field) in Field::ALL.into_iter().enumerate() {
            let focused = self.focus == Focus::Field(field);
            let label = layout.labels[i];
            frame.buffer.set_string(
                label.x,
                label.y,
                field.label(),
                theme::label(focused),
                label.right(),
            );

            let input = layout.inputs[i];
            match field {
                Field::Name => self.name.render(input, frame),
                Field::Email => self.email.render(input, frame),
                Field::PhoneNumber => self.phone.render(input, frame),
                Field::Message => self.message.render(input, frame),
            }

            if let Some(message) = self.form.errors().get(field) {
                ValidationErrorDisplay::new(message)
                    .with_style(theme::error())
                    .with_icon_style(theme::error())
                    .render(layout.errors[i], frame);
            }

            hits.fields[i] = if label.is_empty() {
                input
            } else {
                Rect::new(
                    label.x,
                    label.y,
                    label.width,
                    input.bottom().saturating_sub(label.y),
                )
            };
        }

        let label = "Submit";
        let pad = layout.submit.width.saturating_sub(label.len() as u16) / 2;
        let button = Button::new(label)
            .with_style(theme::button())
            .with_focused_style(theme::button_focused())
            .with_focused(self.focus == Focus::Submit)
            .with_padding(pad);
        button.render(layout.submit, frame);
        hits.submit = button.hit_rect(layout.submit);
    }

    fn render_summary(&self, area: Rect, frame: &mut Frame, hits: &mut HitMap) {
        let width = SUMMARY_WIDTH.min(area.width.saturating_sub(2));
        let text_width = width.saturating_sub(4) as usize;

        let values = self.form.values();
        let mut lines: Vec<(Option<&'static str>, String)> = Vec::new();
        for field in Field::ALL {
            let label = field.summary_label();
            let text = format!("{label} {}", values.get(field));
            for (n, line) in wrap_lines(&text, text_width).into_iter().enumerate() {
                lines.push(((n == 0).then_some(label), line));
            }
        }

        // Blank row, the lines, blank row, button, plus the border.
        let height = (lines.len() as u16).saturating_add(5);
        let modal = Modal::new("Form Data", width, height)
            .style(theme::modal())
            .border_style(theme::panel_border())
            .title_style(theme::modal_title());
        modal.render(area, frame);
        let layout = modal.layout(area);
        let inner = layout.inner;
        if inner.height < 2 {
            hits.close_glyph = layout.close;
            return;
        }

        // Rows between the leading blank row and the blank row above the button.
        let button_y = inner.bottom() - 1;
        let visible = (button_y.saturating_sub(inner.y + 2) as usize).min(lines.len());
        let cut = visible < lines.len();
        for (i, (label, line)) in lines.iter().take(visible).enumerate() {
            let y = inner.y + 1 + i as u16;
            let text = if cut && i + 1 == visible {
                truncate_with_ellipsis(&format!("{line}…"), inner.width as usize)
            } else {
                line.clone()
            };
            let end = frame
                .buffer
                .set_string(inner.x, y, &text, theme::modal(), inner.right());
            if let Some(label) = label {
                frame
                    .buffer
                    .set_string(inner.x, y, label, theme::summary_label(), end);
            }
        }

        let close = "Close";
        let pad = inner.width.saturating_sub(close.len() as u16) / 2;
        let button = Button::new(close)
            .with_style(theme::button())
            .with_padding(pad);
        let row = Rect::new(inner.x, button_y, inner.width, 1);
        button.render(row, frame);

        hits.close_button = button.hit_rect(row);
        hits.close_glyph = layout.close;
    }
}

impl Model for ContactFormApp {
    type Message = Msg;

    fn init(&mut self) -> Cmd {
        info!("contact form ready");
        Cmd::none()
    }

    fn update(&mut self, msg: Msg) -> Cmd {
        match msg {
            Msg::Quit => {
                info!("quit requested");
                return Cmd::quit();
            }
            Msg::Submit if !self.form.modal_open() => self.submit(),
            Msg::Submit => {}
            Msg::Input(event) => self.handle_event(event),
        }
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.is_empty() {
            return;
        }

        let mut backdrop = Cell::from_char(' ');
        theme::backdrop().apply_to(&mut backdrop);
        frame.buffer.fill(area, backdrop);

        let mut hits = HitMap::default();
        let layout = FormLayout::compute(area);
        self.render_form(&layout, frame, &mut hits);

        if self.form.modal_open() {
            self.render_summary(area, frame, &mut hits);
            frame.set_cursor(None);
        }

        *self.hits.borrow_mut() = hits;
    }
}
