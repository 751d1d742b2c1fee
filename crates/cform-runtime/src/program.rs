#![forbid(unsafe_code)]

//! The update/view loop.
//!
//! A [`Model`] turns each terminal [`Event`] into its own message, folds
//! the message into its state in `update`, and draws that state in `view`.
//! [`Program`] owns the loop around it: wait for input, feed every pending
//! event through `update`, then draw once and write only the cells that
//! changed since the previous frame.
//!
//! The loop is generic over where input comes from ([`EventSource`]) and
//! where output goes (`Write`), so tests run it on a scripted source and a
//! `Vec<u8>`.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use cform_core::event::Event;
use cform_core::terminal_session::{Modes, TerminalSession};
use cform_render::buffer::Buffer;
use cform_render::diff::BufferDiff;
use cform_render::frame::Frame;
use cform_render::presenter::Presenter;
use tracing::{debug, debug_span, info, info_span};

/// Application state driven by the runtime.
pub trait Model: Sized {
    /// Built from every terminal event the program receives.
    type Message: From<Event> + Send + 'static;

    fn init(&mut self) -> Cmd {
        Cmd::none()
    }

    fn update(&mut self, msg: Self::Message) -> Cmd;

    fn view(&self, frame: &mut Frame);
}

/// What `update` asks the runtime to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cmd {
    /// Keep running.
    #[default]
    None,
    /// Stop the loop after this update.
    Quit,
}

impl Cmd {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Stable name for tracing.
    #[inline]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
        }
    }
}

/// Where the loop gets the screen size and input from.
pub trait EventSource {
    /// Columns and rows.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Wait up to `timeout` for an event. `Ok(true)` means one is ready.
    fn poll_event(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Read one event. `Ok(None)` for input with no [`Event`] form.
    fn read_event(&mut self) -> io::Result<Option<Event>>;
}

impl EventSource for TerminalSession {
    fn size(&self) -> io::Result<(u16, u16)> {
        TerminalSession::size(self)
    }

    fn poll_event(&mut self, timeout: Duration) -> io::Result<bool> {
        self.poll(timeout)
    }

    fn read_event(&mut self) -> io::Result<Option<Event>> {
        self.read()
    }
}

#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Draw on the alternate screen, leaving the shell's scrollback alone.
    pub alternate_screen: bool,
    /// Capture mouse clicks.
    pub mouse: bool,
    /// Longest single wait for input.
    pub poll_interval: Duration,
    /// Quit once this much time has passed since start.
    pub exit_after: Option<Duration>,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse: true,
            poll_interval: Duration::from_millis(100),
            exit_after: None,
        }
    }
}

impl ProgramConfig {
    /// Terminal modes for this configuration. Bracketed paste is always on.
    pub fn modes(&self) -> Modes {
        let mut modes = Modes::PASTE;
        modes.set(Modes::ALT_SCREEN, self.alternate_screen);
        modes.set(Modes::MOUSE, self.mouse);
        modes
    }
}

pub struct Program<M: Model, E: EventSource, W: Write> {
    model: M,
    events: E,
    presenter: Presenter<W>,
    config: ProgramConfig,
    /// What the screen shows now.
    current: Buffer,
    running: bool,
    dirty: bool,
    /// Set after a resize; the next render repaints everything.
    full_redraw: bool,
    frames_presented: u64,
}

impl<M: Model> Program<M, TerminalSession, io::Stdout> {
    /// Open a terminal session for `config` and run `model` until it quits.
    ///
    /// The terminal is restored on return, on error, and on panic.
    pub fn run_in_terminal(model: M, config: ProgramConfig) -> io::Result<M> {
        let session = TerminalSession::open(config.modes())?;
        let mut program = Program::new(model, session, io::stdout(), config)?;
        program.run()?;
        Ok(program.into_model())
    }
}

impl<M: Model, E: EventSource, W: Write> Program<M, E, W> {
    pub fn new(model: M, events: E, writer: W, config: ProgramConfig) -> io::Result<Self> {
        let (width, height) = events.size()?;
        Ok(Self {
            model,
            events,
            presenter: Presenter::new(writer),
            config,
            current: Buffer::new(width, height),
            running: true,
            dirty: true,
            full_redraw: true,
            frames_presented: 0,
        })
    }

    /// Loop until the model quits or `exit_after` passes.
    pub fn run(&mut self) -> io::Result<()> {
        let started = Instant::now();
        info!(
            width = self.current.width(),
            height = self.current.height(),
            "program started"
        );

        let cmd = {
            let _span = info_span!("cform.program.init").entered();
            self.model.init()
        };
        self.apply(cmd);
        self.render_frame()?;

        while self.running {
            let timeout = match self.config.exit_after {
                Some(limit) => {
                    let elapsed = started.elapsed();
                    if elapsed >= limit {
                        info!(?limit, "exit deadline reached");
                        break;
                    }
                    self.config.poll_interval.min(limit - elapsed)
                }
                None => self.config.poll_interval,
            };

            if self.events.poll_event(timeout)? {
                // Drain everything pending, then render once.
                loop {
                    if let Some(event) = self.events.read_event()? {
                        self.handle_event(event);
                    }
                    if !self.running || !self.events.poll_event(Duration::ZERO)? {
                        break;
                    }
                }
            }

            if self.running && self.dirty {
                self.render_frame()?;
            }
        }

        info!(frames = self.frames_presented, "program stopped");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Resize { width, height } = event {
            debug!(width, height, "resize");
            self.current = Buffer::new(width, height);
            self.presenter.reset();
            self.full_redraw = true;
        }

        let msg = M::Message::from(event);
        let cmd = {
            let _span = debug_span!("cform.program.update", cmd_type = tracing::field::Empty)
                .entered();
            let cmd = self.model.update(msg);
            tracing::Span::current().record("cmd_type", cmd.type_name());
            cmd
        };
        self.dirty = true;
        self.apply(cmd);
    }

    fn apply(&mut self, cmd: Cmd) {
        if cmd == Cmd::Quit {
            debug!("quit requested");
            self.running = false;
        }
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let mut frame = Frame::new(self.current.width(), self.current.height());
        {
            let _span = debug_span!("cform.program.view").entered();
            self.model.view(&mut frame);
        }

        let diff = if self.full_redraw {
            self.presenter.clear_screen()?;
            BufferDiff::full(&frame.buffer)
        } else {
            BufferDiff::compute(&self.current, &frame.buffer)
        };

        self.presenter.present(&frame.buffer, &diff)?;
        self.presenter.set_cursor(frame.cursor_position())?;

        self.current = frame.into_buffer();
        self.full_redraw = false;
        self.dirty = false;
        self.frames_presented += 1;
        Ok(())
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames written to the output so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn into_model(self) -> M {
        self.model
    }

    pub fn into_writer(self) -> io::Result<W> {
        self.presenter.into_inner()
    }
}
