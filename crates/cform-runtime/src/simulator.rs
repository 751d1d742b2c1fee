#![forbid(unsafe_code)]

//! Headless driver for a [`Model`].
//!
//! Tests push events in and pull rendered buffers out, with no terminal and
//! no clock. Each event goes through `From<Event>` and `update` exactly as in
//! [`Program`](crate::Program); nothing renders until [`capture_frame`] is
//! called.
//!
//! [`capture_frame`]: ProgramSimulator::capture_frame

use cform_core::event::Event;
use cform_render::buffer::Buffer;
use cform_render::frame::Frame;

use crate::program::{Cmd, Model};

pub struct ProgramSimulator<M: Model> {
    model: M,
    last_frame: Option<Buffer>,
    last_cursor: Option<(u16, u16)>,
    running: bool,
}

impl<M: Model> ProgramSimulator<M> {
    /// Wrap `model`. `init` is not called until [`init`](Self::init).
    pub fn new(model: M) -> Self {
        Self {
            model,
            last_frame: None,
            last_cursor: None,
            running: true,
        }
    }

    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.apply(cmd);
    }

    /// Feed `events` in order. Events after a quit are dropped.
    pub fn inject_events(&mut self, events: &[Event]) {
        for event in events {
            if !self.running {
                break;
            }
            let cmd = self.model.update(M::Message::from(event.clone()));
            self.apply(cmd);
        }
    }

    pub fn inject_event(&mut self, event: Event) {
        self.inject_events(&[event]);
    }

    /// Draw the model into a fresh `width` x `height` frame.
    pub fn capture_frame(&mut self, width: u16, height: u16) -> &Buffer {
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        self.last_cursor = frame.cursor_position();
        self.last_frame.insert(frame.into_buffer())
    }

    /// Where the last captured frame put the cursor; `None` when hidden.
    pub fn last_cursor(&self) -> Option<(u16, u16)> {
        self.last_cursor
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// `false` once `update` has returned [`Cmd::Quit`].
    pub fn is_running(&self) -> bool {
        self.running
    }

    fn apply(&mut self, cmd: Cmd) {
        if cmd == Cmd::Quit {
            self.running = false;
        }
    }
}
