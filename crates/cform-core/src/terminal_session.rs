#![forbid(unsafe_code)]

//! Raw-mode ownership for the lifetime of the form.
//!
//! [`TerminalSession::open`] switches on the requested [`Modes`] and returns
//! a guard. The terminal is put back the same way whether the guard drops,
//! the process panics, or SIGINT/SIGTERM arrives: modes go off in reverse,
//! the cursor comes back, then raw mode ends.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use bitflags::bitflags;
use crossterm::{cursor, event as cte, execute, terminal};
use tracing::{debug, info};

use crate::event::Event;

bitflags! {
    /// Optional terminal modes. Raw mode is always on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modes: u8 {
        const ALT_SCREEN = 0b001;
        const MOUSE      = 0b010;
        const PASTE      = 0b100;
    }
}

const ENABLE_ORDER: [Modes; 3] = [Modes::ALT_SCREEN, Modes::MOUSE, Modes::PASTE];

/// The single modes in `modes`, in the order they are switched on.
fn each_mode(modes: Modes) -> impl DoubleEndedIterator<Item = Modes> {
    ENABLE_ORDER.into_iter().filter(move |m| modes.contains(*m))
}

fn switch(out: &mut impl Write, mode: Modes, on: bool) -> io::Result<()> {
    if mode == Modes::ALT_SCREEN {
        if on {
            execute!(out, terminal::EnterAlternateScreen)
        } else {
            execute!(out, terminal::LeaveAlternateScreen)
        }
    } else if mode == Modes::MOUSE {
        if on {
            execute!(out, cte::EnableMouseCapture)
        } else {
            execute!(out, cte::DisableMouseCapture)
        }
    } else if on {
        execute!(out, cte::EnableBracketedPaste)
    } else {
        execute!(out, cte::DisableBracketedPaste)
    }
}

/// Put the terminal back. Errors are ignored: this also runs from the
/// panic hook and the signal thread, where nothing can be reported.
fn restore(modes: Modes) {
    let mut out = io::stdout();
    for mode in each_mode(modes).rev() {
        let _ = switch(&mut out, mode, false);
    }
    let _ = execute!(out, cursor::Show);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}

/// Owns raw mode until dropped. Only one should exist at a time.
#[derive(Debug)]
pub struct TerminalSession {
    /// Modes switched on so far.
    active: Modes,
    #[cfg(unix)]
    signals: Option<SignalGuard>,
}

impl TerminalSession {
    /// Enter raw mode with `modes` switched on and the cursor hidden.
    ///
    /// # Errors
    ///
    /// Fails if the terminal refuses raw mode or any of the modes. Whatever
    /// was already switched on is restored when the partial session drops.
    pub fn open(modes: Modes) -> io::Result<Self> {
        install_panic_hook();
        #[cfg(unix)]
        let signals = Some(SignalGuard::spawn()?);

        terminal::enable_raw_mode()?;
        let mut session = Self {
            active: Modes::empty(),
            #[cfg(unix)]
            signals,
        };

        let mut out = io::stdout();
        for mode in each_mode(modes) {
            switch(&mut out, mode, true)?;
            session.active |= mode;
        }
        execute!(out, cursor::Hide)?;
        info!(?modes, "terminal session opened");
        Ok(session)
    }

    /// Modes currently switched on.
    pub fn modes(&self) -> Modes {
        self.active
    }

    /// Columns and rows.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// `Ok(true)` once input is ready, `Ok(false)` after `timeout`.
    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        cte::poll(timeout)
    }

    /// Block for the next input. `Ok(None)` for input the form ignores.
    pub fn read(&self) -> io::Result<Option<Event>> {
        Ok(Event::from_crossterm(cte::read()?))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        #[cfg(unix)]
        drop(self.signals.take());
        restore(self.active);
        info!("terminal session closed");
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore(Modes::all());
            previous(info);
        }));
    });
}

/// Restores the terminal and exits when SIGINT or SIGTERM arrives.
#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn spawn() -> io::Result<Self> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};

        let mut signals =
            signal_hook::iterator::Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                debug!(signal, "termination signal");
                restore(Modes::all());
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Opening a session would put the test runner's terminal in raw mode,
    // so only the mode bookkeeping is tested here.

    #[test]
    fn modes_switch_on_in_fixed_order() {
        let all: Vec<Modes> = each_mode(Modes::all()).collect();
        assert_eq!(all, ENABLE_ORDER);
        let some: Vec<Modes> = each_mode(Modes::PASTE | Modes::ALT_SCREEN).collect();
        assert_eq!(some, [Modes::ALT_SCREEN, Modes::PASTE]);
    }

    #[test]
    fn modes_switch_off_in_reverse() {
        let off: Vec<Modes> = each_mode(Modes::MOUSE | Modes::ALT_SCREEN).rev().collect();
        assert_eq!(off, [Modes::MOUSE, Modes::ALT_SCREEN]);
        assert_eq!(each_mode(Modes::empty()).count(), 0);
    }
}
