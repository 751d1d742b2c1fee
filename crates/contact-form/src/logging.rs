#![forbid(unsafe_code)]

//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI while the program runs, so logs only ever
//! go to a file. Without a log file no subscriber is installed.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Build the filter from a directive such as `info` or `contact_form=debug`.
pub fn build_filter(directive: &str) -> io::Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("log filter: {e}")))
}

/// Install a global `fmt` subscriber appending to `path`.
///
/// # Errors
///
/// Fails if the file cannot be opened, the filter does not parse, or a
/// global subscriber is already set.
pub fn init_file_logging(path: &Path, directive: &str) -> io::Result<()> {
    let filter = build_filter(directive)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| io::Error::other(format!("log subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_levels_and_directives() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("contact_form=debug,cform_runtime=trace").is_ok());
    }

    #[test]
    fn rejects_malformed_directive() {
        let err = build_filter("contact_form=loudest").err();
        assert_eq!(err.map(|e| e.kind()), Some(io::ErrorKind::InvalidInput));
    }
}
