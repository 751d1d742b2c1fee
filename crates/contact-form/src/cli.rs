#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parsed by hand. Defaults are overridden by `CONTACT_FORM_*` environment
//! variables, which are overridden by flags.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
Contact Form: name, email, phone and message with inline validation

USAGE:
    contact-form [OPTIONS]

OPTIONS:
    --no-mouse            Disable mouse capture
    --inline              Render without the alternate screen
    --log-file=PATH       Write structured logs to PATH
    --log-level=LEVEL     trace|debug|info|warn|error (default: info)
    --exit-after-ms=N     Quit automatically after N milliseconds
    --help, -h            Show this help message
    --version, -V         Show version

KEYBINDINGS:
    Tab / Shift-Tab       Next / previous control
    Up / Down             Previous / next control (lines in the message)
    Enter                 Submit (newline in the message)
    Ctrl+S                Submit from anywhere
    Esc / Enter / Space   Close the summary
    Ctrl+C / Ctrl+Q       Quit

ENVIRONMENT VARIABLES:
    CONTACT_FORM_LOG_FILE        Override --log-file
    CONTACT_FORM_LOG             Log filter directive (e.g. contact_form=debug)
    CONTACT_FORM_NO_MOUSE        Set to 1 or true to disable the mouse
    CONTACT_FORM_EXIT_AFTER_MS   Override --exit-after-ms";

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Whether mouse events are captured.
    pub mouse: bool,
    /// Render on the main screen instead of the alternate screen.
    pub inline: bool,
    /// Where logs go. No file means no logging.
    pub log_file: Option<PathBuf>,
    /// Filter directive for the log subscriber.
    pub log_filter: String,
    /// Quit after this long.
    pub exit_after: Option<Duration>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            mouse: true,
            inline: false,
            log_file: None,
            log_filter: "info".into(),
            exit_after: None,
        }
    }
}

/// What the binary should do after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Invalid command-line or environment input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    UnknownArgument(String),
    InvalidValue {
        name: &'static str,
        value: String,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownArgument(arg) => write!(f, "unknown argument: {arg}"),
            Self::InvalidValue { name, value } => write!(f, "invalid {name} value: {value}"),
        }
    }
}

impl std::error::Error for CliError {}

fn parse_millis(name: &'static str, value: &str) -> Result<Duration, CliError> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| CliError::InvalidValue {
            name,
            value: value.to_string(),
        })
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, CliError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(CliError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}

fn parse_level(value: &str) -> Result<String, CliError> {
    let level = value.to_ascii_lowercase();
    if LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(CliError::InvalidValue {
            name: "--log-level",
            value: value.to_string(),
        })
    }
}

impl Opts {
    /// Parse the process arguments and environment.
    pub fn parse() -> Result<Command, CliError> {
        Self::parse_from(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Parse `args` (without the program name) with `env` as the environment.
    pub fn parse_from<I, S, F>(args: I, env: F) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment first, flags override below.
        if let Some(val) = env("CONTACT_FORM_LOG_FILE")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }
        if let Some(val) = env("CONTACT_FORM_LOG")
            && !val.is_empty()
        {
            opts.log_filter = val;
        }
        if let Some(val) = env("CONTACT_FORM_NO_MOUSE") {
            opts.mouse = !parse_flag("CONTACT_FORM_NO_MOUSE", &val)?;
        }
        if let Some(val) = env("CONTACT_FORM_EXIT_AFTER_MS") {
            opts.exit_after = Some(parse_millis("CONTACT_FORM_EXIT_AFTER_MS", &val)?);
        }

        for arg in args {
            match arg.as_ref() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--no-mouse" => opts.mouse = false,
                "--inline" => opts.inline = true,
                other => {
                    if let Some(val) = other.strip_prefix("--log-file=") {
                        if val.is_empty() {
                            return Err(CliError::InvalidValue {
                                name: "--log-file",
                                value: String::new(),
                            });
                        }
                        opts.log_file = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--log-level=") {
                        opts.log_filter = parse_level(val)?;
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after = Some(parse_millis("--exit-after-ms", val)?);
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Command, CliError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Opts::parse_from(args.iter().copied(), |key| env.get(key).cloned())
    }

    fn run_opts(args: &[&str], env: &[(&str, &str)]) -> Opts {
        match parse(args, env) {
            Ok(Command::Run(opts)) => opts,
            other => panic!("expected run command, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = run_opts(&[], &[]);
        assert_eq!(opts, Opts::default());
        assert!(opts.mouse);
        assert!(!opts.inline);
        assert_eq!(opts.log_filter, "info");
    }

    #[test]
    fn flags_are_parsed() {
        let opts = run_opts(
            &[
                "--no-mouse",
                "--inline",
                "--log-file=/tmp/cf.log",
                "--log-level=DEBUG",
                "--exit-after-ms=250",
            ],
            &[],
        );
        assert!(!opts.mouse);
        assert!(opts.inline);
        assert_eq!(opts.log_file, Some(PathBuf::from("/tmp/cf.log")));
        assert_eq!(opts.log_filter, "debug");
        assert_eq!(opts.exit_after, Some(Duration::from_millis(250)));
    }

    #[test]
    fn env_applies_and_flags_win() {
        let env = [
            ("CONTACT_FORM_LOG_FILE", "/tmp/env.log"),
            ("CONTACT_FORM_LOG", "contact_form=trace"),
            ("CONTACT_FORM_NO_MOUSE", "1"),
            ("CONTACT_FORM_EXIT_AFTER_MS", "100"),
        ];
        let opts = run_opts(&[], &env);
        assert!(!opts.mouse);
        assert_eq!(opts.log_file, Some(PathBuf::from("/tmp/env.log")));
        assert_eq!(opts.log_filter, "contact_form=trace");
        assert_eq!(opts.exit_after, Some(Duration::from_millis(100)));

        let opts = run_opts(&["--log-file=/tmp/flag.log", "--exit-after-ms=5"], &env);
        assert_eq!(opts.log_file, Some(PathBuf::from("/tmp/flag.log")));
        assert_eq!(opts.exit_after, Some(Duration::from_millis(5)));
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["--help"], &[]), Ok(Command::Help));
        assert_eq!(parse(&["-V"], &[]), Ok(Command::Version));
        assert!(HELP_TEXT.contains("--exit-after-ms"));
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn unknown_argument_is_an_error() {
        assert_eq!(
            parse(&["--bogus"], &[]),
            Err(CliError::UnknownArgument("--bogus".into()))
        );
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(matches!(
            parse(&["--exit-after-ms=soon"], &[]),
            Err(CliError::InvalidValue { name: "--exit-after-ms", .. })
        ));
        assert!(matches!(
            parse(&["--log-level=loud"], &[]),
            Err(CliError::InvalidValue { name: "--log-level", .. })
        ));
        assert!(matches!(
            parse(&[], &[("CONTACT_FORM_NO_MOUSE", "maybe")]),
            Err(CliError::InvalidValue { name: "CONTACT_FORM_NO_MOUSE", .. })
        ));
    }

    #[test]
    fn error_messages_name_the_input() {
        let err = CliError::InvalidValue {
            name: "--exit-after-ms",
            value: "x".into(),
        };
        assert_eq!(err.to_string(), "invalid --exit-after-ms value: x");
    }
}
