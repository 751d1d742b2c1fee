#![forbid(unsafe_code)]

//! Contact form binary entry point.

use std::process;

use cform_runtime::{Program, ProgramConfig};
use contact_form::ContactFormApp;
use contact_form::cli::{self, Command, Opts};
use contact_form::logging;
use tracing::info;

fn main() {
    let opts = match Opts::parse() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{}", cli::HELP_TEXT);
            return;
        }
        Ok(Command::Version) => {
            println!("contact-form {}", cli::VERSION);
            return;
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Run with --help for usage information.");
            process::exit(2);
        }
    };

    if let Some(path) = &opts.log_file
        && let Err(e) = logging::init_file_logging(path, &opts.log_filter)
    {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(1);
    }

    let config = ProgramConfig {
        alternate_screen: !opts.inline,
        mouse: opts.mouse,
        exit_after: opts.exit_after,
        ..ProgramConfig::default()
    };
    info!(mouse = config.mouse, inline = opts.inline, "starting contact form");

    if let Err(e) = Program::run_in_terminal(ContactFormApp::new(), config) {
        eprintln!("Runtime error: {e}");
        process::exit(1);
    }
}
