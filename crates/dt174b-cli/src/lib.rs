//! Command line tool for the CEM DT-174B weather datalogger.
//!
//! Two commands are offered:
//!
//! - `set` encodes settings from the flags and the current local time,
//!   resets the device and sends them.
//! - `download` resets the device and prints its log, one hex line per record.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use cli::{Cli, Command};
pub use config::{Config, LoggingConfig, SettingsProfile};
pub use error::{CliError, CliResult, ConfigError};

use std::error::Error as _;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use dt174b_usb::UsbDatalogger;

const ACCESS_DENIED_HINT: &str =
    "Perhaps you need to get added to the user group \"datalogger\", or you need root privileges.";

/// Parse arguments, run the command against the attached device and report.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(err) => return report(&err, &mut io::stderr().lock()),
    };
    logging::init(cli.verbose, &config.logging);

    let now = chrono::Local::now().naive_local();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.run(&config, now, &mut out, UsbDatalogger::open) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err, &mut io::stderr().lock()),
    }
}

/// Describe a failed command on `out` and pick the exit code.
fn report(err: &CliError, out: &mut dyn Write) -> ExitCode {
    // Nothing sensible to do if stderr itself is gone.
    let _ = write_report(err, out);
    ExitCode::from(err.exit_code())
}

fn write_report(err: &CliError, out: &mut dyn Write) -> io::Result<()> {
    if err.is_access_denied() {
        writeln!(out)?;
        writeln!(out, "{err}")?;
        writeln!(out, "{ACCESS_DENIED_HINT}")?;
        writeln!(out)?;
    } else {
        writeln!(out, "error: {err}")?;
    }

    let mut source = err.source();
    while let Some(cause) = source {
        writeln!(out, "  caused by: {cause}")?;
        source = cause.source();
    }
    out.flush()
}
