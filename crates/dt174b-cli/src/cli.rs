mod download;
mod set;

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use dt174b_usb::{Datalogger, DeviceConfig, DeviceResult};

use crate::config::Config;
use crate::error::CliResult;

pub use download::Args as DownloadArgs;
pub use set::Args as SetArgs;

#[derive(Debug, clap::Parser)]
#[command(version, about = "Tool for interfacing the CEM DT-174B weather datalogger.", long_about = None)]
pub struct Cli {
    /// YAML file with device and logging configuration
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn load_config(&self) -> CliResult<Config> {
        match &self.config {
            Some(path) => Ok(Config::load(path)?),
            None => Ok(Config::default()),
        }
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Set and start the logging.
    Set(set::Args),
    /// Download the log.
    Download(download::Args),
}

impl Command {
    /// Run the command.
    ///
    /// `connect` is only called once local validation has passed, so a bad
    /// setting never touches the device.
    pub fn run<D, F>(
        self,
        config: &Config,
        now: NaiveDateTime,
        out: &mut dyn Write,
        connect: F,
    ) -> CliResult<()>
    where
        D: Datalogger,
        F: FnOnce(&DeviceConfig) -> DeviceResult<D>,
    {
        match self {
            Command::Set(cmd) => cmd.run(config, now, out, connect),
            Command::Download(cmd) => cmd.run(config, out, connect),
        }
    }
}
