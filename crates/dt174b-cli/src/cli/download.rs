use std::io::Write;

use dt174b_usb::{Datalogger, DeviceConfig, DeviceResult};
use tracing::info;

use crate::config::Config;
use crate::error::CliResult;

#[derive(Debug, Default, clap::Args)]
pub struct Args {}

impl Args {
    /// Print every record as one line of hex.
    pub fn run<D, F>(self, config: &Config, out: &mut dyn Write, connect: F) -> CliResult<()>
    where
        D: Datalogger,
        F: FnOnce(&DeviceConfig) -> DeviceResult<D>,
    {
        let mut logger = connect(&config.device)?;
        logger.reset()?;

        let mut count = 0usize;
        for record in logger.read_log()? {
            writeln!(out, "{}", record?)?;
            count += 1;
        }
        out.flush()?;

        info!(records = count, "download finished");
        Ok(())
    }
}
