use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use dt174b_protocol::{encode, SettingsInput};
use dt174b_usb::{Datalogger, DeviceConfig, DeviceResult};
use tracing::info;

use crate::config::{Config, SettingsProfile};
use crate::error::CliResult;

#[derive(Debug, Default, clap::Args)]
pub struct Args {
    /// REC LED blinking interval in seconds [default: 10]
    #[arg(long, alias = "rec_int", value_name = "SECONDS", conflicts_with = "no_rec")]
    pub rec_int: Option<u32>,

    /// Disable REC LED blinking
    #[arg(long)]
    pub no_rec: bool,

    /// ALM LED blinking interval in seconds [default: 10]
    #[arg(long, alias = "alm_int", value_name = "SECONDS", conflicts_with = "no_alm")]
    pub alm_int: Option<u32>,

    /// Disable ALM LED blinking
    #[arg(long)]
    pub no_alm: bool,

    /// Sampling interval in seconds, at most 1079 [default: 1]
    #[arg(long, alias = "smpl_int", value_name = "SECONDS")]
    pub smpl_int: Option<u32>,

    /// Whether to automatically start logging
    #[arg(long)]
    pub auto: bool,

    /// Temperature alarm thresholds in °C [default: 5.5 40.5]
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], allow_negative_numbers = true)]
    pub temp: Option<Vec<f64>>,

    /// Humidity alarm thresholds in %RH [default: 30.5 90.5]
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], allow_negative_numbers = true)]
    pub humidity: Option<Vec<f64>>,

    /// Pressure alarm thresholds in hPa [default: 700 1100]
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], allow_negative_numbers = true)]
    pub pressure: Option<Vec<f64>>,

    /// Altitude adjustment in metres [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    pub altitude: Option<f64>,

    /// How many samples to take [default: 10000]
    #[arg(long)]
    pub samples: Option<u32>,

    /// YAML settings profile applied before the flags above
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Print the encoded packet instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Layer defaults, the optional profile, then the flags.
    pub fn settings(&self, now: NaiveDateTime) -> CliResult<SettingsInput> {
        let mut input = SettingsInput::default_at(now);

        if let Some(path) = &self.profile {
            SettingsProfile::load(path)?.apply(&mut input);
        }

        if let Some(rec) = self.rec_int {
            input.rec_interval = Some(rec);
        }
        if self.no_rec {
            input.rec_interval = None;
        }
        if let Some(alm) = self.alm_int {
            input.alm_interval = Some(alm);
        }
        if self.no_alm {
            input.alm_interval = None;
        }
        if let Some(smpl) = self.smpl_int {
            input.sample_interval = smpl;
        }
        if self.auto {
            input.auto_start = true;
        }
        if let Some(&[low, high]) = self.temp.as_deref() {
            input.temp_low = low;
            input.temp_high = high;
        }
        if let Some(&[low, high]) = self.humidity.as_deref() {
            input.hum_low = low;
            input.hum_high = high;
        }
        if let Some(&[low, high]) = self.pressure.as_deref() {
            input.pressure_low = low;
            input.pressure_high = high;
        }
        if let Some(alt) = self.altitude {
            input.altitude_adjust = alt;
        }
        if let Some(samples) = self.samples {
            input.sample_count = samples;
        }

        Ok(input)
    }

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
        let settings = self.settings(now)?;
        let packet = encode(&settings)?;

        if self.dry_run {
            writeln!(out, "{packet}")?;
            return Ok(());
        }

        let mut logger = connect(&config.device)?;
        logger.reset()?;
        logger.send_settings(&packet)?;
        info!(
            samples = settings.sample_count,
            interval_s = settings.sample_interval,
            auto_start = settings.auto_start,
            "settings sent"
        );
        Ok(())
    }
}
