//! YAML configuration and settings profiles.
//!
//! ```yaml
//! device:
//!   vendor_id: 4292
//!   product_id: 60001
//!   timeout_ms: 2000
//! logging:
//!   filter: "dt174b_usb=debug"
//! ```

use std::fs;
use std::path::Path;

use dt174b_protocol::SettingsInput;
use dt174b_usb::DeviceConfig;
use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

/// Tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub device: DeviceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_yaml(path)
    }
}

/// A partial set of logger settings, layered over the factory defaults.
///
/// An absent key keeps the default; for the LED intervals an explicit
/// `null` disables blinking.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsProfile {
    #[serde(deserialize_with = "nullable")]
    pub rec_interval: Option<Option<u32>>,
    #[serde(deserialize_with = "nullable")]
    pub alm_interval: Option<Option<u32>>,
    pub sample_interval: Option<u32>,
    pub auto_start: Option<bool>,
    pub temp_low: Option<f64>,
    pub temp_high: Option<f64>,
    pub hum_low: Option<f64>,
    pub hum_high: Option<f64>,
    pub pressure_low: Option<f64>,
    pub pressure_high: Option<f64>,
    pub altitude_adjust: Option<f64>,
    pub sample_count: Option<u32>,
}

impl SettingsProfile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_yaml(path)
    }

    /// Overwrite every field of `input` this profile sets.
    pub fn apply(&self, input: &mut SettingsInput) {
        if let Some(rec) = self.rec_interval {
            input.rec_interval = rec;
        }
        if let Some(alm) = self.alm_interval {
            input.alm_interval = alm;
        }
        set(&mut input.sample_interval, self.sample_interval);
        set(&mut input.auto_start, self.auto_start);
        set(&mut input.temp_low, self.temp_low);
        set(&mut input.temp_high, self.temp_high);
        set(&mut input.hum_low, self.hum_low);
        set(&mut input.hum_high, self.hum_high);
        set(&mut input.pressure_low, self.pressure_low);
        set(&mut input.pressure_high, self.pressure_high);
        set(&mut input.altitude_adjust, self.altitude_adjust);
        set(&mut input.sample_count, self.sample_count);
    }
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Distinguish an explicit `null` (`Some(None)`) from a missing key (`None`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn read_yaml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn defaults() -> SettingsInput {
        SettingsInput::default_at(
            NaiveDate::from_ymd_opt(2013, 2, 5)
                .and_then(|d| d.and_hms_opt(9, 5, 24))
                .unwrap(),
        )
    }

    #[test]
    fn test_config_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.device, DeviceConfig::default());
        assert!(config.logging.filter.is_none());
    }

    #[test]
    fn test_config_partial_device() {
        let yaml = "device:\n  timeout_ms: 500\nlogging:\n  filter: debug\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.device.timeout_ms, 500);
        assert_eq!(config.device.vendor_id, DeviceConfig::default().vendor_id);
        assert_eq!(config.logging.filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_profile_null_disables_led() {
        let profile: SettingsProfile =
            serde_yaml::from_str("rec_interval: null\nalm_interval: 5\n").unwrap();
        assert_eq!(profile.rec_interval, Some(None));
        assert_eq!(profile.alm_interval, Some(Some(5)));

        let mut input = defaults();
        profile.apply(&mut input);
        assert_eq!(input.rec_interval, None);
        assert_eq!(input.alm_interval, Some(5));
    }

    #[test]
    fn test_profile_missing_keys_keep_defaults() {
        let profile: SettingsProfile =
            serde_yaml::from_str("temp_low: -10\nsample_count: 500\n").unwrap();
        let mut input = defaults();
        profile.apply(&mut input);

        let mut expected = defaults();
        expected.temp_low = -10.0;
        expected.sample_count = 500;
        assert_eq!(input, expected);
    }

    #[test]
    fn test_profile_rejects_unknown_keys() {
        assert!(serde_yaml::from_str::<SettingsProfile>("temperature: 3\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/dt174b.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
