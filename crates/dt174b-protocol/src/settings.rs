//! Settings packet encoding.
//!
//! [`SettingsInput`] is the logical configuration; [`encode`] turns it into the
//! 32-byte [`SettingsPacket`] the firmware expects. Range checks happen here
//! and nowhere else: threshold ordering and other cross-field relations are
//! left to the caller.

use std::fmt;

use bytes::BufMut;
use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::constants::*;
use crate::error::{EncodeError, EncodeResult};

// ============================================================================
// Input
// ============================================================================

/// Logical datalogger configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsInput {
    /// Clock value written to the device.
    pub datetime: NaiveDateTime,
    /// REC LED blink interval in seconds. `None` disables blinking.
    pub rec_interval: Option<u32>,
    /// ALM LED blink interval in seconds. `None` disables blinking.
    pub alm_interval: Option<u32>,
    /// Sampling interval in seconds.
    pub sample_interval: u32,
    /// Start logging immediately instead of waiting for the button.
    pub auto_start: bool,
    /// Low temperature alarm threshold in °C.
    pub temp_low: f64,
    /// High temperature alarm threshold in °C.
    pub temp_high: f64,
    /// Low humidity alarm threshold in %RH.
    pub hum_low: f64,
    /// High humidity alarm threshold in %RH.
    pub hum_high: f64,
    /// Low pressure alarm threshold in hPa.
    pub pressure_low: f64,
    /// High pressure alarm threshold in hPa.
    pub pressure_high: f64,
    /// Altitude calibration offset in metres.
    pub altitude_adjust: f64,
    /// Number of samples to log.
    pub sample_count: u32,
}

impl SettingsInput {
    /// Factory defaults, stamped with the given clock value.
    pub fn default_at(datetime: NaiveDateTime) -> Self {
        SettingsInput {
            datetime,
            rec_interval: Some(10),
            alm_interval: Some(10),
            sample_interval: 1,
            auto_start: false,
            temp_low: 5.5,
            temp_high: 40.5,
            hum_low: 30.5,
            hum_high: 90.5,
            pressure_low: 700.0,
            pressure_high: 1100.0,
            altitude_adjust: 0.0,
            sample_count: 10_000,
        }
    }

    /// Encode into a settings packet.
    pub fn encode(&self) -> EncodeResult<SettingsPacket> {
        encode(self)
    }
}

// ============================================================================
// Packet
// ============================================================================

/// Encoded settings, ready for transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingsPacket([u8; SETTINGS_PACKET_SIZE]);

impl SettingsPacket {
    /// Raw packet bytes.
    pub fn as_bytes(&self) -> &[u8; SETTINGS_PACKET_SIZE] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl AsRef<[u8]> for SettingsPacket {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for SettingsPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl TryFrom<&SettingsInput> for SettingsPacket {
    type Error = EncodeError;

    fn try_from(input: &SettingsInput) -> Result<Self, Self::Error> {
        encode(input)
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode settings into the device's binary layout.
///
/// Every field is converted and range-checked before the first byte is
/// written, so a failure never yields a partial packet.
pub fn encode(input: &SettingsInput) -> EncodeResult<SettingsPacket> {
    let dt = &input.datetime;
    let year = u16::try_from(dt.year()).map_err(|_| EncodeError::OutOfRange("year"))?;

    let rec_interval = led_interval("rec_interval", input.rec_interval)?;
    let alm_interval = led_interval("alm_interval", input.alm_interval)?;
    let sample_interval = sample_interval(input.sample_interval)?;
    let trigger_source = if input.auto_start {
        TRIGGER_AUTO
    } else {
        TRIGGER_MANUAL
    };

    let temp_high = temperature("temp_high", input.temp_high)?;
    let temp_low = temperature("temp_low", input.temp_low)?;
    let hum_high = humidity("hum_high", input.hum_high)?;
    let hum_low = humidity("hum_low", input.hum_low)?;
    let pressure_high = pressure("pressure_high", input.pressure_high)?;
    let pressure_low = pressure("pressure_low", input.pressure_low)?;
    let altitude = fixed_i16("altitude_adjust", input.altitude_adjust * ALTITUDE_SCALE)?;
    let sample_count =
        u16::try_from(input.sample_count).map_err(|_| EncodeError::OutOfRange("sample_count"))?;

    let mut raw = [0u8; SETTINGS_PACKET_SIZE];
    let mut buf = &mut raw[..];

    // Calendar fields come from chrono and are always within a byte.
    // Each field is checked against its offset constant as it is written.
    debug_assert_eq!(written(buf), OFFSET_SECOND);
    buf.put_u8(dt.second() as u8);
    debug_assert_eq!(written(buf), OFFSET_MINUTE);
    buf.put_u8(dt.minute() as u8);
    debug_assert_eq!(written(buf), OFFSET_HOUR);
    buf.put_u8(dt.hour() as u8);
    debug_assert_eq!(written(buf), OFFSET_DAY);
    buf.put_u8(dt.day() as u8);
    debug_assert_eq!(written(buf), OFFSET_MONTH);
    buf.put_u8(dt.month() as u8);
    debug_assert_eq!(written(buf), OFFSET_YEAR);
    buf.put_u16(year);
    debug_assert_eq!(written(buf), OFFSET_RESERVED_HEAD);
    buf.put_slice(&RESERVED_HEAD);

    debug_assert_eq!(written(buf), OFFSET_REC_INTERVAL);
    buf.put_u8(rec_interval);
    debug_assert_eq!(written(buf), OFFSET_ALM_INTERVAL);
    buf.put_u8(alm_interval);
    debug_assert_eq!(written(buf), OFFSET_SAMPLE_INTERVAL);
    buf.put_u16(sample_interval);
    debug_assert_eq!(written(buf), OFFSET_TRIGGER_SOURCE);
    buf.put_u8(trigger_source);

    debug_assert_eq!(written(buf), OFFSET_TEMP_HIGH);
    buf.put_i16(temp_high);
    debug_assert_eq!(written(buf), OFFSET_TEMP_LOW);
    buf.put_i16(temp_low);
    debug_assert_eq!(written(buf), OFFSET_HUM_HIGH);
    buf.put_u16(hum_high);
    debug_assert_eq!(written(buf), OFFSET_HUM_LOW);
    buf.put_u16(hum_low);
    debug_assert_eq!(written(buf), OFFSET_PRESSURE_HIGH);
    buf.put_i16(pressure_high);
    debug_assert_eq!(written(buf), OFFSET_PRESSURE_LOW);
    buf.put_i16(pressure_low);
    debug_assert_eq!(written(buf), OFFSET_RESERVED_MARKER);
    buf.put_u8(RESERVED_MARKER);

    debug_assert_eq!(written(buf), OFFSET_ALTITUDE);
    buf.put_i16(altitude);
    debug_assert_eq!(written(buf), OFFSET_SAMPLE_COUNT);
    buf.put_u16(sample_count);
    debug_assert_eq!(buf.remaining_mut(), 0);

    Ok(SettingsPacket(raw))
}

/// Bytes already written into the packet buffer.
fn written(buf: &[u8]) -> usize {
    SETTINGS_PACKET_SIZE - buf.len()
}

fn led_interval(field: &'static str, interval: Option<u32>) -> EncodeResult<u8> {
    match interval {
        None => Ok(LED_DISABLED),
        Some(s) if (MIN_LED_INTERVAL_S..=MAX_LED_INTERVAL_S).contains(&s) => Ok(s as u8),
        Some(_) => Err(EncodeError::OutOfRange(field)),
    }
}

fn sample_interval(seconds: u32) -> EncodeResult<u16> {
    if (MIN_SAMPLE_INTERVAL_S..=MAX_SAMPLE_INTERVAL_S).contains(&seconds) {
        Ok(seconds as u16)
    } else {
        Err(EncodeError::OutOfRange("sample_interval"))
    }
}

fn temperature(field: &'static str, celsius: f64) -> EncodeResult<i16> {
    fixed_i16(field, celsius * TEMPERATURE_SCALE)
}

fn humidity(field: &'static str, percent: f64) -> EncodeResult<u16> {
    fixed_u16(field, percent * HUMIDITY_SCALE)
}

/// Round before removing the reference so that halves round the same way on
/// both sides of 1013.2 hPa.
fn pressure(field: &'static str, hpa: f64) -> EncodeResult<i16> {
    let tenths = (hpa * PRESSURE_SCALE).round();
    fixed_i16(field, tenths - PRESSURE_REFERENCE)
}

fn fixed_i16(field: &'static str, scaled: f64) -> EncodeResult<i16> {
    let rounded = scaled.round();
    if rounded >= f64::from(i16::MIN) && rounded <= f64::from(i16::MAX) {
        Ok(rounded as i16)
    } else {
        Err(EncodeError::OutOfRange(field))
    }
}

fn fixed_u16(field: &'static str, scaled: f64) -> EncodeResult<u16> {
    let rounded = scaled.round();
    if rounded >= 0.0 && rounded <= f64::from(u16::MAX) {
        Ok(rounded as u16)
    } else {
        Err(EncodeError::OutOfRange(field))
    }
}
