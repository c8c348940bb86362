//! Protocol constants
//!
//! Sizes, byte offsets, sentinels and fixed-point scale factors of the
//! DT-174B settings packet.

// ============================================================================
// Packet Geometry
// ============================================================================

/// Total size of the settings packet in bytes.
pub const SETTINGS_PACKET_SIZE: usize = 32;

/// Size of one raw log record as delivered by the bulk IN endpoint.
pub const LOG_RECORD_SIZE: usize = 64;

// ============================================================================
// Field Offsets
// ============================================================================

// The encoder writes fields in order and asserts its position against these.

pub const OFFSET_SECOND: usize = 0;
pub const OFFSET_MINUTE: usize = 1;
pub const OFFSET_HOUR: usize = 2;
pub const OFFSET_DAY: usize = 3;
pub const OFFSET_MONTH: usize = 4;
pub const OFFSET_YEAR: usize = 5;
/// Three bytes of unknown purpose, always `ff`.
pub const OFFSET_RESERVED_HEAD: usize = 7;
pub const OFFSET_REC_INTERVAL: usize = 10;
pub const OFFSET_ALM_INTERVAL: usize = 11;
pub const OFFSET_SAMPLE_INTERVAL: usize = 12;
pub const OFFSET_TRIGGER_SOURCE: usize = 14;
pub const OFFSET_TEMP_HIGH: usize = 15;
pub const OFFSET_TEMP_LOW: usize = 17;
pub const OFFSET_HUM_HIGH: usize = 19;
pub const OFFSET_HUM_LOW: usize = 21;
pub const OFFSET_PRESSURE_HIGH: usize = 23;
pub const OFFSET_PRESSURE_LOW: usize = 25;
/// Single byte of unknown purpose, always [`RESERVED_MARKER`].
pub const OFFSET_RESERVED_MARKER: usize = 27;
pub const OFFSET_ALTITUDE: usize = 28;
pub const OFFSET_SAMPLE_COUNT: usize = 30;

// ============================================================================
// Fixed Values
// ============================================================================

/// Contents of the reserved bytes following the date.
pub const RESERVED_HEAD: [u8; 3] = [0xff, 0xff, 0xff];

/// Contents of the reserved byte preceding the altitude field.
pub const RESERVED_MARKER: u8 = 0x5a;

/// Sentinel written in place of an LED interval when blinking is disabled.
pub const LED_DISABLED: u8 = 0xff;

/// Trigger source: wait for the button.
pub const TRIGGER_MANUAL: u8 = 0x00;
/// Trigger source: start logging immediately.
pub const TRIGGER_AUTO: u8 = 0x01;

// ============================================================================
// Ranges and Scales
// ============================================================================

/// Shortest LED blink interval in seconds.
pub const MIN_LED_INTERVAL_S: u32 = 1;
/// Longest LED blink interval in seconds (one below the sentinel).
pub const MAX_LED_INTERVAL_S: u32 = LED_DISABLED as u32 - 1;

/// Shortest sampling interval in seconds.
pub const MIN_SAMPLE_INTERVAL_S: u32 = 1;
/// Longest sampling interval the firmware accepts (17 min 59 s).
pub const MAX_SAMPLE_INTERVAL_S: u32 = 17 * 60 + 59;

/// Temperature is sent in hundredths of a degree Celsius.
pub const TEMPERATURE_SCALE: f64 = 100.0;
/// Relative humidity is sent in tenths of a percent.
pub const HUMIDITY_SCALE: f64 = 10.0;
/// Pressure is sent in tenths of a hectopascal.
pub const PRESSURE_SCALE: f64 = 10.0;
/// Standard pressure in tenths of a hectopascal, subtracted before sending.
pub const PRESSURE_REFERENCE: f64 = 10132.0;
/// Altitude adjustment is sent in whole metres.
pub const ALTITUDE_SCALE: f64 = 1.0;
