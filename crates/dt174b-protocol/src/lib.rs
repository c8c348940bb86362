//! CEM DT-174B Datalogger Protocol
//!
//! This crate provides the wire types for configuring a DT-174B weather
//! datalogger and for presenting the raw records it returns. It performs no
//! I/O; the USB session lives in `dt174b-usb`.
//!
//! # Settings Packet
//!
//! The device is configured with a single fixed-size packet that carries the
//! clock, the LED blink intervals, the sampling interval, the trigger source,
//! the alarm thresholds, the altitude calibration and the number of samples to
//! log. All multi-byte fields are big-endian.
//!
//! ```text
//! +-----+-----+------+-----+-------+--------+----------+-----+-----+---------+------+
//! | sec | min | hour | day | month | year16 | ff ff ff | rec | alm | smpl16  | trig |
//! +-----+-----+------+-----+-------+--------+----------+-----+-----+---------+------+
//! | temp_hi16 | temp_lo16 | hum_hi16 | hum_lo16 | pres_hi16 | pres_lo16 | 5a | alt16 | n16 |
//! +-----------+-----------+----------+----------+-----------+-----------+----+-------+-----+
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use dt174b_protocol::{encode, SettingsInput};
//!
//! let now = NaiveDate::from_ymd_opt(2013, 2, 5)
//!     .and_then(|d| d.and_hms_opt(9, 5, 24))
//!     .unwrap();
//! let packet = encode(&SettingsInput::default_at(now))?;
//! println!("{packet}");
//! ```

mod constants;
mod error;
mod record;
mod settings;

pub use constants::*;
pub use error::*;
pub use record::*;
pub use settings::*;
