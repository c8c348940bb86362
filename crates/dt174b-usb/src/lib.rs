//! DT-174B USB Session
//!
//! This crate talks to a CEM DT-174B datalogger over USB. The device sits
//! behind a Silicon Labs USBXpress bridge: vendor control requests reset the
//! bridge, and commands and data travel over one pair of bulk endpoints.
//!
//! Everything is blocking and single-threaded. A session owns the claimed
//! interface until it is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use dt174b_usb::{Datalogger, DeviceConfig, UsbDatalogger};
//!
//! let mut logger = UsbDatalogger::open(&DeviceConfig::default())?;
//! logger.reset()?;
//! for record in logger.read_log()? {
//!     println!("{}", record?);
//! }
//! ```

mod error;
mod records;
mod usb;

pub use error::*;
pub use records::*;
pub use usb::*;

use dt174b_protocol::SettingsPacket;

/// Operations a datalogger session supports.
pub trait Datalogger {
    /// Bring the device into a known state before a command.
    fn reset(&mut self) -> DeviceResult<()>;

    /// Transmit an encoded settings packet.
    fn send_settings(&mut self, packet: &SettingsPacket) -> DeviceResult<()>;

    /// Start a download and return the records as they arrive.
    fn read_log(&mut self) -> DeviceResult<LogRecords<'_>>;
}

impl<T: Datalogger + ?Sized> Datalogger for &mut T {
    fn reset(&mut self) -> DeviceResult<()> {
        (**self).reset()
    }

    fn send_settings(&mut self, packet: &SettingsPacket) -> DeviceResult<()> {
        (**self).send_settings(packet)
    }

    fn read_log(&mut self) -> DeviceResult<LogRecords<'_>> {
        (**self).read_log()
    }
}
