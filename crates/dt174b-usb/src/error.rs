//! Error types for the device session.

use std::io;

use nusb::transfer::TransferError;
use thiserror::Error;

/// Errors that can occur while talking to the datalogger.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No device with the configured IDs is connected.
    #[error("no DT-174B connected (looked for {vendor_id:04x}:{product_id:04x})")]
    NotFound {
        /// USB vendor ID searched for.
        vendor_id: u16,
        /// USB product ID searched for.
        product_id: u16,
    },

    /// The OS refused access to the device.
    #[error("access denied while {0}")]
    AccessDenied(&'static str, #[source] io::Error),

    /// Any other error from the USB stack.
    #[error("USB error while {0}")]
    Usb(&'static str, #[source] io::Error),

    /// A submitted transfer failed.
    #[error("USB transfer error while {0}")]
    Transfer(&'static str, #[source] TransferError),

    /// The device accepted fewer bytes than were sent.
    #[error("short write: device accepted {actual} of {expected} bytes")]
    ShortWrite {
        /// Bytes submitted.
        expected: usize,
        /// Bytes the device acknowledged.
        actual: usize,
    },

    /// A transfer did not complete within the configured timeout.
    #[error("timeout waiting for the device")]
    Timeout,

    /// The runtime driving USB transfers could not be created.
    #[error("failed to start the USB runtime")]
    Runtime(#[source] io::Error),
}

impl DeviceError {
    /// Classify an error from the USB stack, separating permission problems.
    pub fn usb(context: &'static str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            DeviceError::AccessDenied(context, err)
        } else {
            DeviceError::Usb(context, err)
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, DeviceError::AccessDenied(..))
    }

    /// The underlying OS error number, if there is one.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            DeviceError::AccessDenied(_, err)
            | DeviceError::Usb(_, err)
            | DeviceError::Runtime(err) => err.raw_os_error(),
            _ => None,
        }
    }
}

/// Result type alias for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;
