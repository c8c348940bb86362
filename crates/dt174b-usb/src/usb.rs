use std::future::Future;
use std::time::Duration;

use dt174b_protocol::{LogRecord, SettingsPacket, LOG_RECORD_SIZE};
use nusb::transfer::{ControlOut, ControlType, Recipient, RequestBuffer};
use tokio::runtime::Runtime;
use tracing::{debug, info, trace, warn};

use crate::error::{DeviceError, DeviceResult};
use crate::records::LogRecords;
use crate::Datalogger;

// Silicon Labs USBXpress bridge, as shipped in the DT-174B
pub const USB_VID: u16 = 0x10c4;
pub const USB_PID: u16 = 0xea61;
pub const USB_INTERFACE: u8 = 0;

pub const ENDPOINT_OUT: u8 = 0x01;
pub const ENDPOINT_IN: u8 = 0x81;

/// USBXpress vendor request controlling the bridge.
pub const USBXPRESS_REQUEST: u8 = 0x02;
/// Flush both FIFOs of the bridge.
pub const USBXPRESS_FLUSH: u16 = 0x0001;
/// Enable the bridge after a flush.
pub const USBXPRESS_ENABLE: u16 = 0x0002;

/// Request byte that starts a memory dump.
pub const CMD_READ_LOG: u8 = 0x00;

pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Where to find the datalogger and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    pub interface: u8,
    /// Per-transfer timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            vendor_id: USB_VID,
            product_id: USB_PID,
            interface: USB_INTERFACE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl DeviceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// A DT-174B attached over USB.
///
/// nusb transfers are futures; they are driven to completion on a private
/// current-thread runtime so that every call here blocks.
pub struct UsbDatalogger {
    interface: nusb::Interface,
    runtime: Runtime,
    timeout: Duration,
}

impl UsbDatalogger {
    /// Open the first matching device and claim its interface.
    pub fn open(config: &DeviceConfig) -> DeviceResult<Self> {
        let connected_devices = nusb::list_devices()
            .map_err(|e| DeviceError::usb("listing devices", e))?
            .filter(|di| di.vendor_id() == config.vendor_id && di.product_id() == config.product_id)
            .collect::<Vec<_>>();

        let Some(first) = connected_devices.first() else {
            return Err(DeviceError::NotFound {
                vendor_id: config.vendor_id,
                product_id: config.product_id,
            });
        };

        if connected_devices.len() > 1 {
            warn!(
                count = connected_devices.len(),
                "more than one DT-174B detected, using the first one"
            );
        }

        debug!(
            serial = first.serial_number().unwrap_or("-"),
            "opening datalogger"
        );
        let device = first
            .open()
            .map_err(|e| DeviceError::usb("opening the device", e))?;
        let interface = device
            .claim_interface(config.interface)
            .map_err(|e| DeviceError::usb("claiming the interface", e))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(DeviceError::Runtime)?;

        info!(
            "datalogger {:04x}:{:04x} opened",
            config.vendor_id, config.product_id
        );

        Ok(UsbDatalogger {
            interface,
            runtime,
            timeout: config.timeout(),
        })
    }

    /// Run a transfer to completion, giving up after the configured timeout.
    fn block_on<F: Future>(&self, transfer: F) -> DeviceResult<F::Output> {
        let timeout = self.timeout;
        self.runtime
            .block_on(async move { tokio::time::timeout(timeout, transfer).await })
            .map_err(|_| DeviceError::Timeout)
    }

    fn bridge_control(&self, value: u16, context: &'static str) -> DeviceResult<()> {
        let control = ControlOut {
            control_type: ControlType::Vendor,
            recipient: Recipient::Device,
            request: USBXPRESS_REQUEST,
            value,
            index: 0,
            data: &[],
        };
        self.block_on(self.interface.control_out(control))?
            .into_result()
            .map_err(|e| DeviceError::Transfer(context, e))?;
        Ok(())
    }

    fn write(&self, data: Vec<u8>, context: &'static str) -> DeviceResult<()> {
        let expected = data.len();
        let response = self
            .block_on(self.interface.bulk_out(ENDPOINT_OUT, data))?
            .into_result()
            .map_err(|e| DeviceError::Transfer(context, e))?;

        let actual = response.actual_length();
        if actual != expected {
            return Err(DeviceError::ShortWrite { expected, actual });
        }
        Ok(())
    }

    /// Read one record. A timeout or a short transfer means the memory is
    /// exhausted.
    fn read_record(&self) -> DeviceResult<Option<LogRecord>> {
        let request = RequestBuffer::new(LOG_RECORD_SIZE);
        let completion =
            match end_on_timeout(self.block_on(self.interface.bulk_in(ENDPOINT_IN, request)))? {
                Some(completion) => completion,
                None => return Ok(None),
            };

        let data = completion
            .into_result()
            .map_err(|e| DeviceError::Transfer("reading the log", e))?;

        Ok(record_from_transfer(data))
    }
}

/// Treat a transfer timeout as the end of the log.
fn end_on_timeout<T>(result: DeviceResult<T>) -> DeviceResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(DeviceError::Timeout) => {
            debug!("no more log data");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Turn a completed bulk-in buffer into a record. Anything shorter than a
/// full record ends the log.
fn record_from_transfer(data: Vec<u8>) -> Option<LogRecord> {
    if data.len() < LOG_RECORD_SIZE {
        if !data.is_empty() {
            warn!(len = data.len(), "discarding truncated log record");
        }
        return None;
    }

    trace!(len = data.len(), "log record read");
    Some(LogRecord::from(data))
}

impl Datalogger for UsbDatalogger {
    fn reset(&mut self) -> DeviceResult<()> {
        debug!("resetting datalogger");
        self.bridge_control(USBXPRESS_FLUSH, "flushing the bridge")?;
        self.bridge_control(USBXPRESS_ENABLE, "enabling the bridge")
    }

    fn send_settings(&mut self, packet: &SettingsPacket) -> DeviceResult<()> {
        debug!(packet = %packet, "sending settings");
        self.write(packet.to_vec(), "sending settings")
    }

    fn read_log(&mut self) -> DeviceResult<LogRecords<'_>> {
        debug!("requesting log download");
        self.write(vec![CMD_READ_LOG], "requesting the log")?;
        let this = &*self;
        Ok(LogRecords::from_fn(move || this.read_record()))
    }
}
