//! Device registry: index-addressed handles to opened DAQ devices
//!
//! Callers name devices by the index assigned at registration time. The
//! transport capability for a device is chosen once, when it is opened
//! and registered — per-call code never branches on the platform.

use hidapi::HidApi;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::PreflightError;
use crate::hid_generic::GenericHidTransport;
use crate::ReportTransport;

/// Measurement Computing vendor id (USB-120x family and friends)
pub const VENDOR_MCC: u16 = 0x09DB;

/// LabJack vendor id
pub const VENDOR_LABJACK: u16 = 0x0CD5;

/// Vendor ids [`DeviceRegistry::discover`] enumerates.
///
/// Device identity beyond the vendor is not checked here; any HID
/// interface from these vendors accepts output/feature reports the same
/// way.
pub const KNOWN_VENDOR_IDS: &[u16] = &[VENDOR_MCC, VENDOR_LABJACK];

/// Identity of a registered device
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// Platform device path
    pub path: String,
    /// Serial number if available
    pub serial: Option<String>,
    /// Product name if available
    pub product: Option<String>,
}

/// A device opened for report transmission
pub struct RegisteredDevice {
    /// Device identity
    pub info: DeviceInfo,
    transport: Box<dyn ReportTransport>,
}

impl RegisteredDevice {
    pub fn new(info: DeviceInfo, transport: Box<dyn ReportTransport>) -> Self {
        Self { info, transport }
    }

    /// The transmission path chosen for this device at open time
    pub fn transport(&self) -> &dyn ReportTransport {
        self.transport.as_ref()
    }
}

/// Index-addressed set of opened devices
#[derive(Default)]
pub struct DeviceRegistry {
    devices: Vec<RegisteredDevice>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerate known DAQ vendors and open a generic HID transport for
    /// each interface found.
    ///
    /// Interfaces that fail to open (typically a permissions problem on
    /// the hidraw node) are skipped with a warning rather than failing
    /// the whole scan.
    pub fn discover(api: &HidApi) -> Self {
        let mut registry = Self::new();

        for device in api.device_list() {
            if !KNOWN_VENDOR_IDS.contains(&device.vendor_id()) {
                continue;
            }

            let info = DeviceInfo {
                vid: device.vendor_id(),
                pid: device.product_id(),
                path: device.path().to_string_lossy().into_owned(),
                serial: device.serial_number().map(str::to_string),
                product: device.product_string().map(str::to_string),
            };

            match device.open_device(api) {
                Ok(handle) => {
                    debug!(
                        "Opened {:04x}:{:04x} at {}",
                        info.vid, info.pid, info.path
                    );
                    registry.register(info, Box::new(GenericHidTransport::new(handle)));
                }
                Err(e) => {
                    warn!("Skipping {}: {}", info.path, e);
                }
            }
        }

        registry
    }

    /// Register an opened device; returns the index callers use to
    /// address it
    pub fn register(&mut self, info: DeviceInfo, transport: Box<dyn ReportTransport>) -> usize {
        self.devices.push(RegisteredDevice::new(info, transport));
        self.devices.len() - 1
    }

    /// The device-by-index lookup. A bad index aborts the whole send as
    /// a pre-flight error, never as a result record.
    pub fn get(&self, index: usize) -> Result<&RegisteredDevice, PreflightError> {
        self.devices
            .get(index)
            .ok_or(PreflightError::DeviceNotFound(index))
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredDevice> {
        self.devices.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Framing, ReportType};
    use crate::result::RawStatus;

    struct NullTransport;

    impl ReportTransport for NullTransport {
        fn framing(&self) -> Framing {
            Framing::OutOfBand
        }

        fn transmit(&self, _: ReportType, _: u8, _: &[u8]) -> RawStatus {
            RawStatus::Status(0)
        }

        fn describe_error(&self, _: i64) -> (String, String) {
            (String::new(), String::new())
        }
    }

    fn info() -> DeviceInfo {
        DeviceInfo {
            vid: VENDOR_MCC,
            pid: 0x0082,
            path: "test".into(),
            serial: None,
            product: Some("USB-1208FS".into()),
        }
    }

    #[test]
    fn register_assigns_sequential_indices() {
        let mut registry = DeviceRegistry::new();
        assert_eq!(registry.register(info(), Box::new(NullTransport)), 0);
        assert_eq!(registry.register(info(), Box::new(NullTransport)), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_past_the_end_is_device_not_found() {
        let registry = DeviceRegistry::new();
        assert!(matches!(
            registry.get(3),
            Err(PreflightError::DeviceNotFound(3))
        ));
    }

    #[test]
    fn known_vendors_include_mcc() {
        assert!(KNOWN_VENDOR_IDS.contains(&VENDOR_MCC));
    }
}
