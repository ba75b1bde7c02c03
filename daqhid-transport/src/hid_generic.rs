//! Generic HID transport over hidapi
//!
//! Output reports go through `hid_write`, feature reports through
//! `hid_send_feature_report`. Both calls expect the report id in-band as
//! the first byte of the buffer, so zero-id reports are framed upstream
//! with an injected zero byte.

use hidapi::HidDevice;
use parking_lot::Mutex;
use tracing::debug;

use crate::report::{Framing, ReportType};
use crate::result::RawStatus;
use crate::ReportTransport;

/// hidapi-backed transport for output and feature reports
pub struct GenericHidTransport {
    /// hidapi handles are not thread-safe; one call at a time
    device: Mutex<HidDevice>,
}

impl GenericHidTransport {
    pub fn new(device: HidDevice) -> Self {
        Self {
            device: Mutex::new(device),
        }
    }
}

impl ReportTransport for GenericHidTransport {
    fn framing(&self) -> Framing {
        Framing::LeadingByte
    }

    fn transmit(&self, report_type: ReportType, _report_id: u8, report: &[u8]) -> RawStatus {
        let device = self.device.lock();

        let written = if report_type == ReportType::Feature {
            device.send_feature_report(report).map(|()| report.len())
        } else {
            // Output report; echo is short-circuited before any transport
            device.write(report)
        };

        match written {
            Ok(n) => RawStatus::Written(n as isize),
            Err(e) => {
                debug!("HID write failed: {e}");
                RawStatus::Written(-1)
            }
        }
    }

    fn describe_error(&self, _code: i64) -> (String, String) {
        let device = self.device.lock();
        // hid_error() keeps the last failure message per device handle
        let description = match device.check_error() {
            Ok(e) => e.to_string(),
            Err(_) => "unknown HID I/O error".to_string(),
        };
        ("HidWriteError".to_string(), description)
    }
}
