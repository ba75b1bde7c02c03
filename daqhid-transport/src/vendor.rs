//! Vendor timed set-report transport
//!
//! Some platforms expose a low-level device interface whose set-report
//! call takes the report type and id as separate arguments and honors a
//! bounded timeout. Hanging forever on a wedged device is not acceptable
//! mid-experiment, so the timeout is fixed at 50 ms.
//!
//! The primitive itself lives outside this crate: platform glue supplies
//! a [`VendorSetReport`] implementation and [`VendorTimedTransport`]
//! drives it.

use std::time::Duration;

use crate::report::{Framing, ReportType};
use crate::result::RawStatus;
use crate::ReportTransport;

/// Bounded timeout applied to every vendor set-report call
pub const SET_REPORT_TIMEOUT: Duration = Duration::from_millis(50);

/// Low-level vendor set-report primitive.
///
/// `report_type` uses the primitive's own 0-based enumeration
/// (1 = output, 2 = feature; see
/// [`ReportType::native_index`](crate::ReportType::native_index)).
/// Returns a platform status code, 0 on success.
pub trait VendorSetReport: Send + Sync {
    fn set_report(&self, report_type: u8, report_id: u8, report: &[u8], timeout: Duration)
        -> i64;
}

/// Transport dispatching through a vendor interface with timeout.
///
/// The id and type travel as native arguments, so zero-id buffers go out
/// verbatim — no leading framing byte.
pub struct VendorTimedTransport<I> {
    interface: I,
}

impl<I: VendorSetReport> VendorTimedTransport<I> {
    pub fn new(interface: I) -> Self {
        Self { interface }
    }
}

impl<I: VendorSetReport> ReportTransport for VendorTimedTransport<I> {
    fn framing(&self) -> Framing {
        Framing::OutOfBand
    }

    fn transmit(&self, report_type: ReportType, report_id: u8, report: &[u8]) -> RawStatus {
        let status = self.interface.set_report(
            report_type.native_index(),
            report_id,
            report,
            SET_REPORT_TIMEOUT,
        );
        RawStatus::Status(status)
    }

    fn describe_error(&self, code: i64) -> (String, String) {
        status::describe(code)
    }
}

/// Status codes reported by vendor set-report interfaces.
///
/// The values follow the IOKit return-code register, the convention the
/// vendor interfaces in the field actually speak.
pub mod status {
    pub const SUCCESS: i64 = 0;
    pub const GENERAL_ERROR: i64 = 0xE000_02BC;
    pub const NO_MEMORY: i64 = 0xE000_02BD;
    pub const NO_DEVICE: i64 = 0xE000_02C0;
    pub const NOT_PRIVILEGED: i64 = 0xE000_02C1;
    pub const BAD_ARGUMENT: i64 = 0xE000_02C2;
    pub const EXCLUSIVE_ACCESS: i64 = 0xE000_02C5;
    pub const UNSUPPORTED: i64 = 0xE000_02C7;
    pub const NOT_OPEN: i64 = 0xE000_02CD;
    pub const BUSY: i64 = 0xE000_02D5;
    pub const TIMEOUT: i64 = 0xE000_02D6;
    pub const NOT_RESPONDING: i64 = 0xE000_02ED;

    /// Resolve a status code to its symbolic name and description
    pub fn describe(code: i64) -> (String, String) {
        let (name, description) = match code {
            SUCCESS => ("Success", "no error"),
            GENERAL_ERROR => ("GeneralError", "general I/O error"),
            NO_MEMORY => ("NoMemory", "could not allocate memory"),
            NO_DEVICE => ("NoDevice", "no such device"),
            NOT_PRIVILEGED => ("NotPrivileged", "privilege violation"),
            BAD_ARGUMENT => ("BadArgument", "invalid argument"),
            EXCLUSIVE_ACCESS => ("ExclusiveAccess", "device already open for exclusive access"),
            UNSUPPORTED => ("Unsupported", "operation not supported on this device"),
            NOT_OPEN => ("NotOpen", "device not open"),
            BUSY => ("Busy", "device busy"),
            TIMEOUT => ("Timeout", "set-report call timed out"),
            NOT_RESPONDING => ("NotResponding", "device not responding"),
            _ => ("Unknown", "unrecognized vendor status code"),
        };
        (name.to_string(), description.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    /// Records the arguments of every set_report call
    struct RecordingInterface {
        calls: Arc<Mutex<Vec<(u8, u8, Vec<u8>, Duration)>>>,
        status: i64,
    }

    impl VendorSetReport for RecordingInterface {
        fn set_report(
            &self,
            report_type: u8,
            report_id: u8,
            report: &[u8],
            timeout: Duration,
        ) -> i64 {
            self.calls
                .lock()
                .push((report_type, report_id, report.to_vec(), timeout));
            self.status
        }
    }

    #[test]
    fn passes_native_type_index_and_fixed_timeout() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let transport = VendorTimedTransport::new(RecordingInterface {
            calls: Arc::clone(&calls),
            status: 0,
        });

        let raw = transport.transmit(ReportType::Feature, 0x14, &[0x14, 0x01]);

        assert_eq!(raw, RawStatus::Status(0));
        let calls = calls.lock();
        assert_eq!(calls.len(), 1);
        let (native_type, id, report, timeout) = &calls[0];
        assert_eq!(*native_type, 2); // feature in the 0-based enumeration
        assert_eq!(*id, 0x14);
        assert_eq!(report, &[0x14, 0x01]);
        assert_eq!(*timeout, SET_REPORT_TIMEOUT);
    }

    #[test]
    fn status_codes_pass_through_untouched() {
        let transport = VendorTimedTransport::new(RecordingInterface {
            calls: Arc::new(Mutex::new(Vec::new())),
            status: status::TIMEOUT,
        });

        let raw = transport.transmit(ReportType::Output, 0, &[0x00]);
        assert_eq!(raw, RawStatus::Status(status::TIMEOUT));
    }

    #[test]
    fn describe_knows_the_register() {
        let (name, description) = status::describe(status::TIMEOUT);
        assert_eq!(name, "Timeout");
        assert!(description.contains("timed out"));
    }

    #[test]
    fn describe_unknown_codes() {
        let (name, _) = status::describe(0x1234);
        assert_eq!(name, "Unknown");
    }
}
