//! Report transmission layer for USB HID data-acquisition devices
//!
//! This crate prepares, validates, dispatches, and reports the outcome of
//! output and feature reports sent to DAQ modules that speak USB HID
//! (Measurement Computing USB-120x family and similar). One send is one
//! blocking call:
//!
//! ```text
//! validate → device lookup → frame → [echo | vendor | generic write] → normalize
//! ```
//!
//! Two failure channels, deliberately kept apart:
//!
//! - structural problems (oversize/empty report, bad type, bad device
//!   index) error the call with a [`PreflightError`] before any device
//!   access;
//! - transport problems come back as an ordinary [`TransmissionResult`]
//!   with a nonzero `code`.

pub mod clock;
pub mod device_registry;
pub mod echo;
pub mod error;
pub mod report;
pub mod result;
pub mod vendor;

mod hid_generic;

pub use clock::{Clock, MonotonicClock, ScanStartStamp};
pub use device_registry::{
    DeviceInfo, DeviceRegistry, RegisteredDevice, KNOWN_VENDOR_IDS, VENDOR_LABJACK, VENDOR_MCC,
};
pub use echo::EchoSink;
pub use error::PreflightError;
pub use hid_generic::GenericHidTransport;
pub use report::{
    frame, stamp_report_id, validate, FramedReport, Framing, ReportType, MAX_REPORT_SIZE,
    SCAN_START_REPORT_ID,
};
pub use result::{normalize, RawStatus, TransmissionResult};
pub use vendor::{VendorSetReport, VendorTimedTransport, SET_REPORT_TIMEOUT};

use tracing::debug;

/// One opened transmission path to a device.
///
/// The implementation is chosen when the device is opened and registered
/// ([`GenericHidTransport`] for hidapi devices, [`VendorTimedTransport`]
/// where platform glue provides a timed set-report interface) — the send
/// path itself never branches on the platform.
pub trait ReportTransport: Send + Sync {
    /// How this transport frames the report id
    fn framing(&self) -> Framing;

    /// Perform exactly one native transmission. No retries at this layer.
    fn transmit(&self, report_type: ReportType, report_id: u8, report: &[u8]) -> RawStatus;

    /// Resolve a failure code against this device's context
    fn describe_error(&self, code: i64) -> (String, String);
}

/// Sends reports to registered devices.
///
/// Owns the registry, the echo sink, and the scan-start stamp shared with
/// the acquisition subsystem.
pub struct ReportSender {
    registry: DeviceRegistry,
    clock: Box<dyn Clock>,
    scan_start: ScanStartStamp,
    echo: EchoSink,
}

impl ReportSender {
    pub fn new(registry: DeviceRegistry) -> Self {
        Self {
            registry,
            clock: Box::new(MonotonicClock::new()),
            scan_start: ScanStartStamp::new(),
            echo: EchoSink::stderr(),
        }
    }

    /// Replace the seconds source (tests inject a fixed clock)
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the echo sink (tests capture the trace)
    pub fn with_echo_sink(mut self, echo: EchoSink) -> Self {
        self.echo = echo;
        self
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Handle onto the scan-start stamp for the acquisition side
    pub fn scan_start(&self) -> &ScanStartStamp {
        &self.scan_start
    }

    /// Send one report to the device at `device_index`.
    ///
    /// `report_type` is the raw wire value (0 = echo, 2 = output,
    /// 3 = feature); `report_id` 0 means no id framing, nonzero ids are
    /// stamped over the first byte of the framed copy. The caller's
    /// buffer is never modified.
    ///
    /// Sending report id 0x11 on a non-echo path marks
    /// [`scan_start`](Self::scan_start) with the current time whether or
    /// not the transmission succeeded.
    ///
    /// # Errors
    ///
    /// [`PreflightError`] for structural problems, before any device
    /// access. Transport failures are not errors; inspect
    /// [`TransmissionResult::code`].
    pub fn send_report(
        &self,
        device_index: usize,
        report_type: i32,
        report_id: u8,
        payload: &[u8],
    ) -> Result<TransmissionResult, PreflightError> {
        let report_type = report::validate(report_type, payload)?;
        let device = self.registry.get(device_index)?;
        let transport = device.transport();

        let framed = report::frame(report_type, report_id, payload, transport.framing());

        if report_type == ReportType::Echo {
            // Diagnostic echo: trace and succeed without device I/O
            self.echo.trace(report_type, report_id, framed.as_bytes());
            return Ok(TransmissionResult::success());
        }

        debug!(
            "Dispatching {:?} report id 0x{:02X} ({} bytes) to device {}",
            report_type,
            report_id,
            framed.len(),
            device_index
        );

        let raw = transport.transmit(report_type, report_id, framed.as_bytes());

        // Arm the acquisition clock on the scan-start sentinel, success
        // or failure alike
        if report_id == SCAN_START_REPORT_ID {
            self.scan_start.mark(self.clock.now_seconds());
        }

        Ok(result::normalize(raw, |code| transport.describe_error(code)))
    }
}
