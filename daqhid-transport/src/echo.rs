//! Echo sink: the diagnostic path for report type 0
//!
//! An echo send never touches a device. The assembled report is written
//! as one human-readable line to a pluggable sink (stderr by default) so
//! scripts can inspect exactly what would have gone on the wire.

use std::io::{self, Write};

use parking_lot::Mutex;
use tracing::warn;

use crate::report::ReportType;

/// Destination for echo traces
pub struct EchoSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Default for EchoSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl EchoSink {
    /// Trace to stderr (the default)
    pub fn stderr() -> Self {
        Self::new(Box::new(io::stderr()))
    }

    /// Trace into any writer; tests capture into a shared buffer
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Write one trace line for an echoed report
    pub fn trace(&self, report_type: ReportType, report_id: u8, report: &[u8]) {
        if let Err(e) = self.write_trace(report_type, report_id, report) {
            warn!("Echo sink write failed: {e}");
        }
    }

    fn write_trace(
        &self,
        report_type: ReportType,
        report_id: u8,
        report: &[u8],
    ) -> io::Result<()> {
        let mut out = self.out.lock();
        writeln!(
            out,
            ">>> echo  type {}  id 0x{:02X}  {:02X?}",
            report_type.raw(),
            report_id,
            report
        )?;
        out.flush()
    }
}
