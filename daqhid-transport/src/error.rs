//! Pre-flight error types

use thiserror::Error;

use crate::report::MAX_REPORT_SIZE;

/// Errors that abort a send before any device access.
///
/// These are fatal to the call: the caller never receives a
/// [`TransmissionResult`](crate::TransmissionResult) for them. Transport
/// failures, by contrast, come back as a populated result record with a
/// nonzero code. Downstream callers rely on the two channels staying
/// distinct.
#[derive(Error, Debug)]
pub enum PreflightError {
    /// Report larger than any supported device accepts
    #[error("Report of {0} bytes exceeds the maximum of {max}", max = MAX_REPORT_SIZE)]
    Oversize(usize),

    /// Zero-length report
    #[error("Refusing to send an empty report")]
    Empty,

    /// Report type outside {0, 2, 3}; input reports (1) cannot be sent
    #[error("Invalid report type {0} (0 = echo, 2 = output, 3 = feature)")]
    InvalidReportType(i32),

    /// No device registered at the given index
    #[error("No device at index {0}")]
    DeviceNotFound(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let msg = PreflightError::Oversize(200).to_string();
        assert!(msg.contains("200"));
        assert!(msg.contains(&MAX_REPORT_SIZE.to_string()));

        let msg = PreflightError::InvalidReportType(1).to_string();
        assert!(msg.contains("1"));

        let msg = PreflightError::DeviceNotFound(7).to_string();
        assert!(msg.contains("7"));
    }
}
