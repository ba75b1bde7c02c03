//! Report assembly: validation and report-id framing
//!
//! A send starts here. The payload is validated against the size cap and
//! the report-type whitelist, then framed into an owned buffer according
//! to the id convention of the target transport. Assembly never mutates
//! the caller's buffer; callers that depend on the historical
//! stamp-in-place behavior opt in via [`stamp_report_id`].

use crate::error::PreflightError;

/// Largest report accepted for transmission, in bytes.
///
/// 64 bytes is the payload of a full-speed HID interrupt endpoint, the
/// largest any supported DAQ module uses. A zero-id report on an in-band
/// transport picks up an injected leading byte, so the largest buffer on
/// the wire is `MAX_REPORT_SIZE + 1`.
pub const MAX_REPORT_SIZE: usize = 64;

/// Report id that arms the analog-input scan clock (see [`crate::clock`])
pub const SCAN_START_REPORT_ID: u8 = 0x11;

/// Report type accepted by [`ReportSender::send_report`](crate::ReportSender::send_report)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    /// Diagnostic echo: trace the report instead of touching the device
    Echo,
    /// HID output report
    Output,
    /// HID feature report
    Feature,
}

impl ReportType {
    /// Parse the raw wire value (0 = echo, 2 = output, 3 = feature).
    ///
    /// Input reports (1) cannot be sent, so 1 is rejected along with
    /// everything outside the range.
    pub fn from_raw(raw: i32) -> Result<Self, PreflightError> {
        match raw {
            0 => Ok(Self::Echo),
            2 => Ok(Self::Output),
            3 => Ok(Self::Feature),
            other => Err(PreflightError::InvalidReportType(other)),
        }
    }

    /// The raw wire value
    pub fn raw(self) -> i32 {
        match self {
            Self::Echo => 0,
            Self::Output => 2,
            Self::Feature => 3,
        }
    }

    /// 0-based type index used by vendor set-report primitives
    /// (output = 1, feature = 2). Echo never reaches a primitive.
    pub fn native_index(self) -> u8 {
        match self {
            Self::Echo => 0,
            Self::Output => 1,
            Self::Feature => 2,
        }
    }
}

/// How a transport frames the report id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// The id travels in-band as the first byte of the buffer; zero-id
    /// reports need a zero byte injected in front (hidapi convention)
    LeadingByte,
    /// The id is a separate argument of the native call; zero-id reports
    /// go out verbatim (vendor set-report convention)
    OutOfBand,
}

/// A report framed for transmission.
///
/// Owns its bytes: framing copies, it never writes into caller memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedReport {
    bytes: Vec<u8>,
}

impl FramedReport {
    /// The exact byte sequence to hand to the transport
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Transmitted length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Validate a report before any device access.
///
/// The order is fixed and the first failing check wins: oversize, then
/// empty, then report type. All failures are terminal for the call.
pub fn validate(report_type: i32, payload: &[u8]) -> Result<ReportType, PreflightError> {
    if payload.len() > MAX_REPORT_SIZE {
        return Err(PreflightError::Oversize(payload.len()));
    }
    if payload.is_empty() {
        return Err(PreflightError::Empty);
    }
    ReportType::from_raw(report_type)
}

/// Frame a validated payload for the given transport convention.
///
/// - Nonzero id: the first byte of the copy is overwritten with the id.
///   Callers must have reserved that byte, as with the historical
///   in-place behavior; length is unchanged.
/// - Zero id on a [`Framing::LeadingByte`] transport: a zero byte is
///   injected in front and the payload shifts up by one.
/// - Zero id otherwise (out-of-band transports and echo): verbatim copy.
///
/// Assumes [`validate`] has already passed for this payload.
pub fn frame(
    report_type: ReportType,
    report_id: u8,
    payload: &[u8],
    framing: Framing,
) -> FramedReport {
    let bytes = if report_id != 0 {
        let mut bytes = payload.to_vec();
        stamp_report_id(&mut bytes, report_id);
        bytes
    } else if framing == Framing::LeadingByte && report_type != ReportType::Echo {
        let mut bytes = Vec::with_capacity(payload.len() + 1);
        bytes.push(0);
        bytes.extend_from_slice(payload);
        bytes
    } else {
        payload.to_vec()
    };

    FramedReport { bytes }
}

/// Stamp a report id over byte 0 of a caller-owned buffer.
///
/// [`frame`] never touches caller memory; callers that relied on finding
/// the id stamped into their own buffer after a send must opt in through
/// this helper before calling
/// [`send_report`](crate::ReportSender::send_report).
pub fn stamp_report_id(report: &mut [u8], report_id: u8) {
    if let Some(first) = report.first_mut() {
        *first = report_id;
    }
}
