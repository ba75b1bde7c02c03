//! Transmission outcome normalization
//!
//! The two native call families disagree about what their return value
//! means: vendor set-report calls return a platform status code where 0
//! is success, while the generic write/feature calls return the number of
//! bytes written and flag failure with a negative value. Everything the
//! caller sees is normalized into one [`TransmissionResult`] shape.

use serde::Serialize;

/// Raw return of a native transmission primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawStatus {
    /// Vendor path: platform status code, 0 = success
    Status(i64),
    /// Generic path: bytes written (`>= 0`) or a negative failure value
    Written(isize),
}

/// Uniform outcome of one send operation.
///
/// `code == 0` is the only success signal. Any nonzero code is a
/// transport failure, with `name` and `description` resolved against the
/// device context that produced it. Transport failures are ordinary
/// return values, never errors — see
/// [`PreflightError`](crate::PreflightError) for the calls that do error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransmissionResult {
    /// Normalized status code, 0 on success
    pub code: i64,
    /// Symbolic name of the failure, empty on success
    pub name: String,
    /// Human-readable description, empty on success
    pub description: String,
}

impl TransmissionResult {
    /// Successful transmission: code 0, empty name and description
    pub fn success() -> Self {
        Self {
            code: 0,
            name: String::new(),
            description: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Normalize a raw native return into a [`TransmissionResult`].
///
/// `lookup` resolves a failure code to its symbolic name and description
/// against the device context; it is only consulted on failure.
pub fn normalize<F>(raw: RawStatus, lookup: F) -> TransmissionResult
where
    F: FnOnce(i64) -> (String, String),
{
    let code = match raw {
        RawStatus::Status(code) => code,
        // A non-negative return is a byte count, not an error
        RawStatus::Written(n) if n >= 0 => 0,
        RawStatus::Written(n) => n as i64,
    };

    if code == 0 {
        return TransmissionResult::success();
    }

    let (name, description) = lookup(code);
    TransmissionResult {
        code,
        name,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(code: i64) -> (String, String) {
        (format!("E{code}"), "looked up".to_string())
    }

    #[test]
    fn vendor_zero_is_success() {
        let result = normalize(RawStatus::Status(0), lookup);
        assert_eq!(result, TransmissionResult::success());
    }

    #[test]
    fn vendor_code_passes_through() {
        let result = normalize(RawStatus::Status(0xE000_02D6), lookup);
        assert_eq!(result.code, 0xE000_02D6);
        assert_eq!(result.name, format!("E{}", 0xE000_02D6_i64));
        assert_eq!(result.description, "looked up");
    }

    #[test]
    fn byte_count_is_success() {
        for written in [0, 1, 65] {
            let result = normalize(RawStatus::Written(written), lookup);
            assert!(result.is_success(), "written {written} should be success");
            assert!(result.name.is_empty());
        }
    }

    #[test]
    fn negative_write_is_failure() {
        let result = normalize(RawStatus::Written(-1), lookup);
        assert_eq!(result.code, -1);
        assert_eq!(result.name, "E-1");
    }
}
