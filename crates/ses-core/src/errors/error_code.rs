//! SesErrorCode trait for reporting failures across a process boundary.

/// Stable string code per error variant.
///
/// Transports that relay a rejection back to a peer (or into logs that are
/// grepped by operators) use the code instead of the formatted message.
pub trait SesErrorCode {
    /// Returns the error code string (e.g., "MALFORMED_MESSAGE").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MALFORMED_MESSAGE: &str = "MALFORMED_MESSAGE";
pub const UNKNOWN_SENDER: &str = "UNKNOWN_SENDER";
pub const UNKNOWN_DESTINATION: &str = "UNKNOWN_DESTINATION";
pub const INVALID_CLOCK: &str = "INVALID_CLOCK";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const LOCK_POISONED: &str = "LOCK_POISONED";
