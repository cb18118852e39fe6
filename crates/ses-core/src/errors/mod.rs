//! Error handling for SES.
//! One error enum per subsystem, `thiserror` only.

pub mod clock_error;
pub mod config_error;
pub mod delivery_error;
pub mod error_code;
pub mod wire_error;

pub use clock_error::ClockError;
pub use config_error::ConfigError;
pub use delivery_error::DeliveryError;
pub use error_code::SesErrorCode;
pub use wire_error::WireError;

/// Top-level error aggregating every subsystem error.
#[derive(Debug, thiserror::Error)]
pub enum SesError {
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SesErrorCode for SesError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Clock(e) => e.error_code(),
            Self::Wire(e) => e.error_code(),
            Self::Delivery(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type SesResult<T> = Result<T, SesError>;
