//! Wire decoding errors. Each one is fatal for the offending message only.

use super::error_code::{self, SesErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("malformed message: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("malformed message: slot {slot} component {position} holds {value}")]
    InvalidComponent {
        slot: usize,
        position: usize,
        value: i32,
    },

    #[error("unknown sender {sender} for cluster of {cluster_size}")]
    UnknownSender { sender: i32, cluster_size: usize },
}

impl WireError {
    /// True for the variants that indicate a corrupt or mis-sized buffer.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Truncated { .. } | Self::InvalidComponent { .. })
    }
}

impl SesErrorCode for WireError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Truncated { .. } | Self::InvalidComponent { .. } => {
                error_code::MALFORMED_MESSAGE
            }
            Self::UnknownSender { .. } => error_code::UNKNOWN_SENDER,
        }
    }
}
