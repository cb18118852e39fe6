use super::error_code::{self, SesErrorCode};

/// Engine-level errors raised by send and deliver.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("unknown destination {destination} for cluster of {cluster_size}")]
    UnknownDestination {
        destination: usize,
        cluster_size: usize,
    },

    #[error("engine state lock poisoned: {0}")]
    LockPoisoned(String),
}

impl SesErrorCode for DeliveryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDestination { .. } => error_code::UNKNOWN_DESTINATION,
            Self::LockPoisoned(_) => error_code::LOCK_POISONED,
        }
    }
}
