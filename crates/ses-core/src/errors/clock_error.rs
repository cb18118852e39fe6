use super::error_code::{self, SesErrorCode};
use crate::constants::MAX_CLUSTER_SIZE;

/// Knowledge matrix construction and slot addressing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    #[error("cluster size {size} outside 1..={max}", max = MAX_CLUSTER_SIZE)]
    InvalidClusterSize { size: usize },

    #[error("instance id {instance_id} outside cluster of {cluster_size}")]
    InvalidInstance {
        instance_id: usize,
        cluster_size: usize,
    },

    #[error("slot {slot} outside cluster of {cluster_size}")]
    SlotOutOfRange { slot: usize, cluster_size: usize },

    #[error("component {position} holds {value}, below the -1 sentinel")]
    InvalidComponent { position: usize, value: i32 },

    #[error("row {slot} has {actual} components, expected {expected}")]
    RowLength {
        slot: usize,
        expected: usize,
        actual: usize,
    },

    #[error("row {slot} is owned by {owner}")]
    RowOwner { slot: usize, owner: usize },
}

impl SesErrorCode for ClockError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_CLOCK
    }
}
