//! Per-call delivery summary and engine state snapshots.

use std::fmt;

use ses_clock::VectorClock;

/// Summary of one `deliver` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// The incoming message passed the delivery condition on arrival.
    pub delivered: bool,
    /// The incoming message was added to the pending buffer.
    pub buffered: bool,
    /// Previously buffered messages released by the drain.
    pub released_from_buffer: usize,
    /// Messages still buffered after the drain.
    pub pending: usize,
}

impl DeliveryReport {
    /// Total messages handed to the application by this call.
    ///
    /// A message buffered on arrival and released by the same call's drain
    /// is counted once, under `released_from_buffer`.
    pub fn delivered_count(&self) -> usize {
        usize::from(self.delivered) + self.released_from_buffer
    }
}

/// Point-in-time copy of an engine's state, taken under its lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub matrix: VectorClock,
    /// Sender ids of buffered messages, in arrival order.
    pub pending_senders: Vec<usize>,
}

impl EngineSnapshot {
    pub fn pending(&self) -> usize {
        self.pending_senders.len()
    }
}

impl fmt::Display for EngineSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\npending: {:?}", self.matrix, self.pending_senders)
    }
}
