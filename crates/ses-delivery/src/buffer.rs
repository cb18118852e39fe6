//! PendingBuffer: messages waiting for their causal predecessors.
//!
//! A message from a sender whose matrix says "the receiver has seen `tM`"
//! can only be delivered once the receiver's own clock `tP` satisfies
//! `tM <= tP`. Until then it sits here.
//!
//! Delivering one message advances `tP`, which may unblock entries anywhere
//! in the buffer, including ones already passed over. The engine therefore
//! drains with [`PendingBuffer::take_deliverable`] in a loop, re-reading the
//! live `tP` each time, until it returns `None`.

use tracing::debug;

use ses_clock::{LogicClock, VectorClock};

/// One buffered message: the sender's matrix snapshot and the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    pub sender: VectorClock,
    pub payload: Vec<u8>,
}

impl PendingMessage {
    pub fn new(sender: VectorClock, payload: Vec<u8>) -> Self {
        Self { sender, payload }
    }

    pub fn sender_id(&self) -> usize {
        self.sender.instance_id()
    }

    /// What the sender believed about `receiver`'s clock at send time.
    pub fn t_m(&self, receiver: usize) -> Option<&LogicClock> {
        self.sender.clock(receiver)
    }

    /// The delivery condition `tM <= tP`, evaluated against `local`'s
    /// current own clock.
    pub fn is_deliverable(&self, local: &VectorClock) -> bool {
        self.t_m(local.instance_id())
            .is_some_and(|t_m| t_m.less_than_or_equal(local.own_clock()))
    }
}

/// Unbounded buffer of undeliverable messages, kept in arrival order.
#[derive(Debug, Default)]
pub struct PendingBuffer {
    entries: Vec<PendingMessage>,
}

impl PendingBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Buffer a message that can't be delivered yet.
    pub fn push(&mut self, message: PendingMessage) {
        debug!(
            sender = message.sender_id(),
            pending = self.entries.len() + 1,
            "buffering message for causal delivery"
        );
        self.entries.push(message);
    }

    /// Remove and return the first entry (in arrival order) that is
    /// deliverable against `local`, or `None` if none is.
    pub fn take_deliverable(&mut self, local: &VectorClock) -> Option<PendingMessage> {
        let index = self
            .entries
            .iter()
            .position(|message| message.is_deliverable(local))?;
        Some(self.entries.remove(index))
    }

    /// Number of messages currently buffered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingMessage> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A matrix from process `sender` claiming receiver 0 has seen `seen`.
    fn message_from(sender: usize, seen: usize) -> PendingMessage {
        let mut remote = VectorClock::new(2, sender).unwrap();
        for _ in 0..seen {
            remote.increment();
        }
        remote.self_merge(sender, 0).unwrap();
        PendingMessage::new(remote, vec![seen as u8])
    }

    #[test]
    fn empty_buffer_yields_nothing() {
        let mut buffer = PendingBuffer::new();
        let local = VectorClock::new(2, 0).unwrap();
        assert!(buffer.take_deliverable(&local).is_none());
        assert!(buffer.is_empty());
    }

    #[test]
    fn take_returns_first_deliverable_in_arrival_order() {
        let mut buffer = PendingBuffer::new();
        buffer.push(message_from(1, 3));
        buffer.push(message_from(1, 0));
        buffer.push(message_from(1, 0));

        let local = VectorClock::new(2, 0).unwrap();
        // The first entry needs tP[1] >= 3.
        let taken = buffer.take_deliverable(&local).unwrap();
        assert_eq!(taken.payload, vec![0]);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.iter().next().unwrap().payload, vec![3]);
    }

    #[test]
    fn never_informed_sender_is_always_deliverable() {
        // The sender's slot for the receiver is still null.
        let remote = VectorClock::new(2, 1).unwrap();
        let message = PendingMessage::new(remote, Vec::new());
        let local = VectorClock::new(2, 0).unwrap();
        assert!(message.t_m(0).unwrap().is_null());
        assert!(message.is_deliverable(&local));
    }
}
