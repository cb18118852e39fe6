//! Knowledge matrix: one [`LogicClock`] per process in the cluster.
//!
//! Slot `instance_id` is this process's own vector clock. Every other slot
//! `j` is the latest clock this process knows was *sent to* process `j`,
//! learned directly or transitively, and may lag behind reality.
//!
//! # Examples
//!
//! ```
//! use ses_clock::VectorClock;
//!
//! let mut p1 = VectorClock::new(3, 1).unwrap();
//! assert!(p1.clock(0).unwrap().is_null());
//!
//! p1.increment();
//! let bytes = p1.encode(b"hello");
//! p1.self_merge(1, 0).unwrap();
//! assert_eq!(p1.clock(0).unwrap().values(), &[0, 1, 0]);
//!
//! let p0 = VectorClock::new(3, 0).unwrap();
//! let envelope = p0.decode(&bytes).unwrap();
//! assert_eq!(envelope.sender.instance_id(), 1);
//! assert_eq!(envelope.payload, b"hello");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use ses_core::constants::MAX_CLUSTER_SIZE;
use ses_core::errors::{ClockError, WireError};

use crate::clock::LogicClock;
use crate::wire::{self, Envelope};

/// A process's complete causal knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawVectorClock")]
pub struct VectorClock {
    /// This process's identity, in `0..slots.len()`.
    instance_id: usize,
    /// One clock per process, indexed by process identity.
    slots: Vec<LogicClock>,
}

impl VectorClock {
    /// Build the matrix for process `instance_id` in a cluster of `n`.
    ///
    /// The own slot starts zero-filled; every other slot starts null.
    pub fn new(n: usize, instance_id: usize) -> Result<Self, ClockError> {
        check_identity(n, instance_id)?;

        let slots = (0..n)
            .map(|slot| {
                if slot == instance_id {
                    LogicClock::zeroed(n, slot)
                } else {
                    LogicClock::null(n, slot)
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { instance_id, slots })
    }

    /// Reassemble a matrix from decoded rows. Callers guarantee
    /// `instance_id < slots.len()` and that every row has `slots.len()`
    /// components.
    pub(crate) fn from_slots(instance_id: usize, slots: Vec<LogicClock>) -> Self {
        debug_assert!(instance_id < slots.len());
        Self { instance_id, slots }
    }

    pub fn instance_id(&self) -> usize {
        self.instance_id
    }

    /// Cluster size (N).
    pub fn n_instance(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[LogicClock] {
        &self.slots
    }

    /// The clock held for `slot`, or `None` outside the cluster.
    pub fn clock(&self, slot: usize) -> Option<&LogicClock> {
        self.slots.get(slot)
    }

    /// This process's own authoritative clock.
    pub fn own_clock(&self) -> &LogicClock {
        &self.slots[self.instance_id]
    }

    /// Record a new local event.
    pub fn increment(&mut self) {
        let own = self.instance_id;
        self.slots[own].increment();
    }

    /// `slots[dest].merge_from(slots[source])`.
    ///
    /// After a send this copies the sender's own clock into the destination's
    /// slot: the destination now knows at least what the sender knew.
    pub fn self_merge(&mut self, source: usize, dest: usize) -> Result<(), ClockError> {
        let source_clock = self.slot(source)?.clone();
        self.slot_mut(dest)?.merge_from(&source_clock);
        Ok(())
    }

    /// `slots[dest].merge_from(remote.slots[source])`.
    pub fn merge_from_remote(
        &mut self,
        remote: &VectorClock,
        source: usize,
        dest: usize,
    ) -> Result<(), ClockError> {
        let source_clock = remote.slot(source)?;
        self.slot_mut(dest)?.merge_from(source_clock);
        Ok(())
    }

    /// Frame `payload` behind this matrix's wire header.
    pub fn encode(&self, payload: &[u8]) -> Vec<u8> {
        wire::encode(self, payload)
    }

    /// Decode a message sent by another member of this matrix's cluster.
    pub fn decode(&self, bytes: &[u8]) -> Result<Envelope, WireError> {
        wire::decode(bytes, self.n_instance())
    }

    fn slot(&self, slot: usize) -> Result<&LogicClock, ClockError> {
        let cluster_size = self.slots.len();
        self.slots.get(slot).ok_or(ClockError::SlotOutOfRange {
            slot,
            cluster_size,
        })
    }

    fn slot_mut(&mut self, slot: usize) -> Result<&mut LogicClock, ClockError> {
        let cluster_size = self.slots.len();
        self.slots.get_mut(slot).ok_or(ClockError::SlotOutOfRange {
            slot,
            cluster_size,
        })
    }
}

fn check_identity(n: usize, instance_id: usize) -> Result<(), ClockError> {
    if n == 0 || n > MAX_CLUSTER_SIZE {
        return Err(ClockError::InvalidClusterSize { size: n });
    }
    if instance_id >= n {
        return Err(ClockError::InvalidInstance {
            instance_id,
            cluster_size: n,
        });
    }
    Ok(())
}

/// Unchecked serde shape of [`VectorClock`]. Rows are already validated
/// individually by [`LogicClock`]'s own conversion.
#[derive(Deserialize)]
struct RawVectorClock {
    instance_id: usize,
    slots: Vec<LogicClock>,
}

impl TryFrom<RawVectorClock> for VectorClock {
    type Error = ClockError;

    fn try_from(raw: RawVectorClock) -> Result<Self, Self::Error> {
        let n = raw.slots.len();
        check_identity(n, raw.instance_id)?;
        for (slot, row) in raw.slots.iter().enumerate() {
            if row.size() != n {
                return Err(ClockError::RowLength {
                    slot,
                    expected: n,
                    actual: row.size(),
                });
            }
            if row.owner() != slot {
                return Err(ClockError::RowOwner {
                    slot,
                    owner: row.owner(),
                });
            }
        }
        Ok(Self {
            instance_id: raw.instance_id,
            slots: raw.slots,
        })
    }
}

impl fmt::Display for VectorClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.n_instance(), self.instance_id)?;
        for slot in &self.slots {
            write!(f, "\n{slot}")?;
        }
        Ok(())
    }
}
