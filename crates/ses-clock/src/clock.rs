//! Logic clock: one N-component vector owned by a single slot.
//!
//! A component value of `-1` means "unknown". A clock holding any `-1`
//! component is *null*: it stands for "no information yet about this
//! process" and adopts the first clock merged into it wholesale.
//!
//! # Examples
//!
//! ```
//! use ses_clock::LogicClock;
//!
//! let mut own = LogicClock::zeroed(3, 1).unwrap();
//! own.increment();
//! assert_eq!(own.values(), &[0, 1, 0]);
//!
//! let mut placeholder = LogicClock::null(3, 2).unwrap();
//! assert!(placeholder.is_null());
//!
//! placeholder.merge_from(&own);
//! assert_eq!(placeholder.values(), &[0, 1, 0]);
//! assert!(own.less_than_or_equal(&placeholder));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use ses_core::constants::{INT_SIZE, NULL_COMPONENT};
use ses_core::errors::{ClockError, WireError};

/// A fixed-length vector of logical timestamps, one per process.
///
/// Comparison is the componentwise partial order. Incomparable clocks answer
/// `false` to [`less_than_or_equal`](Self::less_than_or_equal) in both
/// directions; use [`concurrent_with`](Self::concurrent_with) to detect that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLogicClock")]
pub struct LogicClock {
    /// The position this clock advances on `increment`.
    owner: usize,
    /// One component per process; each is `-1` or non-negative.
    values: Vec<i32>,
}

impl LogicClock {
    /// All components 0. Used for a process's own authoritative clock.
    pub fn zeroed(size: usize, owner: usize) -> Result<Self, ClockError> {
        Self::from_values(owner, vec![0; size])
    }

    /// All components `-1`. Placeholder for "nothing known yet".
    pub fn null(size: usize, owner: usize) -> Result<Self, ClockError> {
        Self::from_values(owner, vec![NULL_COMPONENT; size])
    }

    /// Build a clock from raw components, checking `owner < values.len()`
    /// and that every component is `-1` or non-negative.
    pub fn from_values(owner: usize, values: Vec<i32>) -> Result<Self, ClockError> {
        if owner >= values.len() {
            return Err(ClockError::SlotOutOfRange {
                slot: owner,
                cluster_size: values.len(),
            });
        }
        if let Some((position, &value)) = values
            .iter()
            .enumerate()
            .find(|&(_, &v)| v < NULL_COMPONENT)
        {
            return Err(ClockError::InvalidComponent { position, value });
        }
        Ok(Self { owner, values })
    }

    /// Number of components (N).
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// The slot this clock advances.
    pub fn owner(&self) -> usize {
        self.owner
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Component at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<i32> {
        self.values.get(index).copied()
    }

    /// Advance the owner's component by one.
    pub fn increment(&mut self) {
        if let Some(own) = self.values.get_mut(self.owner) {
            *own += 1;
        }
    }

    /// True iff any component is the `-1` sentinel.
    pub fn is_null(&self) -> bool {
        self.values.contains(&NULL_COMPONENT)
    }

    /// Absorb `other` into this clock.
    ///
    /// A null clock copies `other` verbatim (first contact). Otherwise each
    /// component becomes the max of the two.
    pub fn merge_from(&mut self, other: &Self) {
        let adopt = self.is_null();
        for (mine, &theirs) in self.values.iter_mut().zip(&other.values) {
            *mine = if adopt { theirs } else { (*mine).max(theirs) };
        }
    }

    /// Componentwise equality of the values (the owner is not compared).
    pub fn equal(&self, other: &Self) -> bool {
        self.values == other.values
    }

    /// `self[i] <= other[i]` for every component.
    pub fn less_than_or_equal(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self.values.iter().zip(&other.values).all(|(a, b)| a <= b)
    }

    /// `self <= other` and the two differ somewhere.
    pub fn less_than(&self, other: &Self) -> bool {
        self.less_than_or_equal(other) && !self.equal(other)
    }

    /// Neither clock is `<=` the other.
    pub fn concurrent_with(&self, other: &Self) -> bool {
        !self.less_than_or_equal(other) && !other.less_than_or_equal(self)
    }

    /// Append the big-endian encoding of every component to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.reserve(self.encoded_len());
        for value in &self.values {
            buf.extend_from_slice(&value.to_be_bytes());
        }
    }

    /// Big-endian encoding, `4 · size` bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf
    }

    pub fn encoded_len(&self) -> usize {
        INT_SIZE * self.values.len()
    }

    /// Decode `size` components from the front of `bytes`.
    ///
    /// The encoding is not self-describing: `size` must come from the
    /// caller. Bytes past `4 · size` are ignored. Components below `-1` are
    /// rejected as malformed.
    pub fn decode(bytes: &[u8], size: usize, owner: usize) -> Result<Self, WireError> {
        let needed = INT_SIZE * size;
        if bytes.len() < needed {
            return Err(WireError::Truncated {
                expected: needed,
                actual: bytes.len(),
            });
        }

        let mut values = Vec::with_capacity(size);
        for (position, chunk) in bytes[..needed].chunks_exact(INT_SIZE).enumerate() {
            let value = read_i32(chunk);
            if value < NULL_COMPONENT {
                return Err(WireError::InvalidComponent {
                    slot: owner,
                    position,
                    value,
                });
            }
            values.push(value);
        }

        Ok(Self { owner, values })
    }
}

/// Unchecked serde shape of [`LogicClock`].
#[derive(Deserialize)]
struct RawLogicClock {
    owner: usize,
    values: Vec<i32>,
}

impl TryFrom<RawLogicClock> for LogicClock {
    type Error = ClockError;

    fn try_from(raw: RawLogicClock) -> Result<Self, Self::Error> {
        Self::from_values(raw.owner, raw.values)
    }
}

/// Read a big-endian i32 from a chunk already known to be `INT_SIZE` long.
pub(crate) fn read_i32(chunk: &[u8]) -> i32 {
    let mut buf = [0u8; INT_SIZE];
    buf.copy_from_slice(&chunk[..INT_SIZE]);
    i32::from_be_bytes(buf)
}

impl fmt::Display for LogicClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}
