//! Wire framing: knowledge matrix header followed by an opaque payload.
//!
//! ```text
//! offset 0          sender instance id   (i32, big-endian)
//! offset 4          N × N matrix, row-major, one row per slot
//!                   (4·N² bytes of big-endian i32)
//! offset 4+4·N²     payload (remaining bytes)
//! ```
//!
//! N is not on the wire. Both ends must share the cluster size out-of-band.

use tracing::trace;

use ses_core::constants::INT_SIZE;
use ses_core::errors::WireError;

use crate::clock::{read_i32, LogicClock};
use crate::vector_clock::VectorClock;

pub use ses_core::constants::header_len;

/// A decoded message: the sender's knowledge matrix at send time plus the
/// application payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub sender: VectorClock,
    pub payload: Vec<u8>,
}

impl Envelope {
    pub fn sender_id(&self) -> usize {
        self.sender.instance_id()
    }
}

/// Serialize `matrix` and append `payload` verbatim.
pub fn encode(matrix: &VectorClock, payload: &[u8]) -> Vec<u8> {
    let n = matrix.n_instance();
    let mut buf = Vec::with_capacity(header_len(n) + payload.len());

    // Bounded by MAX_CLUSTER_SIZE at construction.
    let sender = matrix.instance_id() as i32;
    buf.extend_from_slice(&sender.to_be_bytes());
    for slot in matrix.slots() {
        slot.encode_into(&mut buf);
    }
    buf.extend_from_slice(payload);
    buf
}

/// Parse one complete message for a cluster of `n` processes.
///
/// All validation happens here. A malformed buffer never yields a partial
/// matrix.
pub fn decode(bytes: &[u8], n: usize) -> Result<Envelope, WireError> {
    let sender = peek_sender(bytes, n)?;

    let row_len = INT_SIZE * n;
    let rows = &bytes[INT_SIZE..header_len(n)];
    let slots = rows
        .chunks_exact(row_len.max(1))
        .enumerate()
        .map(|(slot, row)| LogicClock::decode(row, n, slot))
        .collect::<Result<Vec<_>, _>>()?;

    let payload = bytes[header_len(n)..].to_vec();
    trace!(sender, payload_len = payload.len(), "decoded envelope");

    Ok(Envelope {
        sender: VectorClock::from_slots(sender, slots),
        payload,
    })
}

/// Read only the sender id, after checking the buffer holds a full header.
pub fn peek_sender(bytes: &[u8], n: usize) -> Result<usize, WireError> {
    let expected = header_len(n);
    if bytes.len() < expected {
        return Err(WireError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }

    let raw = read_i32(&bytes[..INT_SIZE]);
    match usize::try_from(raw) {
        Ok(sender) if sender < n => Ok(sender),
        _ => Err(WireError::UnknownSender {
            sender: raw,
            cluster_size: n,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_size_matches_layout() {
        let vc = VectorClock::new(3, 2).unwrap();
        assert_eq!(header_len(3), 40);
        assert_eq!(encode(&vc, b"").len(), 40);
        assert_eq!(encode(&vc, b"abc").len(), 43);
    }

    #[test]
    fn layout_is_big_endian_row_major() {
        let mut vc = VectorClock::new(2, 1).unwrap();
        vc.increment();
        let bytes = encode(&vc, &[0xAB]);
        assert_eq!(
            bytes,
            vec![
                0, 0, 0, 1, // sender
                0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // slot 0: null
                0, 0, 0, 0, 0, 0, 0, 1, // slot 1: own clock [0, 1]
                0xAB, // payload
            ]
        );
    }

    #[test]
    fn negative_sender_is_unknown() {
        let vc = VectorClock::new(2, 0).unwrap();
        let mut bytes = encode(&vc, b"");
        bytes[..4].copy_from_slice(&(-1i32).to_be_bytes());
        assert_eq!(
            decode(&bytes, 2).unwrap_err(),
            WireError::UnknownSender {
                sender: -1,
                cluster_size: 2
            }
        );
    }
}
