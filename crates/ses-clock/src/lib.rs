//! # ses-clock
//!
//! Clock algebra for Schiper-Eggli-Sandoz causal delivery.
//!
//! - [`LogicClock`]: one N-component vector owned by a slot (increment,
//!   partial order, first-contact merge, fixed-width encoding)
//! - [`VectorClock`]: the knowledge matrix: a process's own clock plus its
//!   last known snapshot of every other process's clock
//! - [`wire`]: the `4 + 4·N²` byte header framing a payload
//!
//! ## Merge guarantees
//!
//! For non-null clocks `merge_from` is componentwise max, so it is
//! commutative, associative, and idempotent. A null clock adopts the
//! incoming clock wholesale.

pub mod clock;
pub mod vector_clock;
pub mod wire;

pub use clock::LogicClock;
pub use vector_clock::VectorClock;
pub use wire::Envelope;
