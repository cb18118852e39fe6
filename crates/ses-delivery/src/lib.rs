//! # ses-delivery
//!
//! Causal delivery engine for a fixed cluster of N processes.
//!
//! An external transport hands [`SesEngine::send`] a destination and a
//! payload and puts the returned bytes on the wire. On the receiving side it
//! hands the raw bytes to [`SesEngine::deliver`]; the engine decides whether
//! the message is causally ready, and releases it (and anything it unblocks)
//! to the registered [`DeliveryHandler`] in causal order.
//!
//! ## Modules
//!
//! - [`engine`]: `SesEngine`, the exclusive-access send/deliver state machine
//! - [`buffer`]: pending messages waiting for causal predecessors
//! - [`handler`]: application delivery callback
//! - [`report`]: per-call delivery summary and state snapshots

pub mod buffer;
pub mod engine;
pub mod handler;
pub mod report;

pub use buffer::{PendingBuffer, PendingMessage};
pub use engine::SesEngine;
pub use handler::{DeliveryHandler, NoopHandler};
pub use report::{DeliveryReport, EngineSnapshot};
