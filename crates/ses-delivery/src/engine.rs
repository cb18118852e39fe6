//! SesEngine: Schiper-Eggli-Sandoz causal delivery for one process.
//!
//! ```text
//! send(dest, payload)                    deliver(bytes)
//!   |                                      |
//!   |-- own clock += 1                     |-- decode (validate everything)
//!   |-- encode matrix ++ payload           |-- tM = sender matrix[me]
//!   |-- matrix[dest] ⊔= own clock          |-- tP = my own clock
//!   |                                      |-- tM <= tP ? merge + deliver
//!   v                                      |             : buffer
//! bytes for the transport                  |-- drain buffer to fixpoint
//! ```
//!
//! Every public operation holds one coarse lock for its whole duration,
//! including the drain and the handler calls it makes. The delivery
//! decision reads `tP`, decides, and mutates as one atomic step.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error, info, warn};

use ses_clock::VectorClock;
use ses_core::config::SesConfig;
use ses_core::errors::{ClockError, DeliveryError, SesResult};
use ses_core::{deliver_span, drain_span, send_span};

use crate::buffer::{PendingBuffer, PendingMessage};
use crate::handler::DeliveryHandler;
use crate::report::{DeliveryReport, EngineSnapshot};

/// Mutable per-process state. Only ever touched under [`SesEngine`]'s lock.
#[derive(Debug)]
struct EngineState {
    matrix: VectorClock,
    buffer: PendingBuffer,
}

impl EngineState {
    /// Absorb a delivered message's matrix.
    ///
    /// 1. Third-party slots learn what the sender knew about them.
    /// 2. The own clock absorbs the sender's own clock.
    /// 3. The delivery itself is a new local event.
    fn merge(&mut self, remote: &VectorClock) -> Result<(), ClockError> {
        let own = self.matrix.instance_id();
        let sender = remote.instance_id();

        for slot in 0..self.matrix.n_instance() {
            if slot != own && slot != sender {
                self.matrix.merge_from_remote(remote, slot, slot)?;
            }
        }
        self.matrix.merge_from_remote(remote, sender, own)?;
        self.matrix.increment();
        Ok(())
    }
}

/// Causal delivery engine for one process of a fixed cluster.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct SesEngine {
    instance_id: usize,
    cluster_size: usize,
    state: Mutex<EngineState>,
    handler: Arc<dyn DeliveryHandler>,
}

impl SesEngine {
    /// Create the engine for process `instance_id` in a cluster of
    /// `cluster_size`.
    pub fn new(
        cluster_size: usize,
        instance_id: usize,
        handler: Arc<dyn DeliveryHandler>,
    ) -> SesResult<Self> {
        let matrix = VectorClock::new(cluster_size, instance_id)?;
        info!(instance_id, cluster_size, "ses engine created");
        Ok(Self {
            instance_id,
            cluster_size,
            state: Mutex::new(EngineState {
                matrix,
                buffer: PendingBuffer::new(),
            }),
            handler,
        })
    }

    /// Create the engine from a validated [`SesConfig`].
    pub fn from_config(config: &SesConfig, handler: Arc<dyn DeliveryHandler>) -> SesResult<Self> {
        config.validate()?;
        Self::new(config.cluster.size, config.cluster.instance_id, handler)
    }

    pub fn instance_id(&self) -> usize {
        self.instance_id
    }

    pub fn cluster_size(&self) -> usize {
        self.cluster_size
    }

    /// Stamp `payload` for `destination` and return the bytes to transmit.
    ///
    /// The caller owns the channel to `destination`.
    pub fn send(&self, destination: usize, payload: &[u8]) -> SesResult<Vec<u8>> {
        let span = send_span!(self.instance_id, destination);
        let _guard = span.enter();

        if destination >= self.cluster_size {
            warn!(destination, "send to unknown destination rejected");
            return Err(DeliveryError::UnknownDestination {
                destination,
                cluster_size: self.cluster_size,
            }
            .into());
        }

        let mut state = self.lock()?;
        state.matrix.increment();
        let encoded = state.matrix.encode(payload);
        state.matrix.self_merge(self.instance_id, destination)?;

        debug!(
            sender = self.instance_id,
            receiver = destination,
            payload_len = payload.len(),
            own_clock = %state.matrix.own_clock(),
            "message stamped for send"
        );

        Ok(encoded)
    }

    /// Accept one complete encoded message.
    ///
    /// Either delivers it now or buffers it, then drains the buffer until a
    /// full scan releases nothing. A malformed message is rejected before
    /// any state changes.
    pub fn deliver(&self, bytes: &[u8]) -> SesResult<DeliveryReport> {
        let span = deliver_span!(self.instance_id, bytes.len());
        let _guard = span.enter();

        let mut guard = self.lock()?;
        let state = &mut *guard;

        let envelope = state.matrix.decode(bytes).map_err(|e| {
            warn!(error = %e, "rejecting malformed message");
            e
        })?;
        let message = PendingMessage::new(envelope.sender, envelope.payload);

        let mut report = DeliveryReport::default();
        if message.is_deliverable(&state.matrix) {
            self.release(state, message, "delivered")?;
            report.delivered = true;
        } else {
            self.log_decision(state, &message, "buffered");
            state.buffer.push(message);
            report.buffered = true;
        }

        report.released_from_buffer = self.drain(state)?;
        report.pending = state.buffer.len();
        Ok(report)
    }

    /// Copy of the current matrix and buffered senders.
    pub fn snapshot(&self) -> SesResult<EngineSnapshot> {
        let state = self.lock()?;
        Ok(EngineSnapshot {
            matrix: state.matrix.clone(),
            pending_senders: state.buffer.iter().map(PendingMessage::sender_id).collect(),
        })
    }

    /// Number of messages waiting for causal predecessors.
    pub fn pending_count(&self) -> SesResult<usize> {
        Ok(self.lock()?.buffer.len())
    }

    /// Re-scan from the start after every release; `tP` is re-read from the
    /// live matrix on each pass.
    fn drain(&self, state: &mut EngineState) -> SesResult<usize> {
        let span = drain_span!(self.instance_id, state.buffer.len());
        let _guard = span.enter();

        let mut released = 0;
        while let Some(message) = state.buffer.take_deliverable(&state.matrix) {
            self.release(state, message, "released from buffer")?;
            released += 1;
        }

        if released > 0 {
            debug!(
                released,
                remaining = state.buffer.len(),
                "drained deliverable messages from buffer"
            );
        }
        Ok(released)
    }

    /// Merge a deliverable message into the matrix, then hand it to the
    /// application.
    fn release(
        &self,
        state: &mut EngineState,
        message: PendingMessage,
        status: &'static str,
    ) -> SesResult<()> {
        self.log_decision(state, &message, status);
        state.merge(&message.sender)?;

        let sender = message.sender_id();
        let payload = message.payload;
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.handler.on_deliver(sender, &payload);
        }));
        if outcome.is_err() {
            error!(sender, "delivery handler panicked; continuing");
        }
        Ok(())
    }

    fn log_decision(&self, state: &EngineState, message: &PendingMessage, status: &str) {
        if let Some(t_m) = message.t_m(self.instance_id) {
            debug!(
                sender = message.sender_id(),
                receiver = self.instance_id,
                payload_len = message.payload.len(),
                t_m = %t_m,
                tp_snd = %message.sender.own_clock(),
                tp_rcv = %state.matrix.own_clock(),
                status,
                "delivery decision"
            );
        }
    }

    fn lock(&self) -> SesResult<MutexGuard<'_, EngineState>> {
        self.state
            .lock()
            .map_err(|e| DeliveryError::LockPoisoned(e.to_string()).into())
    }
}

impl std::fmt::Debug for SesEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesEngine")
            .field("instance_id", &self.instance_id)
            .field("cluster_size", &self.cluster_size)
            .finish_non_exhaustive()
    }
}
