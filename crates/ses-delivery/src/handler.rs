//! Application delivery callback.

/// Receives every message the engine releases, in causal order.
///
/// Called synchronously while the engine holds its state lock, so an
/// implementation must not call back into the same engine. A panic inside
/// the handler is caught and logged; the message still counts as delivered.
pub trait DeliveryHandler: Send + Sync {
    /// `sender` is the instance id of the process that sent `payload`.
    fn on_deliver(&self, sender: usize, payload: &[u8]);
}

impl<F> DeliveryHandler for F
where
    F: Fn(usize, &[u8]) + Send + Sync,
{
    fn on_deliver(&self, sender: usize, payload: &[u8]) {
        self(sender, payload)
    }
}

/// Handler that discards every delivery. Useful when only the clock state
/// matters (benchmarks, relays).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl DeliveryHandler for NoopHandler {
    fn on_deliver(&self, _sender: usize, _payload: &[u8]) {}
}
