//! Span definitions per engine operation: send, deliver, drain.

/// Create a send span.
#[macro_export]
macro_rules! send_span {
    ($instance:expr, $destination:expr) => {
        $crate::tracing::debug_span!("ses.send", instance = $instance, destination = $destination)
    };
}

/// Create a deliver span.
#[macro_export]
macro_rules! deliver_span {
    ($instance:expr, $len:expr) => {
        $crate::tracing::debug_span!("ses.deliver", instance = $instance, bytes = $len)
    };
}

/// Create a drain span.
#[macro_export]
macro_rules! drain_span {
    ($instance:expr, $pending:expr) => {
        $crate::tracing::trace_span!("ses.drain", instance = $instance, pending = $pending)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SEND: &str = "ses.send";
    pub const DELIVER: &str = "ses.deliver";
    pub const DRAIN: &str = "ses.drain";
}
