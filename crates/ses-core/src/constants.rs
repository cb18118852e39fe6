/// SES core version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width in bytes of one encoded integer (instance id or clock component).
pub const INT_SIZE: usize = 4;

/// Sentinel component value meaning "no information yet".
pub const NULL_COMPONENT: i32 = -1;

/// Largest cluster accepted by configuration validation.
/// Keeps the `4 + 4·N²` header comfortably inside `i32` offsets.
pub const MAX_CLUSTER_SIZE: usize = 1024;

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "SES_LOG";

/// Default tracing filter when `SES_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "ses=info";

/// Size in bytes of the wire header for a cluster of `n` processes.
pub const fn header_len(n: usize) -> usize {
    INT_SIZE + INT_SIZE * n * n
}
