//! Cluster identity supplied by the bootstrap layer.
//!
//! # Examples
//!
//! ```
//! use ses_core::config::ClusterConfig;
//!
//! let config = ClusterConfig::default();
//! assert_eq!(config.size, 1);
//! assert_eq!(config.instance_id, 0);
//! ```

use serde::{Deserialize, Serialize};

/// Fixed cluster membership for one process.
///
/// Both values are immutable for the lifetime of the process and must be
/// shared out-of-band by every member: the wire format does not carry `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Number of processes in the cluster (N). Default: 1.
    pub size: usize,
    /// This process's identity, in `0..size`. Default: 0.
    pub instance_id: usize,
}

impl ClusterConfig {
    pub fn new(size: usize, instance_id: usize) -> Self {
        Self { size, instance_id }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            size: 1,
            instance_id: 0,
        }
    }
}
