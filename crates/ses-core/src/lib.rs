//! # ses-core
//!
//! Foundation crate for SES causal delivery.
//! Defines errors, error codes, config, constants, and tracing setup.
//! The clock and delivery crates depend on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing_setup;

// Span macros expand through this path.
#[doc(hidden)]
pub use tracing;

// Re-export the most commonly used types at the crate root.
pub use config::SesConfig;
pub use errors::{SesError, SesResult};
