//! Configuration system for SES.
//! TOML-based, resolution: env > file > defaults.

pub mod cluster_config;
pub mod logging_config;
pub mod ses_config;

pub use cluster_config::ClusterConfig;
pub use logging_config::LoggingConfig;
pub use ses_config::SesConfig;
