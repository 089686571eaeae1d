//! Core plumbing shared by every buildmail command
//!
//! - **config**: buildmail.toml / config.json parsing and validation
//! - **context**: Run context built once in main and passed to commands
//! - **error**: Error types with contextual help messages and exit codes
//! - **vcs**: svn log access (`LogSource`, `SystemSvn`)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
