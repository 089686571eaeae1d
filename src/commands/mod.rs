//! CLI commands for buildmail
//!
//! - **compose**: Full run: changelogs, versions, composed notification
//! - **versions**: Latest artifact version per product
//! - **changelog**: Changes between the two latest builds of one path
//!
//! All commands accept `&RunContext` so configuration is loaded once.

pub mod changelog;
pub mod compose;
pub mod versions;

pub use changelog::run_changelog;
pub use compose::run_compose;
pub use versions::run_versions;
