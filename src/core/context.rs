//! Run context - build once, pass everywhere
//!
//! ```text
//! main.rs:
//!   RunContext::build() -> &RunContext
//!   |
//!   v
//! commands/compose.rs, versions.rs, changelog.rs:
//!   fn run_*(ctx: &RunContext, ...)
//! ```
//!
//! The configuration is an explicit value carried here; nothing reads it from
//! process-wide state.

use crate::catalog::VersionResolver;
use crate::core::config::MailConfig;
use crate::core::error::MailResult;
use crate::core::vcs::SystemSvn;
use std::path::{Path, PathBuf};

/// Everything a command needs for one run
pub struct RunContext {
  /// Directory the config search started from
  pub root: PathBuf,

  pub config: MailConfig,
}

impl RunContext {
  /// Load configuration from `config_path` if given, otherwise search under `root`
  pub fn build(root: &Path, config_path: Option<&Path>) -> MailResult<Self> {
    let config = match config_path {
      Some(path) => MailConfig::load_file(path)?,
      None => MailConfig::load(root)?,
    };

    Ok(Self {
      root: root.to_path_buf(),
      config,
    })
  }

  /// Log backend configured from `[svn]`
  pub fn svn(&self) -> SystemSvn {
    SystemSvn::new(&self.config.svn)
  }

  /// Version resolver configured from `trim_mode` and `artifact_suffix`
  pub fn resolver(&self) -> VersionResolver {
    VersionResolver::new(self.config.trim_mode, self.config.artifact_suffix.as_str())
  }

  /// Drop directory, relative paths resolved against `root`
  pub fn ftp_dir(&self) -> PathBuf {
    self.root.join(&self.config.ftp_dir)
  }
}
