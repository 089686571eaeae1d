//! Error types for buildmail with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to the operator. Every error aborts the run before a
//! notification is emitted.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for buildmail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (svn, process, I/O)
  System = 2,
  /// Validation failure (log text or history did not match expectations)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for buildmail
#[derive(Debug)]
pub enum MailError {
  /// Configuration errors
  Config(ConfigError),

  /// Artifact catalog errors
  Catalog(CatalogError),

  /// SVN invocation and log parsing errors
  Svn(SvnError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl MailError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    MailError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    MailError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Typed variants pass through unchanged so their exit code and help survive.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      MailError::Message { message, context, help } => MailError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      MailError::Io(err) => MailError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      MailError::Config(_) => ExitCode::User,
      MailError::Catalog(_) => ExitCode::User,
      MailError::Svn(e) => e.exit_code(),
      MailError::Io(_) => ExitCode::System,
      MailError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      MailError::Config(e) => e.help_message(),
      MailError::Catalog(e) => e.help_message(),
      MailError::Svn(e) => e.help_message(),
      MailError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for MailError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MailError::Config(e) => write!(f, "{}", e),
      MailError::Catalog(e) => write!(f, "{}", e),
      MailError::Svn(e) => write!(f, "{}", e),
      MailError::Io(e) => write!(f, "I/O error: {}", e),
      MailError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for MailError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      MailError::Io(e) => Some(e),
      MailError::Catalog(CatalogError::DirectoryUnavailable { source, .. }) => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for MailError {
  fn from(err: io::Error) -> Self {
    MailError::Io(err)
  }
}

impl From<toml_edit::de::Error> for MailError {
  fn from(err: toml_edit::de::Error) -> Self {
    MailError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for MailError {
  fn from(err: serde_json::Error) -> Self {
    MailError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// No config file in any search location
  NotFound { search_root: PathBuf },

  /// Missing or empty required field
  MissingField { field: String },

  /// Field present but unusable
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Create buildmail.toml (or config.json) in the working directory, or pass --config <file>.".to_string())
      }
      ConfigError::MissingField { field } => Some(format!("Add `{}` to your buildmail configuration.", field)),
      ConfigError::InvalidField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { search_root } => {
        write!(
          f,
          "No buildmail configuration found.\nSearched: {}/buildmail.toml, .buildmail.toml, .config/buildmail.toml, config.json",
          search_root.display()
        )
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid value for '{}': {}", field, reason)
      }
    }
  }
}

/// Artifact catalog errors
#[derive(Debug)]
pub enum CatalogError {
  /// The drop directory could not be listed
  DirectoryUnavailable { path: PathBuf, source: io::Error },
}

impl CatalogError {
  fn help_message(&self) -> Option<String> {
    match self {
      CatalogError::DirectoryUnavailable { path, .. } => Some(format!(
        "Check that `ftp_dir` points at a readable directory: {}",
        path.display()
      )),
    }
  }
}

impl fmt::Display for CatalogError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CatalogError::DirectoryUnavailable { path, source } => {
        write!(f, "Cannot read artifact directory {}: {}", path.display(), source)
      }
    }
  }
}

/// SVN invocation and log parsing errors
#[derive(Debug)]
pub enum SvnError {
  /// svn could not be spawned or exited non-zero
  CommandFailed { command: String, stderr: String },

  /// svn did not finish within the configured timeout
  CommandTimedOut { command: String, timeout_secs: u64 },

  /// The probe query yielded fewer than two build markers
  NoBuildMarkersFound { path: String, marker: String, found: usize },

  /// A revision token did not parse as an integer
  InvalidRevisionFormat { path: String, token: String },
}

impl SvnError {
  fn exit_code(&self) -> ExitCode {
    match self {
      SvnError::CommandFailed { .. } | SvnError::CommandTimedOut { .. } => ExitCode::System,
      SvnError::NoBuildMarkersFound { .. } | SvnError::InvalidRevisionFormat { .. } => ExitCode::Validation,
    }
  }

  fn help_message(&self) -> Option<String> {
    match self {
      SvnError::CommandFailed { stderr, .. } => {
        if stderr.contains("E155007") || stderr.contains("not a working copy") {
          Some("The configured path is not an svn working copy or repository URL.".to_string())
        } else if stderr.contains("No such file") || stderr.contains("not found") {
          Some("Make sure the `svn` client is installed and on PATH, or set `svn.binary`.".to_string())
        } else {
          None
        }
      }
      SvnError::CommandTimedOut { .. } => Some("Raise `svn.timeout_secs` or check connectivity to the repository.".to_string()),
      SvnError::NoBuildMarkersFound { marker, .. } => Some(format!(
        "Two commits containing '{}' are needed within the probe window. Raise `svn.probe_limit` if builds are far apart.",
        marker
      )),
      SvnError::InvalidRevisionFormat { .. } => None,
    }
  }
}

impl fmt::Display for SvnError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SvnError::CommandFailed { command, stderr } => {
        write!(f, "SVN command failed: {}\n{}", command, stderr)
      }
      SvnError::CommandTimedOut { command, timeout_secs } => {
        write!(f, "SVN command timed out after {}s: {}", timeout_secs, command)
      }
      SvnError::NoBuildMarkersFound { path, marker, found } => {
        write!(
          f,
          "Cannot find the correct revision for: {} (found {} '{}' marker(s), need 2)",
          path, found, marker
        )
      }
      SvnError::InvalidRevisionFormat { path, token } => {
        write!(f, "Cannot find the correct revision for: {}, invalid revision '{}'", path, token)
      }
    }
  }
}

/// Result type alias for buildmail
pub type MailResult<T> = Result<T, MailError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> MailResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> MailResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<MailError>,
{
  fn context(self, ctx: impl Into<String>) -> MailResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> MailResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &MailError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
