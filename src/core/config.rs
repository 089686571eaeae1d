use crate::core::error::{ConfigError, MailError, MailResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for buildmail
/// Searched in order: buildmail.toml, .buildmail.toml, .config/buildmail.toml, config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
  pub mail_sender: String,
  #[serde(default)]
  pub mail_server: String,
  #[serde(default)]
  pub mail_username: String,
  #[serde(default)]
  pub mail_password: String,
  /// Drop directory holding the built artifacts
  pub ftp_dir: PathBuf,
  /// Working copy or URL of the Office sources
  pub office_dir: String,
  /// Working copy or URL of the Dispense sources
  pub dispense_dir: String,
  #[serde(default)]
  pub recipients: Vec<String>,
  /// Display name on the From header
  #[serde(default = "default_sender_name")]
  pub sender_name: String,
  /// Joiner placed between changelog lines
  #[serde(default = "default_joiner")]
  pub joiner: String,
  #[serde(default)]
  pub trim_mode: TrimMode,
  /// Trailing token removed from artifact names
  #[serde(default = "default_artifact_suffix")]
  pub artifact_suffix: String,
  #[serde(default)]
  pub svn: SvnConfig,
}

fn default_sender_name() -> String {
  "Build Bot".to_string()
}

fn default_joiner() -> String {
  "<br>".to_string()
}

fn default_artifact_suffix() -> String {
  ".zip".to_string()
}

/// How product prefixes and suffixes are removed from artifact names
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrimMode {
  /// Slice off the exact prefix, separator run and suffix
  #[default]
  Exact,
  /// Character-set trim of prefix then suffix characters (over-trims)
  Legacy,
}

/// `svn log` invocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvnConfig {
  /// svn client executable (default: "svn" on PATH)
  #[serde(default = "default_svn_binary")]
  pub binary: String,

  /// Number of recent entries inspected for build markers (default: 30)
  #[serde(default = "default_probe_limit")]
  pub probe_limit: u32,

  /// Substring identifying a build commit (default: "build")
  #[serde(default = "default_marker")]
  pub marker: String,

  /// Per-invocation timeout in seconds (default: 60)
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_svn_binary() -> String {
  "svn".to_string()
}

fn default_probe_limit() -> u32 {
  30
}

fn default_marker() -> String {
  "build".to_string()
}

fn default_timeout_secs() -> u64 {
  60
}

impl Default for SvnConfig {
  fn default() -> Self {
    Self {
      binary: default_svn_binary(),
      probe_limit: default_probe_limit(),
      marker: default_marker(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

impl SvnConfig {
  /// Validate svn settings
  pub fn validate(&self) -> MailResult<()> {
    if self.binary.trim().is_empty() {
      return Err(MailError::Config(ConfigError::MissingField {
        field: "svn.binary".to_string(),
      }));
    }

    // A window needs two markers, so the probe must be able to return two entries
    if self.probe_limit < 2 {
      return Err(MailError::Config(ConfigError::InvalidField {
        field: "svn.probe_limit".to_string(),
        reason: format!("must be at least 2 (got {})", self.probe_limit),
      }));
    }

    if self.marker.is_empty() {
      return Err(MailError::Config(ConfigError::MissingField {
        field: "svn.marker".to_string(),
      }));
    }

    if self.timeout_secs == 0 {
      return Err(MailError::Config(ConfigError::InvalidField {
        field: "svn.timeout_secs".to_string(),
        reason: "must be greater than 0".to_string(),
      }));
    }

    Ok(())
  }
}

impl MailConfig {
  /// Find config file in search order: buildmail.toml, .buildmail.toml, .config/buildmail.toml, config.json
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("buildmail.toml"),
      path.join(".buildmail.toml"),
      path.join(".config").join("buildmail.toml"),
      path.join("config.json"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the search locations under `path`
  pub fn load(path: &Path) -> MailResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      MailError::Config(ConfigError::NotFound {
        search_root: path.to_path_buf(),
      })
    })?;

    Self::load_file(&config_path)
  }

  /// Load config from an explicit file; JSON when the extension is `.json`, TOML otherwise
  pub fn load_file(config_path: &Path) -> MailResult<Self> {
    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

    let config = Self::parse(&content, config_path)?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded configuration");
    Ok(config)
  }

  fn parse(content: &str, config_path: &Path) -> MailResult<Self> {
    let is_json = config_path
      .extension()
      .map(|ext| ext.eq_ignore_ascii_case("json"))
      .unwrap_or(false);

    if is_json {
      serde_json::from_str(content).with_context(|| format!("Failed to parse config from {}", config_path.display()))
    } else {
      toml_edit::de::from_str(content).with_context(|| format!("Failed to parse config from {}", config_path.display()))
    }
  }

  /// Validate required fields
  pub fn validate(&self) -> MailResult<()> {
    if self.mail_sender.trim().is_empty() {
      return Err(MailError::Config(ConfigError::MissingField {
        field: "mail_sender".to_string(),
      }));
    }

    if self.recipients.is_empty() {
      return Err(MailError::with_help(
        "No recipients configured",
        "Add at least one address to `recipients`",
      ));
    }

    if self.ftp_dir.as_os_str().is_empty() {
      return Err(MailError::Config(ConfigError::MissingField {
        field: "ftp_dir".to_string(),
      }));
    }

    self.svn.validate()
  }
}
