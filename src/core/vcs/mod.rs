pub mod system_svn;

pub use system_svn::SystemSvn;

use crate::core::error::MailResult;

/// Inclusive revision range passed to `svn log -r<from>:<to>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionRange {
  pub from: u64,
  pub to: u64,
}

/// Parameters for a single log query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
  /// Maximum number of entries (`-l`)
  pub limit: Option<u32>,
  /// Only entries whose message contains this substring (`--search`)
  pub search: Option<String>,
  /// Exact revision range (`-r`)
  pub range: Option<RevisionRange>,
}

impl LogQuery {
  /// Bounded probe for recent entries containing `marker`
  pub fn probe(limit: u32, marker: impl Into<String>) -> Self {
    Self {
      limit: Some(limit),
      search: Some(marker.into()),
      range: None,
    }
  }

  /// Every entry in `from..=to`
  pub fn range(from: u64, to: u64) -> Self {
    Self {
      limit: None,
      search: None,
      range: Some(RevisionRange { from, to }),
    }
  }
}

/// Source of raw `svn log` text
///
/// Output must follow the plain `svn log` layout: a dashed separator, an
/// `r<rev> | author | date | N lines` header, a blank line, message lines.
pub trait LogSource {
  fn log(&self, path: &str, query: &LogQuery) -> MailResult<String>;
}
