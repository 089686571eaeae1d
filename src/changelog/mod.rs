//! Changelog window extraction
//!
//! Finds the two most recent build commits in a path's history and reports every
//! change strictly between them:
//!
//! 1. **Probe**: bounded `svn log --search <marker>` query
//! 2. **Window**: newest marker - 1 down to previous marker + 1
//! 3. **Range query**: `svn log -r<from>:<to>` (skipped for an empty window)
//! 4. **Reformat**: strip metadata, one bullet per message line

pub mod format;
pub mod window;

pub use window::RevisionWindow;

use crate::core::config::SvnConfig;
use crate::core::error::MailResult;
use crate::core::vcs::{LogQuery, LogSource};
use serde::Serialize;

/// Changes between the two most recent builds of one path
#[derive(Debug, Clone, Serialize)]
pub struct Changelog {
  pub path: String,
  pub window: RevisionWindow,
  pub entries: Vec<String>,
}

impl Changelog {
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Entries joined with `joiner` (e.g. `<br>` for HTML mail)
  pub fn render(&self, joiner: &str) -> String {
    self.entries.join(joiner)
  }
}

/// Two-stage log extraction over any [`LogSource`]
pub struct ChangelogExtractor<'a, S: LogSource> {
  source: &'a S,
  probe_limit: u32,
  marker: String,
}

impl<'a, S: LogSource> ChangelogExtractor<'a, S> {
  pub fn new(source: &'a S, config: &SvnConfig) -> Self {
    Self {
      source,
      probe_limit: config.probe_limit,
      marker: config.marker.clone(),
    }
  }

  /// Locate the window between the two latest build markers
  pub fn window(&self, path: &str) -> MailResult<RevisionWindow> {
    let probe = self
      .source
      .log(path, &LogQuery::probe(self.probe_limit, self.marker.as_str()))?;
    window::window_from_probe(path, &self.marker, &probe)
  }

  /// Extract the changelog for `path`
  pub fn extract(&self, path: &str) -> MailResult<Changelog> {
    let window = self.window(path)?;
    tracing::info!(path, from = window.from, to = window.to, "build window located");

    if window.is_empty() {
      tracing::info!(path, "no changes between consecutive builds");
      return Ok(Changelog {
        path: path.to_string(),
        window,
        entries: Vec::new(),
      });
    }

    let raw = self.source.log(path, &LogQuery::range(window.from, window.to))?;
    let entries = format::entries_from_log(&raw);
    tracing::debug!(path, entries = entries.len(), "changelog reformatted");

    Ok(Changelog {
      path: path.to_string(),
      window,
      entries,
    })
  }
}
