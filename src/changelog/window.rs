//! Build-marker parsing and revision window arithmetic

use crate::core::error::{MailError, MailResult, SvnError};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// `r<digits> | ` opening a log header line
static MARKER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^r([0-9]+) \| ").expect("marker pattern is valid"));

/// Revisions strictly between two consecutive build markers
///
/// Empty when the markers are adjacent (`from > to`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevisionWindow {
  pub from: u64,
  pub to: u64,
}

impl RevisionWindow {
  /// Narrow the span between two markers by one revision on each side
  pub fn between(newest: u64, previous: u64) -> Self {
    match newest.checked_sub(1) {
      Some(to) => Self {
        from: previous.saturating_add(1),
        to,
      },
      // r0 as the newest marker leaves nothing below it
      None => Self { from: 1, to: 0 },
    }
  }

  pub fn is_empty(&self) -> bool {
    self.from > self.to
  }

  /// Number of revisions covered
  pub fn len(&self) -> u64 {
    if self.is_empty() { 0 } else { self.to - self.from + 1 }
  }
}

/// Extract marker revisions from probe output, newest first
///
/// Repeated mentions of the same revision collapse into one marker.
pub fn parse_markers(path: &str, probe_output: &str) -> MailResult<Vec<u64>> {
  let mut markers: Vec<u64> = Vec::new();

  for caps in MARKER_RE.captures_iter(probe_output) {
    let digits = &caps[1];
    let revision = digits.parse::<u64>().map_err(|_| {
      MailError::Svn(SvnError::InvalidRevisionFormat {
        path: path.to_string(),
        token: format!("r{}", digits),
      })
    })?;

    if markers.last() != Some(&revision) {
      markers.push(revision);
    }
  }

  Ok(markers)
}

/// Locate the two most recent markers and compute the window between them
pub fn window_from_probe(path: &str, marker: &str, probe_output: &str) -> MailResult<RevisionWindow> {
  let markers = parse_markers(path, probe_output)?;

  match markers.as_slice() {
    [newest, previous, ..] => Ok(RevisionWindow::between(*newest, *previous)),
    _ => Err(MailError::Svn(SvnError::NoBuildMarkersFound {
      path: path.to_string(),
      marker: marker.to_string(),
      found: markers.len(),
    })),
  }
}
