//! Turn raw `svn log` text into one bullet per message line

use regex::Regex;
use std::sync::LazyLock;

/// Prefix carried by every rendered changelog line
pub const BULLET: &str = "- ";

/// `r<rev> | author | date | N lines` commit header
static HEADER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^r[0-9]+ \| .* \| [0-9]+ lines?$").expect("header pattern is valid"));

/// Separator line made only of dashes
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-+$").expect("separator pattern is valid"));

/// Whether a log line is commit metadata rather than message text
pub fn is_metadata_line(line: &str) -> bool {
  HEADER_RE.is_match(line) || SEPARATOR_RE.is_match(line)
}

/// Add a bullet unless the line already carries one
pub fn bulletize(line: &str) -> String {
  if line.starts_with(BULLET) {
    line.to_string()
  } else {
    format!("{}{}", BULLET, line)
  }
}

/// Message lines of a raw log, metadata and blank lines removed, each bulleted
pub fn entries_from_log(raw: &str) -> Vec<String> {
  raw
    .lines()
    .map(str::trim_end)
    .filter(|line| !line.is_empty())
    .filter(|line| !is_metadata_line(line))
    .map(bulletize)
    .collect()
}
