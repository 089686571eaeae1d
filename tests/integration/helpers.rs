//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Stand-in for the svn client: serves `<fixtures>/<path>.probe` for
/// `--search` queries and `<fixtures>/<path>.range` otherwise, and appends
/// every argument list to `<fixtures>/calls.log`.
const FAKE_SVN: &str = r#"#!/bin/sh
fixtures="__FIXTURES__"
target="$3"
echo "$*" >> "$fixtures/calls.log"
case "$*" in
  *--search*) kind=probe ;;
  *) kind=range ;;
esac
file="$fixtures/$target.$kind"
if [ -f "$file" ]; then
  cat "$file"
  exit 0
fi
echo "svn: E155007: '$target' is not a working copy" >&2
exit 1
"#;

/// A scratch directory with a drop directory, svn fixtures and a config
pub struct TestDrop {
  _root: TempDir,
  pub path: PathBuf,
  pub ftp: PathBuf,
  fixtures: PathBuf,
}

impl TestDrop {
  /// Create the layout and a buildmail.toml pointing at the fake svn
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    let ftp = path.join("ftp");
    let fixtures = path.join("fixtures");
    std::fs::create_dir_all(&ftp)?;
    std::fs::create_dir_all(&fixtures)?;

    let svn = path.join("fake-svn");
    std::fs::write(&svn, FAKE_SVN.replace("__FIXTURES__", &fixtures.display().to_string()))?;
    std::fs::set_permissions(&svn, std::fs::Permissions::from_mode(0o755))?;

    std::fs::write(
      path.join("buildmail.toml"),
      format!(
        r#"mail_sender = "bot@example.com"
ftp_dir = "ftp"
dispense_dir = "dispense"
office_dir = "office"
recipients = ["qa@example.com", "ops@example.com"]

[svn]
binary = "{}"
marker = "zbuild"
timeout_secs = 20
"#,
        svn.display()
      ),
    )?;

    Ok(Self {
      _root: root,
      path,
      ftp,
      fixtures,
    })
  }

  /// Drop empty artifacts into the ftp directory
  pub fn add_artifacts(&self, names: &[&str]) -> Result<()> {
    for name in names {
      std::fs::write(self.ftp.join(name), b"")?;
    }
    Ok(())
  }

  /// Canned output for the build-marker probe of `target`
  pub fn set_probe(&self, target: &str, log: &str) -> Result<()> {
    std::fs::write(self.fixtures.join(format!("{}.probe", target)), log)?;
    Ok(())
  }

  /// Canned output for the range query of `target`
  pub fn set_range(&self, target: &str, log: &str) -> Result<()> {
    std::fs::write(self.fixtures.join(format!("{}.range", target)), log)?;
    Ok(())
  }

  /// Argument lists the fake svn was invoked with
  pub fn svn_calls(&self) -> Result<Vec<String>> {
    let log = self.fixtures.join("calls.log");
    if !log.exists() {
      return Ok(Vec::new());
    }
    Ok(std::fs::read_to_string(log)?.lines().map(String::from).collect())
  }
}

/// Build an `svn log` rendering from `(revision, message)` pairs
pub fn svn_log(entries: &[(u64, &str)]) -> String {
  let separator = "-".repeat(72);
  let mut out = format!("{}\n", separator);
  for (revision, message) in entries {
    let line_count = message.lines().count();
    out.push_str(&format!(
      "r{} | builder | 2024-03-01 10:00:00 +0000 (Fri, 01 Mar 2024) | {} line{}\n\n",
      revision,
      line_count,
      if line_count == 1 { "" } else { "s" }
    ));
    out.push_str(message);
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');
  }
  out
}

/// Run buildmail, returning the output whatever the exit status
pub fn run_buildmail_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_buildmail");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run buildmail")
}

/// Run buildmail and fail unless it exits successfully
pub fn run_buildmail(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_buildmail_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "buildmail command failed: buildmail {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
