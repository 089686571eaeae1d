//! Integration tests for `buildmail compose`

use crate::helpers::*;
use anyhow::Result;

fn standard_drop() -> Result<TestDrop> {
  let drop = TestDrop::new()?;
  drop.add_artifacts(&["Dispense-2024.03.01.zip", "Dispense-2024.02.15.zip", "Office-9.zip", "notes.txt"])?;

  drop.set_probe("dispense", &svn_log(&[(105, "zbuild 2024.03.01"), (100, "zbuild 2024.02.15")]))?;
  drop.set_range(
    "dispense",
    &svn_log(&[(104, "Fix dose rounding\nTidy label layout"), (102, "- Add stock export")]),
  )?;

  // Consecutive builds: nothing in between
  drop.set_probe("office", &svn_log(&[(51, "zbuild 9"), (50, "zbuild 8")]))?;
  Ok(drop)
}

#[test]
fn test_compose_prints_full_message() -> Result<()> {
  let drop = standard_drop()?;

  let output = run_buildmail(&drop.path, &["compose", "beta", "live"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Subject: Software Update Release "));
  assert!(stdout.contains("To: <qa@example.com>, <ops@example.com>"));
  assert!(stdout.contains("pushed to beta, live, streams."));
  assert!(stdout.contains("<strong>Dispense: </strong><span style=\"color:#2ED03C\">2024.03.01</span>"));
  assert!(stdout.contains("<strong>Office: </strong><span style=\"color:#2ED03C\">9</span>"));
  assert!(stdout.contains("<strong>Register: </strong><span style=\"color:#2ED03C\">n/a</span>"));
  assert!(stdout.contains("- Fix dose rounding<br>- Tidy label layout<br>- Add stock export"));
  assert!(!stdout.contains("r104 |"));

  let calls = drop.svn_calls()?;
  assert!(calls.iter().any(|c| c.contains("dispense -l 30 --search zbuild")));
  assert!(calls.iter().any(|c| c.contains("dispense -r101:104")));
  // Office window is empty, so only its probe runs
  assert_eq!(calls.iter().filter(|c| c.contains("office")).count(), 1);

  Ok(())
}

#[test]
fn test_compose_default_stream() -> Result<()> {
  let drop = standard_drop()?;

  let output = run_buildmail(&drop.path, &["compose"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("pushed to test streams."));

  Ok(())
}

#[test]
fn test_compose_writes_output_file() -> Result<()> {
  let drop = standard_drop()?;
  let target = drop.path.join("mail.eml");

  run_buildmail(&drop.path, &["compose", "live", "--output", target.to_str().unwrap()])?;

  let message = std::fs::read_to_string(&target)?;
  assert!(message.contains("Content-Type: text/html; charset=UTF-8\r\n"));
  assert!(message.contains("<u>Office Changelog: </u>"));

  Ok(())
}

#[test]
fn test_compose_aborts_without_two_markers() -> Result<()> {
  let drop = standard_drop()?;
  drop.set_probe("office", &svn_log(&[(51, "zbuild 9")]))?;

  let output = run_buildmail_raw(&drop.path, &["compose"])?;
  assert_eq!(output.status.code(), Some(3));

  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(!stdout.contains("Subject:"), "no message may be emitted on failure");
  assert!(stderr.contains("Cannot find the correct revision for: office"));

  Ok(())
}

#[test]
fn test_compose_aborts_on_missing_drop_dir() -> Result<()> {
  let drop = standard_drop()?;
  std::fs::remove_dir_all(&drop.ftp)?;

  let output = run_buildmail_raw(&drop.path, &["compose"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(!String::from_utf8_lossy(&output.stdout).contains("Subject:"));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot read artifact directory"));

  Ok(())
}

#[test]
fn test_compose_svn_failure_is_system_error() -> Result<()> {
  let drop = TestDrop::new()?;
  drop.add_artifacts(&["Office-9.zip"])?;

  let output = run_buildmail_raw(&drop.path, &["compose"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(String::from_utf8_lossy(&output.stderr).contains("not a working copy"));

  Ok(())
}
