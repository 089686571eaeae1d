//! Integration tests for `buildmail changelog`

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_changelog_json() -> Result<()> {
  let drop = TestDrop::new()?;
  drop.set_probe("office", &svn_log(&[(220, "zbuild 12"), (210, "zbuild 11")]))?;
  drop.set_range("office", &svn_log(&[(215, "Reports load faster\n\nFix printer timeout")]))?;

  let output = run_buildmail(&drop.path, &["changelog", "office", "--json"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(json["window"]["from"], 211);
  assert_eq!(json["window"]["to"], 219);
  assert_eq!(
    json["entries"],
    serde_json::json!(["- Reports load faster", "- Fix printer timeout"])
  );

  Ok(())
}

#[test]
fn test_changelog_adjacent_builds() -> Result<()> {
  let drop = TestDrop::new()?;
  drop.set_probe("office", &svn_log(&[(220, "zbuild 12"), (219, "zbuild 11")]))?;

  let output = run_buildmail(&drop.path, &["changelog", "office"])?;
  assert!(String::from_utf8_lossy(&output.stdout).contains("No changes between the last two builds"));
  assert_eq!(drop.svn_calls()?.len(), 1);

  Ok(())
}

#[test]
fn test_changelog_without_config_fails() -> Result<()> {
  let temp = tempfile::TempDir::new()?;

  let output = run_buildmail_raw(temp.path(), &["changelog", "office"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("No buildmail configuration found"));

  Ok(())
}
