//! Integration tests for `buildmail versions`

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_versions_text() -> Result<()> {
  let drop = TestDrop::new()?;
  drop.add_artifacts(&["Dispense-2024.03.01.zip", "Dispense-2024.02.15.zip", "Office-9.zip"])?;

  let output = run_buildmail(&drop.path, &["versions"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("2024.03.01"));
  assert!(!stdout.contains("2024.02.15"));
  assert!(stdout.contains("Register   (no artifacts)"));

  Ok(())
}

#[test]
fn test_versions_json() -> Result<()> {
  let drop = TestDrop::new()?;
  drop.add_artifacts(&["Dispense-2024.03.01.zip", "Office-9.zip", "Scheduler-1.4.zip"])?;

  let output = run_buildmail(&drop.path, &["versions", "--json"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(json["versions"]["Dispense"], "2024.03.01");
  assert_eq!(json["versions"]["Office"], "9");
  assert_eq!(json["versions"]["Scheduler"], "1.4");
  assert!(json["versions"].get("Register").is_none());

  Ok(())
}

#[test]
fn test_versions_empty_directory() -> Result<()> {
  let drop = TestDrop::new()?;
  drop.add_artifacts(&["readme.txt"])?;

  let output = run_buildmail(&drop.path, &["versions"])?;
  assert!(String::from_utf8_lossy(&output.stdout).contains("No recognized artifacts"));

  Ok(())
}

#[test]
fn test_versions_legacy_trim_mode() -> Result<()> {
  let drop = TestDrop::new()?;
  drop.add_artifacts(&["Office-9.zip"])?;

  let config = std::fs::read_to_string(drop.path.join("buildmail.toml"))?;
  let config = config.replace("[svn]", "trim_mode = \"legacy\"\n\n[svn]");
  std::fs::write(drop.path.join("legacy.toml"), config)?;

  let output = run_buildmail(&drop.path, &["versions", "--json", "--config", "legacy.toml"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(json["versions"]["Office"], "-9");

  Ok(())
}
