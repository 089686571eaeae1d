//! `buildmail versions` - Show the latest artifact version per product

use crate::catalog::Product;
use crate::core::context::RunContext;
use crate::core::error::MailResult;
use std::path::PathBuf;

/// Run the versions command
pub fn run_versions(ctx: &RunContext, dir: Option<PathBuf>, json: bool) -> MailResult<()> {
  let dir = dir.unwrap_or_else(|| ctx.ftp_dir());
  let versions = ctx.resolver().resolve_dir(&dir)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&versions)?);
    return Ok(());
  }

  if versions.is_empty() {
    println!("No recognized artifacts in {}", dir.display());
    return Ok(());
  }

  println!("📦 Latest versions in {} ({} of {} products)", dir.display(), versions.len(), Product::ALL.len());
  for product in Product::ALL {
    match versions.get(product) {
      Some(version) => println!("   {:<10} {}", product, version),
      None => println!("   {:<10} (no artifacts)", product),
    }
  }

  Ok(())
}
