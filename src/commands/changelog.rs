//! `buildmail changelog` - Show changes between the two latest builds of a path

use crate::changelog::ChangelogExtractor;
use crate::core::context::RunContext;
use crate::core::error::MailResult;

/// Run the changelog command
pub fn run_changelog(ctx: &RunContext, path: String, json: bool) -> MailResult<()> {
  let svn = ctx.svn();
  let changelog = ChangelogExtractor::new(&svn, &ctx.config.svn).extract(&path)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&changelog)?);
    return Ok(());
  }

  if changelog.is_empty() {
    println!("No changes between the last two builds of {}", path);
    return Ok(());
  }

  println!(
    "📝 {} (r{}..r{}, {} revision(s))",
    path,
    changelog.window.from,
    changelog.window.to,
    changelog.window.len()
  );
  for entry in &changelog.entries {
    println!("{}", entry);
  }

  Ok(())
}
