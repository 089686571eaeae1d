//! `buildmail compose` - Build the release notification
//!
//! Every input is gathered before anything is written: a failure in changelog
//! extraction or version resolution aborts the run with no message emitted.

use crate::catalog::Product;
use crate::changelog::ChangelogExtractor;
use crate::core::context::RunContext;
use crate::core::error::{MailResult, ResultExt};
use crate::summary::Summary;
use std::fs;
use std::path::PathBuf;

/// Run the compose command
pub fn run_compose(ctx: &RunContext, streams: Vec<String>, output: Option<PathBuf>) -> MailResult<()> {
  let config = &ctx.config;
  let svn = ctx.svn();
  let extractor = ChangelogExtractor::new(&svn, &config.svn);

  let mut changelogs = Vec::new();
  for (product, path) in [(Product::Dispense, &config.dispense_dir), (Product::Office, &config.office_dir)] {
    tracing::info!(product = %product, path = %path, "extracting changelog");
    let changelog = extractor.extract(path)?;
    changelogs.push((product, changelog));
  }

  let versions = ctx.resolver().resolve_dir(&ctx.ftp_dir())?;

  eprintln!("Processing Mail...");

  let summary = Summary {
    sender_name: &config.sender_name,
    sender: &config.mail_sender,
    recipients: &config.recipients,
    streams: &streams,
    versions: &versions,
    changelogs: &changelogs,
    joiner: &config.joiner,
  };
  let message = summary.compose(chrono::Local::now().fixed_offset());
  let wire = message.to_wire();

  match output {
    Some(path) => {
      fs::write(&path, &wire).with_context(|| format!("Failed to write message to {}", path.display()))?;
      println!("✅ Wrote notification for {} recipient(s) to {}", message.recipients.len(), path.display());
    }
    None => println!("{}", wire),
  }

  Ok(())
}
