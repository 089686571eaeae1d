mod catalog;
mod changelog;
mod commands;
mod core;
mod summary;

use clap::{ArgAction, Parser, Subcommand};
use crate::core::context::RunContext;
use crate::core::error::{MailError, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Compose release notifications from build drops and svn build history
#[derive(Parser)]
#[command(name = "buildmail")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Configuration file (default: search buildmail.toml, .buildmail.toml, .config/buildmail.toml, config.json)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Increase diagnostic output (-v info, -vv debug)
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compose the release notification (versions + changelogs)
  Compose {
    /// Release streams the update was pushed to (default: test)
    streams: Vec<String>,
    /// Write the composed message to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Show the latest artifact version per product
  Versions {
    /// Drop directory to scan (default: ftp_dir from config)
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show the changes between the two latest builds of a path
  Changelog {
    /// svn working copy or repository URL
    path: String,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Diagnostics go to stderr; stdout carries command output
fn init_tracing(verbose: u8) {
  let filter = match verbose {
    0 => EnvFilter::try_from_env("BUILDMAIL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    1 => EnvFilter::new("info"),
    _ => EnvFilter::new("debug"),
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let ctx = match RunContext::build(&root, cli.config.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Compose { streams, output } => commands::run_compose(&ctx, streams, output),
    Commands::Versions { dir, json } => commands::run_versions(&ctx, dir, json),
    Commands::Changelog { path, json } => commands::run_changelog(&ctx, path, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: MailError) -> ! {
  tracing::debug!(error = ?err, "run aborted");
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
