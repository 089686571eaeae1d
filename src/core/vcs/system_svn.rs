//! System svn backend
//!
//! Shells out to the `svn` client for every query. Each invocation:
//! - runs with an isolated environment and a C locale so headers stay parseable
//! - is bounded by the configured timeout
//! - owns its child process through a guard that kills and reaps it on every exit path

use super::{LogQuery, LogSource};
use crate::core::config::SvnConfig;
use crate::core::error::{MailError, MailResult, ResultExt, SvnError};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Log backend using the system svn client
pub struct SystemSvn {
  binary: String,
  timeout: Duration,
}

impl SystemSvn {
  pub fn new(config: &SvnConfig) -> Self {
    Self {
      binary: config.binary.clone(),
      timeout: Duration::from_secs(config.timeout_secs),
    }
  }

  /// Build the `svn log` argument list for a query
  pub(crate) fn log_args(path: &str, query: &LogQuery) -> Vec<String> {
    let mut args = vec!["log".to_string(), "--non-interactive".to_string(), path.to_string()];

    if let Some(limit) = query.limit {
      args.push("-l".to_string());
      args.push(limit.to_string());
    }
    if let Some(search) = &query.search {
      args.push("--search".to_string());
      args.push(search.clone());
    }
    if let Some(range) = query.range {
      args.push(format!("-r{}:{}", range.from, range.to));
    }

    args
  }

  /// Create a safe svn command with isolated environment
  ///
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Forces the C locale (header and line-count text must not be translated)
  fn svn_cmd(&self) -> Command {
    let mut cmd = Command::new(&self.binary);

    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }
    cmd.env("LC_ALL", "C");

    cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
    cmd
  }

  fn run(&self, args: &[String]) -> MailResult<String> {
    let command = format!("{} {}", self.binary, args.join(" "));
    tracing::debug!(%command, timeout_secs = self.timeout.as_secs(), "running svn");

    let child = self.svn_cmd().args(args).spawn().map_err(|e| {
      MailError::Svn(SvnError::CommandFailed {
        command: command.clone(),
        stderr: e.to_string(),
      })
    })?;
    let mut guard = ChildGuard::new(child);

    let stdout = guard.drain_stdout();
    let stderr = guard.drain_stderr();

    let deadline = Instant::now() + self.timeout;
    let status = loop {
      if let Some(status) = guard.try_wait().context("Failed to poll svn process")? {
        break status;
      }
      if Instant::now() >= deadline {
        tracing::warn!(%command, "svn timed out, killing");
        return Err(MailError::Svn(SvnError::CommandTimedOut {
          command,
          timeout_secs: self.timeout.as_secs(),
        }));
      }
      thread::sleep(POLL_INTERVAL);
    };

    let stdout = join_reader(stdout)?;
    let stderr = join_reader(stderr)?;

    if !status.success() {
      return Err(MailError::Svn(SvnError::CommandFailed {
        command,
        stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&stdout).into_owned())
  }
}

impl LogSource for SystemSvn {
  fn log(&self, path: &str, query: &LogQuery) -> MailResult<String> {
    self.run(&Self::log_args(path, query))
  }
}

type Reader = Option<JoinHandle<std::io::Result<Vec<u8>>>>;

/// Kills and reaps the child unless it already exited
struct ChildGuard {
  child: Child,
  finished: bool,
}

impl ChildGuard {
  fn new(child: Child) -> Self {
    Self { child, finished: false }
  }

  fn try_wait(&mut self) -> std::io::Result<Option<std::process::ExitStatus>> {
    let status = self.child.try_wait()?;
    self.finished = status.is_some();
    Ok(status)
  }

  // Pipes are drained on their own threads so a chatty child cannot block on a full pipe
  fn drain_stdout(&mut self) -> Reader {
    self.child.stdout.take().map(spawn_reader)
  }

  fn drain_stderr(&mut self) -> Reader {
    self.child.stderr.take().map(spawn_reader)
  }
}

impl Drop for ChildGuard {
  fn drop(&mut self) {
    if !self.finished {
      let _ = self.child.kill();
      let _ = self.child.wait();
    }
  }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<std::io::Result<Vec<u8>>> {
  thread::spawn(move || {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(buf)
  })
}

fn join_reader(reader: Reader) -> MailResult<Vec<u8>> {
  match reader {
    Some(handle) => handle
      .join()
      .map_err(|_| MailError::message("svn output reader panicked"))?
      .context("Failed to read svn output"),
    None => Ok(Vec::new()),
  }
}
