//! Release notification composition
//!
//! Combines resolved versions and extracted changelogs into an HTML mail with
//! headers, ready to be handed to a mail transport.

use crate::catalog::{Product, ResolvedVersions};
use crate::changelog::Changelog;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

const VERSION_COLOR: &str = "#2ED03C";
const MISSING_VERSION: &str = "n/a";

/// A fully composed notification
#[derive(Debug, Clone, Serialize)]
pub struct NotificationMessage {
  pub subject: String,
  pub headers: Vec<(String, String)>,
  pub recipients: Vec<String>,
  pub body: String,
}

impl NotificationMessage {
  /// Headers as CRLF lines, a blank line, then the body
  pub fn to_wire(&self) -> String {
    let mut message = String::new();
    for (name, value) in &self.headers {
      message.push_str(&format!("{}: {}\r\n", name, value));
    }
    message.push_str("\r\n");
    message.push_str(&self.body);
    message
  }
}

/// Inputs for one notification
pub struct Summary<'a> {
  pub sender_name: &'a str,
  pub sender: &'a str,
  pub recipients: &'a [String],
  /// Release streams named on the command line
  pub streams: &'a [String],
  pub versions: &'a ResolvedVersions,
  /// Changelogs in display order
  pub changelogs: &'a [(Product, Changelog)],
  pub joiner: &'a str,
}

impl Summary<'_> {
  pub fn compose(&self, now: DateTime<FixedOffset>) -> NotificationMessage {
    let subject = format!("Software Update Release {}", now.format("%m/%d/%Y"));
    let body = self.body();

    let headers = vec![
      ("From".to_string(), format!("\"{}\" <{}>", self.sender_name, self.sender)),
      ("To".to_string(), self.to_header()),
      ("Date".to_string(), now.format("%a, %-d %b %Y %H:%M:%S %z").to_string()),
      ("Subject".to_string(), subject.clone()),
      ("MIME-Version".to_string(), "1.0".to_string()),
      ("Content-Type".to_string(), "text/html; charset=UTF-8".to_string()),
    ];

    NotificationMessage {
      subject,
      headers,
      recipients: self.recipients.to_vec(),
      body,
    }
  }

  fn to_header(&self) -> String {
    self
      .recipients
      .iter()
      .map(|r| format!("<{}>", r))
      .collect::<Vec<_>>()
      .join(", ")
  }

  fn greeting(&self) -> String {
    let mut greet = String::from("Hi All, <br>The latest software update has been pushed to ");
    if self.streams.is_empty() {
      greet.push_str("test ");
    } else {
      for stream in self.streams {
        greet.push_str(stream);
        greet.push_str(", ");
      }
    }
    greet.push_str("streams.");
    greet
  }

  fn body(&self) -> String {
    let mut body = String::from("<span style=\"font-family: Calibri, sans-serif; font-size: 15;\">");
    body.push('\n');
    body.push_str(&self.greeting());
    body.push_str("\n\n<br><br><u>The latest software versions are:</u>");

    for product in Product::ALL {
      let version = self.versions.get(product).unwrap_or(MISSING_VERSION);
      body.push_str(&format!(
        "\n<br><strong>{}: </strong><span style=\"color:{}\">{}</span>",
        product, VERSION_COLOR, version
      ));
    }

    for (product, changelog) in self.changelogs {
      body.push_str(&format!("\n<br><br><u>{} Changelog: </u>", product));
      body.push_str("\n<br>");
      body.push_str(&changelog.render(self.joiner));
    }

    body.push_str("\n\n<br><br>Thanks, <br>build-bot</span><br><br>P.S. Dont reply to me I'm a bot.");
    body
  }
}
