use serde::Serialize;
use std::fmt;

/// Product lines published to the drop directory
///
/// Declaration order is the fixed reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Product {
  Dispense,
  Office,
  Register,
  Scheduler,
}

impl Product {
  pub const ALL: [Product; 4] = [Product::Dispense, Product::Office, Product::Register, Product::Scheduler];

  /// Filename prefix identifying this product's artifacts
  pub fn token(&self) -> &'static str {
    match self {
      Self::Dispense => "Dispense",
      Self::Office => "Office",
      Self::Register => "Register",
      Self::Scheduler => "Scheduler",
    }
  }

  /// Bucket an artifact name; the first product whose token prefixes it wins
  pub fn classify(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|p| name.starts_with(p.token()))
  }
}

impl fmt::Display for Product {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.token())
  }
}
