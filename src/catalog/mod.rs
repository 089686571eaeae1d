//! Artifact catalog and version resolution
//!
//! Scans the build drop directory, buckets artifact names by product prefix and
//! picks the lexicographically greatest name per product as its latest build.
//!
//! Producers must name artifacts so that lexicographic order is version order
//! (zero-padded date or version segments). `Office-10.zip` sorts before
//! `Office-9.zip`; that is a naming contract, not something resolved here.

pub mod product;

pub use product::Product;

use crate::core::config::TrimMode;
use crate::core::error::{CatalogError, MailError, MailResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One directory-listing record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactEntry {
  pub name: String,
}

/// List every entry name in the drop directory
pub fn scan(dir: &Path) -> MailResult<Vec<ArtifactEntry>> {
  let unavailable = |source: std::io::Error| {
    MailError::Catalog(CatalogError::DirectoryUnavailable {
      path: dir.to_path_buf(),
      source,
    })
  };

  let mut entries = Vec::new();
  for entry in fs::read_dir(dir).map_err(unavailable)? {
    let entry = entry.map_err(unavailable)?;
    entries.push(ArtifactEntry {
      name: entry.file_name().to_string_lossy().into_owned(),
    });
  }

  tracing::debug!(dir = %dir.display(), entries = entries.len(), "scanned artifact directory");
  Ok(entries)
}

/// Latest version per product, iterated in fixed product order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedVersions {
  versions: BTreeMap<Product, String>,
}

impl ResolvedVersions {
  pub fn get(&self, product: Product) -> Option<&str> {
    self.versions.get(&product).map(String::as_str)
  }

  #[allow(dead_code)] // Public API, exercised in tests
  pub fn iter(&self) -> impl Iterator<Item = (Product, &str)> {
    self.versions.iter().map(|(p, v)| (*p, v.as_str()))
  }

  pub fn len(&self) -> usize {
    self.versions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.versions.is_empty()
  }

  /// Versions as a bare list in product order
  ///
  /// A missing product shifts every later product down one index, so
  /// positions do not identify products. Prefer [`ResolvedVersions::get`].
  #[allow(dead_code)] // Kept for callers migrating from list indexing, tested below
  pub fn to_positional(&self) -> Vec<String> {
    self.versions.values().cloned().collect()
  }
}

/// Resolves the latest version of every product from artifact names
pub struct VersionResolver {
  trim_mode: TrimMode,
  suffix: String,
}

impl VersionResolver {
  pub fn new(trim_mode: TrimMode, suffix: impl Into<String>) -> Self {
    Self {
      trim_mode,
      suffix: suffix.into(),
    }
  }

  /// Scan `dir` and resolve versions
  pub fn resolve_dir(&self, dir: &Path) -> MailResult<ResolvedVersions> {
    let entries = scan(dir)?;
    Ok(self.resolve(&entries))
  }

  /// Resolve versions from an already scanned listing
  pub fn resolve(&self, entries: &[ArtifactEntry]) -> ResolvedVersions {
    let mut buckets: BTreeMap<Product, Vec<&str>> = BTreeMap::new();

    for entry in entries {
      if let Some(product) = Product::classify(&entry.name) {
        buckets.entry(product).or_default().push(&entry.name);
      }
    }

    let mut versions = BTreeMap::new();
    for (product, mut names) in buckets {
      names.sort_unstable_by(|a, b| b.cmp(a));
      let Some(latest) = names.first() else {
        continue;
      };
      let version = self.version_of(product, latest);
      tracing::debug!(product = %product, artifact = *latest, version = %version, "resolved latest artifact");
      versions.insert(product, version);
    }

    for product in Product::ALL {
      if !versions.contains_key(&product) {
        tracing::warn!(product = %product, "no artifacts found");
      }
    }

    ResolvedVersions { versions }
  }

  /// Strip the product prefix and artifact suffix from an artifact name
  pub fn version_of(&self, product: Product, name: &str) -> String {
    match self.trim_mode {
      TrimMode::Exact => exact_trim(name, product.token(), &self.suffix),
      TrimMode::Legacy => charset_trim(name, product.token(), &self.suffix),
    }
  }
}

/// Exact prefix slice, then one separator run, then exact suffix slice
fn exact_trim(name: &str, prefix: &str, suffix: &str) -> String {
  let rest = name.strip_prefix(prefix).unwrap_or(name);
  let rest = rest.trim_start_matches(['-', '_', ' ']);
  let rest = if suffix.is_empty() {
    rest
  } else {
    rest.strip_suffix(suffix).unwrap_or(rest)
  };
  rest.to_string()
}

/// Strip any leading/trailing characters found in `prefix`, then in `suffix`
///
/// `Office-9.zip` becomes `-9` and `Dispense-1.0p.zip` loses its trailing `p`.
fn charset_trim(name: &str, prefix: &str, suffix: &str) -> String {
  name
    .trim_matches(|c: char| prefix.contains(c))
    .trim_matches(|c: char| suffix.contains(c))
    .to_string()
}
