//! The precache manifest: the fixed list of paths stored at install time.

use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::locale::Locale;

/// Ordered list of paths the worker fetches and stores unconditionally when
/// it installs.
///
/// Serialized as prettified JSON so the generated manifest can be diffed and
/// inspected alongside the rest of the build output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecacheManifest {
  version: String,
  paths: Vec<String>,
}

impl PrecacheManifest {
  /// Start an empty manifest for a cache version.
  pub fn new(version: &str) -> Self {
    Self {
      version: version.to_string(),
      paths: Vec::new(),
    }
  }

  /// Build the manifest for a site: the configured precache paths plus the
  /// root document of every non-default locale.
  pub fn for_site(config: &SiteConfig) -> Self {
    let mut manifest = Self::new(&config.cache_version);
    for path in &config.precache_paths {
      manifest.push_path(path);
    }
    for locale in Locale::ALL {
      if locale != config.default_locale {
        manifest.push_path(&format!("/{}/", locale.tag()));
      }
    }
    manifest
  }

  /// Cache version the manifest was generated for.
  pub fn version(&self) -> &str {
    &self.version
  }

  /// Paths in insertion order.
  pub fn paths(&self) -> &[String] {
    &self.paths
  }

  /// Append a path, normalising it to be root-relative and skipping
  /// duplicates and references that cannot be precached.
  pub fn push_path(&mut self, path: &str) {
    if should_ignore_precache_reference(path) {
      return;
    }

    let trimmed = path.trim();
    if trimmed.is_empty() {
      return;
    }

    let normalized = if trimmed.starts_with('/') {
      trimmed.to_string()
    } else {
      format!("/{trimmed}")
    };

    if !self.paths.contains(&normalized) {
      self.paths.push(normalized);
    }
  }

  /// Append every reference from an iterator, applying the same filtering as
  /// [`PrecacheManifest::push_path`].
  pub fn extend_from_references<I>(&mut self, references: I)
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    // BTreeSet first so harvested references land in a stable order.
    let sorted: BTreeSet<String> = references
      .into_iter()
      .map(|reference| reference.as_ref().to_string())
      .collect();
    for reference in sorted {
      self.push_path(&reference);
    }
  }

  /// Serialize the manifest as prettified JSON.
  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }

  /// Read a manifest back from its JSON form.
  pub fn from_json(json: &str) -> serde_json::Result<Self> {
    serde_json::from_str(json)
  }
}

fn precache_reference_ignores() -> &'static [Regex] {
  use std::sync::OnceLock;

  static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
  PATTERNS
    .get_or_init(|| {
      vec![
        Regex::new(r"(?i)^[a-z][a-z0-9+.-]*://").expect("invalid scheme regex"),
        Regex::new(r"(?i)^data:").expect("invalid data URI regex"),
        Regex::new(r"(?i)^mailto:").expect("invalid mailto regex"),
        Regex::new(r"^//").expect("invalid protocol-relative regex"),
        Regex::new(r"^#").expect("invalid fragment regex"),
      ]
    })
    .as_slice()
}

/// Determine whether a harvested reference should be excluded from the
/// precache manifest.
///
/// External URLs, data URIs and fragment-only links require a network
/// connection or no fetch at all, so storing them would be wasted work.
pub fn should_ignore_precache_reference(value: &str) -> bool {
  precache_reference_ignores()
    .iter()
    .any(|pattern| pattern.is_match(value))
}
