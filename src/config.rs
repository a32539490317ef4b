//! Site configuration loader for the offline tooling.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::cache::WorkerConfig;
use crate::locale::Locale;
use crate::manifest::PrecacheManifest;

const DEFAULT_CONFIG_FILE: &str = "site.config.json";

/// Discoverable configuration describing the site layout and cache policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
  /// Prefix shared by every cache bucket the site owns.
  pub bucket_prefix: String,
  /// Cache version; bump to force full invalidation on the next activation.
  pub cache_version: String,
  /// Origin the offline worker serves.
  pub site_origin: String,
  /// Paths fetched and stored unconditionally at install time.
  pub precache_paths: Vec<String>,
  /// Directory containing the authored markdown content.
  pub content_dir: String,
  /// File extension of authored pages.
  pub markdown_extension: String,
  /// Words-per-minute rate for reading-time estimates.
  pub words_per_minute: usize,
  /// Locale applied when a content path has no recognized locale segment.
  pub default_locale: Locale,
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      bucket_prefix: "blog".into(),
      cache_version: "v1".into(),
      site_origin: "http://localhost:8080".into(),
      precache_paths: vec![
        "/".into(),
        "/css/index.css".into(),
        "/manifest.webmanifest".into(),
        "/favicon.ico".into(),
        "/icons/icon-192.png".into(),
        "/icons/icon-512.png".into(),
      ],
      content_dir: "content".into(),
      markdown_extension: "md".into(),
      words_per_minute: 200,
      default_locale: Locale::EnUs,
    }
  }
}

impl SiteConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// When the configuration file does not exist or fails to parse we fall
  /// back to default values so downstream callers can continue operating
  /// with sensible assumptions.
  pub fn discover(root: &Path) -> Self {
    let candidate = root.join(DEFAULT_CONFIG_FILE);
    Self::from_path(&candidate).unwrap_or_default()
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
  }

  /// Parsed site origin.
  pub fn origin_url(&self) -> Result<Url, url::ParseError> {
    Url::parse(&self.site_origin)
  }

  /// Path to the authored content relative to the given root.
  pub fn content_dir_path(&self, root: &Path) -> PathBuf {
    root.join(&self.content_dir)
  }

  /// Build the worker configuration for a precache manifest.
  pub fn worker_config(&self, manifest: &PrecacheManifest) -> anyhow::Result<WorkerConfig> {
    use anyhow::Context;

    let origin = self
      .origin_url()
      .with_context(|| format!("invalid site origin '{}'", self.site_origin))?;

    Ok(WorkerConfig {
      bucket_prefix: self.bucket_prefix.clone(),
      cache_version: self.cache_version.clone(),
      origin,
      precache_paths: manifest.paths().to_vec(),
    })
  }
}
