//! Versioned cache buckets and the store handle that owns them.

use std::collections::BTreeMap;

use crate::cache::entry::CachedEntry;

/// Compose the bucket name for an app prefix and cache version.
///
/// Bumping the version forces full invalidation the next time a worker
/// activates.
pub fn bucket_name(prefix: &str, version: &str) -> String {
  format!("{prefix}-{version}")
}

/// A named, versioned collection of cached request/response pairs.
#[derive(Debug, Clone, Default)]
pub struct CacheBucket {
  name: String,
  entries: BTreeMap<String, CachedEntry>,
}

impl CacheBucket {
  /// Create an empty bucket with the given name.
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      entries: BTreeMap::new(),
    }
  }

  /// Name of the bucket, in `<prefix>-<version>` form.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Look up an entry by its request identity key.
  pub fn lookup(&self, key: &str) -> Option<&CachedEntry> {
    self.entries.get(key)
  }

  /// Insert or replace an entry.
  pub fn put(&mut self, key: String, entry: CachedEntry) {
    self.entries.insert(key, entry);
  }

  /// Remove an entry, reporting whether it existed.
  pub fn delete(&mut self, key: &str) -> bool {
    self.entries.remove(key).is_some()
  }

  /// Identity keys of every stored entry, in sorted order.
  pub fn keys(&self) -> Vec<&str> {
    self.entries.keys().map(String::as_str).collect()
  }

  /// Number of stored entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Whether the bucket holds no entries.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// The cache-bucket handle handed to a worker at construction.
///
/// The store is plain data; callers decide how it is shared (the worker wraps
/// it in `Arc<RwLock>`). Individual operations are atomic under that lock, so
/// no further coordination is needed.
#[derive(Debug, Default)]
pub struct BucketStore {
  buckets: BTreeMap<String, CacheBucket>,
}

impl BucketStore {
  /// Create an empty store.
  pub fn new() -> Self {
    Self::default()
  }

  /// Open a bucket, creating it when absent.
  pub fn open(&mut self, name: &str) -> &mut CacheBucket {
    self
      .buckets
      .entry(name.to_string())
      .or_insert_with(|| CacheBucket::new(name))
  }

  /// Borrow a bucket without creating it.
  pub fn get(&self, name: &str) -> Option<&CacheBucket> {
    self.buckets.get(name)
  }

  /// Whether a bucket with the given name exists.
  pub fn has(&self, name: &str) -> bool {
    self.buckets.contains_key(name)
  }

  /// Destroy a bucket and everything in it, reporting whether it existed.
  pub fn delete(&mut self, name: &str) -> bool {
    self.buckets.remove(name).is_some()
  }

  /// Names of every bucket, in sorted order.
  pub fn names(&self) -> Vec<String> {
    self.buckets.keys().cloned().collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::fetch::{FetchRequest, FetchResponse};
  use url::Url;

  fn entry(path: &str) -> (String, CachedEntry) {
    let url = Url::parse("https://example.com").unwrap().join(path).unwrap();
    let request = FetchRequest::get(url);
    let response = FetchResponse::ok("asset", "text/plain");
    (request.cache_key(), CachedEntry::snapshot(&request, &response))
  }

  #[test]
  fn composes_versioned_bucket_names() {
    assert_eq!(bucket_name("blog", "v3"), "blog-v3");
  }

  #[test]
  fn buckets_store_and_evict_entries() {
    let mut bucket = CacheBucket::new("blog-v1");
    let (key, value) = entry("/css/index.css");

    bucket.put(key.clone(), value);
    assert!(bucket.lookup(&key).is_some());
    assert_eq!(bucket.len(), 1);

    assert!(bucket.delete(&key));
    assert!(!bucket.delete(&key));
    assert!(bucket.is_empty());
  }

  #[test]
  fn store_opens_buckets_on_demand() {
    let mut store = BucketStore::new();
    assert!(!store.has("blog-v1"));

    store.open("blog-v1");
    assert!(store.has("blog-v1"));
    assert_eq!(store.names(), vec!["blog-v1".to_string()]);

    assert!(store.delete("blog-v1"));
    assert!(!store.has("blog-v1"));
  }

  #[test]
  fn reopening_a_bucket_keeps_its_entries() {
    let mut store = BucketStore::new();
    let (key, value) = entry("/manifest.webmanifest");

    store.open("blog-v1").put(key.clone(), value);
    assert!(store.open("blog-v1").lookup(&key).is_some());
  }
}
