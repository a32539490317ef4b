//! Registry of open pages controlled by a worker version.

use std::collections::BTreeMap;

use url::Url;

/// An open page that can be claimed by an activating worker.
#[derive(Debug, Clone)]
pub struct PageClient {
  /// Stable client identifier.
  pub id: String,
  /// Document URL the page is showing.
  pub url: Url,
  /// Bucket name of the worker version currently controlling the page.
  pub controller: Option<String>,
}

impl PageClient {
  /// Register a page that is not yet controlled by any worker.
  pub fn uncontrolled(id: &str, url: Url) -> Self {
    Self {
      id: id.to_string(),
      url,
      controller: None,
    }
  }
}

/// Book-keeping for which worker version controls which open page.
#[derive(Debug, Default)]
pub struct ClientRegistry {
  clients: BTreeMap<String, PageClient>,
}

impl ClientRegistry {
  /// Create an empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Track a page.
  pub fn add(&mut self, client: PageClient) {
    self.clients.insert(client.id.clone(), client);
  }

  /// Borrow a page by identifier.
  pub fn get(&self, id: &str) -> Option<&PageClient> {
    self.clients.get(id)
  }

  /// Stop tracking a page, returning it when it existed.
  pub fn remove(&mut self, id: &str) -> Option<PageClient> {
    self.clients.remove(id)
  }

  /// Point every registered page at the given worker version.
  ///
  /// Returns how many pages changed controller; already-claimed pages are
  /// re-pointed so they immediately route through the new worker instead of
  /// a previous instance.
  pub fn claim_all(&mut self, version: &str) -> usize {
    let mut claimed = 0;
    for client in self.clients.values_mut() {
      if client.controller.as_deref() != Some(version) {
        client.controller = Some(version.to_string());
        claimed += 1;
      }
    }
    claimed
  }

  /// Number of tracked pages.
  pub fn len(&self) -> usize {
    self.clients.len()
  }

  /// Whether no pages are tracked.
  pub fn is_empty(&self) -> bool {
    self.clients.is_empty()
  }
}
