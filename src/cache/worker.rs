//! Install/activate/fetch lifecycle of the offline cache worker.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::cache::bucket::{bucket_name, BucketStore};
use crate::cache::clients::ClientRegistry;
use crate::cache::entry::CachedEntry;
use crate::cache::fetch::{FetchError, FetchRequest, FetchResponse, NetworkFetcher};
use crate::cache::policy::{FetchStrategy, RequestClass};

/// Lifecycle states of a worker version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
  /// Constructed but not yet installed.
  New,
  /// Precaching the manifest.
  Installing,
  /// Precache complete, eligible for immediate activation.
  Installed,
  /// Evicting stale buckets and claiming clients.
  Activating,
  /// Steady state, serving intercepted requests.
  Active,
  /// Superseded, or failed to install; a previous version stays active.
  Redundant,
}

/// Errors from the worker lifecycle operations.
///
/// A failed precache is the only fatal failure path in the component; every
/// runtime fetch failure is absorbed by [`OfflineWorker::handle_fetch`].
#[derive(Debug, Error)]
pub enum WorkerError {
  /// A precache manifest entry could not be fetched at all.
  #[error("precache fetch for '{path}' failed: {source}")]
  PrecacheFetch {
    /// Manifest path that failed.
    path: String,
    /// Transport failure that aborted the install.
    #[source]
    source: FetchError,
  },
  /// A precache manifest entry answered with a non-200 status.
  #[error("precache fetch for '{path}' returned HTTP {status}")]
  PrecacheStatus {
    /// Manifest path that failed.
    path: String,
    /// Status the server answered with.
    status: u16,
  },
  /// A precache manifest path does not resolve under the site origin.
  #[error("precache path '{path}' is not a valid path under the site origin")]
  InvalidPrecachePath {
    /// Offending manifest path.
    path: String,
  },
  /// A lifecycle operation was attempted from the wrong state.
  #[error("operation not permitted from worker state {0:?}")]
  WrongState(WorkerState),
}

/// Outcome of offering an intercepted request to the worker.
#[derive(Debug)]
pub enum FetchOutcome {
  /// The worker produced a response: cached, live, or synthesized.
  Handled(FetchResponse),
  /// Non-GET or cross-origin request; the caller performs its own fetch.
  Bypass,
}

/// What an activation did to the bucket store and the open pages.
#[derive(Debug)]
pub struct ActivationSummary {
  /// Stale same-prefix buckets that were destroyed.
  pub evicted: Vec<String>,
  /// Open pages whose controller switched to this worker version.
  pub claimed: usize,
}

/// Static configuration for one worker version.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
  /// Prefix shared by every cache bucket this app owns.
  pub bucket_prefix: String,
  /// Cache version; bumping it invalidates all previous buckets on the next
  /// activation.
  pub cache_version: String,
  /// Origin the worker serves; requests elsewhere are bypassed.
  pub origin: Url,
  /// Paths fetched and stored unconditionally at install time.
  pub precache_paths: Vec<String>,
}

impl WorkerConfig {
  /// Name of the current-version bucket.
  pub fn bucket(&self) -> String {
    bucket_name(&self.bucket_prefix, &self.cache_version)
  }
}

/// The offline cache worker.
///
/// Holds an explicitly passed bucket-store handle rather than reaching for
/// ambient global state, and a [`NetworkFetcher`] for live traffic. Lifecycle
/// methods take `&mut self`; request handling is `&self` and safe to call
/// from concurrent tasks.
pub struct OfflineWorker<F> {
  config: WorkerConfig,
  store: Arc<RwLock<BucketStore>>,
  clients: Arc<RwLock<ClientRegistry>>,
  fetcher: Arc<F>,
  state: WorkerState,
}

impl<F: NetworkFetcher + 'static> OfflineWorker<F> {
  /// Create a worker over the given store handle, client registry and
  /// transport.
  pub fn new(
    config: WorkerConfig,
    store: Arc<RwLock<BucketStore>>,
    clients: Arc<RwLock<ClientRegistry>>,
    fetcher: Arc<F>,
  ) -> Self {
    Self {
      config,
      store,
      clients,
      fetcher,
      state: WorkerState::New,
    }
  }

  /// Current lifecycle state.
  pub fn state(&self) -> WorkerState {
    self.state
  }

  /// The worker's static configuration.
  pub fn config(&self) -> &WorkerConfig {
    &self.config
  }

  /// Fetch and store every precache manifest entry.
  ///
  /// All entries are fetched before any is stored, so a failing entry aborts
  /// the install with no partial precache and the worker becomes redundant
  /// while the previous version stays active. On success the worker is
  /// `Installed` and immediately eligible for [`OfflineWorker::activate`];
  /// there is no waiting phase for old instances to release their pages.
  pub async fn install(&mut self) -> Result<(), WorkerError> {
    if self.state != WorkerState::New {
      return Err(WorkerError::WrongState(self.state));
    }
    self.state = WorkerState::Installing;

    match self.precache().await {
      Ok(stored) => {
        self.state = WorkerState::Installed;
        info!(
          bucket = %self.config.bucket(),
          entries = stored,
          "offline worker installed"
        );
        Ok(())
      }
      Err(err) => {
        self.state = WorkerState::Redundant;
        warn!(error = %err, "install aborted, previous worker version stays active");
        Err(err)
      }
    }
  }

  async fn precache(&self) -> Result<usize, WorkerError> {
    let mut fetched = Vec::with_capacity(self.config.precache_paths.len());

    for path in &self.config.precache_paths {
      let url = self
        .config
        .origin
        .join(path)
        .map_err(|_| WorkerError::InvalidPrecachePath { path: path.clone() })?;
      let request = FetchRequest::get(url);

      let response =
        self
          .fetcher
          .fetch(&request)
          .await
          .map_err(|source| WorkerError::PrecacheFetch {
            path: path.clone(),
            source,
          })?;
      if !response.is_success() {
        return Err(WorkerError::PrecacheStatus {
          path: path.clone(),
          status: response.status,
        });
      }

      fetched.push((request.cache_key(), CachedEntry::snapshot(&request, &response)));
    }

    let stored = fetched.len();
    let mut store = self.store.write().await;
    let bucket = store.open(&self.config.bucket());
    for (key, entry) in fetched {
      bucket.put(key, entry);
    }

    Ok(stored)
  }

  /// Evict stale buckets and claim the open pages.
  ///
  /// Every bucket whose name carries this app's prefix but is not the
  /// current version is destroyed; buckets under a different prefix are left
  /// untouched. All registered clients are then pointed at this worker so
  /// they stop routing through a previous instance.
  pub async fn activate(&mut self) -> Result<ActivationSummary, WorkerError> {
    if self.state != WorkerState::Installed {
      return Err(WorkerError::WrongState(self.state));
    }
    self.state = WorkerState::Activating;

    let current = self.config.bucket();
    let own_prefix = format!("{}-", self.config.bucket_prefix);

    let evicted = {
      let mut store = self.store.write().await;
      let stale: Vec<String> = store
        .names()
        .into_iter()
        .filter(|name| name.starts_with(&own_prefix) && *name != current)
        .collect();
      for name in &stale {
        store.delete(name);
        debug!(bucket = %name, "evicted stale cache bucket");
      }
      stale
    };

    let claimed = self.clients.write().await.claim_all(&current);

    self.state = WorkerState::Active;
    info!(
      bucket = %current,
      evicted = evicted.len(),
      claimed,
      "offline worker active"
    );

    Ok(ActivationSummary { evicted, claimed })
  }

  /// Mark the worker as superseded by a newer version.
  pub fn retire(&mut self) {
    self.state = WorkerState::Redundant;
  }

  /// Serve one intercepted request.
  ///
  /// Non-GET methods and cross-origin requests are bypassed entirely. For
  /// everything else the two-variant policy applies: a cached static asset is
  /// served without touching the network; documents (and cache misses) go to
  /// the live network first. Successful 200 responses are snapshotted into
  /// the current bucket by a detached task the response path never waits on.
  /// Transport failures fall back to the cached entry when one exists and to
  /// a synthesized 503 placeholder otherwise; no failure escapes as an error.
  pub async fn handle_fetch(&self, request: &FetchRequest) -> FetchOutcome {
    if !request.is_get() || !self.same_origin(&request.url) {
      return FetchOutcome::Bypass;
    }

    let key = request.cache_key();
    let bucket = self.config.bucket();
    let cached = {
      let store = self.store.read().await;
      store
        .get(&bucket)
        .and_then(|bucket| bucket.lookup(&key))
        .cloned()
    };

    if let (Some(entry), FetchStrategy::CacheFirst) =
      (&cached, RequestClass::of(request).strategy())
    {
      debug!(url = %request.url, "serving static asset from cache");
      return FetchOutcome::Handled(entry.to_response());
    }

    match self.fetcher.fetch(request).await {
      Ok(response) => {
        if response.is_success() {
          self.store_in_background(key, CachedEntry::snapshot(request, &response));
        }
        FetchOutcome::Handled(response)
      }
      Err(err) => match cached {
        Some(entry) => {
          debug!(url = %request.url, error = %err, "network failed, serving stale cache entry");
          FetchOutcome::Handled(entry.to_response())
        }
        None => {
          warn!(url = %request.url, error = %err, "network failed with no cached fallback");
          FetchOutcome::Handled(FetchResponse::service_unavailable())
        }
      },
    }
  }

  /// Store a snapshot without blocking the response path.
  ///
  /// The task is deliberately detached: the response has already been handed
  /// to the client, and a lost store only costs one future network fetch.
  fn store_in_background(&self, key: String, entry: CachedEntry) {
    let store = Arc::clone(&self.store);
    let bucket = self.config.bucket();
    tokio::spawn(async move {
      store.write().await.open(&bucket).put(key.clone(), entry);
      debug!(bucket = %bucket, key = %key, "stored response snapshot");
    });
  }

  fn same_origin(&self, url: &Url) -> bool {
    url.origin() == self.config.origin.origin()
  }
}
