//! Service-worker-style offline caching for the site's request traffic.
//!
//! The submodules split the component along its seams: request/response types
//! and the transport trait, the bucket store handle, the two-variant serving
//! policy, the client registry, and the worker lifecycle that ties them
//! together.

mod bucket;
mod clients;
mod entry;
mod fetch;
mod policy;
mod worker;

pub use bucket::{bucket_name, BucketStore, CacheBucket};
pub use clients::{ClientRegistry, PageClient};
pub use entry::CachedEntry;
pub use fetch::{FetchError, FetchRequest, FetchResponse, NetworkFetcher};
pub use policy::{FetchStrategy, RequestClass};
pub use worker::{
  ActivationSummary, FetchOutcome, OfflineWorker, WorkerConfig, WorkerError, WorkerState,
};
