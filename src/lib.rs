#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod locale;
pub mod manifest;
pub mod pages;

pub use cache::{BucketStore, FetchOutcome, NetworkFetcher, OfflineWorker, WorkerConfig};
pub use config::SiteConfig;
pub use locale::Locale;
pub use manifest::PrecacheManifest;
