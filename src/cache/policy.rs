//! Request classification driving the cache-first/network-first split.

use crate::cache::fetch::FetchRequest;

/// The two request shapes the worker distinguishes.
///
/// Documents are always tried against the live network first so online
/// visitors see fresh HTML; static assets are served straight from the cache
/// for instant repeat paint. Keeping the split as an explicit two-variant
/// policy keeps it testable independent of URL shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClass {
  /// An HTML document, the target of a navigation.
  Document,
  /// A stylesheet, image, font or other sub-resource.
  StaticAsset,
}

/// Serving order for a classified request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
  /// Serve from the cache without touching the network when an entry exists.
  CacheFirst,
  /// Attempt a live fetch before falling back to the cache.
  NetworkFirst,
}

impl RequestClass {
  /// Classify an intercepted request.
  ///
  /// Navigations are documents regardless of URL shape. Otherwise the final
  /// path segment decides: an `.html` suffix or the absence of any extension
  /// marks a document, everything else is a static asset.
  pub fn of(request: &FetchRequest) -> RequestClass {
    if request.is_navigation {
      return RequestClass::Document;
    }

    let path = request.url.path();
    let last_segment = path.rsplit('/').next().unwrap_or("");
    if last_segment.is_empty() || !last_segment.contains('.') || path.ends_with(".html") {
      RequestClass::Document
    } else {
      RequestClass::StaticAsset
    }
  }

  /// The serving strategy for this request class.
  pub fn strategy(self) -> FetchStrategy {
    match self {
      RequestClass::Document => FetchStrategy::NetworkFirst,
      RequestClass::StaticAsset => FetchStrategy::CacheFirst,
    }
  }
}
