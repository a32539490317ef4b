//! Request/response types and the transport seam used by the offline worker.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Errors surfaced by a [`NetworkFetcher`] when a live fetch cannot complete.
///
/// The worker never propagates these to its caller; they only select the
/// fallback path (stale cache entry or synthesized placeholder).
#[derive(Debug, Clone, Error)]
pub enum FetchError {
  /// Transport-level failure: offline, DNS resolution, connection reset.
  #[error("network unreachable: {0}")]
  Unreachable(String),
  /// The transport's own timeout elapsed before a response arrived.
  #[error("request timed out")]
  TimedOut,
}

/// A request intercepted by the offline worker.
#[derive(Debug, Clone)]
pub struct FetchRequest {
  /// Absolute request URL.
  pub url: Url,
  /// HTTP method; only GET requests are ever served or cached.
  pub method: String,
  /// Whether the request navigates to a new document.
  pub is_navigation: bool,
}

impl FetchRequest {
  /// A plain GET request for a sub-resource.
  pub fn get(url: Url) -> Self {
    Self {
      url,
      method: "GET".to_string(),
      is_navigation: false,
    }
  }

  /// A GET request that navigates to a new document.
  pub fn navigation(url: Url) -> Self {
    Self {
      is_navigation: true,
      ..Self::get(url)
    }
  }

  /// Whether the request uses a read-only retrieval method.
  pub fn is_get(&self) -> bool {
    self.method.eq_ignore_ascii_case("GET")
  }

  /// Identity key for cache lookups: method plus exact URL.
  pub(crate) fn cache_key(&self) -> String {
    format!("{} {}", self.method.to_ascii_uppercase(), self.url)
  }
}

/// A response as delivered to the client page.
#[derive(Debug, Clone)]
pub struct FetchResponse {
  /// HTTP status code.
  pub status: u16,
  /// Status line reason phrase.
  pub status_text: String,
  /// Response headers.
  pub headers: HashMap<String, String>,
  /// Response body bytes.
  pub body: Vec<u8>,
  /// Whether the response was rehydrated from a cache bucket.
  pub from_cache: bool,
}

impl FetchResponse {
  /// A successful response with the given body and content type.
  pub fn ok(body: impl Into<Vec<u8>>, content_type: &str) -> Self {
    let mut headers = HashMap::new();
    headers.insert("content-type".to_string(), content_type.to_string());
    Self {
      status: 200,
      status_text: "OK".to_string(),
      headers,
      body: body.into(),
      from_cache: false,
    }
  }

  /// Placeholder served when neither the cache nor the network can answer.
  ///
  /// Requests never hang or reject; this is the floor of the degradation
  /// path.
  pub fn service_unavailable() -> Self {
    let mut headers = HashMap::new();
    headers.insert(
      "content-type".to_string(),
      "text/html; charset=utf-8".to_string(),
    );
    Self {
      status: 503,
      status_text: "Service Unavailable".to_string(),
      headers,
      body: OFFLINE_PLACEHOLDER.as_bytes().to_vec(),
      from_cache: false,
    }
  }

  /// Whether the response carries an HTTP 200 status.
  pub fn is_success(&self) -> bool {
    self.status == 200
  }
}

const OFFLINE_PLACEHOLDER: &str = "<!doctype html>\n<html>\n  <head>\n    <meta charset=\"utf-8\">\n    <title>Offline</title>\n  </head>\n  <body>\n    <h1>503</h1>\n    <p>This page is not available offline yet.</p>\n  </body>\n</html>\n";

/// Transport seam used by the worker for live fetches.
///
/// Production wires this to a real HTTP client; tests drive the worker with a
/// scripted implementation. No cancellation or timeout is layered on top;
/// implementations rely on their transport's own behaviour.
#[async_trait]
pub trait NetworkFetcher: Send + Sync {
  /// Perform a live network fetch for the request.
  async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cache_keys_combine_method_and_url() {
    let url = Url::parse("https://example.com/css/index.css").unwrap();
    let request = FetchRequest::get(url);
    assert_eq!(
      request.cache_key(),
      "GET https://example.com/css/index.css"
    );
  }

  #[test]
  fn placeholder_is_a_servable_html_document() {
    let response = FetchResponse::service_unavailable();
    assert_eq!(response.status, 503);
    assert_eq!(response.status_text, "Service Unavailable");
    assert!(!response.from_cache);
    assert!(String::from_utf8(response.body).unwrap().contains("503"));
  }

  #[test]
  fn method_check_is_case_insensitive() {
    let url = Url::parse("https://example.com/").unwrap();
    let mut request = FetchRequest::get(url);
    request.method = "get".to_string();
    assert!(request.is_get());
    request.method = "POST".to_string();
    assert!(!request.is_get());
  }
}
