//! Cached request/response snapshots.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cache::fetch::{FetchRequest, FetchResponse};

/// Snapshot of a successfully fetched response, keyed by request identity.
///
/// Entries are only ever created for HTTP 200 responses to same-origin GET
/// requests; the worker enforces both rules before snapshotting. The
/// serialized form encodes the body as base64 so snapshots survive JSON
/// round-trips for inspection and debugging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedEntry {
  /// Request URL the snapshot answers.
  pub url: String,
  /// Request method, always a read-only retrieval.
  pub method: String,
  /// Response status at snapshot time.
  pub status: u16,
  /// Response headers at snapshot time.
  pub headers: HashMap<String, String>,
  /// Response body bytes.
  #[serde(with = "body_encoding")]
  pub body: Vec<u8>,
}

impl CachedEntry {
  /// Snapshot a response for storage in a cache bucket.
  pub fn snapshot(request: &FetchRequest, response: &FetchResponse) -> Self {
    Self {
      url: request.url.to_string(),
      method: request.method.to_ascii_uppercase(),
      status: response.status,
      headers: response.headers.clone(),
      body: response.body.clone(),
    }
  }

  /// Rehydrate the snapshot into a servable response.
  pub fn to_response(&self) -> FetchResponse {
    FetchResponse {
      status: self.status,
      status_text: "OK".to_string(),
      headers: self.headers.clone(),
      body: self.body.clone(),
      from_cache: true,
    }
  }
}

mod body_encoding {
  use base64::engine::general_purpose::STANDARD;
  use base64::Engine as _;
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD.decode(encoded).map_err(serde::de::Error::custom)
  }
}
