//! Search backend trait definitions.

use async_trait::async_trait;
use movies_core::MoviesResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a batched lookup response.
///
/// Entries come back in request order; ids the backend does not hold are
/// reported with `found == false` and an empty `source`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchGetDoc {
    /// Document identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Whether the document exists.
    #[serde(default)]
    pub found: bool,
    /// The requested fields of the document.
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
}

impl BatchGetDoc {
    /// Creates a found document.
    #[must_use]
    pub fn found(id: impl Into<String>, source: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            found: true,
            source,
        }
    }

    /// Creates a not-found marker.
    #[must_use]
    pub fn missing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            found: false,
            source: Map::new(),
        }
    }
}

/// Search backend interface.
///
/// Failures are reported as `MoviesError::ExternalService` and are never
/// retried at this level.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Fetches several documents by id in one round trip, restricted to
    /// `fields`.
    async fn batch_get(&self, index: &str, ids: &[String], fields: &[String]) -> MoviesResult<Vec<BatchGetDoc>>;

    /// Runs a search request and returns the matching documents' sources.
    async fn search(&self, index: &str, query: &Value) -> MoviesResult<Vec<Value>>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> MoviesResult<()>;

    /// Releases the client.
    async fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_found_doc() {
        let doc: BatchGetDoc = serde_json::from_value(json!({
            "_index": "movies",
            "_id": "f1",
            "found": true,
            "_source": {"title": "Alien"}
        }))
        .unwrap();
        assert!(doc.found);
        assert_eq!(doc.source["title"], "Alien");
    }

    #[test]
    fn test_deserialize_missing_doc() {
        let doc: BatchGetDoc = serde_json::from_value(json!({"_index": "movies", "_id": "f2", "found": false})).unwrap();
        assert_eq!(doc, BatchGetDoc::missing("f2"));
    }

    #[test]
    fn test_deserialize_error_entry_counts_as_missing() {
        let doc: BatchGetDoc = serde_json::from_value(json!({
            "_index": "nope",
            "_id": "f3",
            "error": {"type": "index_not_found_exception"}
        }))
        .unwrap();
        assert!(!doc.found);
    }
}
