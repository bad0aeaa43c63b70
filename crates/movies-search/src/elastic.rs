//! Elasticsearch implementation of [`SearchBackend`] over its HTTP/JSON API.

use crate::{BatchGetDoc, SearchBackend};
use async_trait::async_trait;
use movies_config::SearchConfig;
use movies_core::{MoviesError, MoviesResult};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

const SERVICE: &str = "elasticsearch";

/// Elasticsearch search backend.
pub struct ElasticSearchBackend {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MgetResponse {
    docs: Vec<BatchGetDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_source", default)]
    source: Value,
}

impl ElasticSearchBackend {
    /// Creates a new backend client from configuration.
    pub fn new(config: &SearchConfig) -> MoviesResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| MoviesError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, &config.url))
    }

    /// Creates a backend around an existing HTTP client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates the backend and verifies that the node answers.
    pub async fn connect(config: &SearchConfig) -> MoviesResult<Self> {
        info!("Connecting to Elasticsearch at {}...", config.url);
        let backend = Self::new(config)?;
        backend.health_check().await?;
        info!("Elasticsearch connection established");
        Ok(backend)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: Response) -> MoviesResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(MoviesError::external(SERVICE, format!("HTTP {}: {}", status, body)))
    }
}

#[async_trait]
impl SearchBackend for ElasticSearchBackend {
    async fn batch_get(&self, index: &str, ids: &[String], fields: &[String]) -> MoviesResult<Vec<BatchGetDoc>> {
        // _mget rejects an empty id list
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!("mget {} ids from '{}' with fields {:?}", ids.len(), index, fields);

        let response = self
            .client
            .post(self.url(&format!("/{}/_mget", index)))
            .query(&[("_source_includes", fields.join(","))])
            .json(&json!({ "ids": ids }))
            .send()
            .await
            .map_err(|e| MoviesError::external(SERVICE, e))?;

        let body: MgetResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| MoviesError::external(SERVICE, format!("Invalid mget response: {}", e)))?;

        Ok(body.docs)
    }

    async fn search(&self, index: &str, query: &Value) -> MoviesResult<Vec<Value>> {
        debug!("search '{}': {}", index, query);

        let response = self
            .client
            .post(self.url(&format!("/{}/_search", index)))
            .json(query)
            .send()
            .await
            .map_err(|e| MoviesError::external(SERVICE, e))?;

        let body: SearchResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| MoviesError::external(SERVICE, format!("Invalid search response: {}", e)))?;

        Ok(body.hits.hits.into_iter().map(|hit| hit.source).collect())
    }

    async fn health_check(&self) -> MoviesResult<()> {
        let response = self
            .client
            .get(self.url("/_cluster/health"))
            .send()
            .await
            .map_err(|e| {
                warn!("Elasticsearch health check failed: {}", e);
                MoviesError::external(SERVICE, format!("Health check failed: {}", e))
            })?;
        Self::check(response).await?;
        Ok(())
    }

    async fn close(&self) {
        // reqwest drops its idle connections with the last client handle
        info!("Elasticsearch client closed");
    }
}

impl std::fmt::Debug for ElasticSearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticSearchBackend")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Creates a shared search backend.
pub async fn create_backend(config: &SearchConfig) -> MoviesResult<Arc<ElasticSearchBackend>> {
    let backend = ElasticSearchBackend::connect(config).await?;
    Ok(Arc::new(backend))
}
