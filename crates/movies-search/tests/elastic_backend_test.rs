//! Integration tests for ElasticSearchBackend.
//!
//! These tests run against a wiremock server standing in for Elasticsearch.

use movies_config::SearchConfig;
use movies_core::MoviesError;
use movies_search::{ElasticSearchBackend, SearchBackend};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> ElasticSearchBackend {
    let config = SearchConfig {
        url: server.uri(),
        films_index: "movies".to_string(),
        request_timeout_secs: 5,
    };
    ElasticSearchBackend::new(&config).expect("Failed to build backend")
}

#[tokio::test]
async fn test_batch_get_sends_ids_and_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/movies/_mget"))
        .and(query_param("_source_includes", "uuid,title,imdb_rating"))
        .and(body_json(json!({"ids": ["f1", "f2"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [
                {"_index": "movies", "_id": "f1", "found": true,
                 "_source": {"uuid": "f1", "title": "Alien", "imdb_rating": 8.5}},
                {"_index": "movies", "_id": "f2", "found": false}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let fields = vec!["uuid".to_string(), "title".to_string(), "imdb_rating".to_string()];
    let docs = backend
        .batch_get("movies", &["f1".to_string(), "f2".to_string()], &fields)
        .await
        .expect("mget failed");

    assert_eq!(docs.len(), 2);
    assert!(docs[0].found);
    assert_eq!(docs[0].id, "f1");
    assert_eq!(docs[0].source["title"], "Alien");
    assert!(!docs[1].found);
}

#[tokio::test]
async fn test_search_returns_sources_in_hit_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/movies/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": {
                "total": {"value": 2},
                "hits": [
                    {"_id": "b", "_source": {"title": "B"}},
                    {"_id": "a", "_source": {"title": "A"}}
                ]
            }
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let docs = backend
        .search("movies", &json!({"query": {"match_all": {}}}))
        .await
        .expect("search failed");

    assert_eq!(docs, vec![json!({"title": "B"}), json!({"title": "A"})]);
}

#[tokio::test]
async fn test_server_error_maps_to_external_service() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/movies/_mget"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend
        .batch_get("movies", &["f1".to_string()], &["title".to_string()])
        .await
        .unwrap_err();

    match err {
        MoviesError::ExternalService { service, message } => {
            assert_eq!(service, "elasticsearch");
            assert!(message.contains("503"));
        }
        other => panic!("Expected ExternalService error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_cluster/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "green"})))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    assert!(backend.health_check().await.is_ok());
}

#[tokio::test]
async fn test_health_check_fails_on_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_cluster/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    assert!(backend.health_check().await.is_err());
}
