//! Integration tests for `TeiClient` and `load_models` using wiremock HTTP mocks.

use std::io::Write;

use headline_sentiment::{load_models, Encoder, ModelConfig, SentimentError, TeiClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Three-class artifact over 2-dimensional embeddings.
const SVM_JSON: &str = r#"{
    "classes": ["Neutral", "Optimistic", "Pessimistic"],
    "coef": [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
    "intercept": [0.1, 0.0, 0.0]
}"#;

fn write_artifact(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(contents.as_bytes()).expect("write artifact");
    file
}

fn model_config(server: &MockServer, classifier: &tempfile::NamedTempFile) -> ModelConfig {
    ModelConfig {
        embedding_url: server.uri(),
        embedding_model: "/opt/huggingface_models/all-MiniLM-L6-v2".to_string(),
        embed_batch_size: 64,
        classifier_path: classifier.path().to_path_buf(),
    }
}

async fn mount_info(server: &MockServer, model_id: &str) {
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model_id": model_id,
            "model_dtype": "float32",
            "max_input_length": 256
        })))
        .mount(server)
        .await;
}

/// Mimics TEI's batch limit: 413 above `limit` inputs, otherwise one
/// `[1.0, 0.0]` vector per input.
struct LimitedEmbed {
    limit: usize,
}

impl Respond for LimitedEmbed {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).expect("json body");
        let count = body["inputs"].as_array().map_or(0, Vec::len);
        if count > self.limit {
            return ResponseTemplate::new(413);
        }
        ResponseTemplate::new(200).set_body_json(vec![[1.0, 0.0]; count])
    }
}

// ---------------------------------------------------------------------------
// TeiClient
// ---------------------------------------------------------------------------

#[tokio::test]
async fn encode_batch_returns_embeddings_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embed"))
        .and(body_partial_json(json!({"inputs": ["up", "down"], "truncate": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[1.0, 0.0], [0.0, 1.0]])))
        .expect(1)
        .mount(&server)
        .await;

    let client = TeiClient::new(&server.uri(), 64);
    let embeddings = client.encode_batch(&["up", "down"]).await.expect("embed");

    assert_eq!(embeddings, vec![vec![1.0_f32, 0.0], vec![0.0, 1.0]]);
}

#[tokio::test]
async fn encode_batch_splits_into_chunks() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embed"))
        .and(body_partial_json(json!({"inputs": ["a", "b"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[1.0], [2.0]])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .and(body_partial_json(json!({"inputs": ["c"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[3.0]])))
        .expect(1)
        .mount(&server)
        .await;

    let client = TeiClient::new(&server.uri(), 2);
    let embeddings = client.encode_batch(&["a", "b", "c"]).await.expect("embed");

    assert_eq!(embeddings, vec![vec![1.0_f32], vec![2.0], vec![3.0]]);
}

#[tokio::test]
async fn encode_single_text_returns_one_vector() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[0.5, 0.25, 0.125]])))
        .mount(&server)
        .await;

    let client = TeiClient::new(&server.uri(), 64);
    let embedding = client.encode("Markets rally").await.expect("embed");

    assert_eq!(embedding, vec![0.5_f32, 0.25, 0.125]);
}

#[tokio::test]
async fn encode_batch_maps_http_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(413))
        .mount(&server)
        .await;

    let client = TeiClient::new(&server.uri(), 64);
    let err = client.encode_batch(&["x"]).await.unwrap_err();

    assert!(
        matches!(err, SentimentError::Encoder(ref msg) if msg.contains("413")),
        "expected Encoder error with status, got: {err:?}"
    );
}

#[tokio::test]
async fn encode_batch_rejects_count_mismatch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[1.0]])))
        .mount(&server)
        .await;

    let client = TeiClient::new(&server.uri(), 64);
    let err = client.encode_batch(&["x", "y"]).await.unwrap_err();

    assert!(
        matches!(err, SentimentError::Encoder(ref msg) if msg.contains("1 embeddings for 2 inputs")),
        "expected count mismatch, got: {err:?}"
    );
}

#[tokio::test]
async fn encode_batch_rejects_unparseable_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = TeiClient::new(&server.uri(), 64);
    let err = client.encode_batch(&["x"]).await.unwrap_err();

    assert!(matches!(err, SentimentError::Encoder(_)));
}

#[tokio::test]
async fn info_returns_served_model_id() {
    let server = MockServer::start().await;
    mount_info(&server, "sentence-transformers/all-MiniLM-L6-v2").await;

    let client = TeiClient::new(&server.uri(), 64);
    let info = client.info().await.expect("info");

    assert_eq!(info.model_id, "sentence-transformers/all-MiniLM-L6-v2");
    assert_eq!(info.max_client_batch_size, None);
}

// ---------------------------------------------------------------------------
// load_models
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_models_builds_working_scorer() {
    let server = MockServer::start().await;
    mount_info(&server, "sentence-transformers/all-MiniLM-L6-v2").await;

    // Probe embed during load.
    Mock::given(method("POST"))
        .and(path("/embed"))
        .and(body_partial_json(json!({"inputs": ["status"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[0.0, 0.0]])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .and(body_partial_json(json!({"inputs": ["Stocks soar", "Layoffs spread"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[2.0, 0.0], [0.0, 2.0]])))
        .expect(1)
        .mount(&server)
        .await;

    let artifact = write_artifact(SVM_JSON);
    let scorer = load_models(&model_config(&server, &artifact))
        .await
        .expect("models should load");

    let scored = scorer
        .score(&["Stocks soar", "", "Layoffs spread"])
        .await
        .expect("score");
    let lines: Vec<String> = scored.iter().map(ToString::to_string).collect();
    assert_eq!(lines, ["Optimistic, Stocks soar", "Pessimistic, Layoffs spread"]);
}

#[tokio::test]
async fn load_models_caps_batch_size_at_server_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model_id": "sentence-transformers/all-MiniLM-L6-v2",
            "max_client_batch_size": 32
        })))
        .mount(&server)
        .await;
    // Probe, then 40 headlines as 32 + 8.
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(LimitedEmbed { limit: 32 })
        .expect(3)
        .mount(&server)
        .await;

    let artifact = write_artifact(SVM_JSON);
    let config = model_config(&server, &artifact);
    assert_eq!(config.embed_batch_size, 64);
    let scorer = load_models(&config).await.expect("models should load");

    let headlines: Vec<String> = (0..40).map(|i| format!("Headline number {i}")).collect();
    let scored = scorer.score(&headlines).await.expect("score 40 headlines");

    assert_eq!(scored.len(), 40);
    assert!(scored.iter().all(|s| s.label.as_str() == "Optimistic"));
    assert_eq!(scored[39].headline, "Headline number 39");
}

#[tokio::test]
async fn load_models_rejects_wrong_served_model() {
    let server = MockServer::start().await;
    mount_info(&server, "BAAI/bge-small-en-v1.5").await;

    let artifact = write_artifact(SVM_JSON);
    let err = load_models(&model_config(&server, &artifact))
        .await
        .unwrap_err();

    assert!(
        matches!(err, SentimentError::ModelLoad(_)),
        "expected ModelLoad, got: {err:?}"
    );
}

#[tokio::test]
async fn load_models_rejects_dimension_mismatch() {
    let server = MockServer::start().await;
    mount_info(&server, "all-MiniLM-L6-v2").await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[0.0, 0.0, 0.0]])))
        .mount(&server)
        .await;

    let artifact = write_artifact(SVM_JSON);
    let err = load_models(&model_config(&server, &artifact))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            SentimentError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ),
        "expected DimensionMismatch, got: {err:?}"
    );
}

#[tokio::test]
async fn load_models_fails_when_tei_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let artifact = write_artifact(SVM_JSON);
    let err = load_models(&model_config(&server, &artifact))
        .await
        .unwrap_err();

    assert!(matches!(err, SentimentError::ModelLoad(ref msg) if msg.contains("503")));
}

#[tokio::test]
async fn load_models_rejects_malformed_classifier() {
    let server = MockServer::start().await;

    let artifact = write_artifact(r#"{"classes": ["Only"], "coef": [[1.0]], "intercept": [0.0]}"#);
    let err = load_models(&model_config(&server, &artifact))
        .await
        .unwrap_err();

    assert!(matches!(err, SentimentError::ClassifierInvalid(_)));
}
