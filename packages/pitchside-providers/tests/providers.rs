use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};

use pitchside_config::{EmbeddingProviderConfig, WebSearchProviderConfig};

fn embedding_cfg() -> EmbeddingProviderConfig {
	EmbeddingProviderConfig {
		provider_id: "test".to_string(),
		api_base: "http://127.0.0.1:1".to_string(),
		api_key: "secret".to_string(),
		path: "/embeddings".to_string(),
		model: "test-embedding".to_string(),
		dimensions: 4,
		timeout_ms: 100,
		default_headers: Map::new(),
	}
}

fn web_cfg() -> WebSearchProviderConfig {
	WebSearchProviderConfig {
		provider_id: "test".to_string(),
		api_base: "http://127.0.0.1:1".to_string(),
		api_key: "secret".to_string(),
		path: "/search".to_string(),
		timeout_ms: 100,
		default_headers: Map::new(),
	}
}

#[test]
fn builds_bearer_auth_header() {
	let headers =
		pitchside_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn default_headers_are_forwarded() {
	let mut extra = Map::new();

	extra.insert("x-api-key".to_string(), Value::String("exa".to_string()));

	let headers =
		pitchside_providers::auth_headers("secret", &extra).expect("Failed to build headers.");

	assert_eq!(headers.get("x-api-key").expect("Missing extra header."), "exa");
}

#[test]
fn non_string_default_header_is_rejected() {
	let mut extra = Map::new();

	extra.insert("x-retries".to_string(), Value::from(3));

	assert!(pitchside_providers::auth_headers("secret", &extra).is_err());
}

#[tokio::test]
async fn blank_embedding_input_fails_before_any_request() {
	let err = pitchside_providers::embedding::embed(&embedding_cfg(), &["  ".to_string()])
		.await
		.expect_err("blank input must fail");

	assert!(matches!(err, pitchside_providers::Error::InvalidInput { .. }));
}

#[tokio::test]
async fn blank_search_query_fails_before_any_request() {
	let err = pitchside_providers::web_search::search(&web_cfg(), "", 5)
		.await
		.expect_err("blank query must fail");

	assert!(matches!(err, pitchside_providers::Error::InvalidInput { .. }));
}
