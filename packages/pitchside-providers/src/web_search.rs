use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use pitchside_domain::result::WebHit;

use crate::{Error, Result};

/// Runs one capped web search with full-text contents. The query is sent as given; enhancement
/// happens upstream.
pub async fn search(
	cfg: &pitchside_config::WebSearchProviderConfig,
	query: &str,
	max_results: u32,
) -> Result<Vec<WebHit>> {
	if query.trim().is_empty() {
		return Err(Error::InvalidInput { message: "Web search query must be non-empty.".to_string() });
	}

	tracing::debug!(provider = %cfg.provider_id, max_results, "Requesting web search.");

	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = search_request_body(query, max_results);
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_search_response(json, max_results as usize)
}

pub fn search_request_body(query: &str, max_results: u32) -> Value {
	serde_json::json!({
		"query": query,
		"numResults": max_results,
		"contents": { "text": true },
	})
}

/// Reads `results[]` into hits, keeping at most `cap` of them in provider order.
pub fn parse_search_response(json: Value, cap: usize) -> Result<Vec<WebHit>> {
	let Some(results) = json.get("results").and_then(|v| v.as_array()) else {
		return Err(Error::InvalidResponse {
			message: "Search response is missing results array.".to_string(),
		});
	};
	let mut hits = Vec::with_capacity(results.len().min(cap));

	for item in results.iter().take(cap) {
		hits.push(serde_json::from_value::<WebHit>(item.clone())?);
	}

	Ok(hits)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn request_asks_for_text_contents() {
		let body = search_request_body("Redchester live score", 5);

		assert_eq!(body["numResults"], 5);
		assert_eq!(body["contents"]["text"], true);
	}

	#[test]
	fn parses_results_and_caps_them() {
		let json = serde_json::json!({
			"results": [
				{ "title": "A", "url": "https://a", "text": "alpha", "publishedDate": "2026-10-11" },
				{ "title": "B", "url": "https://b" },
				{ "title": "C", "url": "https://c" }
			]
		});
		let hits = parse_search_response(json, 2).expect("parse failed");

		assert_eq!(hits.len(), 2);
		assert_eq!(hits[0].published_date.as_deref(), Some("2026-10-11"));
		assert_eq!(hits[1].text, None);
	}

	#[test]
	fn missing_results_is_an_error() {
		assert!(parse_search_response(serde_json::json!({ "error": "quota" }), 5).is_err());
	}
}
