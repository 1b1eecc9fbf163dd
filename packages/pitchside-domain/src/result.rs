use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload keys tried in order for the hit text.
pub const TEXT_FIELDS: [&str; 4] = ["text", "chunk_text", "content", "field_text"];
/// Payload keys tried in order for an auxiliary media link.
pub const MEDIA_FIELDS: [&str; 3] = ["image_url", "media_url", "video_url"];

/// One normalized retrieval hit, whichever source produced it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
	pub text: String,
	/// Similarity in `[0, 1]` for semantic hits, `None` for web hits.
	pub score: Option<f32>,
	pub title: Option<String>,
	pub url: Option<String>,
	pub content: Option<String>,
	pub published_date: Option<String>,
	pub media_url: Option<String>,
	/// Remaining scalar payload entries rendered as strings.
	pub attributes: BTreeMap<String, String>,
}
impl RawResult {
	/// Maps a vector-store payload into the strict shape. Text falls back to the JSON dump of
	/// the payload so it is never empty.
	pub fn from_vector_payload(payload: &Map<String, Value>, score: Option<f32>) -> Self {
		let text = TEXT_FIELDS
			.iter()
			.find_map(|key| non_empty_str(payload, key))
			.map(str::to_string)
			.unwrap_or_else(|| Value::Object(payload.clone()).to_string());
		let media_url =
			MEDIA_FIELDS.iter().find_map(|key| non_empty_str(payload, key)).map(str::to_string);
		let url = ["source_url", "url"]
			.iter()
			.find_map(|key| non_empty_str(payload, key))
			.map(str::to_string);
		let mut attributes = BTreeMap::new();

		for (key, value) in payload {
			if TEXT_FIELDS.contains(&key.as_str()) || MEDIA_FIELDS.contains(&key.as_str()) {
				continue;
			}

			let rendered = match value {
				Value::String(text) => text.clone(),
				Value::Number(number) => number.to_string(),
				Value::Bool(flag) => flag.to_string(),
				_ => continue,
			};

			attributes.insert(key.clone(), rendered);
		}

		Self {
			text,
			score: Some(score.unwrap_or(0.0)),
			title: non_empty_str(payload, "title").map(str::to_string),
			url,
			content: None,
			published_date: None,
			media_url,
			attributes,
		}
	}

	/// Maps one web hit, cutting the snippet and content to their character budgets.
	pub fn from_web_hit(hit: WebHit, snippet_chars: usize, content_chars: usize) -> Self {
		let body = hit.text.unwrap_or_default();

		Self {
			text: truncate_chars(&body, snippet_chars),
			score: None,
			title: non_blank(hit.title),
			url: non_blank(hit.url),
			content: Some(truncate_chars(&body, content_chars)),
			published_date: non_blank(hit.published_date),
			media_url: non_blank(hit.image),
			attributes: BTreeMap::new(),
		}
	}
}

/// A web search document before normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebHit {
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub text: Option<String>,
	#[serde(default)]
	pub published_date: Option<String>,
	#[serde(default)]
	pub image: Option<String>,
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
	match text.char_indices().nth(max_chars) {
		Some((cut, _)) => text[..cut].to_string(),
		None => text.to_string(),
	}
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.filter(|value| !value.trim().is_empty())
}

fn non_empty_str<'a>(payload: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
	payload.get(key).and_then(Value::as_str).filter(|value| !value.trim().is_empty())
}
