use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use pitchside_domain::{entities::EntityBag, intent::Intent};

use crate::{Error, Result};

const MAX_MINUTE: u64 = 130;

/// Intent and entities read from one structured model reply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelVerdict {
	pub intent: Intent,
	pub entities: EntityBag,
}

/// Single structured-output chat call. Parsing failures are errors; label coercion happens in
/// [`interpret_verdict`].
pub async fn classify(
	cfg: &pitchside_config::LlmProviderConfig,
	messages: &[Value],
) -> Result<Value> {
	tracing::debug!(model = %cfg.model, "Requesting structured classification.");

	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": messages,
		"response_format": { "type": "json_object" },
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_chat_json(json)
}

pub fn classification_messages(text: &str) -> Vec<Value> {
	vec![
		serde_json::json!({ "role": "system", "content": system_prompt() }),
		serde_json::json!({ "role": "user", "content": text }),
	]
}

pub fn parse_chat_json(json: Value) -> Result<Value> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Classifier response is missing message content.".to_string(),
		})?;
	let parsed: Value = serde_json::from_str(content)?;

	if !parsed.is_object() {
		return Err(Error::InvalidResponse {
			message: "Classifier content must be a JSON object.".to_string(),
		});
	}

	Ok(parsed)
}

/// Maps a parsed reply onto the closed intent set. Unknown or missing labels become `generic`;
/// blank strings and out-of-range minutes are dropped.
pub fn interpret_verdict(parsed: &Value) -> ModelVerdict {
	let intent = parsed
		.get("intent")
		.and_then(Value::as_str)
		.map(Intent::from_label_or_generic)
		.unwrap_or(Intent::Generic);
	let text = |key: &str| {
		parsed
			.get(key)
			.and_then(Value::as_str)
			.map(str::trim)
			.filter(|value| !value.is_empty() && *value != "undefined" && *value != "null")
			.map(str::to_string)
	};
	let minute = match parsed.get("minute") {
		Some(Value::Number(number)) => number.as_u64(),
		Some(Value::String(raw)) => raw.trim().parse::<u64>().ok(),
		_ => None,
	}
	.filter(|minute| *minute <= MAX_MINUTE)
	.map(|minute| minute as u32);
	let entities = EntityBag {
		player: text("player"),
		team: text("team"),
		opponent: text("opponent"),
		competition: text("competition"),
		minute,
		timeframe: text("timeframe"),
		topic: text("topic"),
	};

	ModelVerdict { intent, entities }
}

fn system_prompt() -> String {
	let labels = Intent::ALL.iter().map(|intent| intent.as_str()).collect::<Vec<_>>().join(" | ");

	format!(
		"You are an intent classifier for a football match companion.
Classify the user's message into exactly one intent:

- performance: the current match, live events, minute windows, shots, \"this half\", current player performance.
- history: seasons, career stats, previous years, historical records.
- tactics: formations, pressing, low block, team shape, transitions.
- fan_conversation: fans, reactions, social media, what people are saying.
- live_match: live score, lineups, what just happened in a match being played now.
- previous_match: the last game, match reports, results that were just played.
- general_football: rules and concepts of football that need no club-specific data.
- generic: anything else.

Also extract these entities when present: player, team, opponent, competition, minute (integer), timeframe, topic.

Return ONLY a JSON object of the form:
{{\"intent\": {labels}, \"player\": string?, \"team\": string?, \"opponent\": string?, \"competition\": string?, \"minute\": number?, \"timeframe\": string?, \"topic\": string?}}
Omit entities that are not mentioned.

Examples:
- \"How did Arjun Rao perform between minute 25-30?\" -> {{\"intent\": \"performance\", \"player\": \"Arjun Rao\", \"minute\": 25}}
- \"What do fans think about the referee?\" -> {{\"intent\": \"fan_conversation\", \"topic\": \"referee\"}}
- \"Why is Blueport pressing higher?\" -> {{\"intent\": \"tactics\", \"team\": \"Blueport\"}}
- \"Has Leo Mendes been consistent this season?\" -> {{\"intent\": \"history\", \"player\": \"Leo Mendes\", \"timeframe\": \"this season\"}}
- \"What formation are Redchester using?\" -> {{\"intent\": \"tactics\", \"team\": \"Redchester\"}}"
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_choice_content_json() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "{\"intent\": \"tactics\", \"team\": \"Blueport\"}" } }
			]
		});
		let parsed = parse_chat_json(json).expect("parse failed");

		assert_eq!(parsed["intent"], "tactics");
	}

	#[test]
	fn malformed_content_is_an_error() {
		let json = serde_json::json!({
			"choices": [{ "message": { "content": "tactics, probably" } }]
		});

		assert!(parse_chat_json(json).is_err());
		assert!(parse_chat_json(serde_json::json!({ "choices": [] })).is_err());
	}

	#[test]
	fn unknown_label_is_coerced_to_generic() {
		let verdict =
			interpret_verdict(&serde_json::json!({ "intent": "weather", "team": "Redchester" }));

		assert_eq!(verdict.intent, Intent::Generic);
		assert_eq!(verdict.entities.team.as_deref(), Some("Redchester"));
	}

	#[test]
	fn minute_accepts_numbers_and_numeric_strings() {
		let numeric = interpret_verdict(&serde_json::json!({ "intent": "performance", "minute": 25 }));
		let textual = interpret_verdict(&serde_json::json!({ "intent": "performance", "minute": "25" }));
		let absurd = interpret_verdict(&serde_json::json!({ "intent": "performance", "minute": 900 }));

		assert_eq!(numeric.entities.minute, Some(25));
		assert_eq!(textual.entities.minute, Some(25));
		assert_eq!(absurd.entities.minute, None);
	}

	#[test]
	fn placeholder_strings_are_dropped() {
		let verdict = interpret_verdict(
			&serde_json::json!({ "intent": "history", "player": "undefined", "team": "  " }),
		);

		assert!(verdict.entities.is_empty());
	}

	#[test]
	fn prompt_lists_every_intent() {
		let messages = classification_messages("hi");
		let system = messages[0]["content"].as_str().expect("system prompt is text");

		for intent in Intent::ALL {
			assert!(system.contains(intent.as_str()));
		}
		assert_eq!(messages[1]["content"], "hi");
	}
}
