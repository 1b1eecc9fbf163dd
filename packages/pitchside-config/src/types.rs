use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub classifier: Classifier,
	pub retrieval: Retrieval,
	#[serde(default)]
	pub lexicon: Lexicon,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	pub qdrant: Qdrant,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub api_key: Option<String>,
	/// Prepended to every namespace name to form the collection name.
	#[serde(default)]
	pub collection_prefix: String,
	pub vector_dim: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub llm_classifier: LlmProviderConfig,
	pub web_search: WebSearchProviderConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WebSearchProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierStrategy {
	#[default]
	Keyword,
	Model,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Classifier {
	pub strategy: ClassifierStrategy,
	/// Evaluated top to bottom; the first rule with a matching keyword wins.
	pub rules: Vec<ClassifierRule>,
	pub live: LiveHeuristic,
}
impl Default for Classifier {
	fn default() -> Self {
		Self {
			strategy: ClassifierStrategy::Keyword,
			rules: default_rules(),
			live: LiveHeuristic::default(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct ClassifierRule {
	pub intent: String,
	pub keywords: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LiveHeuristic {
	pub temporal_keywords: Vec<String>,
	pub subject_keywords: Vec<String>,
	pub question_patterns: Vec<String>,
}
impl Default for LiveHeuristic {
	fn default() -> Self {
		Self {
			temporal_keywords: strings(&[
				"today",
				"tonight",
				"yesterday",
				"latest",
				"recent",
				"currently",
				"current",
				"right now",
				"this week",
				"this weekend",
				"upcoming",
				"next match",
				"next game",
			]),
			subject_keywords: strings(&[
				"score",
				"result",
				"lineup",
				"line-up",
				"injury",
				"injured",
				"transfer news",
				"signing",
				"fixture",
				"standings",
				"league table",
				"news",
			]),
			question_patterns: strings(&[
				r"^(what|who|when|where)('s|\s+is|\s+are|\s+was|\s+were)?\b.*\b(happen\w*|going on|playing|scored?|won|lost)\b",
				r"\b(did|has|have)\b.*\b(win|won|lose|lost|draw|drew|sign|signed|score|scored)\b",
				r"\bhow\s+(did|is|are)\b.*\bdoing\b",
				r"\bwhen\s+is\s+the\s+next\b",
			]),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Retrieval {
	pub top_k: u32,
	/// Tolerance in minutes applied on both sides of an extracted minute.
	#[serde(default = "default_minute_window")]
	pub minute_window: u32,
	#[serde(default)]
	pub web: WebRetrieval,
	#[serde(default)]
	pub namespaces: Namespaces,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WebRetrieval {
	pub max_results: u32,
	pub snippet_chars: usize,
	pub content_chars: usize,
}
impl Default for WebRetrieval {
	fn default() -> Self {
		Self { max_results: 5, snippet_chars: 500, content_chars: 1_000 }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Namespaces {
	pub match_events: NamespaceSchema,
	pub historic_knowledge: NamespaceSchema,
}
impl Default for Namespaces {
	fn default() -> Self {
		Self {
			match_events: NamespaceSchema {
				name: "match_events".to_string(),
				fields: field_map(&[
					("player", "player"),
					("team", "team"),
					("opponent", "opponent"),
					("minute", "minute"),
				]),
			},
			historic_knowledge: NamespaceSchema {
				name: "historic_knowledge".to_string(),
				fields: field_map(&[
					("player", "player_name"),
					("team", "team"),
					("topic", "topic"),
				]),
			},
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct NamespaceSchema {
	pub name: String,
	/// Entity field name to payload key. Fields missing here are never filtered on.
	#[serde(default)]
	pub fields: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Lexicon {
	pub players: Vec<String>,
	pub teams: Vec<String>,
	pub opponents: Vec<String>,
	pub competitions: Vec<String>,
	pub topics: Vec<String>,
	pub time_phrases: Vec<String>,
}
impl Default for Lexicon {
	fn default() -> Self {
		Self {
			players: strings(&[
				"Arjun Rao",
				"Leo Mendes",
				"Tomas Varga",
				"Kofi Mensah",
				"Daniel Okafor",
			]),
			teams: strings(&[
				"Redchester",
				"Blueport",
				"Northvale",
				"Kingsford Athletic",
				"Eastbridge United",
			]),
			opponents: Vec::new(),
			competitions: strings(&[
				"Champions League",
				"Europa League",
				"Premier League",
				"La Liga",
				"FA Cup",
				"League Cup",
				"Super Cup",
			]),
			topics: strings(&[
				"referee",
				"transfers",
				"injuries",
				"youth academy",
				"club history",
				"stadium",
				"manager",
			]),
			time_phrases: strings(&[
				"this season",
				"last season",
				"first half",
				"second half",
				"this half",
				"extra time",
				"right now",
				"last game",
				"last match",
				"tonight",
				"today",
				"yesterday",
			]),
		}
	}
}

pub(crate) fn default_rules() -> Vec<ClassifierRule> {
	vec![
		rule("live_match", &[
			"live score",
			"current score",
			"what's the score",
			"whats the score",
			"score now",
			"just happened",
			"happening now",
			"lineup",
			"line-up",
			"starting xi",
			"live match",
			"live game",
			"live update",
			"live commentary",
		]),
		rule("fan_conversation", &[
			"fans",
			"fan ",
			"supporters",
			"twitter",
			"reddit",
			"social media",
			"people saying",
			"people think",
			"reaction",
			"sentiment",
		]),
		rule("tactics", &[
			"formation",
			"tactic",
			"pressing",
			"high press",
			"low block",
			"shape",
			"transition",
			"counter-attack",
			"counter attack",
			"build-up",
			"build up play",
			"set piece",
			"set-piece",
		]),
		rule("performance", &[
			"perform",
			"minute",
			"this half",
			"first half",
			"second half",
			"right now",
			"shots",
			"so far",
			"rating",
			"touches",
		]),
		rule("previous_match", &[
			"last game",
			"last match",
			"previous match",
			"previous game",
			"match report",
			"last weekend",
			"last night",
		]),
		rule("history", &[
			"season",
			"career",
			"history",
			"historic",
			"consistent",
			"last year",
			"all-time",
			"all time",
			"record",
			"trophies",
			"legend",
		]),
		rule("general_football", &[
			"what is a ",
			"what is an ",
			"explain",
			"define",
			"meaning of",
			"rules of",
			"offside rule",
		]),
	]
}

fn rule(intent: &str, keywords: &[&str]) -> ClassifierRule {
	ClassifierRule { intent: intent.to_string(), keywords: strings(keywords) }
}

fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(|value| value.to_string()).collect()
}

fn field_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
	pairs.iter().map(|(field, key)| (field.to_string(), key.to_string())).collect()
}

fn default_minute_window() -> u32 {
	5
}
