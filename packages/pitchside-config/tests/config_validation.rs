use toml::Value;

use pitchside_config::{ClassifierStrategy, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(edit: impl FnOnce(&mut toml::Table)) -> String {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let root = value.as_table_mut().expect("Sample config must be a table.");

	edit(root);

	toml::to_string(&value).expect("Failed to render sample config.")
}

fn table<'a>(root: &'a mut toml::Table, path: &[&str]) -> &'a mut toml::Table {
	let mut current = root;

	for key in path {
		current = current
			.get_mut(*key)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Sample config must include [{key}]."));
	}

	current
}

fn expect_validation(raw: &str, needle: &str) {
	let err = pitchside_config::parse(raw).expect_err("Expected validation error.");

	match err {
		Error::Validation { message } => {
			assert!(message.contains(needle), "Unexpected message: {message}");
		},
		other => panic!("Unexpected error: {other:?}"),
	}
}

#[test]
fn sample_config_loads_with_defaults() {
	let cfg = pitchside_config::parse(SAMPLE_CONFIG_TOML).expect("Sample config must be valid.");

	assert_eq!(cfg.classifier.strategy, ClassifierStrategy::Keyword);
	assert_eq!(cfg.classifier.rules.first().map(|rule| rule.intent.as_str()), Some("live_match"));
	assert_eq!(cfg.retrieval.namespaces.match_events.name, "match_events");
	assert_eq!(cfg.retrieval.namespaces.historic_knowledge.name, "historic_knowledge");
	assert_eq!(
		cfg.retrieval.namespaces.historic_knowledge.fields.get("player").map(String::as_str),
		Some("player_name")
	);
	assert_eq!(cfg.lexicon.players, vec!["Arjun Rao".to_string(), "Leo Mendes".to_string()]);
	assert!(!cfg.lexicon.competitions.is_empty());
	assert!(!cfg.classifier.live.question_patterns.is_empty());
}

#[test]
fn load_reports_missing_file() {
	let path = std::env::temp_dir().join("pitchside-missing-config.toml");
	let err = pitchside_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}

#[test]
fn load_reads_file_from_disk() {
	let path = std::env::temp_dir().join(format!("pitchside-config-{}.toml", std::process::id()));

	std::fs::write(&path, SAMPLE_CONFIG_TOML).expect("Failed to write config.");

	let cfg = pitchside_config::load(&path).expect("Config must load.");

	std::fs::remove_file(&path).ok();

	assert_eq!(cfg.storage.qdrant.collection_prefix, "pitchside_");
}

#[test]
fn rejects_dimension_mismatch() {
	let raw = sample_with(|root| {
		table(root, &["storage", "qdrant"]).insert("vector_dim".to_string(), Value::Integer(512));
	});

	expect_validation(&raw, "must match storage.qdrant.vector_dim");
}

#[test]
fn rejects_blank_web_search_key() {
	let raw = sample_with(|root| {
		table(root, &["providers", "web_search"])
			.insert("api_key".to_string(), Value::String("  ".to_string()));
	});

	expect_validation(&raw, "web_search api_key");
}

#[test]
fn model_strategy_requires_classifier_key() {
	let raw = sample_with(|root| {
		table(root, &["classifier"])
			.insert("strategy".to_string(), Value::String("model".to_string()));
		table(root, &["providers", "llm_classifier"])
			.insert("api_key".to_string(), Value::String(String::new()));
	});

	expect_validation(&raw, "llm_classifier api_key");
}

#[test]
fn keyword_strategy_allows_blank_classifier_key() {
	let raw = sample_with(|root| {
		table(root, &["providers", "llm_classifier"])
			.insert("api_key".to_string(), Value::String(String::new()));
	});

	assert!(pitchside_config::parse(&raw).is_ok());
}

#[test]
fn rejects_zero_top_k() {
	let raw = sample_with(|root| {
		table(root, &["retrieval"]).insert("top_k".to_string(), Value::Integer(0));
	});

	expect_validation(&raw, "retrieval.top_k");
}

#[test]
fn rejects_web_cap_out_of_range() {
	let raw = sample_with(|root| {
		table(root, &["retrieval", "web"]).insert("max_results".to_string(), Value::Integer(40));
	});

	expect_validation(&raw, "retrieval.web.max_results");
}

#[test]
fn rejects_content_budget_below_snippet_budget() {
	let raw = sample_with(|root| {
		table(root, &["retrieval", "web"]).insert("content_chars".to_string(), Value::Integer(100));
	});

	expect_validation(&raw, "retrieval.web.content_chars");
}

#[test]
fn rejects_rule_without_keywords() {
	let raw = sample_with(|root| {
		let mut rule = toml::Table::new();

		rule.insert("intent".to_string(), Value::String("tactics".to_string()));
		rule.insert("keywords".to_string(), Value::Array(vec![Value::String(" ".to_string())]));
		table(root, &["classifier"])
			.insert("rules".to_string(), Value::Array(vec![Value::Table(rule)]));
	});

	expect_validation(&raw, "at least one keyword");
}

#[test]
fn rejects_unknown_namespace_field() {
	let raw = sample_with(|root| {
		let mut fields = toml::Table::new();

		fields.insert("shirt_number".to_string(), Value::String("number".to_string()));

		let mut schema = toml::Table::new();

		schema.insert("name".to_string(), Value::String("match_events".to_string()));
		schema.insert("fields".to_string(), Value::Table(fields));

		let mut namespaces = toml::Table::new();

		namespaces.insert("match_events".to_string(), Value::Table(schema));
		table(root, &["retrieval"]).insert("namespaces".to_string(), Value::Table(namespaces));
	});

	expect_validation(&raw, "unknown entity field shirt_number");
}

#[test]
fn rejects_duplicate_namespace_names() {
	let raw = sample_with(|root| {
		let mut schema = toml::Table::new();

		schema.insert("name".to_string(), Value::String("match_events".to_string()));

		let mut namespaces = toml::Table::new();

		namespaces.insert("historic_knowledge".to_string(), Value::Table(schema));
		table(root, &["retrieval"]).insert("namespaces".to_string(), Value::Table(namespaces));
	});

	expect_validation(&raw, "must be distinct");
}

#[test]
fn normalizes_blank_qdrant_key_and_lexicon_entries() {
	let raw = sample_with(|root| {
		table(root, &["storage", "qdrant"])
			.insert("api_key".to_string(), Value::String("   ".to_string()));
		table(root, &["lexicon"]).insert(
			"players".to_string(),
			Value::Array(vec![
				Value::String(" Arjun Rao ".to_string()),
				Value::String(String::new()),
			]),
		);
	});
	let cfg = pitchside_config::parse(&raw).expect("Config must be valid.");

	assert!(cfg.storage.qdrant.api_key.is_none());
	assert_eq!(cfg.lexicon.players, vec!["Arjun Rao".to_string()]);
}
