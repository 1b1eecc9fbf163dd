mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Classifier, ClassifierRule, ClassifierStrategy, Config, EmbeddingProviderConfig, Lexicon,
	LiveHeuristic, LlmProviderConfig, NamespaceSchema, Namespaces, Providers, Qdrant, Retrieval,
	Service, Storage, WebRetrieval, WebSearchProviderConfig,
};

use std::{collections::HashSet, fs, path::Path};

/// Entity fields a namespace schema may map to payload keys.
pub const FILTERABLE_FIELDS: [&str; 7] =
	["player", "team", "opponent", "competition", "minute", "timeframe", "topic"];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		Error::ParseConfig { source, .. } =>
			Error::ParseConfig { path: path.to_path_buf(), source },
		other => other,
	})
}

pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}

	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("web_search", &cfg.providers.web_search.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	if cfg.classifier.strategy == ClassifierStrategy::Model
		&& cfg.providers.llm_classifier.api_key.trim().is_empty()
	{
		return Err(Error::Validation {
			message: "Provider llm_classifier api_key must be non-empty when classifier.strategy is model."
				.to_string(),
		});
	}
	if cfg.retrieval.top_k == 0 {
		return Err(Error::Validation {
			message: "retrieval.top_k must be greater than zero.".to_string(),
		});
	}
	if !(1..=25).contains(&cfg.retrieval.web.max_results) {
		return Err(Error::Validation {
			message: "retrieval.web.max_results must be in the range 1-25.".to_string(),
		});
	}
	if cfg.retrieval.web.snippet_chars == 0 {
		return Err(Error::Validation {
			message: "retrieval.web.snippet_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.web.content_chars < cfg.retrieval.web.snippet_chars {
		return Err(Error::Validation {
			message: "retrieval.web.content_chars must be at least retrieval.web.snippet_chars."
				.to_string(),
		});
	}

	for rule in &cfg.classifier.rules {
		if rule.intent.trim().is_empty() {
			return Err(Error::Validation {
				message: "classifier.rules.intent must be non-empty.".to_string(),
			});
		}
		if rule.keywords.is_empty() {
			return Err(Error::Validation {
				message: format!(
					"classifier.rules for intent {} must have at least one keyword.",
					rule.intent
				),
			});
		}
	}

	let namespaces = &cfg.retrieval.namespaces;
	let mut seen = HashSet::new();

	for (label, schema) in [
		("match_events", &namespaces.match_events),
		("historic_knowledge", &namespaces.historic_knowledge),
	] {
		if schema.name.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("retrieval.namespaces.{label}.name must be non-empty."),
			});
		}
		if !seen.insert(schema.name.as_str()) {
			return Err(Error::Validation {
				message: "retrieval.namespaces names must be distinct.".to_string(),
			});
		}

		for (field, key) in &schema.fields {
			if !FILTERABLE_FIELDS.contains(&field.as_str()) {
				return Err(Error::Validation {
					message: format!(
						"retrieval.namespaces.{label}.fields has unknown entity field {field}."
					),
				});
			}
			if key.trim().is_empty() {
				return Err(Error::Validation {
					message: format!(
						"retrieval.namespaces.{label}.fields.{field} must be non-empty."
					),
				});
			}
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.storage.qdrant.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.storage.qdrant.api_key = None;
	}

	for rule in &mut cfg.classifier.rules {
		rule.intent = rule.intent.trim().to_string();
		normalize_list(&mut rule.keywords, true);
	}

	let live = &mut cfg.classifier.live;

	normalize_list(&mut live.temporal_keywords, true);
	normalize_list(&mut live.subject_keywords, true);
	live.question_patterns.retain(|pattern| !pattern.trim().is_empty());

	let lexicon = &mut cfg.lexicon;

	for list in [
		&mut lexicon.players,
		&mut lexicon.teams,
		&mut lexicon.opponents,
		&mut lexicon.competitions,
		&mut lexicon.topics,
		&mut lexicon.time_phrases,
	] {
		normalize_list(list, false);
	}
}

// Keywords keep inner and trailing spaces (e.g. "fan ") so only blank entries are dropped.
fn normalize_list(values: &mut Vec<String>, lowercase: bool) {
	values.retain(|value| !value.trim().is_empty());

	if lowercase {
		for value in values.iter_mut() {
			*value = value.to_lowercase();
		}
	} else {
		for value in values.iter_mut() {
			*value = value.trim().to_string();
		}
	}
}
