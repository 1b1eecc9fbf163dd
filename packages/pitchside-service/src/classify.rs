use std::{panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use tracing::warn;

use pitchside_config::{ClassifierStrategy, Config, LlmProviderConfig};
use pitchside_domain::{classifier::KeywordClassifier, entities::EntityBag, intent::Intent};
use pitchside_providers::classifier::{self, ModelVerdict};

use crate::{ClassifierProvider, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
	pub intent: Intent,
	/// Entities reported by the model. Always empty for the keyword strategy.
	pub entities: EntityBag,
}

/// Intent classification selected by `classifier.strategy`.
#[derive(Clone)]
pub enum IntentClassifier {
	Keyword(KeywordClassifier),
	Model { cfg: LlmProviderConfig, provider: Arc<dyn ClassifierProvider> },
}
impl IntentClassifier {
	pub fn from_config(cfg: &Config, provider: Arc<dyn ClassifierProvider>) -> Result<Self> {
		Ok(match cfg.classifier.strategy {
			ClassifierStrategy::Keyword =>
				Self::Keyword(KeywordClassifier::from_rules(&cfg.classifier.rules)?),
			ClassifierStrategy::Model =>
				Self::Model { cfg: cfg.providers.llm_classifier.clone(), provider },
		})
	}

	pub fn strategy(&self) -> ClassifierStrategy {
		match self {
			Self::Keyword(_) => ClassifierStrategy::Keyword,
			Self::Model { .. } => ClassifierStrategy::Model,
		}
	}

	/// Never fails. Blank input is `generic` without touching a backend. A model failure or panic
	/// degrades to `generic` with no entities.
	pub async fn classify(&self, text: &str) -> Classification {
		if text.trim().is_empty() {
			return Classification::default();
		}

		match self {
			Self::Keyword(rules) =>
				Classification { intent: rules.classify(text), entities: EntityBag::default() },
			Self::Model { cfg, provider } => {
				let verdict =
					AssertUnwindSafe(classify_with_model(cfg, provider.as_ref(), text)).catch_unwind();

				match verdict.await {
					Ok(Ok(ModelVerdict { intent, entities })) => Classification { intent, entities },
					Ok(Err(err)) => {
						warn!(error = %err, "Model classification failed. Falling back to generic.");

						Classification::default()
					},
					Err(_) => {
						warn!("Model classification panicked. Falling back to generic.");

						Classification::default()
					},
				}
			},
		}
	}
}

async fn classify_with_model(
	cfg: &LlmProviderConfig,
	provider: &dyn ClassifierProvider,
	text: &str,
) -> Result<ModelVerdict> {
	let messages = classifier::classification_messages(text);
	let parsed = provider.classify(cfg, &messages).await?;

	Ok(classifier::interpret_verdict(&parsed))
}
