use std::sync::Arc;

use tracing::{debug, warn};

use pitchside_config::{Config, EmbeddingProviderConfig};
use pitchside_domain::{filter::RetrievalFilter, result::RawResult};

use crate::{EmbeddingProvider, Error, Result, VectorIndex};

/// Embeds a query and searches one namespace. [`VectorRetriever::search`] never fails.
#[derive(Clone)]
pub struct VectorRetriever {
	cfg: EmbeddingProviderConfig,
	top_k: u32,
	embedding: Arc<dyn EmbeddingProvider>,
	index: Arc<dyn VectorIndex>,
}
impl VectorRetriever {
	pub fn new(
		cfg: &Config,
		embedding: Arc<dyn EmbeddingProvider>,
		index: Arc<dyn VectorIndex>,
	) -> Self {
		Self { cfg: cfg.providers.embedding.clone(), top_k: cfg.retrieval.top_k, embedding, index }
	}

	/// `top_k` falls back to the configured default.
	pub async fn search(
		&self,
		query: &str,
		namespace: &str,
		filter: &RetrievalFilter,
		top_k: Option<u32>,
	) -> Vec<RawResult> {
		best_effort(namespace, self.try_search(query, namespace, filter, top_k).await)
	}

	pub async fn try_search(
		&self,
		query: &str,
		namespace: &str,
		filter: &RetrievalFilter,
		top_k: Option<u32>,
	) -> Result<Vec<RawResult>> {
		if query.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "Vector query must be non-empty.".to_string() });
		}

		let texts = vec![query.to_string()];
		let vector = self.embedding.embed(&self.cfg, &texts).await?.into_iter().next().ok_or_else(
			|| Error::Provider { message: "Embedding provider returned no vectors.".to_string() },
		)?;

		if vector.len() != self.cfg.dimensions as usize {
			return Err(Error::Provider { message: "Embedding vector dimension mismatch.".to_string() });
		}

		let top_k = top_k.unwrap_or(self.top_k).max(1);

		debug!(namespace, top_k, filter = %filter.to_json(), "Querying vector namespace.");

		let matches = self.index.query(namespace, vector, top_k, filter).await?;

		Ok(matches
			.into_iter()
			.map(|hit| RawResult::from_vector_payload(&hit.payload, Some(hit.score)))
			.collect())
	}
}

fn best_effort(namespace: &str, result: Result<Vec<RawResult>>) -> Vec<RawResult> {
	match result {
		Ok(results) => results,
		Err(err) => {
			warn!(error = %err, namespace, "Vector retrieval failed. Continuing without it.");

			Vec::new()
		},
	}
}
