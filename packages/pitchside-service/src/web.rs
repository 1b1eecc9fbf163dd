use std::sync::Arc;

use tracing::{debug, warn};

use pitchside_config::{Config, WebRetrieval, WebSearchProviderConfig};
use pitchside_domain::{
	enhance::{self, SearchHint},
	result::RawResult,
};

use crate::{Error, Result, WebSearchProvider};

/// Enhances a query by hint and runs one capped web search. [`WebRetriever::search`] never fails.
#[derive(Clone)]
pub struct WebRetriever {
	cfg: WebSearchProviderConfig,
	limits: WebRetrieval,
	provider: Arc<dyn WebSearchProvider>,
}
impl WebRetriever {
	pub fn new(cfg: &Config, provider: Arc<dyn WebSearchProvider>) -> Self {
		Self { cfg: cfg.providers.web_search.clone(), limits: cfg.retrieval.web.clone(), provider }
	}

	pub async fn search(&self, query: &str, hint: Option<SearchHint>) -> Vec<RawResult> {
		best_effort(hint, self.try_search(query, hint).await)
	}

	pub async fn try_search(&self, query: &str, hint: Option<SearchHint>) -> Result<Vec<RawResult>> {
		let enhanced = enhance::enhance(query, hint);

		if enhanced.is_empty() {
			return Err(Error::InvalidRequest { message: "Web query must be non-empty.".to_string() });
		}

		debug!(
			query = %enhanced,
			hint = hint.map_or("none", SearchHint::as_str),
			"Running web search."
		);

		let hits = self.provider.search(&self.cfg, &enhanced, self.limits.max_results).await?;

		Ok(hits
			.into_iter()
			.take(self.limits.max_results as usize)
			.map(|hit| {
				RawResult::from_web_hit(hit, self.limits.snippet_chars, self.limits.content_chars)
			})
			.collect())
	}
}

fn best_effort(hint: Option<SearchHint>, result: Result<Vec<RawResult>>) -> Vec<RawResult> {
	match result {
		Ok(results) => results,
		Err(err) => {
			warn!(
				error = %err,
				hint = hint.map_or("none", SearchHint::as_str),
				"Web retrieval failed. Continuing without it."
			);

			Vec::new()
		},
	}
}
