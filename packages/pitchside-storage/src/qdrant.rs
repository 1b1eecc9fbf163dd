use qdrant_client::qdrant::{Condition, Filter, Query, QueryPointsBuilder, Range};
use serde_json::{Map, Value};
use tracing::debug;

use pitchside_domain::filter::{Predicate, RetrievalFilter};

use crate::{Error, Result};

pub const DENSE_VECTOR_NAME: &str = "dense";

/// One nearest-neighbour hit with its payload already converted to JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorMatch {
	pub score: f32,
	pub payload: Map<String, Value>,
}

/// Namespaced similarity search over Qdrant. A namespace is the collection
/// `{collection_prefix}{namespace}`.
pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub collection_prefix: String,
	pub vector_dim: u32,
}
impl QdrantStore {
	pub fn new(cfg: &pitchside_config::Qdrant) -> Result<Self> {
		let mut builder = qdrant_client::Qdrant::from_url(&cfg.url);

		if let Some(api_key) = cfg.api_key.as_ref() {
			builder = builder.api_key(api_key.clone());
		}

		let client = builder.build()?;

		Ok(Self {
			client,
			collection_prefix: cfg.collection_prefix.clone(),
			vector_dim: cfg.vector_dim,
		})
	}

	pub fn collection_for(&self, namespace: &str) -> String {
		collection_name(&self.collection_prefix, namespace)
	}

	pub async fn query(
		&self,
		namespace: &str,
		vector: Vec<f32>,
		top_k: u32,
		filter: &RetrievalFilter,
	) -> Result<Vec<VectorMatch>> {
		if vector.len() != self.vector_dim as usize {
			return Err(Error::InvalidArgument(format!(
				"Query vector has {} dimensions, collection expects {}.",
				vector.len(),
				self.vector_dim
			)));
		}
		if top_k == 0 {
			return Err(Error::InvalidArgument("top_k must be greater than zero.".to_string()));
		}

		let collection = self.collection_for(namespace);
		let mut search = QueryPointsBuilder::new(collection.clone())
			.query(Query::new_nearest(vector))
			.using(DENSE_VECTOR_NAME)
			.with_payload(true)
			.limit(top_k as u64);

		if let Some(filter) = to_qdrant_filter(filter) {
			search = search.filter(filter);
		}

		let response = self.client.query(search).await?;

		debug!(collection = %collection, hits = response.result.len(), "Vector query finished.");

		Ok(response
			.result
			.into_iter()
			.map(|point| VectorMatch {
				score: point.score,
				payload: crate::payload::payload_to_json(&point.payload),
			})
			.collect())
	}
}

pub fn collection_name(prefix: &str, namespace: &str) -> String {
	format!("{prefix}{namespace}")
}

/// Every predicate becomes a `must` condition. An empty filter yields `None` so the query is
/// unfiltered.
pub fn to_qdrant_filter(filter: &RetrievalFilter) -> Option<Filter> {
	if filter.is_empty() {
		return None;
	}

	let conditions: Vec<Condition> = filter
		.iter()
		.map(|(key, predicate)| match predicate {
			Predicate::Eq(text) => Condition::matches(key, text.clone()),
			Predicate::Range { gte, lte } => Condition::range(
				key,
				Range { gte: Some(*gte as f64), lte: Some(*lte as f64), ..Default::default() },
			),
		})
		.collect();

	Some(Filter::must(conditions))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collection_uses_prefix() {
		assert_eq!(collection_name("pitchside_", "match_events"), "pitchside_match_events");
		assert_eq!(collection_name("", "historic_knowledge"), "historic_knowledge");
	}

	#[test]
	fn empty_filter_is_unfiltered() {
		assert!(to_qdrant_filter(&RetrievalFilter::new()).is_none());
	}

	#[test]
	fn predicates_become_must_conditions() {
		let mut filter = RetrievalFilter::new();

		filter.insert("player", Predicate::Eq("Arjun Rao".to_string()));
		filter.insert("minute", Predicate::Range { gte: 20, lte: 30 });

		let qdrant = to_qdrant_filter(&filter).expect("filter expected");

		assert_eq!(qdrant.must.len(), 2);
		assert!(qdrant.should.is_empty());
		assert!(qdrant.must_not.is_empty());
	}
}
