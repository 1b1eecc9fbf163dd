pub mod classify;
pub mod plan;
pub mod router;
pub mod vector;
pub mod web;

mod error;

pub use error::{Error, Result};
pub use router::{RouteOutcome, Router};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use pitchside_config::{EmbeddingProviderConfig, LlmProviderConfig, WebSearchProviderConfig};
use pitchside_domain::{filter::RetrievalFilter, result::WebHit};
use pitchside_providers::{classifier, embedding, web_search};
use pitchside_storage::qdrant::{QdrantStore, VectorMatch};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

pub trait ClassifierProvider
where
	Self: Send + Sync,
{
	fn classify<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, Result<Value>>;
}

pub trait WebSearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a WebSearchProviderConfig,
		query: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, Result<Vec<WebHit>>>;
}

/// Namespaced nearest-neighbour search.
pub trait VectorIndex
where
	Self: Send + Sync,
{
	fn query<'a>(
		&'a self,
		namespace: &'a str,
		vector: Vec<f32>,
		top_k: u32,
		filter: &'a RetrievalFilter,
	) -> BoxFuture<'a, Result<Vec<VectorMatch>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub classifier: Arc<dyn ClassifierProvider>,
	pub web_search: Arc<dyn WebSearchProvider>,
}
impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		classifier: Arc<dyn ClassifierProvider>,
		web_search: Arc<dyn WebSearchProvider>,
	) -> Self {
		Self { embedding, classifier, web_search }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), classifier: provider.clone(), web_search: provider }
	}
}

struct DefaultProviders;
impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Ok(embedding::embed(cfg, texts).await?) })
	}
}
impl ClassifierProvider for DefaultProviders {
	fn classify<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, Result<Value>> {
		Box::pin(async move { Ok(classifier::classify(cfg, messages).await?) })
	}
}
impl WebSearchProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a WebSearchProviderConfig,
		query: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, Result<Vec<WebHit>>> {
		Box::pin(async move { Ok(web_search::search(cfg, query, max_results).await?) })
	}
}

impl VectorIndex for QdrantStore {
	fn query<'a>(
		&'a self,
		namespace: &'a str,
		vector: Vec<f32>,
		top_k: u32,
		filter: &'a RetrievalFilter,
	) -> BoxFuture<'a, Result<Vec<VectorMatch>>> {
		Box::pin(async move { Ok(QdrantStore::query(self, namespace, vector, top_k, filter).await?) })
	}
}
