use std::{panic::AssertUnwindSafe, sync::Arc};

use futures::{FutureExt, future};
use serde::Serialize;
use tracing::{debug, info, warn};

use pitchside_config::Config;
use pitchside_domain::{
	classifier::LiveInfoDetector,
	context::{self, ContextSection},
	entities::{EntityBag, EntityExtractor},
	filter::{self, RetrievalFilter},
	intent::Intent,
};

use crate::{
	BoxFuture, Providers, Result, VectorIndex,
	classify::IntentClassifier,
	plan::{self, FilterMode, PlanStep},
	vector::VectorRetriever,
	web::WebRetriever,
};

pub const WEB_SECTION_TAG: &str = "web_results";

/// Everything one routing pass decided, plus the assembled context.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RouteOutcome {
	pub intent: Intent,
	pub entities: EntityBag,
	/// Labels of the executed plan steps in table order.
	pub steps: Vec<String>,
	pub context: String,
}

/// Single-shot router from a user message to retrieval context. Holds no per-request state,
/// so one instance serves concurrent requests.
pub struct Router {
	cfg: Config,
	extractor: EntityExtractor,
	classifier: IntentClassifier,
	live: LiveInfoDetector,
	vector: VectorRetriever,
	web: WebRetriever,
}
impl Router {
	pub fn new(cfg: Config, providers: Providers, index: Arc<dyn VectorIndex>) -> Result<Self> {
		let extractor = EntityExtractor::from_lexicon(&cfg.lexicon);
		let classifier = IntentClassifier::from_config(&cfg, providers.classifier.clone())?;
		let live = LiveInfoDetector::from_config(&cfg.classifier.live)?;
		let vector = VectorRetriever::new(&cfg, providers.embedding.clone(), index);
		let web = WebRetriever::new(&cfg, providers.web_search.clone());

		Ok(Self { cfg, extractor, classifier, live, vector, web })
	}

	/// Returns the retrieval context for `message`. Never fails; the context may be empty.
	pub async fn route(&self, message: &str) -> String {
		self.route_detailed(message).await.context
	}

	pub async fn route_detailed(&self, message: &str) -> RouteOutcome {
		if message.trim().is_empty() {
			debug!("Blank message. Skipping classification and retrieval.");

			return RouteOutcome::default();
		}

		let lexicon_entities = self.extractor.extract(message);
		let classification = self.classifier.classify(message).await;
		let entities = lexicon_entities.fill_missing(classification.entities);
		let intent = classification.intent;
		let branch = plan::dispatch_plan(intent);
		let steps = branch.resolve(branch.needs_live_decision() && self.live.is_current_info(message));

		debug!(
			intent = intent.as_str(),
			entities = ?entities,
			steps = steps.len(),
			"Resolved dispatch plan."
		);

		let sections = self.execute(steps, message, &entities).await;
		let context = context::assemble(&sections);
		let hits: usize = sections.iter().map(|section| section.results.len()).sum();

		info!(intent = intent.as_str(), steps = steps.len(), hits, "Routed message.");

		RouteOutcome {
			intent,
			entities,
			steps: steps.iter().map(|step| step.label()).collect(),
			context,
		}
	}

	/// Runs every step concurrently and returns their sections in step order.
	async fn execute(
		&self,
		steps: &'static [PlanStep],
		message: &str,
		entities: &EntityBag,
	) -> Vec<ContextSection> {
		let pending: Vec<BoxFuture<'_, ContextSection>> =
			steps.iter().map(|step| self.guarded_step(*step, message, entities)).collect();

		future::join_all(pending).await
	}

	/// Contains a panic to the step that raised it, leaving the other sections intact.
	fn guarded_step<'a>(
		&'a self,
		step: PlanStep,
		message: &'a str,
		entities: &'a EntityBag,
	) -> BoxFuture<'a, ContextSection> {
		Box::pin(async move {
			match AssertUnwindSafe(self.run_step(step, message, entities)).catch_unwind().await {
				Ok(section) => section,
				Err(_) => {
					warn!(step = %step.label(), "Retrieval step panicked. Dropping its section.");

					ContextSection::new(section_tag(step), Vec::new())
				},
			}
		})
	}

	fn run_step<'a>(
		&'a self,
		step: PlanStep,
		message: &'a str,
		entities: &'a EntityBag,
	) -> BoxFuture<'a, ContextSection> {
		match step {
			PlanStep::Vector { namespace, filter: mode } => Box::pin(async move {
				let schema = namespace.schema(&self.cfg.retrieval.namespaces);
				let filter = match mode {
					FilterMode::Entities =>
						filter::build_filter(entities, schema, self.cfg.retrieval.minute_window),
					FilterMode::Unfiltered => RetrievalFilter::new(),
				};
				let results = self.vector.search(message, &schema.name, &filter, None).await;

				debug!(step = %step.label(), hits = results.len(), "Vector step finished.");

				ContextSection::new(section_tag(step), results)
			}),
			PlanStep::Web { hint, query } => Box::pin(async move {
				let query = query.build(message, entities);
				let results = self.web.search(&query, hint).await;

				debug!(step = %step.label(), hits = results.len(), "Web step finished.");

				ContextSection::new(section_tag(step), results)
			}),
		}
	}
}

fn section_tag(step: PlanStep) -> &'static str {
	match step {
		PlanStep::Vector { namespace, .. } => namespace.as_str(),
		PlanStep::Web { .. } => WEB_SECTION_TAG,
	}
}
