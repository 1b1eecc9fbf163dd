use std::{collections::BTreeMap, fs, path::Path, time::Instant};

use color_eyre::eyre;
use serde::{Deserialize, Serialize};

use pitchside_config::Config;
use pitchside_domain::{
	entities::{EntityBag, EntityExtractor, EntityField},
	intent::Intent,
};
use pitchside_service::classify::IntentClassifier;

#[derive(Debug, Deserialize)]
pub struct EvalDataset {
	pub name: Option<String>,
	pub cases: Vec<EvalCase>,
}

#[derive(Debug, Deserialize)]
pub struct EvalCase {
	pub id: Option<String>,
	pub message: String,
	pub intent: Intent,
	#[serde(default)]
	pub entities: EntityBag,
}

#[derive(Debug, Serialize)]
pub struct EvalReport {
	pub dataset: String,
	pub strategy: String,
	pub summary: EvalSummary,
	pub cases: Vec<CaseReport>,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct EvalSummary {
	pub case_count: usize,
	pub intent_accuracy: f64,
	/// Share of labeled entity fields reproduced exactly. `1.0` when nothing is labeled.
	pub entity_recall: f64,
	pub latency_ms_p50: f64,
	pub per_intent: BTreeMap<String, IntentTally>,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct IntentTally {
	pub expected: usize,
	pub correct: usize,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CaseReport {
	pub id: String,
	pub message: String,
	pub expected_intent: Intent,
	pub actual_intent: Intent,
	pub intent_match: bool,
	pub expected_fields: usize,
	pub matched_fields: usize,
	pub missed_fields: Vec<String>,
	pub entities: EntityBag,
	pub latency_ms: f64,
}

pub fn load_dataset(path: &Path) -> color_eyre::Result<EvalDataset> {
	let raw = fs::read_to_string(path)?;
	let dataset: EvalDataset = serde_json::from_str(&raw)?;

	if dataset.cases.is_empty() {
		return Err(eyre::eyre!("Dataset must include at least one case."));
	}

	Ok(dataset)
}

pub async fn evaluate(
	cfg: &Config,
	classifier: &IntentClassifier,
	dataset: &EvalDataset,
) -> EvalReport {
	let extractor = EntityExtractor::from_lexicon(&cfg.lexicon);
	let mut cases = Vec::with_capacity(dataset.cases.len());

	for (idx, case) in dataset.cases.iter().enumerate() {
		let started = Instant::now();
		let classification = classifier.classify(&case.message).await;
		let entities = extractor.extract(&case.message).fill_missing(classification.entities);
		let latency_ms = started.elapsed().as_secs_f64() * 1_000.0;
		let id = case.id.clone().unwrap_or_else(|| format!("case-{}", idx + 1));

		cases.push(score_case(id, case, classification.intent, entities, latency_ms));
	}

	EvalReport {
		dataset: dataset.name.clone().unwrap_or_else(|| "unnamed".to_string()),
		strategy: format!("{:?}", classifier.strategy()).to_lowercase(),
		summary: summarize(&cases),
		cases,
	}
}

pub fn score_case(
	id: String,
	case: &EvalCase,
	actual_intent: Intent,
	entities: EntityBag,
	latency_ms: f64,
) -> CaseReport {
	let mut expected_fields = 0;
	let mut missed_fields = Vec::new();

	for field in EntityField::ALL {
		let Some(expected) = case.entities.value(field) else {
			continue;
		};

		expected_fields += 1;

		if entities.value(field) != Some(expected) {
			missed_fields.push(field.as_str().to_string());
		}
	}

	CaseReport {
		id,
		message: case.message.clone(),
		expected_intent: case.intent,
		actual_intent,
		intent_match: case.intent == actual_intent,
		expected_fields,
		matched_fields: expected_fields - missed_fields.len(),
		missed_fields,
		entities,
		latency_ms,
	}
}

pub fn summarize(cases: &[CaseReport]) -> EvalSummary {
	if cases.is_empty() {
		return EvalSummary::default();
	}

	let mut per_intent: BTreeMap<String, IntentTally> = BTreeMap::new();

	for case in cases {
		let tally = per_intent.entry(case.expected_intent.as_str().to_string()).or_default();

		tally.expected += 1;

		if case.intent_match {
			tally.correct += 1;
		}
	}

	let correct = cases.iter().filter(|case| case.intent_match).count();
	let expected_fields: usize = cases.iter().map(|case| case.expected_fields).sum();
	let matched_fields: usize = cases.iter().map(|case| case.matched_fields).sum();
	let entity_recall =
		if expected_fields == 0 { 1.0 } else { matched_fields as f64 / expected_fields as f64 };
	let mut latencies: Vec<f64> = cases.iter().map(|case| case.latency_ms).collect();

	latencies.sort_by(|a, b| a.total_cmp(b));

	EvalSummary {
		case_count: cases.len(),
		intent_accuracy: correct as f64 / cases.len() as f64,
		entity_recall,
		latency_ms_p50: latencies[latencies.len() / 2],
		per_intent,
	}
}
