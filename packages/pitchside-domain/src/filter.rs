use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::entities::{EntityBag, EntityField, EntityValue};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
	Eq(String),
	/// Inclusive on both ends.
	Range { gte: i64, lte: i64 },
}

/// Payload key to predicate. All predicates must hold; an empty filter matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RetrievalFilter {
	predicates: BTreeMap<String, Predicate>,
}
impl RetrievalFilter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.predicates.is_empty()
	}

	pub fn len(&self) -> usize {
		self.predicates.len()
	}

	pub fn get(&self, key: &str) -> Option<&Predicate> {
		self.predicates.get(key)
	}

	pub fn insert(&mut self, key: impl Into<String>, predicate: Predicate) {
		self.predicates.insert(key.into(), predicate);
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Predicate)> {
		self.predicates.iter().map(|(key, predicate)| (key.as_str(), predicate))
	}

	/// Operator-style rendering used in logs, e.g. `{"minute": {"$gte": 20, "$lte": 30}}`.
	pub fn to_json(&self) -> Value {
		let mut out = Map::new();

		for (key, predicate) in &self.predicates {
			let rendered = match predicate {
				Predicate::Eq(text) => serde_json::json!({ "$eq": text }),
				Predicate::Range { gte, lte } => serde_json::json!({ "$gte": gte, "$lte": lte }),
			};

			out.insert(key.clone(), rendered);
		}

		Value::Object(out)
	}
}

/// Builds the filter for one namespace. Only fields the schema maps are emitted, and a minute
/// becomes a `[minute - window, minute + window]` range clamped at zero.
pub fn build_filter(
	entities: &EntityBag,
	schema: &pitchside_config::NamespaceSchema,
	minute_window: u32,
) -> RetrievalFilter {
	let mut filter = RetrievalFilter::new();

	for field in EntityField::ALL {
		let Some(key) = schema.fields.get(field.as_str()) else {
			continue;
		};
		let Some(value) = entities.value(field) else {
			continue;
		};
		let predicate = match value {
			EntityValue::Text(text) => Predicate::Eq(text.to_string()),
			EntityValue::Minute(minute) => Predicate::Range {
				gte: i64::from(minute.saturating_sub(minute_window)),
				lte: i64::from(minute) + i64::from(minute_window),
			},
		};

		filter.insert(key.clone(), predicate);
	}

	filter
}
