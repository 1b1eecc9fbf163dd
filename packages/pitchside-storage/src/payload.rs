use std::collections::HashMap;

use qdrant_client::qdrant::{Value, value::Kind};
use serde_json::{Map, Number};

/// Converts a Qdrant payload into a JSON object so nothing store-specific leaves this crate.
pub fn payload_to_json(payload: &HashMap<String, Value>) -> Map<String, serde_json::Value> {
	payload.iter().map(|(key, value)| (key.clone(), value_to_json(value))).collect()
}

pub fn value_to_json(value: &Value) -> serde_json::Value {
	match &value.kind {
		None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
		Some(Kind::BoolValue(flag)) => serde_json::Value::Bool(*flag),
		Some(Kind::IntegerValue(number)) => serde_json::Value::Number((*number).into()),
		Some(Kind::DoubleValue(number)) =>
			Number::from_f64(*number).map(serde_json::Value::Number).unwrap_or(serde_json::Value::Null),
		Some(Kind::StringValue(text)) => serde_json::Value::String(text.clone()),
		Some(Kind::ListValue(list)) =>
			serde_json::Value::Array(list.values.iter().map(value_to_json).collect()),
		Some(Kind::StructValue(inner)) => serde_json::Value::Object(payload_to_json(&inner.fields)),
	}
}
