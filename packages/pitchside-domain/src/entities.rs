use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize_text;

static MINUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"\b(?:minutes?|mins?)\s*(\d{1,3})\b|\b(\d{1,3})(?:st|nd|rd|th)?[\s-]*(?:minutes?|mins?)\b|\b(\d{1,3})'",
	)
	.expect("minute regex is valid")
});
static OPPONENT_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\b(?:vs\.?|versus|against)\s+").expect("opponent marker regex is valid")
});

const MAX_MATCH_MINUTE: u32 = 130;

/// Structured hints pulled out of a message. `None` means "do not filter on this".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBag {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub player: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub team: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub opponent: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub competition: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub minute: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timeframe: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub topic: Option<String>,
}
impl EntityBag {
	pub fn is_empty(&self) -> bool {
		EntityField::ALL.into_iter().all(|field| self.value(field).is_none())
	}

	pub fn value(&self, field: EntityField) -> Option<EntityValue<'_>> {
		match field {
			EntityField::Player => self.player.as_deref().map(EntityValue::Text),
			EntityField::Team => self.team.as_deref().map(EntityValue::Text),
			EntityField::Opponent => self.opponent.as_deref().map(EntityValue::Text),
			EntityField::Competition => self.competition.as_deref().map(EntityValue::Text),
			EntityField::Minute => self.minute.map(EntityValue::Minute),
			EntityField::Timeframe => self.timeframe.as_deref().map(EntityValue::Text),
			EntityField::Topic => self.topic.as_deref().map(EntityValue::Text),
		}
	}

	/// Keeps every field already set and takes the rest from `other`.
	pub fn fill_missing(self, other: Self) -> Self {
		Self {
			player: self.player.or(other.player),
			team: self.team.or(other.team),
			opponent: self.opponent.or(other.opponent),
			competition: self.competition.or(other.competition),
			minute: self.minute.or(other.minute),
			timeframe: self.timeframe.or(other.timeframe),
			topic: self.topic.or(other.topic),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityField {
	Player,
	Team,
	Opponent,
	Competition,
	Minute,
	Timeframe,
	Topic,
}
impl EntityField {
	pub const ALL: [Self; 7] = [
		Self::Player,
		Self::Team,
		Self::Opponent,
		Self::Competition,
		Self::Minute,
		Self::Timeframe,
		Self::Topic,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Player => "player",
			Self::Team => "team",
			Self::Opponent => "opponent",
			Self::Competition => "competition",
			Self::Minute => "minute",
			Self::Timeframe => "timeframe",
			Self::Topic => "topic",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityValue<'a> {
	Text(&'a str),
	Minute(u32),
}

#[derive(Clone, Debug)]
struct LexiconEntry {
	canonical: String,
	needle: String,
}

/// Lexicon-driven extractor. Candidate lists are checked in configured order and the first
/// entry found anywhere in the message wins its category.
#[derive(Clone, Debug)]
pub struct EntityExtractor {
	players: Vec<LexiconEntry>,
	teams: Vec<LexiconEntry>,
	opponents: Vec<LexiconEntry>,
	competitions: Vec<LexiconEntry>,
	topics: Vec<LexiconEntry>,
	time_phrases: Vec<LexiconEntry>,
}
impl EntityExtractor {
	pub fn from_lexicon(lexicon: &pitchside_config::Lexicon) -> Self {
		Self {
			players: entries(&lexicon.players),
			teams: entries(&lexicon.teams),
			opponents: entries(&lexicon.opponents),
			competitions: entries(&lexicon.competitions),
			topics: entries(&lexicon.topics),
			time_phrases: entries(&lexicon.time_phrases),
		}
	}

	pub fn extract(&self, text: &str) -> EntityBag {
		if text.trim().is_empty() {
			return EntityBag::default();
		}

		let normalized = normalize_text(text);
		let opponent = first_match(&self.opponents, &normalized)
			.or_else(|| team_after_marker(&self.teams, &normalized));
		let team = self
			.teams
			.iter()
			.find(|entry| {
				normalized.contains(entry.needle.as_str())
					&& opponent.as_deref() != Some(entry.canonical.as_str())
			})
			.map(|entry| entry.canonical.clone());

		EntityBag {
			player: first_match(&self.players, &normalized),
			team,
			opponent,
			competition: first_match(&self.competitions, &normalized),
			minute: extract_minute(&normalized),
			timeframe: first_match(&self.time_phrases, &normalized),
			topic: first_match(&self.topics, &normalized),
		}
	}
}

fn entries(values: &[String]) -> Vec<LexiconEntry> {
	values
		.iter()
		.filter(|value| !value.trim().is_empty())
		.map(|value| LexiconEntry {
			canonical: value.trim().to_string(),
			needle: normalize_text(value.trim()),
		})
		.collect()
}

fn first_match(entries: &[LexiconEntry], normalized: &str) -> Option<String> {
	entries
		.iter()
		.find(|entry| normalized.contains(entry.needle.as_str()))
		.map(|entry| entry.canonical.clone())
}

fn team_after_marker(teams: &[LexiconEntry], normalized: &str) -> Option<String> {
	for marker in OPPONENT_MARKER_RE.find_iter(normalized) {
		let rest = &normalized[marker.end()..];

		if let Some(entry) = teams.iter().find(|entry| rest.starts_with(entry.needle.as_str())) {
			return Some(entry.canonical.clone());
		}
	}

	None
}

fn extract_minute(normalized: &str) -> Option<u32> {
	for captures in MINUTE_RE.captures_iter(normalized) {
		let Some(raw) = captures.iter().skip(1).flatten().next() else {
			continue;
		};

		if let Ok(minute) = raw.as_str().parse::<u32>()
			&& minute <= MAX_MATCH_MINUTE
		{
			return Some(minute);
		}
	}

	None
}
