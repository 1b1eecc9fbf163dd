//! Intent to dispatch plan, as data.
//!
//! Steps of a plan run concurrently and their sections are assembled in table order.

use pitchside_config::{NamespaceSchema, Namespaces};
use pitchside_domain::{entities::EntityBag, enhance::SearchHint, intent::Intent};

/// Vector namespaces by role. The configured schema supplies the stored name and filter keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
	MatchEvents,
	HistoricKnowledge,
}
impl Namespace {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::MatchEvents => "match_events",
			Self::HistoricKnowledge => "historic_knowledge",
		}
	}

	pub fn schema(self, namespaces: &Namespaces) -> &NamespaceSchema {
		match self {
			Self::MatchEvents => &namespaces.match_events,
			Self::HistoricKnowledge => &namespaces.historic_knowledge,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
	/// Equality and minute-range predicates for every entity the schema maps.
	Entities,
	Unfiltered,
}

/// How the web query text is derived. Every source falls back to the raw message when it
/// would otherwise be empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WebQuery {
	Message,
	/// Player, else topic.
	Subject,
	/// `vs {opponent} {competition}`.
	Fixture,
}
impl WebQuery {
	pub fn build(self, message: &str, entities: &EntityBag) -> String {
		let derived = match self {
			Self::Message => String::new(),
			Self::Subject => entities
				.player
				.as_deref()
				.or(entities.topic.as_deref())
				.unwrap_or_default()
				.to_string(),
			Self::Fixture => {
				let mut parts = Vec::with_capacity(2);

				if let Some(opponent) = entities.opponent.as_deref() {
					parts.push(format!("vs {opponent}"));
				}
				if let Some(competition) = entities.competition.as_deref() {
					parts.push(competition.to_string());
				}

				parts.join(" ")
			},
		};

		if derived.trim().is_empty() { message.trim().to_string() } else { derived }
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanStep {
	Vector { namespace: Namespace, filter: FilterMode },
	Web { hint: Option<SearchHint>, query: WebQuery },
}
impl PlanStep {
	pub fn label(self) -> String {
		match self {
			Self::Vector { namespace, filter: FilterMode::Entities } =>
				format!("vector:{}", namespace.as_str()),
			Self::Vector { namespace, filter: FilterMode::Unfiltered } =>
				format!("vector:{}:unfiltered", namespace.as_str()),
			Self::Web { hint: Some(hint), .. } => format!("web:{}", hint.as_str()),
			Self::Web { hint: None, .. } => "web".to_string(),
		}
	}
}

/// A table entry. Only the `generic` row needs the live-information decision to pick its steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanBranch {
	Fixed(&'static [PlanStep]),
	ByLiveInfo { live: &'static [PlanStep], otherwise: &'static [PlanStep] },
}
impl PlanBranch {
	pub fn resolve(self, is_current_info: bool) -> &'static [PlanStep] {
		match self {
			Self::Fixed(steps) => steps,
			Self::ByLiveInfo { live, otherwise } => if is_current_info { live } else { otherwise },
		}
	}

	pub fn needs_live_decision(self) -> bool {
		matches!(self, Self::ByLiveInfo { .. })
	}
}

const PERFORMANCE: &[PlanStep] =
	&[PlanStep::Vector { namespace: Namespace::MatchEvents, filter: FilterMode::Entities }];
const HISTORY: &[PlanStep] =
	&[PlanStep::Vector { namespace: Namespace::HistoricKnowledge, filter: FilterMode::Entities }];
const TACTICS: &[PlanStep] = &[
	PlanStep::Vector { namespace: Namespace::HistoricKnowledge, filter: FilterMode::Entities },
	PlanStep::Web { hint: Some(SearchHint::Tactics), query: WebQuery::Message },
];
const FAN_CONVERSATION: &[PlanStep] =
	&[PlanStep::Web { hint: Some(SearchHint::FanConversation), query: WebQuery::Subject }];
const LIVE_MATCH: &[PlanStep] =
	&[PlanStep::Web { hint: Some(SearchHint::Live), query: WebQuery::Fixture }];
const PREVIOUS_MATCH: &[PlanStep] =
	&[PlanStep::Web { hint: Some(SearchHint::Previous), query: WebQuery::Fixture }];
const NO_RETRIEVAL: &[PlanStep] = &[];
const GENERIC_LIVE: &[PlanStep] =
	&[PlanStep::Web { hint: Some(SearchHint::Live), query: WebQuery::Message }];
const GENERIC_HISTORIC: &[PlanStep] = &[
	PlanStep::Vector { namespace: Namespace::MatchEvents, filter: FilterMode::Unfiltered },
	PlanStep::Vector { namespace: Namespace::HistoricKnowledge, filter: FilterMode::Unfiltered },
];

pub fn dispatch_plan(intent: Intent) -> PlanBranch {
	match intent {
		Intent::Performance => PlanBranch::Fixed(PERFORMANCE),
		Intent::History => PlanBranch::Fixed(HISTORY),
		Intent::Tactics => PlanBranch::Fixed(TACTICS),
		Intent::FanConversation => PlanBranch::Fixed(FAN_CONVERSATION),
		Intent::LiveMatch => PlanBranch::Fixed(LIVE_MATCH),
		Intent::PreviousMatch => PlanBranch::Fixed(PREVIOUS_MATCH),
		Intent::GeneralFootball => PlanBranch::Fixed(NO_RETRIEVAL),
		Intent::Generic => PlanBranch::ByLiveInfo { live: GENERIC_LIVE, otherwise: GENERIC_HISTORIC },
	}
}
