use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::Error;

/// What a single message is asking for. Exactly one per message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
	/// Current match, minute windows, shots, "this half".
	Performance,
	/// Seasons, careers, previous years.
	History,
	/// Formations, pressing, shape, transitions.
	Tactics,
	/// Fans, social media, "what people are saying".
	FanConversation,
	/// Live score, lineups, what just happened.
	LiveMatch,
	/// Last game, match reports.
	PreviousMatch,
	/// Conceptual football knowledge that needs no retrieval.
	GeneralFootball,
	#[default]
	Generic,
}
impl Intent {
	pub const ALL: [Self; 8] = [
		Self::Performance,
		Self::History,
		Self::Tactics,
		Self::FanConversation,
		Self::LiveMatch,
		Self::PreviousMatch,
		Self::GeneralFootball,
		Self::Generic,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Performance => "performance",
			Self::History => "history",
			Self::Tactics => "tactics",
			Self::FanConversation => "fan_conversation",
			Self::LiveMatch => "live_match",
			Self::PreviousMatch => "previous_match",
			Self::GeneralFootball => "general_football",
			Self::Generic => "generic",
		}
	}

	/// Labels outside the closed set collapse to [`Intent::Generic`].
	pub fn from_label_or_generic(label: &str) -> Self {
		label.parse().unwrap_or(Self::Generic)
	}

	/// One line telling the generation step how to use the evidence for this intent.
	pub fn guidance(self) -> &'static str {
		match self {
			Self::Performance =>
				"Describe the player or team actions in the retrieved minute windows and attribute them to match data.",
			Self::History => "Ground season and career claims in the retrieved archive entries.",
			Self::Tactics =>
				"Explain the tactical shape in simple terms, using the retrieved material as examples.",
			Self::FanConversation =>
				"Summarize fan sentiment from the retrieved posts and attribute it to its sources.",
			Self::LiveMatch =>
				"Report live events only as stated in the retrieved reports and never invent scores or goals.",
			Self::PreviousMatch =>
				"Summarize key moments and decisions from the retrieved match reports.",
			Self::GeneralFootball => "Answer from general football knowledge.",
			Self::Generic => "Answer using the retrieved context where it is relevant.",
		}
	}
}

impl Display for Intent {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Intent {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let label = raw.trim().to_ascii_lowercase();

		Self::ALL
			.into_iter()
			.find(|intent| intent.as_str() == label)
			.ok_or(Error::UnknownIntent { label })
	}
}
