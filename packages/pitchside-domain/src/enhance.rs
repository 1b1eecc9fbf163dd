use serde::{Deserialize, Serialize};

/// Search flavour passed to the web adapter. Each maps to a fixed phrase bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchHint {
	Tactics,
	FanConversation,
	Live,
	Previous,
}
impl SearchHint {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Tactics => "tactics",
			Self::FanConversation => "fan_conversation",
			Self::Live => "live",
			Self::Previous => "previous",
		}
	}

	pub fn phrases(self) -> &'static str {
		match self {
			Self::Tactics => "football explanation tactics explained soccer tactics",
			Self::FanConversation => "reddit twitter reactions fan opinions live reactions",
			Self::Live => "live score match updates live commentary",
			Self::Previous => "match report highlights post-match analysis",
		}
	}
}

/// Appends the hint's phrase bank to `query`. The query text always stays in front.
pub fn enhance(query: &str, hint: Option<SearchHint>) -> String {
	let query = query.trim();
	let Some(hint) = hint else {
		return query.to_string();
	};

	if query.is_empty() {
		return hint.phrases().to_string();
	}

	format!("{query} {}", hint.phrases())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn no_hint_returns_query() {
		assert_eq!(enhance("Who is the captain?", None), "Who is the captain?");
	}

	#[test]
	fn hint_appends_phrase_bank_after_query() {
		let enhanced = enhance("Blueport pressing", Some(SearchHint::Tactics));

		assert!(enhanced.starts_with("Blueport pressing "));
		assert!(enhanced.ends_with("soccer tactics"));

		let fans = enhance("referee", Some(SearchHint::FanConversation));

		assert!(fans.contains("reddit") && fans.contains("twitter"));
	}

	#[test]
	fn every_hint_keeps_the_query() {
		for hint in
			[SearchHint::Tactics, SearchHint::FanConversation, SearchHint::Live, SearchHint::Previous]
		{
			assert!(enhance("vs Blueport", Some(hint)).starts_with("vs Blueport"));
		}
	}
}
