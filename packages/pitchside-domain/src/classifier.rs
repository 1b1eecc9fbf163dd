use regex::{Regex, RegexBuilder};

use crate::{Error, Result, intent::Intent, normalize_text};

/// Ordered keyword rules. Rule order is the tie-break: the first rule with any keyword
/// contained in the lowercased message decides the intent.
#[derive(Clone, Debug)]
pub struct KeywordClassifier {
	rules: Vec<(Intent, Vec<String>)>,
}
impl KeywordClassifier {
	pub fn from_rules(rules: &[pitchside_config::ClassifierRule]) -> Result<Self> {
		let mut parsed = Vec::with_capacity(rules.len());

		for rule in rules {
			let intent: Intent = rule.intent.parse()?;
			let keywords = rule
				.keywords
				.iter()
				.filter(|keyword| !keyword.trim().is_empty())
				.map(|keyword| normalize_text(keyword))
				.collect();

			parsed.push((intent, keywords));
		}

		Ok(Self { rules: parsed })
	}

	pub fn classify(&self, text: &str) -> Intent {
		if text.trim().is_empty() {
			return Intent::Generic;
		}

		let normalized = normalize_text(text);

		self.rules
			.iter()
			.find(|(_, keywords)| keywords.iter().any(|keyword| normalized.contains(keyword.as_str())))
			.map(|(intent, _)| *intent)
			.unwrap_or(Intent::Generic)
	}

	pub fn rule_order(&self) -> Vec<Intent> {
		self.rules.iter().map(|(intent, _)| *intent).collect()
	}
}

/// Which of the three independent live-information signals fired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiveSignals {
	pub temporal: bool,
	pub subject: bool,
	pub question_pattern: bool,
}
impl LiveSignals {
	/// Any single signal is enough.
	pub fn any(self) -> bool {
		self.temporal || self.subject || self.question_pattern
	}
}

/// Decides whether an otherwise unclassified message asks about current events.
#[derive(Clone, Debug)]
pub struct LiveInfoDetector {
	temporal_keywords: Vec<String>,
	subject_keywords: Vec<String>,
	question_patterns: Vec<Regex>,
}
impl LiveInfoDetector {
	pub fn from_config(cfg: &pitchside_config::LiveHeuristic) -> Result<Self> {
		let mut question_patterns = Vec::with_capacity(cfg.question_patterns.len());

		for pattern in &cfg.question_patterns {
			let regex = RegexBuilder::new(pattern).case_insensitive(true).build().map_err(
				|err| Error::InvalidPattern { pattern: pattern.clone(), message: err.to_string() },
			)?;

			question_patterns.push(regex);
		}

		Ok(Self {
			temporal_keywords: cfg.temporal_keywords.iter().map(|k| normalize_text(k)).collect(),
			subject_keywords: cfg.subject_keywords.iter().map(|k| normalize_text(k)).collect(),
			question_patterns,
		})
	}

	pub fn signals(&self, text: &str) -> LiveSignals {
		if text.trim().is_empty() {
			return LiveSignals::default();
		}

		let normalized = normalize_text(text);
		let normalized = normalized.trim();

		LiveSignals {
			temporal: contains_any(normalized, &self.temporal_keywords),
			subject: contains_any(normalized, &self.subject_keywords),
			question_pattern: self.question_patterns.iter().any(|re| re.is_match(normalized)),
		}
	}

	pub fn is_current_info(&self, text: &str) -> bool {
		self.signals(text).any()
	}
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
	keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}
