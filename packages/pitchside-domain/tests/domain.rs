use pitchside_config::{Classifier, Lexicon, Namespaces};
use pitchside_domain::{
	classifier::KeywordClassifier,
	context::{self, ContextSection},
	entities::{EntityBag, EntityExtractor},
	filter::{self, Predicate},
	intent::Intent,
	result::RawResult,
};

fn extractor() -> EntityExtractor {
	EntityExtractor::from_lexicon(&Lexicon::default())
}

fn classifier() -> KeywordClassifier {
	KeywordClassifier::from_rules(&Classifier::default().rules).expect("default rules must parse")
}

fn text(value: &str) -> Predicate {
	Predicate::Eq(value.to_string())
}

#[test]
fn formation_question_targets_team() {
	let message = "What formation are Redchester using?";
	let entities = extractor().extract(message);

	assert_eq!(entities, EntityBag { team: Some("Redchester".to_string()), ..Default::default() });
	assert_eq!(classifier().classify(message), Intent::Tactics);

	let filter = filter::build_filter(&entities, &Namespaces::default().historic_knowledge, 5);

	assert_eq!(filter.len(), 1);
	assert_eq!(filter.get("team"), Some(&text("Redchester")));
}

#[test]
fn fan_question_is_fan_conversation() {
	let message = "What do fans think about the referee?";

	assert_eq!(classifier().classify(message), Intent::FanConversation);
	assert_eq!(extractor().extract(message).topic.as_deref(), Some("referee"));
}

#[test]
fn minute_window_question_builds_range_filter() {
	let message = "How did Arjun Rao perform between minute 25–30?";
	let entities = extractor().extract(message);

	assert_eq!(
		entities,
		EntityBag {
			player: Some("Arjun Rao".to_string()),
			minute: Some(25),
			..Default::default()
		}
	);
	assert_eq!(classifier().classify(message), Intent::Performance);

	let filter = filter::build_filter(&entities, &Namespaces::default().match_events, 5);

	assert_eq!(filter.get("minute"), Some(&Predicate::Range { gte: 20, lte: 30 }));
	assert_eq!(filter.get("player"), Some(&text("Arjun Rao")));
}

#[test]
fn historic_schema_renames_player_key() {
	let entities = extractor().extract("Has Leo Mendes been consistent this season?");
	let filter = filter::build_filter(&entities, &Namespaces::default().historic_knowledge, 5);

	assert_eq!(classifier().classify("Has Leo Mendes been consistent this season?"), Intent::History);
	assert_eq!(entities.timeframe.as_deref(), Some("this season"));
	assert_eq!(filter.get("player_name"), Some(&text("Leo Mendes")));
	assert!(filter.get("player").is_none());
	assert!(filter.get("timeframe").is_none());
}

#[test]
fn opponent_is_separated_from_team() {
	let entities =
		extractor().extract("Redchester vs Blueport in the Champions League, live score please");

	assert_eq!(entities.team.as_deref(), Some("Redchester"));
	assert_eq!(entities.opponent.as_deref(), Some("Blueport"));
	assert_eq!(entities.competition.as_deref(), Some("Champions League"));
}

#[test]
fn blank_message_yields_generic_and_empty_bag() {
	for message in ["", "   ", "\n\t"] {
		assert_eq!(classifier().classify(message), Intent::Generic);
		assert!(extractor().extract(message).is_empty());
	}
}

#[test]
fn extraction_is_idempotent() {
	let extractor = extractor();

	for message in [
		"How did Arjun Rao perform between minute 25–30?",
		"Kingsford Athletic against Northvale in the FA Cup tonight",
		"nothing to see here",
	] {
		assert_eq!(extractor.extract(message), extractor.extract(message));
	}
}

#[test]
fn classification_always_lands_in_closed_set() {
	let classifier = classifier();

	for message in [
		"",
		"???",
		"What's the score?",
		"Explain the offside rule",
		"Match report from the last game",
		"Tell me something",
		"ЖЖЖ 12345",
	] {
		assert!(Intent::ALL.contains(&classifier.classify(message)));
	}
}

#[test]
fn rule_order_is_the_tie_break() {
	let classifier = classifier();

	assert_eq!(
		classifier.rule_order(),
		vec![
			Intent::LiveMatch,
			Intent::FanConversation,
			Intent::Tactics,
			Intent::Performance,
			Intent::PreviousMatch,
			Intent::History,
			Intent::GeneralFootball,
		]
	);
	// Both the fan and tactics rules match; the earlier rule wins.
	assert_eq!(classifier.classify("What do fans think of the formation?"), Intent::FanConversation);
}

#[test]
fn typographic_apostrophe_matches_plain_keyword() {
	let classifier = classifier();

	assert_eq!(classifier.classify("What\u{2019}s the score?"), Intent::LiveMatch);
	assert_eq!(classifier.classify("What's the score?"), Intent::LiveMatch);
	assert_eq!(pitchside_domain::normalize_text("Rao\u{2018}s"), "rao's");
}

#[test]
fn unknown_rule_label_is_rejected() {
	let rules = vec![pitchside_config::ClassifierRule {
		intent: "weather".to_string(),
		keywords: vec!["rain".to_string()],
	}];

	assert!(KeywordClassifier::from_rules(&rules).is_err());
}

#[test]
fn assemble_emits_one_indexed_line_per_result_in_order() {
	let results: Vec<RawResult> = (0..4)
		.map(|idx| RawResult {
			text: format!("hit {idx}"),
			score: Some(0.5),
			..Default::default()
		})
		.collect();
	let rendered = context::assemble(&[ContextSection::new("match_events", results)]);
	let indexed: Vec<&str> = rendered.lines().filter(|line| line.starts_with('[')).collect();

	assert!(rendered.starts_with("<match_events>\n"));
	assert!(rendered.ends_with("\n</match_events>"));
	assert_eq!(indexed, vec!["[1] hit 0", "[2] hit 1", "[3] hit 2", "[4] hit 3"]);
}

#[test]
fn two_sections_keep_request_order() {
	let hit =
		|text: &str| RawResult { text: text.to_string(), score: Some(0.1), ..Default::default() };
	let rendered = context::assemble(&[
		ContextSection::new("match_events", vec![hit("a")]),
		ContextSection::new("historic_knowledge", vec![hit("b")]),
	]);
	let first = rendered.find("<match_events>").expect("first section missing");
	let second = rendered.find("<historic_knowledge>").expect("second section missing");

	assert!(first < second);
}
