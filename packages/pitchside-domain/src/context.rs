//! Renders retrieval results into tagged text sections for the generation prompt.
//!
//! Sections with no results are omitted, so a context built from nothing is the empty string.

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::result::RawResult;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContextSection {
	pub tag: String,
	pub results: Vec<RawResult>,
}
impl ContextSection {
	pub fn new(tag: impl Into<String>, results: Vec<RawResult>) -> Self {
		Self { tag: tag.into(), results }
	}
}

/// Renders one result as `[index] text` followed by an attribution line and an optional media
/// line. `index` is 1-based.
pub fn format_block(index: usize, result: &RawResult) -> String {
	let mut lines = Vec::with_capacity(4);

	match result.title.as_deref() {
		Some(title) => {
			lines.push(format!("[{index}] {title}"));
			lines.push(result.text.clone());
		},
		None => lines.push(format!("[{index}] {}", result.text)),
	}

	let mut attribution = Vec::with_capacity(3);

	if let Some(score) = result.score {
		attribution.push(format!("Relevance: {:.1}%", score * 100.0));
	}
	if let Some(url) = result.url.as_deref() {
		attribution.push(format!("Source: {url}"));
	}
	if let Some(date) = result.published_date.as_deref() {
		attribution.push(format!("Published: {}", display_date(date)));
	}
	if !attribution.is_empty() {
		lines.push(format!("({})", attribution.join(" | ")));
	}
	if let Some(media) = result.media_url.as_deref() {
		lines.push(format!("Media: {media}"));
	}

	lines.join("\n")
}

pub fn render_section(tag: &str, results: &[RawResult]) -> Option<String> {
	if results.is_empty() {
		return None;
	}

	let blocks = results
		.iter()
		.enumerate()
		.map(|(idx, result)| format_block(idx + 1, result))
		.collect::<Vec<_>>()
		.join("\n\n");

	Some(format!("<{tag}>\n{blocks}\n</{tag}>"))
}

/// Concatenates the non-empty sections in the order given.
pub fn assemble(sections: &[ContextSection]) -> String {
	sections
		.iter()
		.filter_map(|section| render_section(&section.tag, &section.results))
		.collect::<Vec<_>>()
		.join("\n\n")
}

fn display_date(raw: &str) -> String {
	match OffsetDateTime::parse(raw.trim(), &Rfc3339) {
		Ok(ts) => ts.date().to_string(),
		Err(_) => raw.trim().to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scored(text: &str, score: f32) -> RawResult {
		RawResult { text: text.to_string(), score: Some(score), ..Default::default() }
	}

	#[test]
	fn vector_block_shows_relevance_and_media() {
		let mut result = scored("Rao scores from the edge of the box.", 0.873);

		result.media_url = Some("https://clips/rao.mp4".to_string());

		assert_eq!(
			format_block(1, &result),
			"[1] Rao scores from the edge of the box.\n(Relevance: 87.3%)\nMedia: https://clips/rao.mp4"
		);
	}

	#[test]
	fn web_block_shows_title_source_and_date() {
		let result = RawResult {
			text: "Fans praised the late press.".to_string(),
			title: Some("Match reaction".to_string()),
			url: Some("https://news/1".to_string()),
			published_date: Some("2026-10-11T18:00:00.000Z".to_string()),
			..Default::default()
		};

		assert_eq!(
			format_block(2, &result),
			"[2] Match reaction\nFans praised the late press.\n(Source: https://news/1 | Published: 2026-10-11)"
		);
	}

	#[test]
	fn unparseable_date_is_kept_verbatim() {
		assert_eq!(display_date(" last Tuesday "), "last Tuesday");
	}

	#[test]
	fn empty_sections_are_omitted() {
		let context = assemble(&[
			ContextSection::new("match_events", Vec::new()),
			ContextSection::new("historic_knowledge", vec![scored("Club founded in 1902.", 0.5)]),
		]);

		assert!(context.starts_with("<historic_knowledge>\n[1] Club founded in 1902."));
		assert!(!context.contains("match_events"));
		assert_eq!(assemble(&[]), "");
	}
}
