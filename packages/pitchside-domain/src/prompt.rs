use crate::intent::Intent;

const GROUNDING_INSTRUCTION: &str = "Use the retrieved context above to answer the user's question accurately. If the context doesn't contain the information needed, say so clearly rather than guessing.";

/// Builds the system prompt handed to generation. An empty context leaves `base` untouched.
pub fn augment_system_prompt(base: &str, context: &str, intent: Intent) -> String {
	if context.trim().is_empty() {
		return base.to_string();
	}

	format!(
		"{base}\n\n<retrieved_context>\n{context}\n</retrieved_context>\n\n{GROUNDING_INSTRUCTION}\n{}",
		intent.guidance()
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_context_keeps_base_prompt() {
		assert_eq!(
			augment_system_prompt("You are a match companion.", " \n", Intent::Tactics),
			"You are a match companion."
		);
	}

	#[test]
	fn context_is_wrapped_and_guided() {
		let prompt = augment_system_prompt(
			"BASE",
			"<web_results>\n[1] x\n</web_results>",
			Intent::LiveMatch,
		);

		assert!(prompt.starts_with("BASE\n\n<retrieved_context>\n<web_results>"));
		assert!(prompt.contains("</retrieved_context>"));
		assert!(prompt.ends_with(Intent::LiveMatch.guidance()));
	}
}
