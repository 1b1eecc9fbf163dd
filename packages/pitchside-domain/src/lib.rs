pub mod classifier;
pub mod context;
pub mod enhance;
pub mod entities;
pub mod filter;
pub mod intent;
pub mod prompt;
pub mod result;

mod error;

pub use error::Error;

use unicode_normalization::UnicodeNormalization;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Folds compatibility forms, typographic apostrophes and case so lexicon and keyword lookups see
/// one spelling.
pub fn normalize_text(input: &str) -> String {
	input
		.nfkc()
		.map(|c| match c {
			'\u{2018}' | '\u{2019}' | '\u{02BC}' => '\'',
			c => c,
		})
		.collect::<String>()
		.to_lowercase()
}
