#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
	UnknownIntent { label: String },
	InvalidPattern { pattern: String, message: String },
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnknownIntent { label } => write!(f, "Unknown intent label: {label}."),
			Self::InvalidPattern { pattern, message } => {
				write!(f, "Invalid question pattern {pattern:?}: {message}")
			},
		}
	}
}

impl std::error::Error for Error {}
