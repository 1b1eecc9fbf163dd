pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Invalid configuration: {message}")]
	InvalidConfig { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<pitchside_providers::Error> for Error {
	fn from(err: pitchside_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
impl From<pitchside_storage::Error> for Error {
	fn from(err: pitchside_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
impl From<pitchside_domain::Error> for Error {
	fn from(err: pitchside_domain::Error) -> Self {
		Self::InvalidConfig { message: err.to_string() }
	}
}
