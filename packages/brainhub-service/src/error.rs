pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Unauthorized: {message}")]
	Unauthorized { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	/// The message without the category prefix, suitable for a response body.
	pub fn message(&self) -> &str {
		match self {
			Self::InvalidRequest { message }
			| Self::Unauthorized { message }
			| Self::Provider { message }
			| Self::Storage { message } => message,
		}
	}
}

impl From<brainhub_providers::Error> for Error {
	fn from(err: brainhub_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<brainhub_domain::llm_json::DecodeError> for Error {
	fn from(err: brainhub_domain::llm_json::DecodeError) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<brainhub_storage::Error> for Error {
	fn from(err: brainhub_storage::Error) -> Self {
		match err {
			brainhub_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			brainhub_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}
