//! Error types for LCU sessions.

use std::path::PathBuf;

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a session client or issuing requests.
#[derive(Debug, Error)]
pub enum Error {
	/// The pinned CA file could not be read.
	#[error("failed to read pinned certificate {}: {source}", path.display())]
	Certificate {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The pinned CA file was read but holds no usable certificate.
	#[error("invalid pinned certificate {}: {reason}", path.display())]
	InvalidCertificate { path: PathBuf, reason: String },

	/// The HTTP transport could not be configured.
	#[error("failed to build HTTP client: {0}")]
	ClientBuild(#[source] reqwest::Error),

	/// The request body could not be encoded; nothing was sent.
	#[error("failed to serialize request body: {0}")]
	Serialize(#[source] serde_json::Error),

	/// The response body did not decode into the requested type.
	#[error("failed to decode response body: {0}")]
	Decode(#[source] serde_json::Error),

	/// The LCU answered outside the 2xx range.
	#[error("{method} {path} returned {status}")]
	Status { method: Method, path: String, status: StatusCode },

	/// Connection, TLS or I/O failure while talking to the LCU.
	#[error("transport error: {0}")]
	Transport(#[from] reqwest::Error),

	/// Discovery of the LCU process failed.
	#[error(transparent)]
	Discovery(#[from] lcu_runtime::Error),
}

impl Error {
	/// Returns the HTTP status for [`Error::Status`].
	pub fn status(&self) -> Option<StatusCode> {
		match self {
			Error::Status { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Returns true for client-construction failures caused by local configuration.
	pub fn is_configuration(&self) -> bool {
		matches!(self, Error::Certificate { .. } | Error::InvalidCertificate { .. } | Error::ClientBuild(_))
	}

	/// Returns true for failures reported by the wire (I/O or non-2xx status).
	pub fn is_transport(&self) -> bool {
		matches!(self, Error::Transport(_) | Error::Status { .. })
	}
}
