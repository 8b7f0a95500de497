//! Error types for LCU discovery.

use thiserror::Error;

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating the LCU process.
#[derive(Debug, Error)]
pub enum Error {
	/// A required launch flag was absent from the command line.
	#[error("no match found for `{flag}` in command line")]
	NoMatch { flag: &'static str },

	/// The port flag was present but its value is not a usable TCP port.
	#[error("invalid port `{value}` in command line")]
	InvalidPort { value: String },

	/// No running process yielded a usable connection descriptor.
	#[error("no process found with the name {process_name}")]
	LcuProcessNotFound { process_name: String },

	/// The host process table could not be read.
	#[error("process enumeration failed: {0}")]
	Enumeration(String),
}

impl Error {
	/// Returns true for expected, retriable "nothing to bind to" conditions.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Error::LcuProcessNotFound { .. } | Error::NoMatch { .. } | Error::InvalidPort { .. })
	}
}
