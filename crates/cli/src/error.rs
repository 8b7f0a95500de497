use std::error::Error as _;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LcuError>;

#[derive(Debug, Error)]
pub enum LcuError {
	/// Another instance holds the lock file.
	#[error("already running: lock file {} exists", path.display())]
	AlreadyRunning { path: PathBuf },

	#[error("failed to manage lock file {}", path.display())]
	Lock {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid configuration: {0}")]
	Config(String),

	#[error("failed to read config file {}", path.display())]
	ConfigFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid config file {}", path.display())]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	/// The discovery task ended abnormally.
	#[error("discovery scheduler failed: {0}")]
	Scheduler(String),

	#[error("failed to install {signal} handler")]
	Signal {
		signal: &'static str,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Session(#[from] lcu::Error),

	#[error(transparent)]
	Discovery(#[from] lcu_runtime::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl LcuError {
	pub fn is_already_running(&self) -> bool {
		matches!(self, LcuError::AlreadyRunning { .. })
	}

	/// Returns true when no LCU process was found.
	pub fn is_not_found(&self) -> bool {
		match self {
			LcuError::Discovery(err) => err.is_not_found(),
			LcuError::Session(lcu::Error::Discovery(err)) => err.is_not_found(),
			_ => false,
		}
	}

	/// Renders the error followed by each cause in its source chain.
	///
	/// Causes whose text already appears earlier in the report are skipped.
	pub fn report(&self) -> String {
		let mut report = self.to_string();
		let mut source = self.source();
		while let Some(cause) = source {
			let text = cause.to_string();
			if !report.contains(&text) {
				report.push_str("\n  caused by: ");
				report.push_str(&text);
			}
			source = cause.source();
		}
		report
	}
}
