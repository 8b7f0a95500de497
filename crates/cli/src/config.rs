//! Settings resolution: command-line overrides over an optional JSON file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use lcu::{ClientOptions, DEFAULT_BOUND_INTERVAL, DEFAULT_SEARCH_INTERVAL, DiscoveryConfig, LCU_PROCESS_NAME, TlsTrust};
use serde::Deserialize;

use crate::error::{LcuError, Result};

pub const DEFAULT_LOCK_FILE: &str = "lcu.lock";

/// On-disk configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
	pub cert: Option<PathBuf>,
	pub process_name: Option<String>,
	pub search_interval_secs: Option<u64>,
	pub bound_interval_secs: Option<u64>,
	pub request_timeout_secs: Option<u64>,
	pub lock_file: Option<PathBuf>,
}

impl ConfigFile {
	pub fn load(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path).map_err(|source| LcuError::ConfigFile {
			path: path.to_path_buf(),
			source,
		})?;
		serde_json::from_str(&raw).map_err(|source| LcuError::ConfigParse {
			path: path.to_path_buf(),
			source,
		})
	}
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
	pub cert: Option<PathBuf>,
	pub process_name: Option<String>,
	pub search_interval_secs: Option<u64>,
	pub bound_interval_secs: Option<u64>,
	pub request_timeout_secs: Option<u64>,
	pub lock_file: Option<PathBuf>,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub process_name: String,
	pub discovery: DiscoveryConfig,
	pub lock_file: PathBuf,
}

impl Settings {
	pub fn resolve(file: ConfigFile, overrides: Overrides) -> Result<Self> {
		let process_name = overrides
			.process_name
			.or(file.process_name)
			.unwrap_or_else(|| LCU_PROCESS_NAME.to_string());
		if process_name.trim().is_empty() {
			return Err(LcuError::Config("process name must not be empty".into()));
		}

		let tls = match overrides.cert.or(file.cert) {
			Some(path) => TlsTrust::PinnedCa(path),
			None => TlsTrust::Unverified,
		};
		let mut client = ClientOptions::new(tls);
		if let Some(secs) = overrides.request_timeout_secs.or(file.request_timeout_secs) {
			client = client.with_request_timeout(positive("request timeout", secs)?);
		}

		let search = match overrides.search_interval_secs.or(file.search_interval_secs) {
			Some(secs) => positive("search interval", secs)?,
			None => DEFAULT_SEARCH_INTERVAL,
		};
		let bound = match overrides.bound_interval_secs.or(file.bound_interval_secs) {
			Some(secs) => positive("bound interval", secs)?,
			None => DEFAULT_BOUND_INTERVAL,
		};

		Ok(Self {
			process_name,
			discovery: DiscoveryConfig::new(client).with_intervals(search, bound),
			lock_file: overrides
				.lock_file
				.or(file.lock_file)
				.unwrap_or_else(|| PathBuf::from(DEFAULT_LOCK_FILE)),
		})
	}

	/// Loads `path` if given and applies `overrides` on top.
	pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
		let file = match path {
			Some(path) => ConfigFile::load(path)?,
			None => ConfigFile::default(),
		};
		Self::resolve(file, overrides)
	}
}

fn positive(what: &str, secs: u64) -> Result<Duration> {
	if secs == 0 {
		return Err(LcuError::Config(format!("{what} must be at least one second")));
	}
	Ok(Duration::from_secs(secs))
}
