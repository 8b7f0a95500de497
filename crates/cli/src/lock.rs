//! Single-instance lock file.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{LcuError, Result};

/// Holds the lock file for as long as it lives; dropping it removes the file.
#[derive(Debug)]
pub struct LockGuard {
	path: PathBuf,
}

impl LockGuard {
	/// Atomically creates `path` and writes the current PID into it.
	///
	/// An existing file means another instance is running; it is left as is
	/// and [`LcuError::AlreadyRunning`] is returned.
	pub fn acquire(path: impl Into<PathBuf>) -> Result<Self> {
		let path = path.into();
		let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
			Ok(file) => file,
			Err(err) if err.kind() == ErrorKind::AlreadyExists => return Err(LcuError::AlreadyRunning { path }),
			Err(source) => return Err(LcuError::Lock { path, source }),
		};

		// Built before the write so a failed write still removes the file.
		let guard = Self { path };
		if let Err(source) = writeln!(file, "{}", std::process::id()) {
			return Err(LcuError::Lock {
				path: guard.path.clone(),
				source,
			});
		}
		debug!(target: "lcu.lock", path = %guard.path.display(), "lock acquired");
		Ok(guard)
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl Drop for LockGuard {
	fn drop(&mut self) {
		match std::fs::remove_file(&self.path) {
			Ok(()) => debug!(target: "lcu.lock", path = %self.path.display(), "lock released"),
			Err(err) => warn!(target: "lcu.lock", path = %self.path.display(), error = %err, "failed to remove lock file"),
		}
	}
}
