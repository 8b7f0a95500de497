//! LCU process discovery.
//!
//! Scans the host process table for the LCU and turns its launch arguments
//! into a [`ConnectionDescriptor`]. Selection is first-match in enumeration
//! order: if several matching processes are running, the first one that
//! yields complete credentials wins.

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use tracing::{debug, trace};

use crate::credentials::extract;
use crate::descriptor::ConnectionDescriptor;
use crate::error::{Error, Result};

/// Process-name substring identifying the LCU.
pub const LCU_PROCESS_NAME: &str = "LeagueClientUx";

/// One row of a process table snapshot.
///
/// `None` means the value could not be read (exited process, missing
/// permissions), not that it is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
	pub pid: u32,
	pub name: Option<String>,
	pub command_line: Option<String>,
}

/// Source of process table snapshots.
pub trait ProcessSource {
	/// Returns the processes visible to the current user, in enumeration order.
	fn snapshot(&mut self) -> Result<Vec<ProcessEntry>>;
}

/// [`ProcessSource`] backed by the host process table.
///
/// Enumeration order is ascending PID.
pub struct SystemProcesses {
	system: System,
}

impl SystemProcesses {
	pub fn new() -> Self {
		Self { system: System::new() }
	}
}

impl Default for SystemProcesses {
	fn default() -> Self {
		Self::new()
	}
}

impl ProcessSource for SystemProcesses {
	fn snapshot(&mut self) -> Result<Vec<ProcessEntry>> {
		if !sysinfo::IS_SUPPORTED_SYSTEM {
			return Err(Error::Enumeration(format!("process listing is not supported on {}", std::env::consts::OS)));
		}

		self.system.refresh_processes_specifics(
			ProcessesToUpdate::All,
			true,
			ProcessRefreshKind::nothing().with_cmd(UpdateKind::Always),
		);

		let mut entries: Vec<ProcessEntry> = self
			.system
			.processes()
			.iter()
			.map(|(pid, process)| {
				let name = process.name().to_str().filter(|n| !n.is_empty()).map(str::to_string);
				let args = process.cmd();
				let command_line = if args.is_empty() {
					None
				} else {
					Some(args.iter().map(|a| a.to_string_lossy()).collect::<Vec<_>>().join(" "))
				};
				ProcessEntry {
					pid: pid.as_u32(),
					name,
					command_line,
				}
			})
			.collect();
		entries.sort_by_key(|e| e.pid);
		Ok(entries)
	}
}

/// Finds the LCU among the processes reported by a [`ProcessSource`].
pub struct ProcessLocator<S = SystemProcesses> {
	source: S,
	process_name: String,
}

impl ProcessLocator<SystemProcesses> {
	/// Locator over the host process table looking for [`LCU_PROCESS_NAME`].
	pub fn system() -> Self {
		Self::new(SystemProcesses::new(), LCU_PROCESS_NAME)
	}
}

impl<S: ProcessSource> ProcessLocator<S> {
	pub fn new(source: S, process_name: impl Into<String>) -> Self {
		Self {
			source,
			process_name: process_name.into(),
		}
	}

	/// Process-name substring this locator matches.
	pub fn process_name(&self) -> &str {
		&self.process_name
	}

	/// Returns the descriptor of the first matching process with usable credentials.
	///
	/// # Errors
	///
	/// Returns [`Error::LcuProcessNotFound`] when no candidate yields a
	/// descriptor, and [`Error::Enumeration`] when the process table itself
	/// cannot be read.
	pub fn locate(&mut self) -> Result<ConnectionDescriptor> {
		let entries = self.source.snapshot()?;

		for entry in entries {
			let Some(name) = entry.name.as_deref() else {
				continue;
			};
			if !name.contains(&self.process_name) {
				continue;
			}

			let Some(command_line) = entry.command_line.as_deref() else {
				debug!(target: "lcu.process", pid = entry.pid, process = name, "command line unreadable; skipping candidate");
				continue;
			};

			match extract(command_line) {
				Ok(credentials) => {
					trace!(target: "lcu.process", pid = entry.pid, port = credentials.port, "candidate accepted");
					return Ok(ConnectionDescriptor::new(entry.pid, credentials));
				}
				Err(err) => {
					debug!(target: "lcu.process", pid = entry.pid, process = name, error = %err, "credentials not extractable; skipping candidate");
				}
			}
		}

		Err(Error::LcuProcessNotFound {
			process_name: self.process_name.clone(),
		})
	}
}
