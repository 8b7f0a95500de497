//! Connection descriptor for a live LCU binding.

use std::fmt;

use crate::credentials::Credentials;

/// Process identity, port and auth token of one running LCU.
///
/// Built only from a successful credential extraction, so a descriptor is
/// always complete. Fields are read-only once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
	pid: u32,
	port: u16,
	auth_token: String,
}

impl ConnectionDescriptor {
	/// Binds extracted credentials to the process they were read from.
	pub fn new(pid: u32, credentials: Credentials) -> Self {
		Self {
			pid,
			port: credentials.port,
			auth_token: credentials.auth_token,
		}
	}

	/// PID of the LCU process.
	pub fn pid(&self) -> u32 {
		self.pid
	}

	/// Loopback port of the LCU REST API.
	pub fn port(&self) -> u16 {
		self.port
	}

	/// Per-launch Basic auth password.
	pub fn auth_token(&self) -> &str {
		&self.auth_token
	}

	/// Returns `true` when both descriptors belong to the same process.
	pub fn same_process(&self, other: &ConnectionDescriptor) -> bool {
		self.pid == other.pid
	}
}

impl fmt::Debug for ConnectionDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConnectionDescriptor")
			.field("pid", &self.pid)
			.field("port", &self.port)
			.field("auth_token", &"<redacted>")
			.finish()
	}
}
