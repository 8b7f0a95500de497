//! Credential extraction from LCU launch arguments.
//!
//! The LCU advertises its REST endpoint through two launch flags:
//!
//! ```text
//! LeagueClientUx.exe ... --remoting-auth-token=<token> ... --app-port=<port> ...
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Launch flag carrying the Basic auth password.
pub const AUTH_TOKEN_FLAG: &str = "--remoting-auth-token";
/// Launch flag carrying the loopback REST port.
pub const PORT_FLAG: &str = "--app-port";

// Flags must start an argument so `--riotclient-app-port=` never satisfies `--app-port=`.
static AUTH_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(?:^|[\s"'])--remoting-auth-token=([^\s"']+)"#).unwrap());
static PORT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(?:^|[\s"'])--app-port=(\d+)"#).unwrap());

/// Port and auth token read from one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
	pub port: u16,
	pub auth_token: String,
}

/// Extracts port and auth token from `command_line`.
///
/// Both flags must be present. A port literal that does not fit a TCP port
/// (including `0`) is rejected rather than defaulted.
pub fn extract(command_line: &str) -> Result<Credentials> {
	let auth_token = capture(&AUTH_TOKEN_RE, command_line, AUTH_TOKEN_FLAG)?;
	let port_literal = capture(&PORT_RE, command_line, PORT_FLAG)?;

	let port = match port_literal.parse::<u16>() {
		Ok(port) if port != 0 => port,
		_ => return Err(Error::InvalidPort { value: port_literal.to_string() }),
	};

	Ok(Credentials {
		port,
		auth_token: auth_token.to_string(),
	})
}

fn capture<'a>(re: &Regex, input: &'a str, flag: &'static str) -> Result<&'a str> {
	re.captures(input)
		.and_then(|caps| caps.get(1))
		.map(|m| m.as_str())
		.ok_or(Error::NoMatch { flag })
}
