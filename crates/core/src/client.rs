//! Authenticated HTTPS client for one LCU binding.
//!
//! A [`SessionClient`] is built from a [`ConnectionDescriptor`] and is only
//! valid for the process that descriptor came from. When the LCU restarts the
//! discovery scheduler builds a fresh client rather than mutating this one.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use lcu_runtime::ConnectionDescriptor;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Certificate, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Loopback address the LCU listens on.
pub const LCU_HOST: &str = "127.0.0.1";
/// Basic auth username expected by the LCU.
pub const LCU_USERNAME: &str = "riot";

/// How the client decides whether to trust the LCU's certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsTrust {
	/// Trust only the CA certificates in this PEM file; the system store is ignored.
	PinnedCa(PathBuf),
	/// Skip certificate validation entirely.
	///
	/// The LCU presents a self-signed certificate minted per launch, so
	/// without the Riot root CA on disk there is nothing to verify against.
	/// Traffic still never leaves the loopback interface.
	Unverified,
}

impl fmt::Display for TlsTrust {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TlsTrust::PinnedCa(path) => write!(f, "pinned CA {}", path.display()),
			TlsTrust::Unverified => f.write_str("unverified"),
		}
	}
}

/// Transport settings applied to every client built for a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
	pub tls: TlsTrust,
	/// Per-request timeout; `None` keeps the transport default (no limit).
	pub request_timeout: Option<Duration>,
}

impl ClientOptions {
	pub fn new(tls: TlsTrust) -> Self {
		Self { tls, request_timeout: None }
	}

	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = Some(timeout);
		self
	}
}

/// Returns the REST base URL for an LCU listening on `port`.
pub fn base_url(port: u16) -> String {
	format!("https://{LCU_HOST}:{port}")
}

/// HTTPS client bound to one LCU process.
#[derive(Clone)]
pub struct SessionClient {
	pid: u32,
	port: u16,
	base_url: String,
	auth_token: String,
	http: reqwest::Client,
}

impl SessionClient {
	/// Builds a client for `descriptor`.
	///
	/// # Errors
	///
	/// With [`TlsTrust::PinnedCa`], an unreadable file yields
	/// [`Error::Certificate`] and a file without a usable certificate yields
	/// [`Error::InvalidCertificate`]. Neither case falls back to unverified TLS.
	pub fn build(descriptor: &ConnectionDescriptor, options: &ClientOptions) -> Result<Self> {
		let mut builder = reqwest::Client::builder().https_only(true);

		builder = match &options.tls {
			TlsTrust::PinnedCa(path) => {
				let mut builder = builder.tls_built_in_root_certs(false);
				for cert in load_pinned_certificates(path)? {
					builder = builder.add_root_certificate(cert);
				}
				builder
			}
			TlsTrust::Unverified => {
				warn!(
					target: "lcu.client",
					pid = descriptor.pid(),
					"building LCU client without certificate verification; pass a pinned CA to verify the peer"
				);
				builder.danger_accept_invalid_certs(true)
			}
		};

		if let Some(timeout) = options.request_timeout {
			builder = builder.timeout(timeout);
		}

		let http = builder.build().map_err(|err| match &options.tls {
			TlsTrust::PinnedCa(path) => Error::InvalidCertificate {
				path: path.clone(),
				reason: err.to_string(),
			},
			TlsTrust::Unverified => Error::ClientBuild(err),
		})?;

		Ok(Self {
			pid: descriptor.pid(),
			port: descriptor.port(),
			base_url: base_url(descriptor.port()),
			auth_token: descriptor.auth_token().to_string(),
			http,
		})
	}

	/// PID of the LCU process this client is bound to.
	pub fn pid(&self) -> u32 {
		self.pid
	}

	pub fn port(&self) -> u16 {
		self.port
	}

	/// Always `https://127.0.0.1:<port>`.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Sends `method path` with an optional JSON body and returns the raw response body.
	///
	/// Any 2xx status is success. Other statuses become [`Error::Status`]
	/// without the body being parsed.
	pub async fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Bytes>
	where
		B: Serialize + ?Sized,
	{
		let payload = body.map(serde_json::to_vec).transpose().map_err(Error::Serialize)?;

		let url = self.url_for(path);
		let mut request = self
			.http
			.request(method.clone(), &url)
			.basic_auth(LCU_USERNAME, Some(&self.auth_token))
			.header(ACCEPT, HeaderValue::from_static("application/json"));
		if let Some(payload) = payload {
			request = request.header(CONTENT_TYPE, HeaderValue::from_static("application/json")).body(payload);
		}

		let response = request.send().await?;
		let status = response.status();
		debug!(target: "lcu.client", %method, path, status = status.as_u16(), "LCU response");

		if !status.is_success() {
			return Err(Error::Status {
				method,
				path: path.to_string(),
				status,
			});
		}

		Ok(response.bytes().await?)
	}

	pub async fn get(&self, path: &str) -> Result<Bytes> {
		self.request::<()>(Method::GET, path, None).await
	}

	pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Bytes> {
		self.request(Method::POST, path, Some(body)).await
	}

	pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Bytes> {
		self.request(Method::PUT, path, Some(body)).await
	}

	pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Bytes> {
		self.request(Method::PATCH, path, Some(body)).await
	}

	pub async fn delete(&self, path: &str) -> Result<Bytes> {
		self.request::<()>(Method::DELETE, path, None).await
	}

	/// GETs `path` and decodes the body as JSON.
	pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		let body = self.get(path).await?;
		serde_json::from_slice(&body).map_err(Error::Decode)
	}

	fn url_for(&self, path: &str) -> String {
		if path.starts_with('/') {
			format!("{}{}", self.base_url, path)
		} else {
			format!("{}/{}", self.base_url, path)
		}
	}

	/// Points the client at a plain-HTTP loopback fixture.
	#[cfg(test)]
	pub(crate) fn for_fixture(port: u16, auth_token: &str) -> Self {
		Self {
			pid: 0,
			port,
			base_url: format!("http://{LCU_HOST}:{port}"),
			auth_token: auth_token.to_string(),
			http: reqwest::Client::new(),
		}
	}
}

impl fmt::Debug for SessionClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SessionClient")
			.field("pid", &self.pid)
			.field("base_url", &self.base_url)
			.finish_non_exhaustive()
	}
}

fn load_pinned_certificates(path: &Path) -> Result<Vec<Certificate>> {
	let pem = std::fs::read(path).map_err(|source| Error::Certificate {
		path: path.to_path_buf(),
		source,
	})?;

	let certs = Certificate::from_pem_bundle(&pem).map_err(|err| Error::InvalidCertificate {
		path: path.to_path_buf(),
		reason: err.to_string(),
	})?;
	if certs.is_empty() {
		return Err(Error::InvalidCertificate {
			path: path.to_path_buf(),
			reason: "no PEM certificates found".into(),
		});
	}
	Ok(certs)
}
