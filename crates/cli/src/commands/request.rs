use lcu::{BlockingLocator, Locate, SessionClient};
use reqwest::Method;
use tracing::debug;

use crate::config::Settings;
use crate::error::{LcuError, Result};

const METHODS: [Method; 5] = [Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

pub async fn execute(settings: &Settings, method: &str, path: &str, body: Option<&str>) -> Result<()> {
	let method = parse_method(method)?;
	let body = body.map(serde_json::from_str::<serde_json::Value>).transpose()?;

	let descriptor = BlockingLocator::system(settings.process_name.clone()).locate().await?;
	let client = SessionClient::build(&descriptor, &settings.discovery.client)?;
	debug!(target: "lcu.app", %method, path, pid = client.pid(), "sending request");

	let response = client.request(method, path, body.as_ref()).await?;
	if let Some(text) = render(&response) {
		println!("{text}");
	}
	Ok(())
}

fn parse_method(raw: &str) -> Result<Method> {
	let upper = raw.to_ascii_uppercase();
	METHODS
		.into_iter()
		.find(|method| method.as_str() == upper)
		.ok_or_else(|| LcuError::Config(format!("unsupported method {raw}; expected GET, POST, PUT, PATCH or DELETE")))
}

/// Pretty-prints JSON bodies; anything else is shown as text. Empty bodies print nothing.
fn render(body: &[u8]) -> Option<String> {
	if body.is_empty() {
		return None;
	}
	match serde_json::from_slice::<serde_json::Value>(body) {
		Ok(json) => serde_json::to_string_pretty(&json).ok(),
		Err(_) => Some(String::from_utf8_lossy(body).into_owned()),
	}
}
