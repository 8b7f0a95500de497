use lcu::{BlockingLocator, ConnectionDescriptor, Locate, base_url};
use serde::Serialize;

use crate::config::Settings;
use crate::error::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocateOutput<'a> {
	pid: u32,
	port: u16,
	base_url: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	auth_token: Option<&'a str>,
}

impl<'a> LocateOutput<'a> {
	fn new(descriptor: &'a ConnectionDescriptor, show_token: bool) -> Self {
		Self {
			pid: descriptor.pid(),
			port: descriptor.port(),
			base_url: base_url(descriptor.port()),
			auth_token: show_token.then(|| descriptor.auth_token()),
		}
	}
}

pub async fn execute(settings: &Settings, show_token: bool) -> Result<()> {
	let descriptor = BlockingLocator::system(settings.process_name.clone()).locate().await?;
	println!("{}", serde_json::to_string_pretty(&LocateOutput::new(&descriptor, show_token))?);
	Ok(())
}
