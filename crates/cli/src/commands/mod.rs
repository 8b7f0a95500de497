mod locate;
mod request;
mod watch;

use crate::cli::{Cli, Commands, WatchArgs};
use crate::config::Settings;
use crate::error::Result;

pub async fn dispatch(cli: Cli) -> Result<()> {
	let settings = Settings::load(cli.config.as_deref(), cli.overrides())?;

	match cli.command.unwrap_or(Commands::Watch(WatchArgs::default())) {
		Commands::Watch(_) => watch::execute(settings).await,
		Commands::Locate { show_token } => locate::execute(&settings, show_token).await,
		Commands::Request { method, path, body } => request::execute(&settings, &method, &path, body.as_deref()).await,
	}
}
