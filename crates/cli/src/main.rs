use clap::Parser;
use lcu_cli::{
	cli::{Cli, Commands},
	commands, logging,
};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();

	// watch always reports bindings
	let floor = match cli.command {
		None | Some(Commands::Watch(_)) => 1,
		Some(_) => 0,
	};
	logging::init_logging(cli.verbose, floor);

	if let Err(err) = commands::dispatch(cli).await {
		eprintln!("error: {}", err.report());
		std::process::exit(1);
	}
}
