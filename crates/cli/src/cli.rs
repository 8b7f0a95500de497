use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(name = "lcu")]
#[command(about = "Find the running League client and keep an authenticated session to its REST API")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// JSON config file; command-line flags take precedence
	#[arg(short, long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// PEM file with the CA to trust for the client certificate
	#[arg(long, global = true, value_name = "PEM")]
	pub cert: Option<PathBuf>,

	/// Process name substring to look for
	#[arg(long, global = true, value_name = "NAME")]
	pub process_name: Option<String>,

	/// Per-request timeout in seconds
	#[arg(long, global = true, value_name = "SECS")]
	pub request_timeout: Option<u64>,

	#[command(subcommand)]
	pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Keep a session bound to the client until interrupted (default)
	Watch(WatchArgs),

	/// Locate the client once and print its connection details as JSON
	Locate {
		/// Include the auth token in the output
		#[arg(long)]
		show_token: bool,
	},

	/// Send one request to the client and print the response body
	Request {
		/// HTTP method (GET, POST, PUT, PATCH, DELETE)
		method: String,

		/// Endpoint path, e.g. /lol-summoner/v1/current-summoner
		path: String,

		/// JSON request body
		#[arg(long, value_name = "JSON")]
		body: Option<String>,
	},
}

#[derive(Args, Debug, Default, Clone)]
pub struct WatchArgs {
	/// Seconds between polls while no client is running
	#[arg(long, value_name = "SECS")]
	pub search_interval: Option<u64>,

	/// Seconds between polls while bound to a client
	#[arg(long, value_name = "SECS")]
	pub bound_interval: Option<u64>,

	/// Single-instance lock file
	#[arg(long, value_name = "FILE")]
	pub lock_file: Option<PathBuf>,
}

impl Cli {
	/// Collects the flags that override config file values.
	pub fn overrides(&self) -> Overrides {
		let watch = match &self.command {
			Some(Commands::Watch(args)) => args.clone(),
			_ => WatchArgs::default(),
		};
		Overrides {
			cert: self.cert.clone(),
			process_name: self.process_name.clone(),
			request_timeout_secs: self.request_timeout,
			search_interval_secs: watch.search_interval,
			bound_interval_secs: watch.bound_interval,
			lock_file: watch.lock_file,
		}
	}
}
