use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Maps `-v` occurrences to a default filter directive.
///
/// `floor` raises the quiet level for long-running commands that should
/// always report bindings.
pub fn default_filter(verbosity: u8, floor: u8) -> &'static str {
	match verbosity.max(floor) {
		0 => "warn",
		1 => "info",
		_ => "debug",
	}
}

pub fn init_logging(verbosity: u8, floor: u8) {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity, floor)));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.init();
}
