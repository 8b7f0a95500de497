use lcu::{BlockingLocator, DiscoveryScheduler};
use tracing::info;

use crate::app;
use crate::config::Settings;
use crate::error::Result;

pub async fn execute(settings: Settings) -> Result<()> {
	info!(
		target: "lcu.app",
		version = env!("CARGO_PKG_VERSION"),
		commit = env!("LCU_GIT_COMMIT"),
		built = env!("LCU_BUILD_DATE"),
		os = std::env::consts::OS,
		arch = std::env::consts::ARCH,
		process = %settings.process_name,
		tls = %settings.discovery.client.tls,
		search_secs = settings.discovery.search_interval.as_secs(),
		bound_secs = settings.discovery.bound_interval.as_secs(),
		"starting lcu watch"
	);

	let locator = BlockingLocator::system(settings.process_name.clone());
	let scheduler = DiscoveryScheduler::new(locator, settings.discovery);
	app::supervise(&settings.lock_file, scheduler, app::shutdown_signal()).await
}
