//! lcu: authenticated access to the League Client UX REST API.
//!
//! The League client (LCU) serves a REST API on a random loopback port,
//! protected by a token that changes every launch. This crate finds the
//! running client, builds an HTTPS session for it and keeps that session
//! pointed at the live process across restarts.
//!
//! # Example
//!
//! ```ignore
//! use lcu::{BlockingLocator, ClientOptions, DiscoveryConfig, DiscoveryScheduler, TlsTrust};
//!
//! #[tokio::main]
//! async fn main() -> lcu::Result<()> {
//!     let locator = BlockingLocator::system(lcu::LCU_PROCESS_NAME);
//!     let config = DiscoveryConfig::new(ClientOptions::new(TlsTrust::Unverified));
//!     let scheduler = DiscoveryScheduler::new(locator, config);
//!     let session = scheduler.session();
//!
//!     let (_shutdown, rx) = tokio::sync::watch::channel(false);
//!     tokio::spawn(scheduler.run(rx));
//!
//!     session.subscribe().wait_for(Option::is_some).await.ok();
//!     if let Some(client) = session.current() {
//!         let body = client.get("/lol-summoner/v1/current-summoner").await?;
//!         println!("{}", String::from_utf8_lossy(&body));
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod discovery;
pub mod error;
pub mod state;

pub use client::{ClientOptions, LCU_HOST, LCU_USERNAME, SessionClient, TlsTrust, base_url};
pub use discovery::{
	BlockingLocator, DEFAULT_BOUND_INTERVAL, DEFAULT_SEARCH_INTERVAL, DiscoveryConfig, DiscoveryPhase, DiscoveryScheduler, DiscoveryState, Locate,
	Transition,
};
pub use error::{Error, Result};
pub use lcu_runtime::{ConnectionDescriptor, Credentials, LCU_PROCESS_NAME, ProcessEntry, ProcessLocator, ProcessSource, SystemProcesses};
pub use state::{CurrentClient, SessionState};
