//! LCU discovery: locating the client process and tracking it over time.

mod locate;
mod scheduler;

pub use locate::{BlockingLocator, Locate};
pub use scheduler::{
	DEFAULT_BOUND_INTERVAL, DEFAULT_SEARCH_INTERVAL, DiscoveryConfig, DiscoveryPhase, DiscoveryScheduler, DiscoveryState, Transition,
};
