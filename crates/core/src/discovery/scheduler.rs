//! Adaptive discovery loop keeping the session client bound to the live LCU.

use std::sync::Arc;
use std::time::Duration;

use lcu_runtime::ConnectionDescriptor;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::locate::Locate;
use crate::client::{ClientOptions, SessionClient};
use crate::state::SessionState;

/// Poll interval while no LCU is bound.
pub const DEFAULT_SEARCH_INTERVAL: Duration = Duration::from_secs(60);
/// Poll interval while an LCU is bound.
pub const DEFAULT_BOUND_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
	pub search_interval: Duration,
	pub bound_interval: Duration,
	/// Options for every client the scheduler builds.
	pub client: ClientOptions,
}

impl DiscoveryConfig {
	pub fn new(client: ClientOptions) -> Self {
		Self {
			search_interval: DEFAULT_SEARCH_INTERVAL,
			bound_interval: DEFAULT_BOUND_INTERVAL,
			client,
		}
	}

	pub fn with_intervals(mut self, search: Duration, bound: Duration) -> Self {
		self.search_interval = search;
		self.bound_interval = bound;
		self
	}
}

/// Whether the scheduler currently holds a live binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryPhase {
	Searching,
	Bound,
}

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
	/// Searching, and the LCU is still absent.
	StillSearching,
	/// Searching → Bound: first client built.
	Bound,
	/// Bound to the same process as before; client untouched.
	Unchanged,
	/// Bound to a different process; client rebuilt.
	Rebound,
	/// Bound → Searching: the LCU disappeared.
	Lost,
	/// The LCU was found but no client could be built; now Searching.
	BuildFailed,
}

/// Discovery state confined to the scheduler task.
#[derive(Debug, Clone)]
pub struct DiscoveryState {
	descriptor: Option<ConnectionDescriptor>,
	interval: Duration,
}

impl DiscoveryState {
	fn searching(interval: Duration) -> Self {
		Self { descriptor: None, interval }
	}

	pub fn phase(&self) -> DiscoveryPhase {
		if self.descriptor.is_some() {
			DiscoveryPhase::Bound
		} else {
			DiscoveryPhase::Searching
		}
	}

	pub fn descriptor(&self) -> Option<&ConnectionDescriptor> {
		self.descriptor.as_ref()
	}

	pub fn interval(&self) -> Duration {
		self.interval
	}
}

/// Periodically locates the LCU and keeps [`SessionState`] in sync with it.
///
/// The scheduler is the only writer of its [`DiscoveryState`] and of the
/// shared [`SessionState`]; hand out [`DiscoveryScheduler::session`] before
/// calling [`DiscoveryScheduler::run`].
pub struct DiscoveryScheduler<L> {
	locator: L,
	config: DiscoveryConfig,
	state: DiscoveryState,
	session: Arc<SessionState>,
}

impl<L: Locate> DiscoveryScheduler<L> {
	pub fn new(locator: L, config: DiscoveryConfig) -> Self {
		let state = DiscoveryState::searching(config.search_interval);
		Self {
			locator,
			config,
			state,
			session: Arc::new(SessionState::new()),
		}
	}

	/// Shared handle to the published session client.
	pub fn session(&self) -> Arc<SessionState> {
		Arc::clone(&self.session)
	}

	pub fn state(&self) -> &DiscoveryState {
		&self.state
	}

	pub fn phase(&self) -> DiscoveryPhase {
		self.state.phase()
	}

	/// Interval until the next poll.
	pub fn interval(&self) -> Duration {
		self.state.interval
	}

	/// Polls the locator once and applies the resulting transition.
	pub async fn tick(&mut self) -> Transition {
		let located = self.locator.locate().await;
		let bound_pid = self.state.descriptor.as_ref().map(ConnectionDescriptor::pid);

		let transition = match (located, bound_pid) {
			(Ok(found), Some(pid)) if found.pid() == pid => Transition::Unchanged,
			(Ok(found), previous) => self.bind(found, previous.is_some()),
			(Err(err), Some(pid)) => {
				warn!(target: "lcu.discovery", pid, error = %err, "LCU lost; session retired");
				self.state.descriptor = None;
				self.session.retire();
				Transition::Lost
			}
			(Err(err), None) => {
				if err.is_not_found() {
					debug!(target: "lcu.discovery", error = %err, "LCU not running");
				} else {
					warn!(target: "lcu.discovery", error = %err, "LCU discovery failed");
				}
				Transition::StillSearching
			}
		};

		self.adjust_interval();
		transition
	}

	fn bind(&mut self, descriptor: ConnectionDescriptor, rebind: bool) -> Transition {
		match SessionClient::build(&descriptor, &self.config.client) {
			Ok(client) => {
				info!(
					target: "lcu.discovery",
					pid = descriptor.pid(),
					port = descriptor.port(),
					base_url = client.base_url(),
					tls = %self.config.client.tls,
					rebind,
					"LCU session bound"
				);
				self.session.publish(client);
				self.state.descriptor = Some(descriptor);
				if rebind { Transition::Rebound } else { Transition::Bound }
			}
			Err(err) => {
				error!(target: "lcu.discovery", pid = descriptor.pid(), error = %err, "failed to build LCU client");
				self.state.descriptor = None;
				self.session.retire();
				Transition::BuildFailed
			}
		}
	}

	fn adjust_interval(&mut self) {
		let next = match self.state.phase() {
			DiscoveryPhase::Searching => self.config.search_interval,
			DiscoveryPhase::Bound => self.config.bound_interval,
		};
		if next != self.state.interval {
			self.state.interval = next;
			info!(target: "lcu.discovery", interval_secs = next.as_secs(), "refresh interval updated");
		}
	}

	/// Polls immediately, then on every interval until `shutdown` turns `true`
	/// or its sender is dropped. The published client is retired on exit.
	pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
		info!(target: "lcu.discovery", "starting LCU discovery");

		if !*shutdown.borrow_and_update() {
			self.tick().await;

			loop {
				tokio::select! {
					biased;
					changed = shutdown.changed() => {
						if changed.is_err() || *shutdown.borrow_and_update() {
							break;
						}
					}
					_ = tokio::time::sleep(self.state.interval) => {
						self.tick().await;
					}
				}
			}
		}

		self.state.descriptor = None;
		self.session.retire();
		info!(target: "lcu.discovery", "LCU discovery stopped");
	}
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
