//! Shared publication of the current session client.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::client::SessionClient;

/// Current client handle; `None` while no LCU is bound.
pub type CurrentClient = Option<Arc<SessionClient>>;

/// Holder for the session client owned by the discovery scheduler.
///
/// Only the scheduler publishes or retires clients. Everyone else reads a
/// snapshot with [`SessionState::current`] or follows changes through
/// [`SessionState::subscribe`]. The underlying lock is held only for the
/// duration of a read or a swap, never across a request.
#[derive(Debug)]
pub struct SessionState {
	tx: watch::Sender<CurrentClient>,
	rebuilds: AtomicU64,
}

impl SessionState {
	pub fn new() -> Self {
		let (tx, _rx) = watch::channel(None);
		Self {
			tx,
			rebuilds: AtomicU64::new(0),
		}
	}

	/// Returns the client bound right now, if any.
	pub fn current(&self) -> CurrentClient {
		self.tx.borrow().clone()
	}

	/// Returns a receiver that observes every publish and retire.
	pub fn subscribe(&self) -> watch::Receiver<CurrentClient> {
		self.tx.subscribe()
	}

	/// Number of clients built since this state was created.
	pub fn rebuild_count(&self) -> u64 {
		self.rebuilds.load(Ordering::SeqCst)
	}

	pub(crate) fn publish(&self, client: SessionClient) {
		self.rebuilds.fetch_add(1, Ordering::SeqCst);
		self.tx.send_replace(Some(Arc::new(client)));
	}

	/// Clears the current client. Returns `true` if one was bound.
	pub(crate) fn retire(&self) -> bool {
		self.tx.send_replace(None).is_some()
	}
}

impl Default for SessionState {
	fn default() -> Self {
		Self::new()
	}
}
