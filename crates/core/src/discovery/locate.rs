//! Async seam between the scheduler and process discovery.

use std::sync::Arc;

use async_trait::async_trait;
use lcu_runtime::{ConnectionDescriptor, Error, ProcessLocator, ProcessSource, Result, SystemProcesses};
use parking_lot::Mutex;

/// Something the scheduler can ask for the current LCU descriptor.
#[async_trait]
pub trait Locate: Send {
	async fn locate(&mut self) -> Result<ConnectionDescriptor>;
}

/// Runs a blocking [`ProcessLocator`] on tokio's blocking pool.
///
/// Process table scans touch the filesystem (or OS APIs) synchronously and
/// can take tens of milliseconds, so they stay off the async workers.
pub struct BlockingLocator<S = SystemProcesses> {
	inner: Arc<Mutex<ProcessLocator<S>>>,
}

impl BlockingLocator<SystemProcesses> {
	/// Locator over the host process table matching `process_name`.
	pub fn system(process_name: impl Into<String>) -> Self {
		Self::new(ProcessLocator::new(SystemProcesses::new(), process_name))
	}
}

impl<S> BlockingLocator<S> {
	pub fn new(locator: ProcessLocator<S>) -> Self {
		Self {
			inner: Arc::new(Mutex::new(locator)),
		}
	}
}

#[async_trait]
impl<S> Locate for BlockingLocator<S>
where
	S: ProcessSource + Send + 'static,
{
	async fn locate(&mut self) -> Result<ConnectionDescriptor> {
		let inner = Arc::clone(&self.inner);
		tokio::task::spawn_blocking(move || inner.lock().locate())
			.await
			.map_err(|err| Error::Enumeration(format!("process scan task failed: {err}")))?
	}
}
