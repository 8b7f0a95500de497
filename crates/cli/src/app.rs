//! Supervision of the discovery scheduler: lock file, signals and panics.

use std::any::Any;
use std::future::Future;
use std::path::Path;

use lcu::{DiscoveryScheduler, Locate};
use tokio::sync::watch;
use tokio::task::JoinError;
use tracing::{error, info};

use crate::error::{LcuError, Result};
use crate::lock::LockGuard;

/// Runs `scheduler` while holding the lock file at `lock_path`.
///
/// `stop` is awaited on its own task; when it resolves the scheduler is told
/// to shut down. A panic in the scheduler task becomes
/// [`LcuError::Scheduler`]. The lock file is removed on every return path
/// once it was acquired.
pub async fn supervise<L, S>(lock_path: &Path, scheduler: DiscoveryScheduler<L>, stop: S) -> Result<()>
where
	L: Locate + 'static,
	S: Future<Output = Result<()>> + Send + 'static,
{
	let lock = LockGuard::acquire(lock_path)?;
	info!(target: "lcu.app", lock = %lock.path().display(), "lock acquired; supervising discovery");

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let scheduler_task = tokio::spawn(scheduler.run(shutdown_rx));
	let signal_task = tokio::spawn(async move {
		let stopped = stop.await;
		shutdown_tx.send_replace(true);
		stopped
	});

	let scheduler_result = scheduler_task.await;
	signal_task.abort();
	let signal_result = match signal_task.await {
		Ok(stopped) => stopped,
		Err(err) if err.is_cancelled() => Ok(()),
		Err(err) => Err(LcuError::Scheduler(format!("signal listener failed: {err}"))),
	};

	let outcome = scheduler_outcome(scheduler_result).and(signal_result);
	drop(lock);
	match &outcome {
		Ok(()) => info!(target: "lcu.app", "shutdown complete"),
		Err(err) => error!(target: "lcu.app", error = %err.report(), "shutdown after failure"),
	}
	outcome
}

fn scheduler_outcome(joined: std::result::Result<(), JoinError>) -> Result<()> {
	match joined {
		Ok(()) => Ok(()),
		Err(err) if err.is_panic() => {
			let message = panic_message(err.into_panic());
			error!(target: "lcu.app", panic = %message, "discovery scheduler panicked");
			Err(LcuError::Scheduler(format!("panicked: {message}")))
		}
		Err(err) => Err(LcuError::Scheduler(err.to_string())),
	}
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		(*message).to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"unknown panic payload".to_string()
	}
}

/// Resolves on SIGTERM or SIGINT.
#[cfg(unix)]
pub async fn shutdown_signal() -> Result<()> {
	use tokio::signal::unix::{SignalKind, signal};

	let mut sigterm = signal(SignalKind::terminate()).map_err(|source| LcuError::Signal { signal: "SIGTERM", source })?;
	let mut sigint = signal(SignalKind::interrupt()).map_err(|source| LcuError::Signal { signal: "SIGINT", source })?;

	tokio::select! {
		_ = sigterm.recv() => info!(target: "lcu.app", "received SIGTERM, shutting down"),
		_ = sigint.recv() => info!(target: "lcu.app", "received SIGINT, shutting down"),
	}
	Ok(())
}

/// Resolves on Ctrl+C.
#[cfg(not(unix))]
pub async fn shutdown_signal() -> Result<()> {
	tokio::signal::ctrl_c()
		.await
		.map_err(|source| LcuError::Signal { signal: "Ctrl+C", source })?;
	info!(target: "lcu.app", "received Ctrl+C, shutting down");
	Ok(())
}
