use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lcu_runtime::{ConnectionDescriptor, Credentials, Error as DiscoveryError, Result as DiscoveryResult};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::Instant;

use super::*;
use crate::client::{ClientOptions, TlsTrust};

#[derive(Clone, Default)]
struct Scripted {
	steps: Arc<Mutex<VecDeque<DiscoveryResult<ConnectionDescriptor>>>>,
	calls: Arc<Mutex<usize>>,
}

impl Scripted {
	fn new(steps: impl IntoIterator<Item = DiscoveryResult<ConnectionDescriptor>>) -> Self {
		Self {
			steps: Arc::new(Mutex::new(steps.into_iter().collect())),
			calls: Arc::default(),
		}
	}

	fn calls(&self) -> usize {
		*self.calls.lock()
	}
}

#[async_trait]
impl Locate for Scripted {
	async fn locate(&mut self) -> DiscoveryResult<ConnectionDescriptor> {
		*self.calls.lock() += 1;
		self.steps.lock().pop_front().unwrap_or_else(|| Err(absent()))
	}
}

fn lcu(pid: u32, port: u16) -> DiscoveryResult<ConnectionDescriptor> {
	Ok(ConnectionDescriptor::new(
		pid,
		Credentials {
			port,
			auth_token: format!("token-{pid}"),
		},
	))
}

fn absent() -> DiscoveryError {
	DiscoveryError::LcuProcessNotFound {
		process_name: "LeagueClientUx".into(),
	}
}

fn config() -> DiscoveryConfig {
	DiscoveryConfig::new(ClientOptions::new(TlsTrust::Unverified))
}

fn scheduler(steps: impl IntoIterator<Item = DiscoveryResult<ConnectionDescriptor>>) -> DiscoveryScheduler<Scripted> {
	DiscoveryScheduler::new(Scripted::new(steps), config())
}

fn assert_consistent<L: Locate>(scheduler: &DiscoveryScheduler<L>) {
	let bound = scheduler.phase() == DiscoveryPhase::Bound;
	assert_eq!(bound, scheduler.state().descriptor().is_some());
	assert_eq!(bound, scheduler.session().current().is_some());
	let expected = if bound {
		DEFAULT_BOUND_INTERVAL
	} else {
		DEFAULT_SEARCH_INTERVAL
	};
	assert_eq!(scheduler.interval(), expected);
}

#[test]
fn starts_searching_without_client() {
	let scheduler = scheduler([]);
	assert_eq!(scheduler.phase(), DiscoveryPhase::Searching);
	assert_eq!(scheduler.interval(), DEFAULT_SEARCH_INTERVAL);
	assert!(scheduler.session().current().is_none());
	assert_eq!(scheduler.session().rebuild_count(), 0);
}

#[tokio::test]
async fn absent_lcu_keeps_searching() {
	let mut scheduler = scheduler([Err(absent()), Err(DiscoveryError::Enumeration("denied".into()))]);

	assert_eq!(scheduler.tick().await, Transition::StillSearching);
	assert_eq!(scheduler.tick().await, Transition::StillSearching);
	assert_eq!(scheduler.session().rebuild_count(), 0);
	assert_consistent(&scheduler);
}

#[tokio::test]
async fn finding_lcu_binds_and_slows_polling() {
	let mut scheduler = scheduler([lcu(42, 50000)]);

	assert_eq!(scheduler.tick().await, Transition::Bound);
	assert_eq!(scheduler.phase(), DiscoveryPhase::Bound);
	assert_eq!(scheduler.interval(), DEFAULT_BOUND_INTERVAL);

	let client = scheduler.session().current().unwrap();
	assert_eq!(client.pid(), 42);
	assert_eq!(client.base_url(), "https://127.0.0.1:50000");
	assert_eq!(scheduler.state().descriptor().map(ConnectionDescriptor::port), Some(50000));
	assert_consistent(&scheduler);
}

#[tokio::test]
async fn same_pid_does_not_rebuild() {
	let mut scheduler = scheduler([lcu(42, 50000), lcu(42, 50000), lcu(42, 50000)]);

	scheduler.tick().await;
	let first = scheduler.session().current().unwrap();
	assert_eq!(scheduler.tick().await, Transition::Unchanged);
	assert_eq!(scheduler.tick().await, Transition::Unchanged);

	assert_eq!(scheduler.session().rebuild_count(), 1);
	assert!(Arc::ptr_eq(&first, &scheduler.session().current().unwrap()));
}

#[tokio::test]
async fn new_pid_rebuilds_client() {
	let mut scheduler = scheduler([lcu(42, 50000), lcu(43, 50001)]);

	scheduler.tick().await;
	assert_eq!(scheduler.tick().await, Transition::Rebound);

	let client = scheduler.session().current().unwrap();
	assert_eq!(client.pid(), 43);
	assert_eq!(client.port(), 50001);
	assert_eq!(scheduler.session().rebuild_count(), 2);
	assert_consistent(&scheduler);
}

#[tokio::test]
async fn losing_lcu_retires_client_and_speeds_up() {
	let mut scheduler = scheduler([lcu(42, 50000), Err(absent())]);

	scheduler.tick().await;
	let held = scheduler.session().current().unwrap();
	assert_eq!(scheduler.tick().await, Transition::Lost);

	assert_eq!(scheduler.phase(), DiscoveryPhase::Searching);
	assert_eq!(scheduler.interval(), DEFAULT_SEARCH_INTERVAL);
	assert!(scheduler.session().current().is_none());
	// Readers that grabbed the old client keep a usable handle.
	assert_eq!(held.pid(), 42);
	assert_consistent(&scheduler);
}

#[tokio::test]
async fn build_failure_stays_searching() {
	let missing = PathBuf::from("/nonexistent/lcu/riotgames.pem");
	let config = DiscoveryConfig::new(ClientOptions::new(TlsTrust::PinnedCa(missing)));
	let mut scheduler = DiscoveryScheduler::new(Scripted::new([lcu(42, 50000)]), config);

	assert_eq!(scheduler.tick().await, Transition::BuildFailed);
	assert_eq!(scheduler.phase(), DiscoveryPhase::Searching);
	assert!(scheduler.state().descriptor().is_none());
	assert!(scheduler.session().current().is_none());
	assert_eq!(scheduler.session().rebuild_count(), 0);
	assert_eq!(scheduler.interval(), DEFAULT_SEARCH_INTERVAL);
}

#[tokio::test]
async fn bound_iff_client_published_across_script() {
	let mut scheduler = scheduler([
		Err(absent()),
		lcu(1, 1000),
		lcu(1, 1000),
		lcu(2, 2000),
		Err(absent()),
		Err(absent()),
		lcu(3, 3000),
		Err(DiscoveryError::NoMatch { flag: "--app-port=" }),
		lcu(4, 4000),
	]);

	let mut transitions = Vec::new();
	for _ in 0..9 {
		transitions.push(scheduler.tick().await);
		assert_consistent(&scheduler);
	}

	assert_eq!(
		transitions,
		[
			Transition::StillSearching,
			Transition::Bound,
			Transition::Unchanged,
			Transition::Rebound,
			Transition::Lost,
			Transition::StillSearching,
			Transition::Bound,
			Transition::Lost,
			Transition::Bound,
		]
	);
	assert_eq!(scheduler.session().rebuild_count(), 4);
}

#[tokio::test]
async fn custom_intervals_are_applied() {
	let config = config().with_intervals(Duration::from_secs(5), Duration::from_secs(30));
	let mut scheduler = DiscoveryScheduler::new(Scripted::new([lcu(9, 9000), Err(absent())]), config);
	assert_eq!(scheduler.interval(), Duration::from_secs(5));

	scheduler.tick().await;
	assert_eq!(scheduler.interval(), Duration::from_secs(30));
	scheduler.tick().await;
	assert_eq!(scheduler.interval(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn polls_again_after_search_interval() {
	let locator = Scripted::new([Err(absent()), lcu(42, 50000)]);
	let scheduler = DiscoveryScheduler::new(locator.clone(), config());
	let session = scheduler.session();
	let (shutdown_tx, shutdown_rx) = watch::channel(false);

	let started = Instant::now();
	let handle = tokio::spawn(scheduler.run(shutdown_rx));

	session.subscribe().wait_for(Option::is_some).await.unwrap();
	assert!(started.elapsed() >= DEFAULT_SEARCH_INTERVAL);
	assert_eq!(locator.calls(), 2);

	shutdown_tx.send(true).unwrap();
	handle.await.unwrap();
	assert!(session.current().is_none());
}

#[tokio::test(start_paused = true)]
async fn shutdown_while_bound_exits_promptly() {
	let locator = Scripted::new([lcu(42, 50000)]);
	let scheduler = DiscoveryScheduler::new(locator.clone(), config());
	let session = scheduler.session();
	let (shutdown_tx, shutdown_rx) = watch::channel(false);

	let handle = tokio::spawn(scheduler.run(shutdown_rx));
	session.subscribe().wait_for(Option::is_some).await.unwrap();

	let asked = Instant::now();
	shutdown_tx.send(true).unwrap();
	tokio::time::timeout(DEFAULT_BOUND_INTERVAL, handle)
		.await
		.expect("scheduler ignored shutdown")
		.unwrap();

	assert!(asked.elapsed() < DEFAULT_BOUND_INTERVAL);
	assert_eq!(locator.calls(), 1);
	assert!(session.current().is_none());
}

#[tokio::test(start_paused = true)]
async fn dropped_shutdown_sender_stops_loop() {
	let locator = Scripted::new([]);
	let scheduler = DiscoveryScheduler::new(locator.clone(), config());
	let (shutdown_tx, shutdown_rx) = watch::channel(false);

	let handle = tokio::spawn(scheduler.run(shutdown_rx));
	drop(shutdown_tx);
	handle.await.unwrap();
	assert!(locator.calls() <= 1);
}

#[tokio::test]
async fn shutdown_before_start_skips_polling() {
	let locator = Scripted::new([lcu(42, 50000)]);
	let scheduler = DiscoveryScheduler::new(locator.clone(), config());
	let session = scheduler.session();
	let (_shutdown_tx, shutdown_rx) = watch::channel(true);

	scheduler.run(shutdown_rx).await;
	assert_eq!(locator.calls(), 0);
	assert!(session.current().is_none());
}
