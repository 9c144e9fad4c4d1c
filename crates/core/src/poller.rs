use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::models::alert::AlertEvent;
use crate::models::command::Command;
use crate::models::price::PriceSnapshot;
use crate::models::view::DashboardView;
use crate::notifiers::traits::AlertNotifier;
use crate::services::price_service::PriceService;
use crate::PortfolioTracker;

/// Capacity of the command channel returned by [`Poller::spawn`].
const COMMAND_BUFFER: usize = 64;

type FetchTask = JoinHandle<Result<PriceSnapshot, CoreError>>;

/// Drives a [`PortfolioTracker`]: polls prices on a fixed cadence and
/// applies user commands, one at a time, on a single task.
///
/// - The first poll starts immediately, then one per interval.
/// - At most one fetch is in flight. A tick that arrives while the previous
///   fetch is unresolved is skipped.
/// - Every state change publishes a fresh [`DashboardView`].
/// - Alerts are delivered through the notifier before the next event is
///   handled.
/// - Cancelling the token stops the loop, aborts any in-flight fetch and
///   hands the tracker back.
pub struct Poller {
    price_service: Arc<PriceService>,
    notifier: Arc<dyn AlertNotifier>,
    interval: Duration,
}

/// Handle to a poller running on its own task.
pub struct PollerHandle {
    pub commands: mpsc::Sender<Command>,
    pub views: watch::Receiver<DashboardView>,
    pub cancel: CancellationToken,
    pub task: JoinHandle<PortfolioTracker>,
}

impl PollerHandle {
    /// Cancel the poller and wait for it to return the tracker.
    pub async fn shutdown(self) -> Result<PortfolioTracker, tokio::task::JoinError> {
        self.cancel.cancel();
        self.task.await
    }
}

impl Poller {
    pub fn new(
        price_service: PriceService,
        notifier: Arc<dyn AlertNotifier>,
        interval: Duration,
    ) -> Self {
        Self {
            price_service: Arc::new(price_service),
            notifier,
            interval,
        }
    }

    /// Run the poller on a new task, wiring up the command and view channels.
    pub fn spawn(self, tracker: PortfolioTracker) -> PollerHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (view_tx, view_rx) = watch::channel(tracker.view());
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run(tracker, command_rx, view_tx, cancel.clone()));

        PollerHandle {
            commands: command_tx,
            views: view_rx,
            cancel,
            task,
        }
    }

    /// Run until `cancel` fires, then return the tracker.
    pub async fn run(
        self,
        mut tracker: PortfolioTracker,
        mut commands: mpsc::Receiver<Command>,
        views: watch::Sender<DashboardView>,
        cancel: CancellationToken,
    ) -> PortfolioTracker {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut in_flight: Option<FetchTask> = None;
        let mut commands_open = true;

        info!(
            provider = self.price_service.provider_name(),
            interval_ms = self.interval.as_millis() as u64,
            "price poller started"
        );
        views.send_replace(tracker.view());

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,

                result = join_fetch(&mut in_flight) => {
                    in_flight = None;
                    let alert = tracker.apply_poll_result(result);
                    self.deliver(alert).await;
                    views.send_replace(tracker.view());
                }

                command = commands.recv(), if commands_open => match command {
                    Some(command) => {
                        debug!(?command, "applying command");
                        match tracker.apply(command) {
                            Ok(alert) => self.deliver(alert).await,
                            Err(e) => warn!(error = %e, "command failed"),
                        }
                        views.send_replace(tracker.view());
                    }
                    None => {
                        debug!("command channel closed");
                        commands_open = false;
                    }
                },

                _ = ticker.tick() => {
                    if in_flight.is_some() {
                        debug!("previous fetch still in flight, skipping tick");
                    } else {
                        let service = Arc::clone(&self.price_service);
                        in_flight = Some(tokio::spawn(async move { service.fetch_snapshot().await }));
                    }
                }
            }
        }

        if let Some(task) = in_flight.take() {
            task.abort();
        }
        info!("price poller stopped");
        tracker
    }

    async fn deliver(&self, alert: Option<AlertEvent>) {
        if let Some(alert) = alert {
            self.notifier.notify(&alert).await;
        }
    }
}

/// Resolve the in-flight fetch, or wait forever when there is none.
async fn join_fetch(in_flight: &mut Option<FetchTask>) -> Result<PriceSnapshot, CoreError> {
    match in_flight {
        Some(task) => task.await.unwrap_or_else(|e| {
            Err(CoreError::Network(format!("fetch task did not complete: {e}")))
        }),
        None => std::future::pending().await,
    }
}
