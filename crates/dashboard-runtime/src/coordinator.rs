//! Async dashboard coordinator.
//!
//! Owns an [`AggregationEngine`] inside a tokio task. Callers send
//! [`DashboardCommand`]s and receive [`DashboardSnapshot`]s over `mpsc`
//! channels; nothing else touches the engine.
//!
//! Filter edits are applied at once but the view is only rebuilt after the
//! debounce window passes without another edit. Loads run on the blocking
//! pool; a refresh aborts the load in flight and supersedes it.

use std::sync::Arc;
use std::time::Duration;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::filters::{FilterConfig, FilterUpdate};
use dashboard_data::loader::{load_creatives, RawTextSource};
use dashboard_data::parser::ParseOutcome;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::engine::{AggregationEngine, DashboardSnapshot, LoadTicket};

// ── Public types ──────────────────────────────────────────────────────────────

/// Requests accepted by the coordinator loop.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    /// Change one filter or the sort order.
    Update(FilterUpdate),
    /// Reload the export.
    Refresh,
    /// Stop the loop.
    Shutdown,
}

// ── DashboardCoordinator ──────────────────────────────────────────────────────

/// Background coordinator; see the module docs.
pub struct DashboardCoordinator {
    source: Arc<dyn RawTextSource>,
    config: FilterConfig,
    debounce: Duration,
}

impl DashboardCoordinator {
    pub fn new(source: Arc<dyn RawTextSource>, config: FilterConfig, debounce: Duration) -> Self {
        Self {
            source,
            config,
            debounce,
        }
    }

    /// Spawn the loop and start the initial load.
    ///
    /// Returns the command sender, the snapshot receiver and a handle to the
    /// task. The loop ends on [`DashboardCommand::Shutdown`], when every
    /// command sender is dropped, or when the snapshot receiver is dropped.
    pub fn start(
        self,
    ) -> (
        mpsc::Sender<DashboardCommand>,
        mpsc::Receiver<DashboardSnapshot>,
        CoordinatorHandle,
    ) {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (snapshot_tx, snapshot_rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            self.run(command_rx, snapshot_tx).await;
        });

        (command_tx, snapshot_rx, CoordinatorHandle { handle })
    }

    // ── Private implementation ────────────────────────────────────────────

    async fn run(
        self,
        mut commands: mpsc::Receiver<DashboardCommand>,
        snapshots: mpsc::Sender<DashboardSnapshot>,
    ) {
        let mut engine = AggregationEngine::new(self.config.clone());
        let mut in_flight = Some(self.spawn_load(&mut engine));
        let mut deadline: Option<Instant> = None;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(DashboardCommand::Update(update)) => {
                        if engine.apply(update) {
                            deadline = Some(Instant::now() + self.debounce);
                        }
                    }
                    Some(DashboardCommand::Refresh) => {
                        if let Some(stale) = in_flight.take() {
                            stale.task.abort();
                        }
                        in_flight = Some(self.spawn_load(&mut engine));
                    }
                    Some(DashboardCommand::Shutdown) | None => {
                        tracing::debug!("coordinator shutting down");
                        break;
                    }
                },

                _ = wait_for_deadline(deadline) => {
                    deadline = None;
                    engine.recompute();
                    if !send_snapshot(&snapshots, &engine).await {
                        break;
                    }
                }

                (ticket, result) = wait_for_load(&mut in_flight) => {
                    in_flight = None;
                    if engine.finish_load(ticket, result) {
                        // The reload already recomputed with every pending edit.
                        deadline = None;
                        if !send_snapshot(&snapshots, &engine).await {
                            break;
                        }
                    }
                }
            }
        }

        if let Some(load) = in_flight {
            load.task.abort();
        }
    }

    fn spawn_load(&self, engine: &mut AggregationEngine) -> InFlightLoad {
        let ticket = engine.begin_load();
        let source = Arc::clone(&self.source);
        let task = tokio::task::spawn_blocking(move || load_creatives(source.as_ref()));
        InFlightLoad { ticket, task }
    }
}

// ── CoordinatorHandle ─────────────────────────────────────────────────────────

/// A handle to the background coordinator task.
pub struct CoordinatorHandle {
    handle: JoinHandle<()>,
}

impl CoordinatorHandle {
    /// Immediately abort the coordinator loop.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait for the loop to exit on its own.
    pub async fn wait(self) {
        if let Err(e) = self.handle.await {
            if !e.is_cancelled() {
                tracing::warn!(error = %e, "coordinator task failed");
            }
        }
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

struct InFlightLoad {
    ticket: LoadTicket,
    task: JoinHandle<Result<ParseOutcome>>,
}

async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

async fn wait_for_load(in_flight: &mut Option<InFlightLoad>) -> (LoadTicket, Result<ParseOutcome>) {
    let Some(load) = in_flight else {
        return std::future::pending().await;
    };

    let result = match (&mut load.task).await {
        Ok(result) => result,
        Err(e) => Err(DashboardError::Other(anyhow::Error::new(e))),
    };
    (load.ticket, result)
}

/// Returns `false` once the receiver is gone.
async fn send_snapshot(tx: &mpsc::Sender<DashboardSnapshot>, engine: &AggregationEngine) -> bool {
    if let Err(e) = tx.send(engine.snapshot()).await {
        tracing::debug!(error = %e, "snapshot receiver dropped; stopping coordinator");
        return false;
    }
    true
}

// ── Tests ─────────────────────────────────────────────────────────────────────
