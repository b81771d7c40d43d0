//! Run bot actor.
//!
//! The bot owns the orchestrator and is the only consumer of its channel, so
//! runs requested by the timer and by HTTP execute one at a time.

use crate::TriggerMetrics;
use glean_batch::BatchOrchestrator;
use glean_core::{RunOptions, RunReport};
use glean_error::{ServerError, ServerErrorKind};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, instrument, warn};

/// Capacity of the run request queue.
pub const RUN_QUEUE_CAPACITY: usize = 8;

/// Message types for the run bot.
#[derive(Debug)]
pub enum RunMessage {
    /// Execute one orchestrator run
    Run {
        /// Options for this run
        options: RunOptions,
        /// Receives the report once the run finishes
        reply: Option<oneshot::Sender<RunReport>>,
    },
    /// Shutdown the bot
    Shutdown,
}

/// Bot that executes orchestrator runs on request.
#[derive(Debug)]
pub struct RunBot {
    orchestrator: BatchOrchestrator,
    metrics: TriggerMetrics,
    rx: mpsc::Receiver<RunMessage>,
}

impl RunBot {
    /// Creates a new run bot.
    pub fn new(
        orchestrator: BatchOrchestrator,
        metrics: TriggerMetrics,
        rx: mpsc::Receiver<RunMessage>,
    ) -> Self {
        Self {
            orchestrator,
            metrics,
            rx,
        }
    }

    /// Create a bot together with a handle for sending it requests.
    pub fn channel(orchestrator: BatchOrchestrator, metrics: TriggerMetrics) -> (Self, RunHandle) {
        let (tx, rx) = mpsc::channel(RUN_QUEUE_CAPACITY);
        (Self::new(orchestrator, metrics, rx), RunHandle { tx })
    }

    /// Runs the bot loop until shutdown or until every handle is dropped.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        info!("Run bot started");

        while let Some(msg) = self.rx.recv().await {
            match msg {
                RunMessage::Run { options, reply } => {
                    let report = self.orchestrator.run(&options).await;
                    self.metrics.record(&report);

                    if let Some(reply) = reply
                        && reply.send(report).is_err()
                    {
                        warn!("Run requester went away before the report was ready");
                    }
                }
                RunMessage::Shutdown => {
                    info!("Run bot shutting down");
                    break;
                }
            }
        }
    }
}

/// Cloneable sender side of the run bot.
#[derive(Debug, Clone)]
pub struct RunHandle {
    tx: mpsc::Sender<RunMessage>,
}

impl RunHandle {
    /// Wrap an existing sender.
    pub fn new(tx: mpsc::Sender<RunMessage>) -> Self {
        Self { tx }
    }

    /// Request a run and wait for its report.
    ///
    /// # Errors
    ///
    /// Returns [`ServerErrorKind::ChannelClosed`] if the bot stopped before
    /// accepting or finishing the run.
    pub async fn run(&self, options: RunOptions) -> Result<RunReport, ServerError> {
        let (reply, report) = oneshot::channel();
        self.tx
            .send(RunMessage::Run {
                options,
                reply: Some(reply),
            })
            .await
            .map_err(|_| ServerError::new(ServerErrorKind::ChannelClosed))?;

        report
            .await
            .map_err(|_| ServerError::new(ServerErrorKind::ChannelClosed))
    }

    /// Ask the bot to stop after the run in progress.
    ///
    /// # Errors
    ///
    /// Returns [`ServerErrorKind::ChannelClosed`] if the bot already stopped.
    pub async fn shutdown(&self) -> Result<(), ServerError> {
        self.tx
            .send(RunMessage::Shutdown)
            .await
            .map_err(|_| ServerError::new(ServerErrorKind::ChannelClosed))
    }
}
