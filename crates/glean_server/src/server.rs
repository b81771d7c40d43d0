//! Trigger server: run bot, timer and HTTP listener.

use crate::{ApiState, GleanConfig, RunBot, RunHandle, ScheduleType, TriggerMetrics, create_router};
use chrono::Utc;
use glean_batch::BatchOrchestrator;
use glean_core::RunOptions;
use glean_error::{ServerError, ServerErrorKind};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval, sleep};
use tracing::{error, info, instrument, warn};

/// Server wiring one orchestrator to the timer and HTTP triggers.
#[derive(Debug)]
pub struct GleanServer {
    config: GleanConfig,
    orchestrator: BatchOrchestrator,
    metrics: TriggerMetrics,
}

impl GleanServer {
    /// Creates a new server.
    pub fn new(config: GleanConfig, orchestrator: BatchOrchestrator) -> Self {
        Self {
            config,
            orchestrator,
            metrics: TriggerMetrics::new(),
        }
    }

    /// Metrics recorded by this server's run bot.
    pub fn metrics(&self) -> &TriggerMetrics {
        &self.metrics
    }

    /// Starts the bot, the scheduler and the HTTP listener.
    ///
    /// Returns after Ctrl-C, once the run in progress has finished.
    ///
    /// # Errors
    ///
    /// Returns error if the listener cannot be bound or the HTTP server fails.
    #[instrument(skip(self), fields(bind = %self.config.server.bind, schedule = %self.config.schedule))]
    pub async fn start(self) -> Result<(), ServerError> {
        info!("Starting trigger server");

        let addr = self.config.server.bind_addr().map_err(|e| {
            ServerError::new(ServerErrorKind::Bind {
                addr: self.config.server.bind.clone(),
                reason: e.message,
            })
        })?;

        let (bot, runner) = RunBot::channel(self.orchestrator, self.metrics.clone());
        let bot_handle = tokio::spawn(bot.run());

        let scheduler = spawn_scheduler(self.config.schedule.clone(), runner.clone());

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            ServerError::new(ServerErrorKind::Bind {
                addr: addr.to_string(),
                reason: e.to_string(),
            })
        })?;
        info!(%addr, "HTTP trigger listening");

        let router = create_router(ApiState::new(runner.clone(), self.metrics.clone()));
        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())));

        if let Some(scheduler) = scheduler {
            scheduler.abort();
        }
        if runner.shutdown().await.is_err() {
            warn!("Run bot already stopped");
        }
        if let Err(e) = bot_handle.await {
            error!(error = %e, "Run bot task failed");
        }

        info!("Trigger server stopped");
        served
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

/// Spawn the timer trigger for `schedule`.
///
/// Each tick requests a default run and waits for its report, so ticks that
/// fall inside a long run are skipped rather than queued. Returns `None` for
/// [`ScheduleType::Disabled`].
pub fn spawn_scheduler(schedule: ScheduleType, runner: RunHandle) -> Option<JoinHandle<()>> {
    match schedule {
        ScheduleType::Disabled => {
            info!("Timer trigger disabled");
            None
        }
        ScheduleType::Interval { seconds } => Some(tokio::spawn(async move {
            let mut ticker = interval(std::time::Duration::from_secs(seconds.max(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if !fire(&runner).await {
                    break;
                }
            }
        })),
        cron @ ScheduleType::Cron { .. } => Some(tokio::spawn(async move {
            loop {
                let now = Utc::now();
                let Some(next) = cron.next_execution(now) else {
                    warn!(schedule = %cron, "Schedule has no further executions");
                    break;
                };
                let delay = (next - now).to_std().unwrap_or_default();
                info!(next = %next, delay_secs = delay.as_secs(), "Next run scheduled");

                sleep(delay).await;
                if !fire(&runner).await {
                    break;
                }
            }
        })),
    }
}

/// Request one timer run; false once the bot is gone.
async fn fire(runner: &RunHandle) -> bool {
    match runner.run(RunOptions::default()).await {
        Ok(report) => {
            info!(stats = %report.stats, success = report.is_success(), "Timer run finished");
            true
        }
        Err(e) => {
            error!(error = %e, "Run bot channel closed");
            false
        }
    }
}
