use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use vortexl2_application::use_cases::{ListForwardsUseCase, StartForwardsUseCase};
use vortexl2_domain::{BatchOutcome, DomainError};

const DEFAULT_INTERVAL_SECS: u64 = 30;

/// Restarts forwards whose forwarder died. A dead socat or a stopped haproxy
/// only shows up as a configured forward that is no longer live.
pub struct ForwardWatchdogJob {
    list_forwards: Arc<ListForwardsUseCase>,
    start_forwards: Arc<StartForwardsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ForwardWatchdogJob {
    pub fn new(
        list_forwards: Arc<ListForwardsUseCase>,
        start_forwards: Arc<StartForwardsUseCase>,
    ) -> Self {
        Self {
            list_forwards,
            start_forwards,
            interval_secs: DEFAULT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// One check. `None` when every forward was live.
    pub async fn run_once(&self) -> Result<Option<BatchOutcome>, DomainError> {
        let forwards = self.list_forwards.execute().await?;
        let dead: Vec<u16> = forwards.iter().filter(|f| !f.live).map(|f| f.port).collect();

        if dead.is_empty() {
            debug!(forwards = forwards.len(), "All forwards live");
            return Ok(None);
        }

        warn!(ports = ?dead, "Forwards not live, restarting");
        self.start_forwards.start_all().await.map(Some)
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting forward watchdog job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ForwardWatchdogJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.run_once().await {
                            Ok(Some(outcome)) if !outcome.is_success() => {
                                warn!(
                                    started = outcome.succeeded,
                                    failed = outcome.failures.len(),
                                    "Watchdog restart left forwards down"
                                );
                            }
                            Ok(Some(outcome)) => {
                                info!(started = outcome.succeeded, "Watchdog restarted forwards");
                            }
                            Ok(None) => {}
                            Err(e) => {
                                error!(error = %e, "Forward watchdog check failed");
                            }
                        }
                    }
                }
            }
        });
    }
}
