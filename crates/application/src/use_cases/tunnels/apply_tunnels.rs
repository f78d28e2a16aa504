use std::sync::Arc;
use tracing::{info, instrument, warn};
use vortexl2_domain::{BatchOutcome, DomainError, Forwardable};

use crate::ports::{GlobalStateRepository, TunnelRepository};
use crate::services::{ForwardDrivers, TunnelRuntimes};

#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    pub started: Vec<(String, String)>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, String)>,
    /// `None` when forwarding is disabled or the driver failed as a whole
    pub forwards: Option<BatchOutcome>,
    pub forwards_error: Option<String>,
}

impl ApplyReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Re-establishes live state from the stored documents: every configured
/// tunnel of the current mode, then every forward of the active driver.
pub struct ApplyTunnelsUseCase {
    tunnels: Arc<dyn TunnelRepository>,
    state: Arc<dyn GlobalStateRepository>,
    drivers: ForwardDrivers,
    runtimes: TunnelRuntimes,
}

impl ApplyTunnelsUseCase {
    pub fn new(
        tunnels: Arc<dyn TunnelRepository>,
        state: Arc<dyn GlobalStateRepository>,
        drivers: ForwardDrivers,
        runtimes: TunnelRuntimes,
    ) -> Self {
        Self {
            tunnels,
            state,
            drivers,
            runtimes,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<ApplyReport, DomainError> {
        let mode = self.state.tunnel_mode().await?;
        let runtime = self.runtimes.for_mode(mode);
        let mut report = ApplyReport::default();

        for tunnel in self.tunnels.list().await? {
            if tunnel.mode() != mode {
                continue;
            }
            let name = tunnel.name().to_string();

            if !tunnel.is_configured() {
                info!(tunnel = %name, "Tunnel not fully configured, skipping");
                report.skipped.push(name);
                continue;
            }

            match runtime.start(&tunnel).await {
                Ok(message) => {
                    info!(tunnel = %name, "Tunnel up");
                    report.started.push((name, message));
                }
                Err(e) => {
                    warn!(tunnel = %name, error = %e, "Tunnel failed to start");
                    report.failed.push((name, e.to_string()));
                }
            }
        }

        if let Some(driver) = self.drivers.for_mode(self.state.forward_mode().await?) {
            match driver.start_all().await {
                Ok(outcome) => report.forwards = Some(outcome),
                Err(e) => {
                    warn!(error = %e, "Failed to start forwards");
                    report.forwards_error = Some(e.to_string());
                }
            }
        }

        info!(
            started = report.started.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Apply finished"
        );

        Ok(report)
    }
}
