use std::sync::Arc;
use tracing::{info, instrument, warn};
use vortexl2_domain::{BatchOutcome, DomainError, ForwardMode, ServiceUnit};

use crate::ports::{GlobalStateRepository, ServiceSupervisor};
use crate::services::ForwardDrivers;

pub const FORWARD_DAEMON_UNIT: &str = "vortexl2-forward-daemon";

/// Moves forwarding from one driver to another.
///
/// Order: stop the daemon, stop every forward of the old driver, persist the
/// new mode (skipped, with an error, if any old forward is still held), then (only when asked) start every forward of the new driver and
/// hand it over to the daemon.
pub struct SwitchForwardModeUseCase {
    state: Arc<dyn GlobalStateRepository>,
    drivers: ForwardDrivers,
    supervisor: Arc<dyn ServiceSupervisor>,
    daemon_exec: String,
}

impl SwitchForwardModeUseCase {
    /// `binary` is the path of this program; the daemon runs `<binary> forward-daemon`.
    pub fn new(
        state: Arc<dyn GlobalStateRepository>,
        drivers: ForwardDrivers,
        supervisor: Arc<dyn ServiceSupervisor>,
        binary: &str,
    ) -> Self {
        Self {
            state,
            drivers,
            supervisor,
            daemon_exec: format!("{} forward-daemon", binary),
        }
    }

    /// Returns the start outcome of the new driver, `None` when nothing was started.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        new_mode: ForwardMode,
        start_new: bool,
    ) -> Result<Option<BatchOutcome>, DomainError> {
        let current = self.state.forward_mode().await?;
        if current == new_mode {
            info!(mode = %current, "Forward mode unchanged");
            return Ok(None);
        }

        if let Err(e) = self.supervisor.stop(FORWARD_DAEMON_UNIT).await {
            warn!(error = %e, "Failed to stop forward daemon");
        }

        if let Some(old) = self.drivers.for_mode(current) {
            let stopped = old.stop_all().await?;
            if !stopped.is_success() {
                let details: Vec<String> = stopped
                    .failures
                    .iter()
                    .map(|(port, reason)| format!("{}: {}", port, reason))
                    .collect();
                warn!(mode = %old.mode(), failed = details.len(), "Old forward driver still holds ports");
                if let Err(e) = self.supervisor.start(FORWARD_DAEMON_UNIT).await {
                    warn!(error = %e, "Failed to restart forward daemon");
                }
                return Err(DomainError::ModeSwitchIncomplete {
                    mode: old.mode().to_string(),
                    details: details.join("; "),
                });
            }
            info!(mode = %old.mode(), stopped = stopped.succeeded, "Old forward driver stopped");
        }

        self.state.set_forward_mode(new_mode).await?;
        info!(from = %current, to = %new_mode, "Forward mode changed");

        let Some(new) = self.drivers.for_mode(new_mode) else {
            if let Err(e) = self.supervisor.disable(FORWARD_DAEMON_UNIT).await {
                warn!(error = %e, "Failed to disable forward daemon");
            }
            return Ok(None);
        };

        if !start_new {
            return Ok(None);
        }

        let outcome = new.start_all().await?;
        self.hand_over_to_daemon().await?;
        Ok(Some(outcome))
    }

    async fn hand_over_to_daemon(&self) -> Result<(), DomainError> {
        let unit = ServiceUnit::new(
            FORWARD_DAEMON_UNIT,
            "VortexL2 port forward daemon",
            &self.daemon_exec,
        );
        self.supervisor.install(&unit).await?;
        self.supervisor.enable(FORWARD_DAEMON_UNIT).await?;
        self.supervisor.restart(FORWARD_DAEMON_UNIT).await
    }
}
