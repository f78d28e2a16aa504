use std::sync::Arc;
use tracing::{info, instrument, warn};
use vortexl2_domain::{BatchOutcome, DomainError};

use crate::ports::GlobalStateRepository;
use crate::services::ForwardDrivers;

/// Bulk start/stop on the active driver.
pub struct StartForwardsUseCase {
    state: Arc<dyn GlobalStateRepository>,
    drivers: ForwardDrivers,
}

impl StartForwardsUseCase {
    pub fn new(state: Arc<dyn GlobalStateRepository>, drivers: ForwardDrivers) -> Self {
        Self { state, drivers }
    }

    #[instrument(skip(self))]
    pub async fn start_all(&self) -> Result<BatchOutcome, DomainError> {
        let mode = self.state.forward_mode().await?;
        let Some(driver) = self.drivers.for_mode(mode) else {
            info!("Port forwarding disabled, nothing to start");
            return Ok(BatchOutcome::default());
        };

        let outcome = driver.start_all().await?;
        if outcome.is_success() {
            info!(mode = %mode, started = outcome.succeeded, "Forwards started");
        } else {
            warn!(
                mode = %mode,
                started = outcome.succeeded,
                failed = outcome.failures.len(),
                "Some forwards failed to start"
            );
        }
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub async fn stop_all(&self) -> Result<BatchOutcome, DomainError> {
        let mode = self.state.forward_mode().await?;
        match self.drivers.for_mode(mode) {
            Some(driver) => driver.stop_all().await,
            None => Ok(BatchOutcome::default()),
        }
    }
}
