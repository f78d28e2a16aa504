use std::sync::Arc;
use tracing::{info, instrument, warn};
use vortexl2_domain::{BatchOutcome, DomainError};

use super::load_tunnel;
use crate::ports::{GlobalStateRepository, TunnelRepository};
use crate::services::ForwardDrivers;

/// Adds ports to a tunnel's forward set through the active driver.
///
/// The tunnel document is loaded once and saved once, after every port was
/// attempted. Ports that fail are reported and left out of the document.
pub struct AddForwardsUseCase {
    tunnels: Arc<dyn TunnelRepository>,
    state: Arc<dyn GlobalStateRepository>,
    drivers: ForwardDrivers,
}

impl AddForwardsUseCase {
    pub fn new(
        tunnels: Arc<dyn TunnelRepository>,
        state: Arc<dyn GlobalStateRepository>,
        drivers: ForwardDrivers,
    ) -> Self {
        Self {
            tunnels,
            state,
            drivers,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, tunnel_name: &str, ports: &[u16]) -> Result<BatchOutcome, DomainError> {
        let mode = self.state.forward_mode().await?;
        let driver = self
            .drivers
            .for_mode(mode)
            .ok_or(DomainError::ForwardingDisabled)?;

        let mut tunnel = load_tunnel(&self.tunnels, tunnel_name).await?;
        let mut outcome = BatchOutcome::default();

        for &port in ports {
            match driver.create(&mut tunnel, port).await {
                Ok(entry) => {
                    info!(tunnel = %tunnel_name, port, remote = %entry.remote_endpoint(), "Forward created");
                    outcome.record(port, Ok(()));
                }
                Err(e) => {
                    warn!(tunnel = %tunnel_name, port, error = %e, "Forward not created");
                    outcome.record(port, Err(e));
                }
            }
        }

        if outcome.succeeded > 0 {
            self.tunnels.save(&tunnel).await?;
        }

        Ok(outcome)
    }
}
