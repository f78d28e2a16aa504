use std::sync::Arc;
use tracing::{info, instrument, warn};
use vortexl2_domain::{BatchOutcome, DomainError, Forwardable};

use super::load_tunnel;
use crate::ports::{GlobalStateRepository, TunnelRepository};
use crate::services::ForwardDrivers;

/// Removes ports from a tunnel's forward set.
///
/// With forwarding disabled only the document changes; otherwise the active
/// driver stops each live forwarder first.
pub struct RemoveForwardsUseCase {
    tunnels: Arc<dyn TunnelRepository>,
    state: Arc<dyn GlobalStateRepository>,
    drivers: ForwardDrivers,
}

impl RemoveForwardsUseCase {
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
        let driver = self.drivers.for_mode(self.state.forward_mode().await?);
        let mut tunnel = load_tunnel(&self.tunnels, tunnel_name).await?;
        let mut outcome = BatchOutcome::default();

        for &port in ports {
            let result = match &driver {
                Some(driver) => driver.remove(&mut tunnel, port).await,
                None => tunnel.remove_port(port),
            };

            match &result {
                Ok(()) => info!(tunnel = %tunnel_name, port, "Forward removed"),
                Err(e) => warn!(tunnel = %tunnel_name, port, error = %e, "Forward not removed"),
            }
            outcome.record(port, result);
        }

        if outcome.succeeded > 0 {
            self.tunnels.save(&tunnel).await?;
        }

        Ok(outcome)
    }
}
