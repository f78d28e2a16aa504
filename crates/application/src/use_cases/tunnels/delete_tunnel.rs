use std::sync::Arc;
use tracing::{info, instrument, warn};
use vortexl2_domain::{DomainError, Forwardable};

use crate::ports::{GlobalStateRepository, TunnelRepository};
use crate::services::{ForwardDrivers, TunnelRuntimes};

/// Tears a tunnel down: forwards first, then the runtime, then the document.
pub struct DeleteTunnelUseCase {
    tunnels: Arc<dyn TunnelRepository>,
    state: Arc<dyn GlobalStateRepository>,
    drivers: ForwardDrivers,
    runtimes: TunnelRuntimes,
}

impl DeleteTunnelUseCase {
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
    pub async fn execute(&self, name: &str) -> Result<(), DomainError> {
        let mut tunnel = self
            .tunnels
            .get(name)
            .await?
            .ok_or_else(|| DomainError::TunnelNotFound(name.to_string()))?;

        let ports: Vec<u16> = tunnel.forwarded_ports().iter().copied().collect();
        match self.drivers.for_mode(self.state.forward_mode().await?) {
            Some(driver) => {
                for port in ports {
                    if let Err(e) = driver.remove(&mut tunnel, port).await {
                        warn!(tunnel = %name, port, error = %e, "Failed to remove forward");
                    }
                }
            }
            None => tunnel.forwarded_ports_mut().clear(),
        }

        let runtime = self.runtimes.for_mode(tunnel.mode());
        if let Err(e) = runtime.teardown(&tunnel).await {
            warn!(tunnel = %name, error = %e, "Tunnel teardown incomplete");
        }

        self.tunnels.delete(name).await?;
        info!(tunnel = %name, "Tunnel deleted");
        Ok(())
    }
}
