use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, instrument};
use vortexl2_domain::{BatchOutcome, DomainError, Forwardable};

use super::load_tunnel;
use crate::ports::{GlobalStateRepository, TunnelRepository};
use crate::services::ForwardDrivers;

/// Changes the address a tunnel's forwards point at.
///
/// Live forwards still target the old address, so when the tunnel has any
/// and forwarding is enabled the active driver is cycled (stop-all, start-all).
pub struct SetRemoteTargetUseCase {
    tunnels: Arc<dyn TunnelRepository>,
    state: Arc<dyn GlobalStateRepository>,
    drivers: ForwardDrivers,
}

impl SetRemoteTargetUseCase {
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

    /// Returns the restart outcome, `None` when nothing had to be restarted.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        tunnel_name: &str,
        remote: IpAddr,
    ) -> Result<Option<BatchOutcome>, DomainError> {
        let mut tunnel = load_tunnel(&self.tunnels, tunnel_name).await?;
        if tunnel.remote_target() == Some(remote) {
            return Ok(None);
        }

        tunnel.set_remote_target(Some(remote));
        self.tunnels.save(&tunnel).await?;
        info!(tunnel = %tunnel_name, remote = %remote, "Remote forward target updated");

        if tunnel.forwarded_ports().is_empty() {
            return Ok(None);
        }
        let mode = self.state.forward_mode().await?;
        let Some(driver) = self.drivers.for_mode(mode) else {
            return Ok(None);
        };

        driver.stop_all().await?;
        let outcome = driver.start_all().await?;
        info!(mode = %mode, started = outcome.succeeded, "Forwards restarted on new target");
        Ok(Some(outcome))
    }
}
