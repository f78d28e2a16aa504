use std::sync::Arc;
use vortexl2_domain::{DomainError, ForwardStatus, Forwardable};

use crate::ports::{GlobalStateRepository, TunnelRepository};
use crate::services::ForwardDrivers;

/// Every configured forward with live status from the active driver.
///
/// With forwarding disabled the rows come from the documents and are never live.
pub struct ListForwardsUseCase {
    tunnels: Arc<dyn TunnelRepository>,
    state: Arc<dyn GlobalStateRepository>,
    drivers: ForwardDrivers,
}

impl ListForwardsUseCase {
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

    pub async fn execute(&self) -> Result<Vec<ForwardStatus>, DomainError> {
        if let Some(driver) = self.drivers.for_mode(self.state.forward_mode().await?) {
            return driver.list_forwards().await;
        }

        let mut rows = Vec::new();
        for tunnel in self.tunnels.list().await? {
            for entry in tunnel.forward_entries() {
                rows.push(ForwardStatus {
                    port: entry.port,
                    tunnel: entry.tunnel.clone(),
                    remote: entry.remote_endpoint(),
                    live: false,
                    process: None,
                });
            }
        }
        Ok(rows)
    }

    /// Only the rows of one tunnel.
    pub async fn execute_for(&self, tunnel_name: &str) -> Result<Vec<ForwardStatus>, DomainError> {
        let mut rows = self.execute().await?;
        rows.retain(|row| row.tunnel == tunnel_name);
        Ok(rows)
    }
}
