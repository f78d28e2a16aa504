use std::sync::Arc;
use vortexl2_domain::{DomainError, TunnelConfig};

use crate::ports::{GlobalStateRepository, TunnelRepository};
use crate::services::TunnelRuntimes;

#[derive(Debug, Clone)]
pub struct TunnelSummary {
    pub config: TunnelConfig,
    pub running: bool,
}

/// Tunnels of the current tunnel mode with their runtime status.
pub struct ListTunnelsUseCase {
    tunnels: Arc<dyn TunnelRepository>,
    state: Arc<dyn GlobalStateRepository>,
    runtimes: TunnelRuntimes,
}

impl ListTunnelsUseCase {
    pub fn new(
        tunnels: Arc<dyn TunnelRepository>,
        state: Arc<dyn GlobalStateRepository>,
        runtimes: TunnelRuntimes,
    ) -> Self {
        Self {
            tunnels,
            state,
            runtimes,
        }
    }

    pub async fn execute(&self) -> Result<Vec<TunnelSummary>, DomainError> {
        let mode = self.state.tunnel_mode().await?;
        let runtime = self.runtimes.for_mode(mode);

        let mut summaries = Vec::new();
        for config in self.tunnels.list().await? {
            if config.mode() != mode {
                continue;
            }
            let running = runtime.is_running(&config).await;
            summaries.push(TunnelSummary { config, running });
        }
        Ok(summaries)
    }
}
