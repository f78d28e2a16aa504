use std::sync::Arc;
use tracing::{info, instrument};
use vortexl2_domain::DomainError;

use crate::ports::TunnelRepository;
use crate::services::TunnelRuntimes;

pub struct RestartTunnelUseCase {
    tunnels: Arc<dyn TunnelRepository>,
    runtimes: TunnelRuntimes,
}

impl RestartTunnelUseCase {
    pub fn new(tunnels: Arc<dyn TunnelRepository>, runtimes: TunnelRuntimes) -> Self {
        Self { tunnels, runtimes }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, name: &str) -> Result<String, DomainError> {
        let tunnel = self
            .tunnels
            .get(name)
            .await?
            .ok_or_else(|| DomainError::TunnelNotFound(name.to_string()))?;

        let message = self.runtimes.for_mode(tunnel.mode()).restart(&tunnel).await?;
        info!(tunnel = %name, "Tunnel restarted");
        Ok(message)
    }
}
