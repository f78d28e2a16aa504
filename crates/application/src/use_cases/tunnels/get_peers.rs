use std::sync::Arc;
use vortexl2_domain::{DomainError, PeerInfo};

use crate::ports::TunnelRepository;
use crate::services::TunnelRuntimes;

pub struct GetPeersUseCase {
    tunnels: Arc<dyn TunnelRepository>,
    runtimes: TunnelRuntimes,
}

impl GetPeersUseCase {
    pub fn new(tunnels: Arc<dyn TunnelRepository>, runtimes: TunnelRuntimes) -> Self {
        Self { tunnels, runtimes }
    }

    pub async fn execute(&self, name: &str) -> Result<Vec<PeerInfo>, DomainError> {
        let tunnel = self
            .tunnels
            .get(name)
            .await?
            .ok_or_else(|| DomainError::TunnelNotFound(name.to_string()))?;

        self.runtimes.for_mode(tunnel.mode()).peers(&tunnel).await
    }
}
