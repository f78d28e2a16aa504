use std::sync::Arc;
use tracing::{info, instrument};
use vortexl2_domain::{DomainError, Forwardable, TunnelConfig};

use crate::ports::TunnelRepository;
use crate::services::TunnelRuntimes;

/// Starts a new tunnel and persists it only once it came up.
pub struct CreateTunnelUseCase {
    tunnels: Arc<dyn TunnelRepository>,
    runtimes: TunnelRuntimes,
}

impl CreateTunnelUseCase {
    pub fn new(tunnels: Arc<dyn TunnelRepository>, runtimes: TunnelRuntimes) -> Self {
        Self { tunnels, runtimes }
    }

    #[instrument(skip(self, tunnel), fields(tunnel = %tunnel.name()))]
    pub async fn execute(&self, tunnel: TunnelConfig) -> Result<String, DomainError> {
        TunnelConfig::validate_name(tunnel.name()).map_err(DomainError::InvalidTunnelName)?;

        if self.tunnels.exists(tunnel.name()).await? {
            return Err(DomainError::TunnelAlreadyExists(tunnel.name().to_string()));
        }
        if !tunnel.is_configured() {
            return Err(DomainError::TunnelNotConfigured(tunnel.name().to_string()));
        }

        let runtime = self.runtimes.for_mode(tunnel.mode());
        let message = runtime.start(&tunnel).await?;
        self.tunnels.save(&tunnel).await?;

        info!(mode = %tunnel.mode(), interface = %tunnel.interface_name(), "Tunnel created");
        Ok(message)
    }
}
