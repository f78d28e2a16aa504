use async_trait::async_trait;
use vortexl2_domain::{DomainError, PeerInfo, TunnelConfig, TunnelMode};

/// Brings one kind of tunnel up and down on the host.
#[async_trait]
pub trait TunnelRuntime: Send + Sync {
    fn mode(&self) -> TunnelMode;

    /// Supervisor unit backing the tunnel, if any.
    fn unit_name(&self, tunnel: &TunnelConfig) -> Option<String>;

    /// Idempotent: an already running tunnel is set up again.
    async fn start(&self, tunnel: &TunnelConfig) -> Result<String, DomainError>;

    async fn stop(&self, tunnel: &TunnelConfig) -> Result<(), DomainError>;

    async fn restart(&self, tunnel: &TunnelConfig) -> Result<String, DomainError>;

    async fn is_running(&self, tunnel: &TunnelConfig) -> bool;

    /// Stop and remove everything installed for the tunnel.
    async fn teardown(&self, tunnel: &TunnelConfig) -> Result<(), DomainError>;

    async fn peers(&self, _tunnel: &TunnelConfig) -> Result<Vec<PeerInfo>, DomainError> {
        Ok(Vec::new())
    }
}
