use async_trait::async_trait;
use vortexl2_domain::{BatchOutcome, DomainError, ForwardEntry, ForwardMode, ForwardStatus, TunnelConfig};

/// Realizes the forward set of every tunnel on the host.
///
/// `create` and `remove` receive the tunnel document being edited and update its
/// forward set in memory; persisting it is left to the caller. On error the
/// document is left as it was.
#[async_trait]
pub trait ForwardDriver: Send + Sync {
    fn mode(&self) -> ForwardMode;

    async fn create(
        &self,
        tunnel: &mut TunnelConfig,
        port: u16,
    ) -> Result<ForwardEntry, DomainError>;

    async fn remove(&self, tunnel: &mut TunnelConfig, port: u16) -> Result<(), DomainError>;

    /// Configured forwards of every tunnel, with liveness read from the host.
    async fn list_forwards(&self) -> Result<Vec<ForwardStatus>, DomainError>;

    async fn start_all(&self) -> Result<BatchOutcome, DomainError>;

    async fn stop_all(&self) -> Result<BatchOutcome, DomainError>;

    async fn validate_and_reload(&self) -> Result<String, DomainError>;
}
