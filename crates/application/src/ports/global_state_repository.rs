use async_trait::async_trait;
use vortexl2_domain::{DomainError, ForwardMode, TunnelMode};

/// Process-wide settings shared by every tunnel.
#[async_trait]
pub trait GlobalStateRepository: Send + Sync {
    async fn forward_mode(&self) -> Result<ForwardMode, DomainError>;

    async fn set_forward_mode(&self, mode: ForwardMode) -> Result<(), DomainError>;

    async fn tunnel_mode(&self) -> Result<TunnelMode, DomainError>;

    async fn set_tunnel_mode(&self, mode: TunnelMode) -> Result<(), DomainError>;
}
