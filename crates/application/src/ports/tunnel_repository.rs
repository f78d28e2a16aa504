use async_trait::async_trait;
use vortexl2_domain::{DomainError, TunnelConfig};

#[async_trait]
pub trait TunnelRepository: Send + Sync {
    /// Every stored tunnel document, sorted by name.
    async fn list(&self) -> Result<Vec<TunnelConfig>, DomainError>;

    async fn get(&self, name: &str) -> Result<Option<TunnelConfig>, DomainError>;

    async fn save(&self, tunnel: &TunnelConfig) -> Result<(), DomainError>;

    async fn delete(&self, name: &str) -> Result<(), DomainError>;

    async fn exists(&self, name: &str) -> Result<bool, DomainError> {
        Ok(self.get(name).await?.is_some())
    }
}
