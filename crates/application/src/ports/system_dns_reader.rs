use async_trait::async_trait;
use vortexl2_domain::DomainError;

#[async_trait]
pub trait SystemDnsReader: Send + Sync {
    async fn current_dns(&self) -> Result<Option<String>, DomainError>;
}
