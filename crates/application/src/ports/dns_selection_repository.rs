use async_trait::async_trait;
use vortexl2_domain::{DnsSelection, DomainError};

#[async_trait]
pub trait DnsSelectionRepository: Send + Sync {
    /// Defaults when nothing has been persisted yet.
    async fn load(&self) -> Result<DnsSelection, DomainError>;

    async fn save(&self, selection: &DnsSelection) -> Result<(), DomainError>;
}
