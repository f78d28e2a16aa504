use async_trait::async_trait;
use std::net::IpAddr;
use vortexl2_domain::DomainError;

/// One way of committing a DNS server to the host resolver.
#[async_trait]
pub trait DnsApplyMechanism: Send + Sync {
    fn name(&self) -> &'static str;

    /// Precondition check (tool installed, service active, connection present).
    async fn check_available(&self) -> Result<(), DomainError>;

    /// Returns a short human readable description of what was changed.
    async fn apply(&self, address: IpAddr) -> Result<String, DomainError>;
}
