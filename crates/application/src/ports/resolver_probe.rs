use async_trait::async_trait;
use std::time::Duration;
use vortexl2_domain::DomainError;

/// A single bounded resolution attempt of `domain` against `server`.
#[async_trait]
pub trait ResolverProbe: Send + Sync {
    /// Wall time of a successful lookup. Timeouts and failed lookups are errors.
    async fn resolve(
        &self,
        domain: &str,
        server: &str,
        timeout: Duration,
    ) -> Result<Duration, DomainError>;
}
