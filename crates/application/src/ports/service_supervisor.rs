use async_trait::async_trait;
use vortexl2_domain::{DomainError, ServiceUnit};

#[async_trait]
pub trait ServiceSupervisor: Send + Sync {
    /// Write the unit file and reload the supervisor.
    async fn install(&self, unit: &ServiceUnit) -> Result<(), DomainError>;

    /// Delete the unit file. Missing files are not an error.
    async fn uninstall(&self, name: &str) -> Result<(), DomainError>;

    async fn enable(&self, name: &str) -> Result<(), DomainError>;

    async fn disable(&self, name: &str) -> Result<(), DomainError>;

    async fn start(&self, name: &str) -> Result<(), DomainError>;

    async fn stop(&self, name: &str) -> Result<(), DomainError>;

    async fn restart(&self, name: &str) -> Result<(), DomainError>;

    async fn is_active(&self, name: &str) -> bool;

    async fn recent_logs(&self, name: &str, lines: usize) -> Result<String, DomainError>;
}
