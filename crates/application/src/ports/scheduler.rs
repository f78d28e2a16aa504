use async_trait::async_trait;
use vortexl2_domain::{CronInterval, DomainError, ScheduledTask};

#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Install or replace the task with the same name.
    async fn install(&self, task: &ScheduledTask) -> Result<(), DomainError>;

    async fn remove(&self, name: &str) -> Result<(), DomainError>;

    /// Interval of the installed task, `None` when not scheduled.
    async fn status(&self, name: &str) -> Result<Option<CronInterval>, DomainError>;
}
