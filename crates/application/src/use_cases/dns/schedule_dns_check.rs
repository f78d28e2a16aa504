use std::sync::Arc;
use tracing::{info, instrument};
use vortexl2_domain::{CronInterval, DnsSelection, DomainError, ScheduledTask};

use crate::ports::{DnsSelectionRepository, Scheduler};

/// Cron file name of the periodic DNS check
pub const DNS_CHECK_TASK: &str = "vortexl2-dns";

pub struct ScheduleDnsCheckUseCase {
    scheduler: Arc<dyn Scheduler>,
    selection_repo: Arc<dyn DnsSelectionRepository>,
    command: String,
}

impl ScheduleDnsCheckUseCase {
    /// `binary` is the path of this program; the task runs `<binary> dns-check`.
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        selection_repo: Arc<dyn DnsSelectionRepository>,
        binary: &str,
    ) -> Self {
        Self {
            scheduler,
            selection_repo,
            command: format!("{} dns-check", binary),
        }
    }

    /// Persist a new interval and reinstall the task with it.
    #[instrument(skip(self))]
    pub async fn set_interval(&self, hours: u32) -> Result<(), DomainError> {
        DnsSelection::validate_interval(hours).map_err(DomainError::InvalidInterval)?;

        let mut selection = self.selection_repo.load().await?;
        selection.check_interval_hours = hours;
        self.selection_repo.save(&selection).await?;

        self.install(hours).await
    }

    /// Install the task with the stored interval.
    #[instrument(skip(self))]
    pub async fn enable(&self) -> Result<u32, DomainError> {
        let hours = self.selection_repo.load().await?.check_interval_hours;
        DnsSelection::validate_interval(hours).map_err(DomainError::InvalidInterval)?;
        self.install(hours).await?;
        Ok(hours)
    }

    #[instrument(skip(self))]
    pub async fn disable(&self) -> Result<(), DomainError> {
        self.scheduler.remove(DNS_CHECK_TASK).await?;
        info!("DNS auto-check disabled");
        Ok(())
    }

    async fn install(&self, hours: u32) -> Result<(), DomainError> {
        let task = ScheduledTask::new(DNS_CHECK_TASK, CronInterval::Hours(hours), &self.command);
        self.scheduler.install(&task).await?;
        info!(hours, "DNS auto-check scheduled");
        Ok(())
    }
}
