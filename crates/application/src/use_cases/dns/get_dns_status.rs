use std::sync::Arc;
use tracing::warn;
use vortexl2_domain::{CronInterval, DnsSelection, DomainError};

use super::DNS_CHECK_TASK;
use crate::ports::{DnsSelectionRepository, Scheduler, SystemDnsReader};

#[derive(Debug, Clone)]
pub struct DnsStatus {
    pub system_dns: Option<String>,
    pub selection: DnsSelection,
    pub schedule: Option<CronInterval>,
}

pub struct GetDnsStatusUseCase {
    reader: Arc<dyn SystemDnsReader>,
    selection_repo: Arc<dyn DnsSelectionRepository>,
    scheduler: Arc<dyn Scheduler>,
}

impl GetDnsStatusUseCase {
    pub fn new(
        reader: Arc<dyn SystemDnsReader>,
        selection_repo: Arc<dyn DnsSelectionRepository>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            reader,
            selection_repo,
            scheduler,
        }
    }

    pub async fn execute(&self) -> Result<DnsStatus, DomainError> {
        let system_dns = match self.reader.current_dns().await {
            Ok(dns) => dns,
            Err(e) => {
                warn!(error = %e, "Failed to read system DNS");
                None
            }
        };

        Ok(DnsStatus {
            system_dns,
            selection: self.selection_repo.load().await?,
            schedule: self.scheduler.status(DNS_CHECK_TASK).await?,
        })
    }
}
