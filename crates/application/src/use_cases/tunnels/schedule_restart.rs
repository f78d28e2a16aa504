use std::sync::Arc;
use tracing::{info, instrument};
use vortexl2_domain::{CronInterval, DomainError, ScheduledTask, TunnelMode};

use crate::ports::{Scheduler, TunnelRepository};
use crate::services::TunnelRuntimes;

/// Cron file name of the periodic tunnel restart
pub const TUNNEL_RESTART_TASK: &str = "vortexl2-auto-restart";

/// Periodic restart of every supervised EasyTier unit.
pub struct ScheduleTunnelRestartUseCase {
    scheduler: Arc<dyn Scheduler>,
    tunnels: Arc<dyn TunnelRepository>,
    runtimes: TunnelRuntimes,
}

impl ScheduleTunnelRestartUseCase {
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        tunnels: Arc<dyn TunnelRepository>,
        runtimes: TunnelRuntimes,
    ) -> Self {
        Self {
            scheduler,
            tunnels,
            runtimes,
        }
    }

    #[instrument(skip(self))]
    pub async fn enable(&self, minutes: u32) -> Result<(), DomainError> {
        if !(1..=1440).contains(&minutes) {
            return Err(DomainError::InvalidInterval(format!(
                "Restart interval must be 1-1440 minutes, got {}",
                minutes
            )));
        }

        let runtime = self.runtimes.for_mode(TunnelMode::Easytier);
        let units: Vec<String> = self
            .tunnels
            .list()
            .await?
            .iter()
            .filter(|t| t.mode() == TunnelMode::Easytier)
            .filter_map(|t| runtime.unit_name(t))
            .collect();

        if units.is_empty() {
            return Err(DomainError::SchedulerError(
                "No EasyTier tunnels to restart".to_string(),
            ));
        }

        let command = format!("systemctl restart {}", units.join(" "));
        let task = ScheduledTask::new(TUNNEL_RESTART_TASK, CronInterval::Minutes(minutes), command);
        self.scheduler.install(&task).await?;

        info!(minutes, units = units.len(), "Tunnel auto-restart scheduled");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn disable(&self) -> Result<(), DomainError> {
        self.scheduler.remove(TUNNEL_RESTART_TASK).await?;
        info!("Tunnel auto-restart disabled");
        Ok(())
    }

    pub async fn status(&self) -> Result<Option<CronInterval>, DomainError> {
        self.scheduler.status(TUNNEL_RESTART_TASK).await
    }
}
