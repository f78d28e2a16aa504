use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;
use vortexl2_application::ports::Scheduler;
use vortexl2_domain::{CronInterval, DomainError, ScheduledTask};

use super::atomic_file::{read_optional, remove_if_exists, write_atomic};

const CRON_HEADER: &str = "SHELL=/bin/bash\nPATH=/usr/local/sbin:/usr/local/bin:/sbin:/bin:/usr/sbin:/usr/bin\n";

/// One file per task under `/etc/cron.d`.
pub struct CronScheduler {
    cron_dir: PathBuf,
}

impl CronScheduler {
    pub fn new(cron_dir: impl Into<PathBuf>) -> Self {
        Self {
            cron_dir: cron_dir.into(),
        }
    }

    pub fn render(task: &ScheduledTask) -> String {
        format!(
            "# Managed by vortexl2: {}\n{}{}\n",
            task.name,
            CRON_HEADER,
            task.cron_line()
        )
    }

    /// Interval of the first schedule line, skipping comments and variables.
    pub fn parse_interval(content: &str) -> Option<CronInterval> {
        content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .filter(|l| !l.split_whitespace().next().is_some_and(|f| f.contains('=')))
            .find_map(CronInterval::parse_cron_line)
    }
}

#[async_trait]
impl Scheduler for CronScheduler {
    async fn install(&self, task: &ScheduledTask) -> Result<(), DomainError> {
        let path = self.cron_dir.join(&task.name);
        write_atomic(&path, Self::render(task).as_bytes(), 0o644)
            .await
            .map_err(|e| DomainError::SchedulerError(e.to_string()))?;
        info!(task = %task.name, interval = %task.interval, "Cron task installed");
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), DomainError> {
        remove_if_exists(&self.cron_dir.join(name))
            .await
            .map_err(|e| DomainError::SchedulerError(e.to_string()))?;
        Ok(())
    }

    async fn status(&self, name: &str) -> Result<Option<CronInterval>, DomainError> {
        let content = read_optional(&self.cron_dir.join(name)).await?;
        Ok(content.as_deref().and_then(Self::parse_interval))
    }
}
