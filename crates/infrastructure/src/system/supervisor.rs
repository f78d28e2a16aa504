use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use vortexl2_application::ports::ServiceSupervisor;
use vortexl2_domain::{DomainError, ServiceUnit};

use super::atomic_file::{remove_if_exists, write_atomic};
use super::CommandRunner;

/// systemd units written to `unit_dir` and driven with `systemctl`.
pub struct SystemdSupervisor {
    runner: Arc<dyn CommandRunner>,
    unit_dir: PathBuf,
}

impl SystemdSupervisor {
    pub fn new(runner: Arc<dyn CommandRunner>, unit_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            unit_dir: unit_dir.into(),
        }
    }

    fn unit_path(&self, name: &str) -> PathBuf {
        self.unit_dir.join(format!("{}.service", name))
    }

    async fn systemctl(&self, verb: &str, name: &str) -> Result<(), DomainError> {
        self.runner
            .run_ok("systemctl", &[verb, name])
            .await
            .map(|_| ())
            .map_err(|e| match e {
                DomainError::CommandFailed { command, stderr } => {
                    DomainError::ServiceError(format!("{}: {}", command, stderr))
                }
                other => other,
            })
    }

    async fn daemon_reload(&self) -> Result<(), DomainError> {
        self.runner.run_ok("systemctl", &["daemon-reload"]).await?;
        Ok(())
    }
}

#[async_trait]
impl ServiceSupervisor for SystemdSupervisor {
    async fn install(&self, unit: &ServiceUnit) -> Result<(), DomainError> {
        let path = self.unit_path(&unit.name);
        write_atomic(&path, unit.render().as_bytes(), 0o644).await?;
        self.daemon_reload().await?;
        info!(unit = %unit.name, path = %path.display(), "Service unit installed");
        Ok(())
    }

    async fn uninstall(&self, name: &str) -> Result<(), DomainError> {
        if remove_if_exists(&self.unit_path(name)).await? {
            self.daemon_reload().await?;
            info!(unit = %name, "Service unit removed");
        }
        Ok(())
    }

    async fn enable(&self, name: &str) -> Result<(), DomainError> {
        self.systemctl("enable", name).await
    }

    async fn disable(&self, name: &str) -> Result<(), DomainError> {
        self.systemctl("disable", name).await
    }

    async fn start(&self, name: &str) -> Result<(), DomainError> {
        self.systemctl("start", name).await
    }

    async fn stop(&self, name: &str) -> Result<(), DomainError> {
        self.systemctl("stop", name).await
    }

    async fn restart(&self, name: &str) -> Result<(), DomainError> {
        self.systemctl("restart", name).await
    }

    async fn is_active(&self, name: &str) -> bool {
        match self.runner.run("systemctl", &["is-active", "--quiet", name]).await {
            Ok(output) => output.success(),
            Err(e) => {
                debug!(unit = %name, error = %e, "is-active check failed");
                false
            }
        }
    }

    async fn recent_logs(&self, name: &str, lines: usize) -> Result<String, DomainError> {
        let count = lines.to_string();
        let output = self
            .runner
            .run("journalctl", &["-u", name, "-n", &count, "--no-pager"])
            .await?;

        let text = if output.stdout.trim().is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        if text.trim().is_empty() {
            return Ok("No logs available".to_string());
        }
        Ok(text)
    }
}
