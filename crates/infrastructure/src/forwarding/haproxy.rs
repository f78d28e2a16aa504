use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::{info, instrument, warn};
use vortexl2_application::ports::{ForwardDriver, PortInspector, TunnelRepository};
use vortexl2_domain::{
    BatchOutcome, DomainError, ForwardEntry, ForwardMode, ForwardStatus, Forwardable,
    TunnelConfig,
};

use super::{collect_entries, haproxy_config, live_statuses};
use crate::system::atomic_file::{io_error, remove_if_exists, staging_path};
use crate::system::CommandRunner;

const HAPROXY_SERVICE: &str = "haproxy";

/// Proxy mode: every forward is a frontend/backend pair in one generated
/// `haproxy.cfg`. Each change re-renders the whole file, validates it with
/// `haproxy -c` and only then replaces the live config and reloads.
pub struct HaproxyDriver {
    tunnels: Arc<dyn TunnelRepository>,
    runner: Arc<dyn CommandRunner>,
    inspector: Arc<dyn PortInspector>,
    config_path: PathBuf,
}

impl HaproxyDriver {
    pub fn new(
        tunnels: Arc<dyn TunnelRepository>,
        runner: Arc<dyn CommandRunner>,
        inspector: Arc<dyn PortInspector>,
        config_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tunnels,
            runner,
            inspector,
            config_path: config_path.into(),
        }
    }

    /// Stage, validate, install. The live config is untouched on failure.
    /// Returns the frontend ports of the installed config.
    async fn install_config(&self, entries: &[ForwardEntry]) -> Result<Vec<u16>, DomainError> {
        if !self.runner.exists("haproxy") {
            return Err(DomainError::ToolMissing("haproxy".to_string()));
        }

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error("create directory", parent, e))?;
        }

        let staged = staging_path(&self.config_path);
        let rendered = haproxy_config::render(entries);
        fs::write(&staged, &rendered)
            .await
            .map_err(|e| io_error("write", &staged, e))?;

        let staged_arg = staged.to_string_lossy().into_owned();
        let check = self
            .runner
            .run("haproxy", &["-c", "-f", &staged_arg])
            .await;

        match check {
            Ok(output) if output.success() => {}
            Ok(output) => {
                remove_if_exists(&staged).await?;
                return Err(DomainError::ProxyConfigInvalid(output.diagnostic()));
            }
            Err(e) => {
                remove_if_exists(&staged).await?;
                return Err(e);
            }
        }

        fs::rename(&staged, &self.config_path)
            .await
            .map_err(|e| io_error("rename", &self.config_path, e))?;
        Ok(haproxy_config::frontend_ports(&rendered))
    }

    async fn service_active(&self) -> bool {
        self.runner
            .run("systemctl", &["is-active", "--quiet", HAPROXY_SERVICE])
            .await
            .map(|o| o.success())
            .unwrap_or(false)
    }

    /// Reload a running haproxy; start it only when asked to.
    async fn reload(&self, start_if_stopped: bool) -> Result<(), DomainError> {
        let verb = if self.service_active().await {
            "reload"
        } else if start_if_stopped {
            "start"
        } else {
            return Ok(());
        };

        self.runner
            .run_ok("systemctl", &[verb, HAPROXY_SERVICE])
            .await
            .map(|_| ())
            .map_err(|e| DomainError::ServiceError(format!("haproxy {}: {}", verb, e)))
    }

    async fn apply(
        &self,
        edited: Option<&TunnelConfig>,
        start_if_stopped: bool,
    ) -> Result<usize, DomainError> {
        let entries = collect_entries(self.tunnels.as_ref(), edited).await?;
        let frontends = self.install_config(&entries).await?;
        self.reload(start_if_stopped).await?;
        Ok(frontends.len())
    }
}

#[async_trait]
impl ForwardDriver for HaproxyDriver {
    fn mode(&self) -> ForwardMode {
        ForwardMode::Proxy
    }

    #[instrument(skip(self, tunnel), fields(tunnel = %tunnel.name()))]
    async fn create(
        &self,
        tunnel: &mut TunnelConfig,
        port: u16,
    ) -> Result<ForwardEntry, DomainError> {
        let mut edited = tunnel.clone();
        let entry = edited.add_port(port)?;

        self.apply(Some(&edited), true).await?;
        *tunnel = edited;

        info!(port, remote = %entry.remote_endpoint(), "HAProxy forward added");
        Ok(entry)
    }

    #[instrument(skip(self, tunnel), fields(tunnel = %tunnel.name()))]
    async fn remove(&self, tunnel: &mut TunnelConfig, port: u16) -> Result<(), DomainError> {
        let mut edited = tunnel.clone();
        edited.remove_port(port)?;

        self.apply(Some(&edited), false).await?;
        *tunnel = edited;

        info!(port, "HAProxy forward removed");
        Ok(())
    }

    async fn list_forwards(&self) -> Result<Vec<ForwardStatus>, DomainError> {
        let entries = collect_entries(self.tunnels.as_ref(), None).await?;
        live_statuses(self.inspector.as_ref(), entries).await
    }

    #[instrument(skip(self))]
    async fn start_all(&self) -> Result<BatchOutcome, DomainError> {
        let entries = collect_entries(self.tunnels.as_ref(), None).await?;
        let mut outcome = BatchOutcome::default();

        let result = match self.install_config(&entries).await {
            Ok(_) => self.reload(true).await,
            Err(e) => Err(e),
        };

        for entry in &entries {
            outcome.record(entry.port, result.clone());
        }
        if let Err(e) = result {
            warn!(error = %e, "HAProxy did not start");
        }
        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn stop_all(&self) -> Result<BatchOutcome, DomainError> {
        let entries = collect_entries(self.tunnels.as_ref(), None).await?;
        let mut outcome = BatchOutcome::default();

        let result = self
            .runner
            .run_ok("systemctl", &["stop", HAPROXY_SERVICE])
            .await
            .map(|_| ());

        for entry in &entries {
            outcome.record(entry.port, result.clone());
        }
        Ok(outcome)
    }

    async fn validate_and_reload(&self) -> Result<String, DomainError> {
        let count = self.apply(None, false).await?;
        Ok(format!(
            "HAProxy configuration valid, {} frontends loaded",
            count
        ))
    }
}
