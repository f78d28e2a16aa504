use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use vortexl2_application::ports::{ServiceSupervisor, TunnelRuntime};
use vortexl2_domain::{
    DomainError, EasyTierTunnel, Forwardable, PeerInfo, ServiceUnit, TunnelConfig, TunnelMode,
};

use super::peer_table::parse_peer_table;
use crate::system::CommandRunner;

pub fn unit_name(tunnel_name: &str) -> String {
    format!("vortexl2-easytier-{}", tunnel_name)
}

/// EasyTier nodes run as one systemd unit per tunnel.
pub struct EasyTierRuntime {
    runner: Arc<dyn CommandRunner>,
    supervisor: Arc<dyn ServiceSupervisor>,
    core_binary: PathBuf,
    cli_binary: PathBuf,
}

impl EasyTierRuntime {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        supervisor: Arc<dyn ServiceSupervisor>,
        core_binary: impl Into<PathBuf>,
        cli_binary: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            supervisor,
            core_binary: core_binary.into(),
            cli_binary: cli_binary.into(),
        }
    }

    fn easytier(tunnel: &TunnelConfig) -> Result<&EasyTierTunnel, DomainError> {
        match tunnel {
            TunnelConfig::Easytier(t) => Ok(t),
            TunnelConfig::L2tpv3(t) => Err(DomainError::ConfigError(format!(
                "Tunnel '{}' is not an EasyTier tunnel",
                t.name
            ))),
        }
    }

    pub fn service_unit(&self, tunnel: &EasyTierTunnel) -> ServiceUnit {
        let mut exec_start = self.core_binary.to_string_lossy().into_owned();
        for arg in tunnel.command_args() {
            exec_start.push(' ');
            exec_start.push_str(&quote_arg(&arg));
        }

        ServiceUnit::new(
            unit_name(&tunnel.name),
            format!("VortexL2 EasyTier tunnel {}", tunnel.name),
            exec_start,
        )
    }

    /// Check the binary and the config, then (re)write the unit file.
    async fn install_unit(&self, tunnel: &TunnelConfig) -> Result<String, DomainError> {
        let easytier = Self::easytier(tunnel)?;

        let core = self.core_binary.to_string_lossy();
        if !self.runner.exists(&core) {
            return Err(DomainError::ToolMissing(core.into_owned()));
        }
        if !easytier.is_configured() {
            return Err(DomainError::TunnelNotConfigured(easytier.name.clone()));
        }

        let unit = self.service_unit(easytier);
        self.supervisor.install(&unit).await?;
        Ok(unit.name)
    }
}

/// systemd splits ExecStart on whitespace; quote anything that would break.
fn quote_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\\') {
        return arg.to_string();
    }
    format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
}

#[async_trait]
impl TunnelRuntime for EasyTierRuntime {
    fn mode(&self) -> TunnelMode {
        TunnelMode::Easytier
    }

    fn unit_name(&self, tunnel: &TunnelConfig) -> Option<String> {
        Self::easytier(tunnel).ok().map(|t| unit_name(&t.name))
    }

    #[instrument(skip(self, tunnel), fields(tunnel = %tunnel.name()))]
    async fn start(&self, tunnel: &TunnelConfig) -> Result<String, DomainError> {
        let unit = self.install_unit(tunnel).await?;

        if let Err(e) = self.supervisor.enable(&unit).await {
            warn!(unit = %unit, error = %e, "Failed to enable unit");
        }
        self.supervisor.start(&unit).await?;

        info!(unit = %unit, "EasyTier tunnel started");
        Ok(format!("EasyTier tunnel '{}' started", tunnel.name()))
    }

    async fn stop(&self, tunnel: &TunnelConfig) -> Result<(), DomainError> {
        let unit = unit_name(&Self::easytier(tunnel)?.name);

        for result in [
            self.supervisor.stop(&unit).await,
            self.supervisor.disable(&unit).await,
        ] {
            if let Err(e) = result {
                debug!(unit = %unit, error = %e, "Ignoring unit stop failure");
            }
        }
        Ok(())
    }

    #[instrument(skip(self, tunnel), fields(tunnel = %tunnel.name()))]
    async fn restart(&self, tunnel: &TunnelConfig) -> Result<String, DomainError> {
        let unit = self.install_unit(tunnel).await?;
        self.supervisor.restart(&unit).await?;

        info!(unit = %unit, "EasyTier tunnel restarted");
        Ok(format!("EasyTier tunnel '{}' restarted", tunnel.name()))
    }

    async fn is_running(&self, tunnel: &TunnelConfig) -> bool {
        match Self::easytier(tunnel) {
            Ok(t) => self.supervisor.is_active(&unit_name(&t.name)).await,
            Err(_) => false,
        }
    }

    #[instrument(skip(self, tunnel), fields(tunnel = %tunnel.name()))]
    async fn teardown(&self, tunnel: &TunnelConfig) -> Result<(), DomainError> {
        self.stop(tunnel).await?;
        self.supervisor
            .uninstall(&unit_name(&Self::easytier(tunnel)?.name))
            .await?;

        info!("EasyTier tunnel removed");
        Ok(())
    }

    async fn peers(&self, _tunnel: &TunnelConfig) -> Result<Vec<PeerInfo>, DomainError> {
        let cli = self.cli_binary.to_string_lossy();
        if !self.runner.exists(&cli) {
            return Err(DomainError::ToolMissing(cli.into_owned()));
        }

        let output = self.runner.run(&cli, &["peer"]).await?;
        if !output.success() {
            debug!(error = %output.diagnostic(), "easytier-cli peer failed");
            return Ok(Vec::new());
        }
        Ok(parse_peer_table(&output.stdout))
    }
}
