use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use vortexl2_application::ports::{ForwardDriver, PortInspector, TunnelRepository};
use vortexl2_domain::{
    BatchOutcome, DomainError, ForwardEntry, ForwardMode, ForwardStatus, Forwardable,
    TunnelConfig,
};

use super::{collect_entries, live_statuses};
use crate::system::CommandRunner;

const SOCAT: &str = "socat";
const LISTENER_PATTERN: &str = "socat TCP-LISTEN";

/// Relay mode: one detached `socat` process per forwarded port.
pub struct SocatDriver {
    tunnels: Arc<dyn TunnelRepository>,
    runner: Arc<dyn CommandRunner>,
    inspector: Arc<dyn PortInspector>,
    settle_delay: Duration,
}

impl SocatDriver {
    pub fn new(
        tunnels: Arc<dyn TunnelRepository>,
        runner: Arc<dyn CommandRunner>,
        inspector: Arc<dyn PortInspector>,
        settle_delay: Duration,
    ) -> Self {
        Self {
            tunnels,
            runner,
            inspector,
            settle_delay,
        }
    }

    fn listen_arg(port: u16) -> String {
        format!("TCP-LISTEN:{},fork,reuseaddr", port)
    }

    fn target_arg(entry: &ForwardEntry) -> String {
        match entry.remote {
            IpAddr::V4(v4) => format!("TCP:{}:{}", v4, entry.port),
            IpAddr::V6(v6) => format!("TCP6:[{}]:{}", v6, entry.port),
        }
    }

    async fn spawn_forwarder(&self, entry: &ForwardEntry) -> Result<(), DomainError> {
        if !self.runner.exists(SOCAT) {
            return Err(DomainError::ToolMissing(SOCAT.to_string()));
        }

        if let Some(owner) = self.inspector.listener(entry.port).await? {
            return Err(DomainError::PortInUse {
                port: entry.port,
                owner: Some(owner.describe()),
            });
        }

        let listen = Self::listen_arg(entry.port);
        let target = Self::target_arg(entry);
        let pid = self.runner.spawn_detached(SOCAT, &[&listen, &target]).await?;
        debug!(port = entry.port, pid, "socat spawned");

        tokio::time::sleep(self.settle_delay).await;

        if self.inspector.listener(entry.port).await?.is_none() {
            return Err(DomainError::ForwarderFailed {
                port: entry.port,
                reason: "socat exited before listening".to_string(),
            });
        }
        Ok(())
    }

    async fn running_listeners(&self) -> Result<Vec<(u32, u16)>, DomainError> {
        let output = self.runner.run("pgrep", &["-af", LISTENER_PATTERN]).await?;
        Ok(parse_pgrep(&output.stdout))
    }

    /// Kills socat listeners that no tunnel owns any more.
    async fn sweep_orphans(&self, outcome: &mut BatchOutcome) -> Result<(), DomainError> {
        let orphans = self.running_listeners().await?;
        if orphans.is_empty() {
            return Ok(());
        }
        warn!(count = orphans.len(), "Stopping socat listeners with no tunnel");

        self.runner.run("pkill", &["-f", LISTENER_PATTERN]).await?;
        tokio::time::sleep(self.settle_delay).await;

        let survivors = self.running_listeners().await?;
        for (_, port) in &orphans {
            let result = match survivors.iter().find(|(_, p)| p == port) {
                Some((pid, _)) => Err(DomainError::ForwarderFailed {
                    port: *port,
                    reason: format!("orphaned socat still running (PID: {})", pid),
                }),
                None => Ok(()),
            };
            outcome.record(*port, result);
        }
        Ok(())
    }

    async fn kill_forwarder(&self, port: u16) -> Result<(), DomainError> {
        match self.inspector.listener(port).await? {
            None => return Ok(()),
            Some(owner) if owner.process != SOCAT => {
                debug!(port, owner = %owner.describe(), "Port not held by socat, nothing to stop");
                return Ok(());
            }
            Some(_) => {}
        }

        let pattern = format!("socat TCP-LISTEN:{},", port);
        let output = self.runner.run("pkill", &["-f", &pattern]).await?;
        // 1 means no process matched
        if !matches!(output.status, Some(0) | Some(1)) {
            return Err(DomainError::ForwarderFailed {
                port,
                reason: output.diagnostic(),
            });
        }

        tokio::time::sleep(self.settle_delay).await;

        match self.inspector.listener(port).await? {
            None => Ok(()),
            Some(owner) => Err(DomainError::ForwarderFailed {
                port,
                reason: format!("port still held by {}", owner.describe()),
            }),
        }
    }
}

#[async_trait]
impl ForwardDriver for SocatDriver {
    fn mode(&self) -> ForwardMode {
        ForwardMode::Relay
    }

    #[instrument(skip(self, tunnel), fields(tunnel = %tunnel.name()))]
    async fn create(
        &self,
        tunnel: &mut TunnelConfig,
        port: u16,
    ) -> Result<ForwardEntry, DomainError> {
        let mut edited = tunnel.clone();
        let entry = edited.add_port(port)?;

        self.spawn_forwarder(&entry).await?;
        *tunnel = edited;

        info!(port, remote = %entry.remote_endpoint(), "socat forward started");
        Ok(entry)
    }

    #[instrument(skip(self, tunnel), fields(tunnel = %tunnel.name()))]
    async fn remove(&self, tunnel: &mut TunnelConfig, port: u16) -> Result<(), DomainError> {
        let mut edited = tunnel.clone();
        edited.remove_port(port)?;

        self.kill_forwarder(port).await?;
        *tunnel = edited;

        info!(port, "socat forward removed");
        Ok(())
    }

    async fn list_forwards(&self) -> Result<Vec<ForwardStatus>, DomainError> {
        let entries = collect_entries(self.tunnels.as_ref(), None).await?;
        live_statuses(self.inspector.as_ref(), entries).await
    }

    #[instrument(skip(self))]
    async fn start_all(&self) -> Result<BatchOutcome, DomainError> {
        let mut outcome = BatchOutcome::default();

        for entry in collect_entries(self.tunnels.as_ref(), None).await? {
            let result = match self.inspector.listener(entry.port).await {
                Ok(Some(owner)) if owner.process == SOCAT => {
                    debug!(port = entry.port, "socat already listening");
                    Ok(())
                }
                Ok(_) => self.spawn_forwarder(&entry).await,
                Err(e) => Err(e),
            };
            if let Err(e) = &result {
                warn!(port = entry.port, error = %e, "Failed to start socat forward");
            }
            outcome.record(entry.port, result);
        }

        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn stop_all(&self) -> Result<BatchOutcome, DomainError> {
        let mut outcome = BatchOutcome::default();

        for entry in collect_entries(self.tunnels.as_ref(), None).await? {
            let result = self.kill_forwarder(entry.port).await;
            outcome.record(entry.port, result);
        }

        self.sweep_orphans(&mut outcome).await?;
        Ok(outcome)
    }

    async fn validate_and_reload(&self) -> Result<String, DomainError> {
        Ok("Socat config valid (managed per process)".to_string())
    }
}

/// `pgrep -af` lines: `<pid> socat TCP-LISTEN:<port>,fork,reuseaddr <target>`.
fn parse_pgrep(stdout: &str) -> Vec<(u32, u16)> {
    stdout
        .lines()
        .filter_map(|line| {
            let (pid, cmd) = line.trim().split_once(' ')?;
            let rest = cmd.split_once("TCP-LISTEN:")?.1;
            let port = rest.split(|c: char| !c.is_ascii_digit()).next()?;
            Some((pid.parse().ok()?, port.parse().ok()?))
        })
        .collect()
}
