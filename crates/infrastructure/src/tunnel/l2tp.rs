use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use vortexl2_application::ports::TunnelRuntime;
use vortexl2_domain::{DomainError, Forwardable, L2tpTunnel, TunnelConfig, TunnelMode};

use crate::system::CommandRunner;

const KERNEL_MODULES: &[&str] = &["l2tp_core", "l2tp_netlink", "l2tp_eth"];

/// Static L2TPv3 tunnels set up directly with `ip l2tp`. Nothing is
/// supervised; `vortexl2 apply` recreates them after a reboot.
pub struct L2tpRuntime {
    runner: Arc<dyn CommandRunner>,
}

impl L2tpRuntime {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn l2tp(tunnel: &TunnelConfig) -> Result<&L2tpTunnel, DomainError> {
        match tunnel {
            TunnelConfig::L2tpv3(t) => Ok(t),
            TunnelConfig::Easytier(t) => Err(DomainError::ConfigError(format!(
                "Tunnel '{}' is not an L2TPv3 tunnel",
                t.name
            ))),
        }
    }

    async fn ip(&self, args: &[&str]) -> Result<(), DomainError> {
        self.runner.run_ok("ip", args).await.map(|_| ())
    }

    /// Delete session and tunnel; either may already be gone.
    async fn delete(&self, t: &L2tpTunnel) {
        let tunnel_id = t.tunnel_id.to_string();
        let session_id = t.session_id.to_string();

        let steps: [&[&str]; 2] = [
            &["l2tp", "del", "session", "tunnel_id", &tunnel_id, "session_id", &session_id],
            &["l2tp", "del", "tunnel", "tunnel_id", &tunnel_id],
        ];
        for args in steps {
            if let Err(e) = self.ip(args).await {
                debug!(tunnel = %t.name, error = %e, "Ignoring l2tp delete failure");
            }
        }
    }

    async fn bring_up(&self, t: &L2tpTunnel) -> Result<(), DomainError> {
        let (Some(local), Some(remote), Some(address)) =
            (t.local_ip, t.remote_ip, t.interface_ip.as_deref())
        else {
            return Err(DomainError::TunnelNotConfigured(t.name.clone()));
        };

        for &module in KERNEL_MODULES {
            if let Err(e) = self.runner.run_ok("modprobe", &[module]).await {
                debug!(module, error = %e, "modprobe failed");
            }
        }

        self.delete(t).await;

        let tunnel_id = t.tunnel_id.to_string();
        let peer_tunnel_id = t.peer_tunnel_id.to_string();
        let session_id = t.session_id.to_string();
        let peer_session_id = t.peer_session_id.to_string();
        let udp_port = t.udp_port.to_string();
        let local = local.to_string();
        let remote = remote.to_string();

        self.ip(&[
            "l2tp", "add", "tunnel",
            "tunnel_id", &tunnel_id,
            "peer_tunnel_id", &peer_tunnel_id,
            "encap", "udp",
            "local", &local,
            "remote", &remote,
            "udp_sport", &udp_port,
            "udp_dport", &udp_port,
        ])
        .await?;

        self.ip(&[
            "l2tp", "add", "session",
            "name", &t.interface_name,
            "tunnel_id", &tunnel_id,
            "session_id", &session_id,
            "peer_session_id", &peer_session_id,
        ])
        .await?;

        self.ip(&["link", "set", &t.interface_name, "up"]).await?;

        // A leftover address from a previous run is fine
        if let Err(e) = self
            .ip(&["addr", "add", address, "dev", &t.interface_name])
            .await
        {
            warn!(interface = %t.interface_name, error = %e, "Failed to assign interface address");
        }

        Ok(())
    }
}

#[async_trait]
impl TunnelRuntime for L2tpRuntime {
    fn mode(&self) -> TunnelMode {
        TunnelMode::L2tpv3
    }

    fn unit_name(&self, _tunnel: &TunnelConfig) -> Option<String> {
        None
    }

    #[instrument(skip(self, tunnel), fields(tunnel = %tunnel.name()))]
    async fn start(&self, tunnel: &TunnelConfig) -> Result<String, DomainError> {
        let t = Self::l2tp(tunnel)?;
        self.bring_up(t).await?;

        info!(interface = %t.interface_name, "L2TPv3 tunnel up");
        Ok(format!(
            "L2TPv3 tunnel '{}' up on {}",
            t.name, t.interface_name
        ))
    }

    async fn stop(&self, tunnel: &TunnelConfig) -> Result<(), DomainError> {
        let t = Self::l2tp(tunnel)?;
        self.delete(t).await;
        Ok(())
    }

    async fn restart(&self, tunnel: &TunnelConfig) -> Result<String, DomainError> {
        self.start(tunnel).await
    }

    async fn is_running(&self, tunnel: &TunnelConfig) -> bool {
        match Self::l2tp(tunnel) {
            Ok(t) => self
                .runner
                .run("ip", &["link", "show", &t.interface_name])
                .await
                .map(|o| o.success())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    #[instrument(skip(self, tunnel), fields(tunnel = %tunnel.name()))]
    async fn teardown(&self, tunnel: &TunnelConfig) -> Result<(), DomainError> {
        self.stop(tunnel).await?;
        info!("L2TPv3 tunnel removed");
        Ok(())
    }
}
