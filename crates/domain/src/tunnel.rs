use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::errors::DomainError;
use crate::forward::ForwardEntry;

/// Linux interface names are limited to 15 bytes
pub const MAX_INTERFACE_NAME_LEN: usize = 15;
const MAX_TUNNEL_NAME_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TunnelMode {
    #[default]
    L2tpv3,
    Easytier,
}

impl TunnelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L2tpv3 => "l2tpv3",
            Self::Easytier => "easytier",
        }
    }
}

impl fmt::Display for TunnelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TunnelMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l2tpv3" | "l2tp" => Ok(Self::L2tpv3),
            "easytier" => Ok(Self::Easytier),
            other => Err(DomainError::ConfigError(format!(
                "Unknown tunnel mode: {}",
                other
            ))),
        }
    }
}

/// Port-forward capability shared by every tunnel kind.
///
/// The default methods are the desired-state rules: they only touch the
/// in-memory document, never the live system.
pub trait Forwardable {
    fn name(&self) -> &str;
    fn forwarded_ports(&self) -> &BTreeSet<u16>;
    fn forwarded_ports_mut(&mut self) -> &mut BTreeSet<u16>;
    fn remote_target(&self) -> Option<IpAddr>;

    fn is_forwarded(&self, port: u16) -> bool {
        self.forwarded_ports().contains(&port)
    }

    fn add_port(&mut self, port: u16) -> Result<ForwardEntry, DomainError> {
        if port == 0 {
            return Err(DomainError::InvalidPort("0".to_string()));
        }
        let remote = self
            .remote_target()
            .ok_or_else(|| DomainError::RemoteTargetMissing(self.name().to_string()))?;
        if self.is_forwarded(port) {
            return Err(DomainError::AlreadyForwarded {
                tunnel: self.name().to_string(),
                port,
            });
        }
        self.forwarded_ports_mut().insert(port);
        Ok(ForwardEntry {
            port,
            tunnel: self.name().to_string(),
            remote,
        })
    }

    fn remove_port(&mut self, port: u16) -> Result<(), DomainError> {
        if !self.forwarded_ports_mut().remove(&port) {
            return Err(DomainError::NotForwarded {
                tunnel: self.name().to_string(),
                port,
            });
        }
        Ok(())
    }

    /// Empty when no remote target is configured: nothing can be realized.
    fn forward_entries(&self) -> Vec<ForwardEntry> {
        let Some(remote) = self.remote_target() else {
            return Vec::new();
        };
        self.forwarded_ports()
            .iter()
            .map(|&port| ForwardEntry {
                port,
                tunnel: self.name().to_string(),
                remote,
            })
            .collect()
    }
}

/// Static L2TPv3 tunnel (`ip l2tp`), UDP encapsulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2tpTunnel {
    pub name: String,
    #[serde(default)]
    pub local_ip: Option<IpAddr>,
    #[serde(default)]
    pub remote_ip: Option<IpAddr>,
    /// Address with prefix assigned to the L2TP interface, e.g. `10.30.30.1/30`
    #[serde(default)]
    pub interface_ip: Option<String>,
    #[serde(default = "default_l2tp_id")]
    pub tunnel_id: u32,
    #[serde(default = "default_l2tp_id")]
    pub peer_tunnel_id: u32,
    #[serde(default = "default_l2tp_id")]
    pub session_id: u32,
    #[serde(default = "default_l2tp_id")]
    pub peer_session_id: u32,
    #[serde(default = "default_l2tp_udp_port")]
    pub udp_port: u16,
    pub interface_name: String,
    #[serde(default)]
    pub forwarded_ports: BTreeSet<u16>,
    #[serde(default)]
    pub remote_forward_ip: Option<IpAddr>,
}

impl L2tpTunnel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            local_ip: None,
            remote_ip: None,
            interface_ip: None,
            tunnel_id: default_l2tp_id(),
            peer_tunnel_id: default_l2tp_id(),
            session_id: default_l2tp_id(),
            peer_session_id: default_l2tp_id(),
            udp_port: default_l2tp_udp_port(),
            interface_name: default_interface_name(name),
            forwarded_ports: BTreeSet::new(),
            remote_forward_ip: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.local_ip.is_some() && self.remote_ip.is_some() && self.interface_ip.is_some()
    }
}

impl Forwardable for L2tpTunnel {
    fn name(&self) -> &str {
        &self.name
    }

    fn forwarded_ports(&self) -> &BTreeSet<u16> {
        &self.forwarded_ports
    }

    fn forwarded_ports_mut(&mut self) -> &mut BTreeSet<u16> {
        &mut self.forwarded_ports
    }

    fn remote_target(&self) -> Option<IpAddr> {
        self.remote_forward_ip
    }
}

/// EasyTier mesh node supervised as a systemd unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EasyTierTunnel {
    pub name: String,
    #[serde(default = "default_easytier_local_ip")]
    pub local_ip: IpAddr,
    #[serde(default)]
    pub peer_ip: Option<IpAddr>,
    #[serde(default = "default_easytier_port")]
    pub port: u16,
    #[serde(default = "default_network_secret")]
    pub network_secret: String,
    pub interface_name: String,
    pub hostname: String,
    #[serde(default)]
    pub forwarded_ports: BTreeSet<u16>,
    #[serde(default)]
    pub remote_forward_ip: Option<IpAddr>,
}

/// RPC portal easytier-cli talks to
pub const EASYTIER_RPC_PORTAL: &str = "127.0.0.1:15888";

impl EasyTierTunnel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            local_ip: default_easytier_local_ip(),
            peer_ip: None,
            port: default_easytier_port(),
            network_secret: default_network_secret(),
            interface_name: default_interface_name(name),
            hostname: name.to_string(),
            forwarded_ports: BTreeSet::new(),
            remote_forward_ip: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.peer_ip.is_some()
    }

    /// Arguments after the `easytier-core` binary path.
    pub fn command_args(&self) -> Vec<String> {
        let mut args = vec![
            "-i".to_string(),
            self.local_ip.to_string(),
            "--hostname".to_string(),
            self.hostname.clone(),
            "--network-secret".to_string(),
            self.network_secret.clone(),
            "--default-protocol".to_string(),
            "tcp".to_string(),
            "--listeners".to_string(),
            format!("tcp://[::]:{}", self.port),
            format!("tcp://0.0.0.0:{}", self.port),
            "--multi-thread".to_string(),
            "--dev-name".to_string(),
            self.interface_name.clone(),
            "--rpc-portal".to_string(),
            EASYTIER_RPC_PORTAL.to_string(),
        ];

        if let Some(peer) = self.peer_ip {
            args.push("--peers".to_string());
            args.push(match peer {
                IpAddr::V4(v4) => format!("tcp://{}:{}", v4, self.port),
                IpAddr::V6(v6) => format!("tcp://[{}]:{}", v6, self.port),
            });
        }

        args
    }
}

impl Forwardable for EasyTierTunnel {
    fn name(&self) -> &str {
        &self.name
    }

    fn forwarded_ports(&self) -> &BTreeSet<u16> {
        &self.forwarded_ports
    }

    fn forwarded_ports_mut(&mut self) -> &mut BTreeSet<u16> {
        &mut self.forwarded_ports
    }

    fn remote_target(&self) -> Option<IpAddr> {
        self.remote_forward_ip
    }
}

/// One persisted tunnel document, tagged by `tunnel_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tunnel_type", rename_all = "lowercase")]
pub enum TunnelConfig {
    L2tpv3(L2tpTunnel),
    Easytier(EasyTierTunnel),
}

impl TunnelConfig {
    pub fn new(mode: TunnelMode, name: &str) -> Self {
        match mode {
            TunnelMode::L2tpv3 => Self::L2tpv3(L2tpTunnel::new(name)),
            TunnelMode::Easytier => Self::Easytier(EasyTierTunnel::new(name)),
        }
    }

    pub fn mode(&self) -> TunnelMode {
        match self {
            Self::L2tpv3(_) => TunnelMode::L2tpv3,
            Self::Easytier(_) => TunnelMode::Easytier,
        }
    }

    pub fn interface_name(&self) -> &str {
        match self {
            Self::L2tpv3(t) => &t.interface_name,
            Self::Easytier(t) => &t.interface_name,
        }
    }

    pub fn is_configured(&self) -> bool {
        match self {
            Self::L2tpv3(t) => t.is_configured(),
            Self::Easytier(t) => t.is_configured(),
        }
    }

    pub fn set_remote_target(&mut self, remote: Option<IpAddr>) {
        match self {
            Self::L2tpv3(t) => t.remote_forward_ip = remote,
            Self::Easytier(t) => t.remote_forward_ip = remote,
        }
    }

    fn inner(&self) -> &dyn Forwardable {
        match self {
            Self::L2tpv3(t) => t,
            Self::Easytier(t) => t,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Forwardable {
        match self {
            Self::L2tpv3(t) => t,
            Self::Easytier(t) => t,
        }
    }

    /// Name rules: 1-32 chars of ASCII alphanumerics, `-` or `_`.
    /// The name doubles as file stem and unit suffix.
    pub fn validate_name(name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("Tunnel name cannot be empty".to_string());
        }
        if name.len() > MAX_TUNNEL_NAME_LEN {
            return Err(format!(
                "Tunnel name cannot exceed {} characters",
                MAX_TUNNEL_NAME_LEN
            ));
        }
        let valid = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(
                "Tunnel name contains invalid characters (only alphanumeric, hyphens and underscores are allowed)"
                    .to_string(),
            );
        }
        Ok(())
    }
}

impl Forwardable for TunnelConfig {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn forwarded_ports(&self) -> &BTreeSet<u16> {
        self.inner().forwarded_ports()
    }

    fn forwarded_ports_mut(&mut self) -> &mut BTreeSet<u16> {
        self.inner_mut().forwarded_ports_mut()
    }

    fn remote_target(&self) -> Option<IpAddr> {
        self.inner().remote_target()
    }
}

fn default_interface_name(name: &str) -> String {
    name.chars().take(MAX_INTERFACE_NAME_LEN).collect()
}

fn default_l2tp_id() -> u32 {
    1000
}

fn default_l2tp_udp_port() -> u16 {
    1701
}

fn default_easytier_local_ip() -> IpAddr {
    IpAddr::from([10, 155, 155, 1])
}

fn default_easytier_port() -> u16 {
    2070
}

fn default_network_secret() -> String {
    "vortexl2".to_string()
}
