#![allow(dead_code)]
pub mod fake_inspector;
pub mod fake_runner;

pub use fake_inspector::*;
pub use fake_runner::*;

use std::net::IpAddr;
use vortexl2_domain::{TunnelConfig, TunnelMode};

pub fn forwarding_tunnel(name: &str, remote: &str, ports: &[u16]) -> TunnelConfig {
    let mut tunnel = TunnelConfig::new(TunnelMode::L2tpv3, name);
    tunnel.set_remote_target(Some(remote.parse::<IpAddr>().unwrap()));
    if let TunnelConfig::L2tpv3(t) = &mut tunnel {
        t.forwarded_ports.extend(ports.iter().copied());
    }
    tunnel
}
