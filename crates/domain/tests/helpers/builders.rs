#![allow(dead_code)]
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;
use vortexl2_domain::{
    CandidateServer, EasyTierTunnel, L2tpTunnel, ScoreResult, TunnelConfig,
};

pub fn candidate(name: &str, address: &str) -> CandidateServer {
    CandidateServer::new(name, address)
}

pub fn score(name: &str, address: &str, value: f64) -> ScoreResult {
    ScoreResult {
        candidate: candidate(name, address),
        score: value,
        latencies_ms: vec![(Arc::from("chatgpt.com"), value)],
    }
}

pub struct TunnelBuilder {
    name: String,
    easytier: bool,
    remote: Option<IpAddr>,
    ports: BTreeSet<u16>,
    configured: bool,
}

impl TunnelBuilder {
    pub fn l2tp(name: &str) -> Self {
        Self {
            name: name.to_string(),
            easytier: false,
            remote: None,
            ports: BTreeSet::new(),
            configured: true,
        }
    }

    pub fn easytier(name: &str) -> Self {
        Self {
            easytier: true,
            ..Self::l2tp(name)
        }
    }

    pub fn remote(mut self, ip: &str) -> Self {
        self.remote = ip.parse().ok();
        self
    }

    pub fn ports(mut self, ports: &[u16]) -> Self {
        self.ports = ports.iter().copied().collect();
        self
    }

    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn build(self) -> TunnelConfig {
        if self.easytier {
            let mut t = EasyTierTunnel::new(&self.name);
            if self.configured {
                t.peer_ip = "203.0.113.20".parse().ok();
            }
            t.remote_forward_ip = self.remote;
            t.forwarded_ports = self.ports;
            TunnelConfig::Easytier(t)
        } else {
            let mut t = L2tpTunnel::new(&self.name);
            if self.configured {
                t.local_ip = "198.51.100.1".parse().ok();
                t.remote_ip = "203.0.113.10".parse().ok();
                t.interface_ip = Some("10.30.30.1/30".to_string());
            }
            t.remote_forward_ip = self.remote;
            t.forwarded_ports = self.ports;
            TunnelConfig::L2tpv3(t)
        }
    }
}
