use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::errors::DomainError;

/// Mechanism realizing every port forward on the host. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ForwardMode {
    #[default]
    #[serde(rename = "none", alias = "disabled")]
    Disabled,

    /// One HAProxy frontend/backend pair per port
    #[serde(rename = "haproxy", alias = "proxy")]
    Proxy,

    /// One socat process per port
    #[serde(rename = "socat", alias = "relay")]
    Relay,
}

impl ForwardMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "none",
            Self::Proxy => "haproxy",
            Self::Relay => "socat",
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

impl fmt::Display for ForwardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForwardMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "disabled" => Ok(Self::Disabled),
            "haproxy" | "proxy" => Ok(Self::Proxy),
            "socat" | "relay" => Ok(Self::Relay),
            other => Err(DomainError::ConfigError(format!(
                "Unknown forward mode: {}",
                other
            ))),
        }
    }
}

/// A local port routed to the same port on the tunnel's remote target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardEntry {
    pub port: u16,
    pub tunnel: String,
    pub remote: IpAddr,
}

impl ForwardEntry {
    pub fn remote_endpoint(&self) -> String {
        match self.remote {
            IpAddr::V4(v4) => format!("{}:{}", v4, self.port),
            IpAddr::V6(v6) => format!("[{}]:{}", v6, self.port),
        }
    }
}

/// One row of `list_forwards`, liveness taken from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardStatus {
    pub port: u16,
    pub tunnel: String,
    pub remote: String,
    pub live: bool,
    /// `name (PID: n)` of the listening process, when known
    pub process: Option<String>,
}

impl ForwardStatus {
    pub fn status_label(&self, expected_process: &str) -> &'static str {
        match (&self.process, self.live) {
            (Some(p), true) if p.contains(expected_process) => "Active",
            (_, true) => "Active (Other)",
            (_, false) => "Stopped",
        }
    }
}

/// Result of a bulk start/stop: never aborted mid-batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failures: Vec<(u16, String)>,
}

impl BatchOutcome {
    pub fn record(&mut self, port: u16, result: Result<(), DomainError>) {
        match result {
            Ok(()) => self.succeeded += 1,
            Err(e) => self.failures.push((port, e.to_string())),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self, verb: &str) -> String {
        if self.failures.is_empty() {
            return format!("{} {} forwards", verb, self.succeeded);
        }
        let details: Vec<String> = self
            .failures
            .iter()
            .map(|(port, reason)| format!("{}: {}", port, reason))
            .collect();
        format!(
            "{} {} forwards, but errors occurred:\n{}",
            verb,
            self.succeeded,
            details.join("\n")
        )
    }
}

/// Parse `80,443,8000-8010` into ports, keeping first occurrence order.
pub fn parse_port_list(input: &str) -> Result<Vec<u16>, DomainError> {
    let mut ports: Vec<u16> = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (start, end) = match part.split_once('-') {
            Some((a, b)) => (parse_port(a)?, parse_port(b)?),
            None => {
                let p = parse_port(part)?;
                (p, p)
            }
        };

        if start > end {
            return Err(DomainError::InvalidPort(format!(
                "range {} has start greater than end",
                part
            )));
        }

        for port in start..=end {
            if !ports.contains(&port) {
                ports.push(port);
            }
        }
    }

    if ports.is_empty() {
        return Err(DomainError::InvalidPort("no ports given".to_string()));
    }

    Ok(ports)
}

fn parse_port(raw: &str) -> Result<u16, DomainError> {
    let raw = raw.trim();
    match raw.parse::<u16>() {
        Ok(0) | Err(_) => Err(DomainError::InvalidPort(format!(
            "'{}' is not a port between 1 and 65535",
            raw
        ))),
        Ok(port) => Ok(port),
    }
}
