use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::warn;
use vortexl2_application::ports::DnsApplyMechanism;
use vortexl2_domain::DomainError;

use crate::system::CommandRunner;

/// NetworkManager: pins the DNS on the active connection and bounces it.
pub struct NetworkManagerApplier {
    runner: Arc<dyn CommandRunner>,
}

impl NetworkManagerApplier {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    async fn active_connection(&self) -> Result<String, DomainError> {
        let output = self
            .runner
            .run_ok("nmcli", &["-t", "-f", "NAME,DEVICE", "c", "show", "--active"])
            .await?;
        parse_active_connection(&output.stdout).ok_or_else(|| {
            DomainError::ServiceError("No active NetworkManager connection".to_string())
        })
    }
}

/// Name of the first connection in `nmcli -t -f NAME,DEVICE` output.
/// Terse mode escapes `:` inside names as `\:`.
pub fn parse_active_connection(output: &str) -> Option<String> {
    let line = output.lines().map(str::trim).find(|l| !l.is_empty())?;

    let mut name = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    name.push(escaped);
                }
            }
            ':' => break,
            other => name.push(other),
        }
    }

    (!name.is_empty()).then_some(name)
}

#[async_trait]
impl DnsApplyMechanism for NetworkManagerApplier {
    fn name(&self) -> &'static str {
        "NetworkManager"
    }

    async fn check_available(&self) -> Result<(), DomainError> {
        if !self.runner.exists("nmcli") {
            return Err(DomainError::ToolMissing("nmcli".to_string()));
        }
        self.active_connection().await.map(|_| ())
    }

    async fn apply(&self, address: IpAddr) -> Result<String, DomainError> {
        let connection = self.active_connection().await?;
        let dns = address.to_string();
        let (dns_key, ignore_key) = match address {
            IpAddr::V4(_) => ("ipv4.dns", "ipv4.ignore-auto-dns"),
            IpAddr::V6(_) => ("ipv6.dns", "ipv6.ignore-auto-dns"),
        };

        self.runner
            .run_ok(
                "nmcli",
                &["c", "modify", &connection, dns_key, &dns, ignore_key, "yes"],
            )
            .await?;

        for verb in ["down", "up"] {
            if let Err(e) = self.runner.run_ok("nmcli", &["c", verb, &connection]).await {
                warn!(connection = %connection, verb, error = %e, "nmcli connection bounce failed");
            }
        }

        Ok(format!(
            "Applied via NetworkManager: {} DNS={}",
            connection, dns
        ))
    }
}
