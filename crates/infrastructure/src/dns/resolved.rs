use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::warn;
use vortexl2_application::ports::DnsApplyMechanism;
use vortexl2_domain::DomainError;

use crate::system::CommandRunner;

/// systemd-resolved, configured per link with `resolvectl`.
pub struct ResolvedApplier {
    runner: Arc<dyn CommandRunner>,
}

impl ResolvedApplier {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    async fn default_interface(&self) -> Result<String, DomainError> {
        let output = self
            .runner
            .run_ok("ip", &["route", "show", "default"])
            .await?;
        parse_default_interface(&output.stdout).ok_or_else(|| {
            DomainError::ServiceError("No default route to pick an interface from".to_string())
        })
    }
}

pub(crate) async fn resolved_active(runner: &dyn CommandRunner) -> bool {
    runner.exists("resolvectl")
        && runner
            .run("systemctl", &["is-active", "--quiet", "systemd-resolved"])
            .await
            .map(|o| o.success())
            .unwrap_or(false)
}

/// Device of the first `default via ... dev <iface>` route.
pub fn parse_default_interface(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("default") {
            return None;
        }
        tokens
            .skip_while(|t| *t != "dev")
            .nth(1)
            .map(str::to_string)
    })
}

#[async_trait]
impl DnsApplyMechanism for ResolvedApplier {
    fn name(&self) -> &'static str {
        "systemd-resolved"
    }

    async fn check_available(&self) -> Result<(), DomainError> {
        if !self.runner.exists("resolvectl") {
            return Err(DomainError::ToolMissing("resolvectl".to_string()));
        }
        if !resolved_active(self.runner.as_ref()).await {
            return Err(DomainError::ServiceError(
                "systemd-resolved is not active".to_string(),
            ));
        }
        Ok(())
    }

    async fn apply(&self, address: IpAddr) -> Result<String, DomainError> {
        let iface = self.default_interface().await?;
        let dns = address.to_string();

        self.runner
            .run_ok("resolvectl", &["dns", &iface, &dns])
            .await?;

        if let Err(e) = self.runner.run_ok("resolvectl", &["domain", &iface, "~."]).await {
            warn!(interface = %iface, error = %e, "Failed to route all domains to link");
        }
        if let Err(e) = self.runner.run_ok("resolvectl", &["flush-caches"]).await {
            warn!(error = %e, "Failed to flush resolver caches");
        }

        Ok(format!(
            "Applied via systemd-resolved on {}: DNS={}",
            iface, dns
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_interface() {
        let output = "default via 192.168.1.1 dev eth0 proto dhcp src 192.168.1.20 metric 100\n";
        assert_eq!(parse_default_interface(output), Some("eth0".to_string()));
    }

    #[test]
    fn test_parse_default_interface_first_route_wins() {
        let output = "default dev wg0 scope link\ndefault via 10.0.0.1 dev ens3\n";
        assert_eq!(parse_default_interface(output), Some("wg0".to_string()));
    }

    #[test]
    fn test_parse_default_interface_missing() {
        assert_eq!(parse_default_interface(""), None);
        assert_eq!(parse_default_interface("10.0.0.0/24 dev eth0 proto kernel\n"), None);
    }
}
