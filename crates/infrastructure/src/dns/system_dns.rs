use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use vortexl2_application::ports::SystemDnsReader;
use vortexl2_domain::DomainError;

use super::resolved::resolved_active;
use crate::system::atomic_file::read_optional;
use crate::system::CommandRunner;

/// Reads the DNS server currently in use on the host.
pub struct HostDnsReader {
    runner: Arc<dyn CommandRunner>,
    resolv_conf: PathBuf,
}

impl HostDnsReader {
    pub fn new(runner: Arc<dyn CommandRunner>, resolv_conf: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            resolv_conf: resolv_conf.into(),
        }
    }
}

/// Address from the first `Current DNS Server:` or `DNS Servers:` line.
pub fn parse_resolvectl_status(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        let key = key.trim();
        if key != "Current DNS Server" && key != "DNS Servers" {
            return None;
        }
        value.split_whitespace().next().map(str::to_string)
    })
}

/// First `nameserver` entry of a resolv.conf file.
pub fn parse_resolv_conf(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        (tokens.next() == Some("nameserver"))
            .then(|| tokens.next().map(str::to_string))
            .flatten()
    })
}

#[async_trait]
impl SystemDnsReader for HostDnsReader {
    async fn current_dns(&self) -> Result<Option<String>, DomainError> {
        if resolved_active(self.runner.as_ref()).await {
            let output = self.runner.run("resolvectl", &["status"]).await?;
            if let Some(dns) = parse_resolvectl_status(&output.stdout) {
                return Ok(Some(dns));
            }
        }

        Ok(read_optional(&self.resolv_conf)
            .await?
            .as_deref()
            .and_then(parse_resolv_conf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolvectl_status() {
        let output = "Global\n       Protocols: +LLMNR\nLink 2 (eth0)\n  Current DNS Server: 1.1.1.1\n         DNS Servers: 1.1.1.1 8.8.8.8\n";
        assert_eq!(parse_resolvectl_status(output), Some("1.1.1.1".to_string()));
    }

    #[test]
    fn test_parse_resolvectl_status_ipv6() {
        let output = "Link 2 (eth0)\n  DNS Servers: 2606:4700:4700::1111\n";
        assert_eq!(
            parse_resolvectl_status(output),
            Some("2606:4700:4700::1111".to_string())
        );
    }

    #[test]
    fn test_parse_resolv_conf() {
        let content = "# generated\nsearch lan\nnameserver 9.9.9.9\nnameserver 1.1.1.1\n";
        assert_eq!(parse_resolv_conf(content), Some("9.9.9.9".to_string()));
        assert_eq!(parse_resolv_conf("search lan\n"), None);
    }
}
