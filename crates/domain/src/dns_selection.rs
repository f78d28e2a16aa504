use serde::{Deserialize, Serialize};
use std::net::IpAddr;

pub const LAST_CHECK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_CHECK_INTERVAL_HOURS: u32 = 4;

/// Persisted result of the last successful scan plus the auto-check interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsSelection {
    #[serde(default)]
    pub current_dns: Option<IpAddr>,

    #[serde(default)]
    pub current_dns_name: Option<String>,

    #[serde(default)]
    pub last_check: Option<String>,

    #[serde(default = "default_interval")]
    pub check_interval_hours: u32,
}

impl DnsSelection {
    pub fn record_choice(&mut self, address: IpAddr, name: &str) {
        self.current_dns = Some(address);
        self.current_dns_name = Some(name.to_string());
        self.last_check = Some(chrono::Local::now().format(LAST_CHECK_FORMAT).to_string());
    }

    pub fn validate_interval(hours: u32) -> Result<(), String> {
        if !(1..=24).contains(&hours) {
            return Err(format!("Check interval must be 1-24 hours, got {}", hours));
        }
        Ok(())
    }
}

impl Default for DnsSelection {
    fn default() -> Self {
        Self {
            current_dns: None,
            current_dns_name: None,
            last_check: None,
            check_interval_hours: default_interval(),
        }
    }
}

fn default_interval() -> u32 {
    DEFAULT_CHECK_INTERVAL_HOURS
}
