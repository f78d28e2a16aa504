use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIMARY_DOMAIN: &str = "chatgpt.com";
pub const DEFAULT_SECONDARY_DOMAIN: &str = "one.one.one.one";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsScanConfig {
    /// Checked first; a failure here skips the secondary probe
    #[serde(default = "default_primary_domain")]
    pub primary_domain: String,

    #[serde(default = "default_secondary_domain")]
    pub secondary_domain: String,

    /// Per-attempt timeout in milliseconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,

    #[serde(default = "default_probe_repetitions")]
    pub probe_repetitions: u8,

    /// Concurrent candidates; 0 means one per logical core
    #[serde(default)]
    pub workers: usize,

    #[serde(default = "default_check_interval")]
    pub default_check_interval_hours: u32,
}

impl DnsScanConfig {
    pub fn validation_domains(&self) -> [&str; 2] {
        [&self.primary_domain, &self.secondary_domain]
    }

    pub fn effective_workers(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

impl Default for DnsScanConfig {
    fn default() -> Self {
        Self {
            primary_domain: default_primary_domain(),
            secondary_domain: default_secondary_domain(),
            probe_timeout_ms: default_probe_timeout(),
            probe_repetitions: default_probe_repetitions(),
            workers: 0,
            default_check_interval_hours: default_check_interval(),
        }
    }
}

fn default_primary_domain() -> String {
    DEFAULT_PRIMARY_DOMAIN.to_string()
}

fn default_secondary_domain() -> String {
    DEFAULT_SECONDARY_DOMAIN.to_string()
}

fn default_probe_timeout() -> u64 {
    2800
}

fn default_probe_repetitions() -> u8 {
    2
}

fn default_check_interval() -> u32 {
    4
}
