use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForwardingConfig {
    /// Seconds between watchdog passes in the forward daemon
    #[serde(default = "default_watchdog_interval")]
    pub watchdog_interval_secs: u64,

    /// Delay before re-checking a relay listener after spawn/kill
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// Upper bound for any single external command
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            watchdog_interval_secs: default_watchdog_interval(),
            settle_delay_ms: default_settle_delay(),
            command_timeout_secs: default_command_timeout(),
        }
    }
}

fn default_watchdog_interval() -> u64 {
    30
}

fn default_settle_delay() -> u64 {
    500
}

fn default_command_timeout() -> u64 {
    10
}
