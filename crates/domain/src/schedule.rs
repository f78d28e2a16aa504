use serde::{Deserialize, Serialize};
use std::fmt;

/// Recurrence of a scheduled task, rendered as a cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CronInterval {
    Minutes(u32),
    Hours(u32),
}

impl CronInterval {
    pub fn cron_expression(&self) -> String {
        match self {
            Self::Minutes(m) => format!("*/{} * * * *", m),
            Self::Hours(h) => format!("0 */{} * * *", h),
        }
    }

    /// Recovers the interval from a cron line written by `cron_expression`.
    pub fn parse_cron_line(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let minute = fields.next()?;
        let hour = fields.next()?;

        if let Some(m) = minute.strip_prefix("*/") {
            return m.parse().ok().filter(|&v| v > 0).map(Self::Minutes);
        }
        if minute == "0" {
            if let Some(h) = hour.strip_prefix("*/") {
                return h.parse().ok().filter(|&v| v > 0).map(Self::Hours);
            }
        }
        None
    }
}

impl fmt::Display for CronInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minutes(m) => write!(f, "every {} minute(s)", m),
            Self::Hours(h) => write!(f, "every {} hour(s)", h),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    /// File name under the cron directory
    pub name: String,
    pub interval: CronInterval,
    pub command: String,
}

impl ScheduledTask {
    pub fn new(name: impl Into<String>, interval: CronInterval, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interval,
            command: command.into(),
        }
    }

    /// Line in `/etc/cron.d` format (runs as root).
    pub fn cron_line(&self) -> String {
        format!("{} root {}", self.interval.cron_expression(), self.command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUnit {
    pub name: String,
    pub description: String,
    pub exec_start: String,
    pub restart_on_failure: bool,
    pub restart_sec: u32,
}

impl ServiceUnit {
    pub fn new(name: impl Into<String>, description: impl Into<String>, exec_start: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            exec_start: exec_start.into(),
            restart_on_failure: true,
            restart_sec: 5,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.service", self.name)
    }

    pub fn render(&self) -> String {
        let mut unit = format!(
            "[Unit]\nDescription={}\nAfter=network-online.target\nWants=network-online.target\n\n[Service]\nType=simple\nExecStart={}\n",
            self.description, self.exec_start
        );
        if self.restart_on_failure {
            unit.push_str(&format!("Restart=on-failure\nRestartSec={}\n", self.restart_sec));
        }
        unit.push_str("\n[Install]\nWantedBy=multi-user.target\n");
        unit
    }
}
