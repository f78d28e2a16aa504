use async_trait::async_trait;
use std::sync::Arc;
use vortexl2_application::ports::{ListenerInfo, PortInspector};
use vortexl2_domain::DomainError;

use super::CommandRunner;

/// Listening-socket lookup through `ss -Htlnp`.
pub struct SsPortInspector {
    runner: Arc<dyn CommandRunner>,
}

impl SsPortInspector {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl PortInspector for SsPortInspector {
    async fn listener(&self, port: u16) -> Result<Option<ListenerInfo>, DomainError> {
        let filter = format!(":{}", port);
        let output = self
            .runner
            .run_ok("ss", &["-H", "-t", "-l", "-n", "-p", "sport", "=", &filter])
            .await?;
        Ok(parse_ss_listener(&output.stdout, port))
    }
}

/// First listener on `port` in `ss -Htlnp` output.
///
/// ```text
/// LISTEN 0 5 0.0.0.0:8080 0.0.0.0:* users:(("socat",pid=1234,fd=5))
/// ```
///
/// Without `users:` (no permission to see the owner) the process is `unknown`.
pub fn parse_ss_listener(output: &str, port: u16) -> Option<ListenerInfo> {
    let suffix = format!(":{}", port);

    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }
        let local = fields[3];
        if !local.ends_with(&suffix) {
            continue;
        }

        return Some(parse_users(line).unwrap_or_else(|| ListenerInfo {
            process: "unknown".to_string(),
            pid: None,
        }));
    }

    None
}

fn parse_users(line: &str) -> Option<ListenerInfo> {
    let users = &line[line.find("users:((")? + "users:((".len()..];
    let name_start = users.find('"')? + 1;
    let name_len = users[name_start..].find('"')?;
    let process = users[name_start..name_start + name_len].to_string();

    let pid = users.find("pid=").and_then(|i| {
        users[i + 4..]
            .split(|c: char| !c.is_ascii_digit())
            .next()
            .and_then(|digits| digits.parse().ok())
    });

    Some(ListenerInfo { process, pid })
}
