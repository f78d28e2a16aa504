use vortexl2_application::ports::ServiceSupervisor;
use vortexl2_application::use_cases::FORWARD_DAEMON_UNIT;
use vortexl2_domain::{Forwardable, TunnelMode};
use vortexl2_infrastructure::tunnel::easytier::unit_name;

use super::prompt;
use crate::di::App;

const LOG_LINES: usize = 20;

pub async fn run(app: &App, mode: TunnelMode) -> anyhow::Result<()> {
    let mut units: Vec<String> = Vec::new();
    if mode == TunnelMode::Easytier {
        for summary in app.use_cases.list_tunnels.execute().await? {
            units.push(unit_name(summary.config.name()));
        }
    }
    units.push(FORWARD_DAEMON_UNIT.to_string());
    units.push("haproxy".to_string());

    let mut labels: Vec<&str> = units.iter().map(String::as_str).collect();
    labels.push("Back");
    let index = prompt::select("Service", &labels)?;
    let Some(unit) = units.get(index) else {
        return Ok(());
    };

    let logs = app.adapters.supervisor.recent_logs(unit, LOG_LINES).await?;
    prompt::heading(&format!("journalctl -u {} -n {}", unit, LOG_LINES));
    println!("{}", logs);
    Ok(())
}
