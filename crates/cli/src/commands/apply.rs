use tracing::{error, info, warn};

use crate::di::App;

/// Returns `false` when any tunnel failed to start.
pub async fn apply(app: &App) -> anyhow::Result<bool> {
    let report = app.use_cases.apply_tunnels.execute().await?;

    for (name, message) in &report.started {
        info!(tunnel = %name, "{}", message);
    }
    for name in &report.skipped {
        warn!(tunnel = %name, "Skipped: configuration incomplete");
    }
    for (name, reason) in &report.failed {
        error!(tunnel = %name, error = %reason, "Tunnel failed to start");
    }
    match &report.forwards {
        Some(outcome) if outcome.is_success() => {
            info!(started = outcome.succeeded, "Forwards started")
        }
        Some(outcome) => warn!("{}", outcome.summary("Started")),
        None => match &report.forwards_error {
            Some(reason) => error!(error = %reason, "Forwards not started"),
            None => info!("Port forwarding disabled"),
        },
    }

    println!(
        "Tunnels: {} started, {} skipped, {} failed",
        report.started.len(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(!report.has_failures())
}
