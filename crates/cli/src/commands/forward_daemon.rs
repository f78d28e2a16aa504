use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use vortexl2_jobs::{ForwardWatchdogJob, JobRunner};

use crate::di::App;

pub async fn forward_daemon(app: &App) -> anyhow::Result<()> {
    let outcome = app.use_cases.start_forwards.start_all().await?;
    if outcome.is_success() {
        info!(started = outcome.succeeded, "Initial forwards started");
    } else {
        warn!("{}", outcome.summary("Started"));
    }

    let shutdown = CancellationToken::new();
    let watchdog = ForwardWatchdogJob::new(
        app.use_cases.list_forwards.clone(),
        app.use_cases.start_forwards.clone(),
    )
    .with_interval(app.config.forwarding.watchdog_interval_secs);

    JobRunner::new()
        .with_forward_watchdog(watchdog)
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Interrupt received"),
        _ = terminate.recv() => info!("SIGTERM received"),
    }

    shutdown.cancel();
    // Give the watchdog a moment to observe cancellation
    tokio::time::sleep(Duration::from_millis(100)).await;
    info!("Forward daemon stopped");
    Ok(())
}
