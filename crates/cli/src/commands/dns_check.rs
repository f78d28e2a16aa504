use tracing::{error, info};
use vortexl2_application::ports::NoopScanObserver;

use crate::di::App;

pub async fn dns_check(app: &App) -> anyhow::Result<bool> {
    if !app.adapters.probe.is_available() {
        error!("nslookup not found, DNS check skipped");
        return Ok(false);
    }
    match app.use_cases.scan_dns.execute(&NoopScanObserver).await {
        Ok(report) => {
            info!(
                server = %report.best.candidate.name,
                address = %report.best.candidate.address,
                score = report.best.score,
                reachable = report.reachable,
                mechanism = report.applied.mechanism,
                "DNS check complete"
            );
            Ok(true)
        }
        Err(e) => {
            error!(error = %e, "DNS check failed");
            Ok(false)
        }
    }
}
