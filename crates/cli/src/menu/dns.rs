use vortexl2_application::ports::{ScanEvent, ScanObserver};
use vortexl2_domain::CronInterval;

use super::prompt;
use crate::di::App;

/// Prints scan progress as results arrive.
struct ConsoleObserver;

impl ScanObserver for ConsoleObserver {
    fn on_event(&self, event: &ScanEvent) {
        match event {
            ScanEvent::Started { total } => println!("Testing {} DNS servers...", total),
            ScanEvent::Scored {
                index,
                total,
                result,
            } => println!(
                "[{}/{}] {:<24} {:<40} {:.1} ms",
                index,
                total,
                result.candidate.name,
                result.candidate.address,
                result.score
            ),
            ScanEvent::Failed {
                index,
                total,
                candidate,
            } => println!(
                "[{}/{}] {:<24} {:<40} unreachable",
                index,
                total,
                candidate.name,
                candidate.address
            ),
            ScanEvent::Finished { reachable } => println!("{} servers reachable", reachable),
        }
    }
}

pub async fn run(app: &App) -> anyhow::Result<()> {
    loop {
        prompt::heading("DNS");
        let actions = [
            "Find and apply fastest DNS",
            "Show DNS status",
            "Set auto-check interval",
            "Enable auto-check",
            "Disable auto-check",
            "Back",
        ];
        let result = match prompt::select("Select an option", &actions)? {
            0 => scan(app).await,
            1 => status(app).await,
            2 => set_interval(app).await,
            3 => enable(app).await,
            4 => disable(app).await,
            _ => return Ok(()),
        };
        if let Err(e) = result {
            prompt::failure(e);
        }
    }
}

async fn scan(app: &App) -> anyhow::Result<()> {
    if !app.adapters.probe.is_available() {
        anyhow::bail!("nslookup not found (install dnsutils or bind-utils)");
    }
    let report = app.use_cases.scan_dns.execute(&ConsoleObserver).await?;
    prompt::success(format!(
        "Best: {} ({}) at {:.1} ms, applied via {}",
        report.best.candidate.name,
        report.best.candidate.address,
        report.best.score,
        report.applied.mechanism
    ));
    if !report.applied.detail.is_empty() {
        println!("{}", report.applied.detail);
    }
    Ok(())
}

async fn status(app: &App) -> anyhow::Result<()> {
    let status = app.use_cases.dns_status.execute().await?;
    let selection = &status.selection;
    let unknown = || "-".to_string();

    println!(
        "System DNS:       {}",
        status.system_dns.clone().unwrap_or_else(unknown)
    );
    println!(
        "Selected server:  {} ({})",
        selection.current_dns_name.clone().unwrap_or_else(unknown),
        selection
            .current_dns
            .map(|ip| ip.to_string())
            .unwrap_or_else(unknown)
    );
    println!(
        "Last check:       {}",
        selection.last_check.clone().unwrap_or_else(unknown)
    );
    println!("Check interval:   {} hours", selection.check_interval_hours);
    let schedule = match status.schedule {
        Some(CronInterval::Hours(h)) => format!("enabled (every {} hours)", h),
        Some(CronInterval::Minutes(m)) => format!("enabled (every {} minutes)", m),
        None => "disabled".to_string(),
    };
    println!("Auto-check:       {}", schedule);
    Ok(())
}

async fn set_interval(app: &App) -> anyhow::Result<()> {
    let hours: u32 = prompt::parsed("Check every N hours (1-24)", Some(4))?;
    app.use_cases.schedule_dns.set_interval(hours).await?;
    prompt::success(format!("DNS check interval set to {} hours", hours));
    Ok(())
}

async fn enable(app: &App) -> anyhow::Result<()> {
    let hours = app.use_cases.schedule_dns.enable().await?;
    prompt::success(format!("DNS auto-check enabled (every {} hours)", hours));
    Ok(())
}

async fn disable(app: &App) -> anyhow::Result<()> {
    app.use_cases.schedule_dns.disable().await?;
    prompt::success("DNS auto-check disabled");
    Ok(())
}
