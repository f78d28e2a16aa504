use std::net::IpAddr;
use vortexl2_domain::{parse_port_list, ForwardMode, ForwardStatus};

use super::{prompt, tunnels};
use crate::di::App;

const ACTIONS: &[&str] = &[
    "Add forwards",
    "Remove forwards",
    "List forwards",
    "Start all forwards",
    "Stop all forwards",
    "Restart all forwards",
    "Validate and reload",
    "Switch forward mode",
    "Set remote forward IP",
    "Back",
];

pub async fn run(app: &App) -> anyhow::Result<()> {
    loop {
        let mode = super::forward_mode(app.adapters.state.as_ref()).await;
        prompt::heading(&format!("Port forwards ({})", mode));

        let result = match prompt::select("Select an option", ACTIONS)? {
            0 => add(app).await,
            1 => remove(app).await,
            2 => list(app, mode).await,
            3 => start_all(app).await,
            4 => stop_all(app).await,
            5 => restart_all(app).await,
            6 => validate(app).await,
            7 => switch_mode(app, mode).await,
            8 => set_remote(app).await,
            _ => return Ok(()),
        };

        if let Err(e) = result {
            prompt::failure(e);
        }
    }
}

fn read_ports(prompt_text: &str) -> anyhow::Result<Vec<u16>> {
    loop {
        let raw = prompt::text(prompt_text)?;
        match parse_port_list(&raw) {
            Ok(ports) => return Ok(ports),
            Err(e) => prompt::failure(e),
        }
    }
}

async fn add(app: &App) -> anyhow::Result<()> {
    let Some(name) = tunnels::pick(app, "Tunnel").await? else {
        return Ok(());
    };
    let ports = read_ports("Ports to forward (e.g. 80,443,8000-8010)")?;
    let outcome = app.use_cases.add_forwards.execute(&name, &ports).await?;
    prompt::outcome("Created", &outcome);
    Ok(())
}

async fn remove(app: &App) -> anyhow::Result<()> {
    let Some(name) = tunnels::pick(app, "Tunnel").await? else {
        return Ok(());
    };
    let current = app.use_cases.list_forwards.execute_for(&name).await?;
    if current.is_empty() {
        prompt::failure(format!("Tunnel '{}' has no forwards", name));
        return Ok(());
    }
    let listed: Vec<String> = current.iter().map(|f| f.port.to_string()).collect();
    println!("Forwarded ports: {}", listed.join(", "));

    let ports = read_ports("Ports to remove")?;
    let outcome = app.use_cases.remove_forwards.execute(&name, &ports).await?;
    prompt::outcome("Removed", &outcome);
    Ok(())
}

async fn list(app: &App, mode: ForwardMode) -> anyhow::Result<()> {
    let rows = app.use_cases.list_forwards.execute().await?;
    if rows.is_empty() {
        println!("No forwards configured");
        return Ok(());
    }
    println!("{:<8} {:<20} {:<24} {}", "PORT", "TUNNEL", "REMOTE", "STATUS");
    for row in &rows {
        print_row(row, mode);
    }
    Ok(())
}

fn print_row(row: &ForwardStatus, mode: ForwardMode) {
    let status = match (&row.process, mode.is_enabled()) {
        (_, false) => "Disabled".to_string(),
        (Some(process), true) if row.live => {
            format!("{} ({})", row.status_label(mode.as_str()), process)
        }
        (_, true) => row.status_label(mode.as_str()).to_string(),
    };
    println!(
        "{:<8} {:<20} {:<24} {}",
        row.port, row.tunnel, row.remote, status
    );
}

async fn start_all(app: &App) -> anyhow::Result<()> {
    let outcome = app.use_cases.start_forwards.start_all().await?;
    prompt::outcome("Started", &outcome);
    Ok(())
}

async fn stop_all(app: &App) -> anyhow::Result<()> {
    let outcome = app.use_cases.start_forwards.stop_all().await?;
    prompt::outcome("Stopped", &outcome);
    Ok(())
}

async fn restart_all(app: &App) -> anyhow::Result<()> {
    let stopped = app.use_cases.start_forwards.stop_all().await?;
    if !stopped.is_success() {
        prompt::outcome("Stopped", &stopped);
    }
    start_all(app).await
}

async fn validate(app: &App) -> anyhow::Result<()> {
    let message = app.use_cases.reload_forwards.execute().await?;
    prompt::success(message);
    Ok(())
}

async fn switch_mode(app: &App, current: ForwardMode) -> anyhow::Result<()> {
    let modes = [ForwardMode::Disabled, ForwardMode::Proxy, ForwardMode::Relay];
    let labels = [
        "none (disable forwarding)",
        "haproxy (one proxy for every port)",
        "socat (one relay process per port)",
    ];
    let target = modes[prompt::select("Forward mode", &labels)?];
    if target == current {
        prompt::success(format!("Forward mode is already {}", current));
        return Ok(());
    }

    let start_new = target.is_enabled()
        && prompt::confirm(&format!("Start every forward with {} now?", target), true)?;

    match app
        .use_cases
        .switch_forward_mode
        .execute(target, start_new)
        .await?
    {
        Some(outcome) => prompt::outcome("Started", &outcome),
        None => prompt::success(format!("Forward mode set to {}", target)),
    }
    Ok(())
}

async fn set_remote(app: &App) -> anyhow::Result<()> {
    let Some(name) = tunnels::pick(app, "Tunnel").await? else {
        return Ok(());
    };
    let remote: IpAddr = prompt::parsed("Remote forward IP", None)?;
    match app.use_cases.set_remote_target.execute(&name, remote).await? {
        Some(outcome) => prompt::outcome("Restarted", &outcome),
        None => prompt::success(format!("Remote forward IP of '{}' is {}", name, remote)),
    }
    Ok(())
}
