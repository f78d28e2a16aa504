use std::net::IpAddr;
use vortexl2_domain::{CronInterval, Forwardable, PeerInfo, TunnelConfig, TunnelMode};

use super::prompt;
use crate::di::App;

/// Picks one tunnel of the current mode, `None` when there are none.
pub(super) async fn pick(app: &App, purpose: &str) -> anyhow::Result<Option<String>> {
    let summaries = app.use_cases.list_tunnels.execute().await?;
    if summaries.is_empty() {
        prompt::failure("No tunnels configured");
        return Ok(None);
    }
    let names: Vec<&str> = summaries.iter().map(|s| s.config.name()).collect();
    let index = prompt::select(purpose, &names)?;
    Ok(Some(names[index].to_string()))
}

pub async fn create(app: &App, mode: TunnelMode) -> anyhow::Result<()> {
    prompt::heading(&format!("Create {} tunnel", mode));

    let name = loop {
        let name = prompt::text("Tunnel name")?;
        match TunnelConfig::validate_name(&name) {
            Ok(()) => break name,
            Err(reason) => prompt::failure(reason),
        }
    };

    let mut tunnel = TunnelConfig::new(mode, &name);
    match &mut tunnel {
        TunnelConfig::L2tpv3(t) => {
            t.local_ip = Some(prompt::parsed::<IpAddr>("Local public IP", None)?);
            t.remote_ip = Some(prompt::parsed::<IpAddr>("Remote public IP", None)?);
            t.interface_ip = Some(prompt::text("Interface address (e.g. 10.30.30.1/30)")?);
            t.tunnel_id = prompt::parsed("Tunnel ID", Some(t.tunnel_id))?;
            t.peer_tunnel_id = prompt::parsed("Peer tunnel ID", Some(t.peer_tunnel_id))?;
            t.session_id = prompt::parsed("Session ID", Some(t.session_id))?;
            t.peer_session_id = prompt::parsed("Peer session ID", Some(t.peer_session_id))?;
            t.udp_port = prompt::parsed("UDP port", Some(t.udp_port))?;
        }
        TunnelConfig::Easytier(t) => {
            t.local_ip = prompt::parsed("Overlay IP of this node", Some(t.local_ip))?;
            t.peer_ip = Some(prompt::parsed::<IpAddr>("Peer public IP", None)?);
            t.port = prompt::parsed("Listen port", Some(t.port))?;
            t.network_secret = prompt::parsed("Network secret", Some(t.network_secret.clone()))?;
        }
    }

    let remote = prompt::optional_parsed::<IpAddr>("Remote forward IP (blank to skip)")?;
    tunnel.set_remote_target(remote);

    let message = app.use_cases.create_tunnel.execute(tunnel).await?;
    prompt::success(message);
    Ok(())
}

pub async fn delete(app: &App) -> anyhow::Result<()> {
    let Some(name) = pick(app, "Tunnel to delete").await? else {
        return Ok(());
    };
    let question = format!("Delete tunnel '{}' and all of its forwards?", name);
    if !prompt::confirm(&question, false)? {
        return Ok(());
    }
    app.use_cases.delete_tunnel.execute(&name).await?;
    prompt::success(format!("Tunnel '{}' deleted", name));
    Ok(())
}

pub async fn list(app: &App) -> anyhow::Result<()> {
    let summaries = app.use_cases.list_tunnels.execute().await?;
    prompt::heading("Tunnels");
    if summaries.is_empty() {
        println!("No tunnels configured");
        return Ok(());
    }

    println!(
        "{:<20} {:<10} {:<16} {:<10} {:<18} {}",
        "NAME", "TYPE", "INTERFACE", "STATUS", "REMOTE", "PORTS"
    );
    for summary in &summaries {
        let config = &summary.config;
        let status = match (summary.running, config.is_configured()) {
            (true, _) => "running",
            (false, true) => "stopped",
            (false, false) => "incomplete",
        };
        let remote = config
            .remote_target()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<20} {:<10} {:<16} {:<10} {:<18} {}",
            config.name(),
            config.mode(),
            config.interface_name(),
            status,
            remote,
            config.forwarded_ports().len()
        );
    }
    Ok(())
}

pub async fn restart(app: &App) -> anyhow::Result<()> {
    let Some(name) = pick(app, "Tunnel to restart").await? else {
        return Ok(());
    };
    let message = app.use_cases.restart_tunnel.execute(&name).await?;
    prompt::success(message);
    Ok(())
}

pub async fn peers(app: &App) -> anyhow::Result<()> {
    let Some(name) = pick(app, "Tunnel").await? else {
        return Ok(());
    };
    let peers = app.use_cases.get_peers.execute(&name).await?;
    prompt::heading(&format!("Peers of {}", name));
    if peers.is_empty() {
        println!("No peers reported");
        return Ok(());
    }

    println!(
        "{:<16} {:<20} {:<8} {:<10} {:<8} {:<10} {:<10} {:<8} {}",
        "IPV4", "HOSTNAME", "COST", "LAT(MS)", "LOSS", "RX", "TX", "TUNNEL", "NAT"
    );
    for peer in &peers {
        print_peer(peer);
    }
    Ok(())
}

fn print_peer(peer: &PeerInfo) {
    let cell = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    println!(
        "{:<16} {:<20} {:<8} {:<10} {:<8} {:<10} {:<10} {:<8} {}",
        cell(&peer.ipv4),
        cell(&peer.hostname),
        cell(&peer.cost),
        cell(&peer.latency_ms),
        cell(&peer.loss),
        cell(&peer.rx),
        cell(&peer.tx),
        cell(&peer.tunnel_type),
        cell(&peer.nat_type)
    );
}

pub async fn auto_restart(app: &App) -> anyhow::Result<()> {
    let status = app.use_cases.schedule_restart.status().await?;
    prompt::heading("Tunnel auto-restart");
    match status {
        Some(CronInterval::Minutes(m)) => println!("Enabled: every {} minutes", m),
        Some(CronInterval::Hours(h)) => println!("Enabled: every {} hours", h),
        None => println!("Disabled"),
    }

    match prompt::select("Action", &["Enable / change interval", "Disable", "Back"])? {
        0 => {
            let minutes: u32 = prompt::parsed("Restart every N minutes", Some(30))?;
            app.use_cases.schedule_restart.enable(minutes).await?;
            prompt::success(format!("Tunnels restart every {} minutes", minutes));
        }
        1 => {
            app.use_cases.schedule_restart.disable().await?;
            prompt::success("Auto-restart disabled");
        }
        _ => {}
    }
    Ok(())
}
