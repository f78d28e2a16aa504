//! Interactive shell. Every action reports its own failure and returns to
//! the menu; nothing here terminates the process.
mod dns;
mod forwards;
mod logs;
mod prompt;
mod tunnels;

use tracing::warn;
use vortexl2_application::ports::GlobalStateRepository;
use vortexl2_domain::{ForwardMode, TunnelMode};

use crate::di::App;

#[derive(Clone, Copy)]
enum MainAction {
    CreateTunnel,
    DeleteTunnel,
    ListTunnels,
    RestartTunnel,
    Peers,
    AutoRestart,
    Forwards,
    Dns,
    Logs,
    SwitchTunnelMode,
    Exit,
}

impl MainAction {
    fn label(self) -> &'static str {
        match self {
            Self::CreateTunnel => "Create tunnel",
            Self::DeleteTunnel => "Delete tunnel",
            Self::ListTunnels => "List tunnels",
            Self::RestartTunnel => "Restart tunnel",
            Self::Peers => "Show peers",
            Self::AutoRestart => "Tunnel auto-restart",
            Self::Forwards => "Port forwards",
            Self::Dns => "DNS",
            Self::Logs => "Service logs",
            Self::SwitchTunnelMode => "Switch tunnel mode",
            Self::Exit => "Exit",
        }
    }

    fn for_mode(mode: TunnelMode) -> Vec<Self> {
        let mut actions = vec![
            Self::CreateTunnel,
            Self::DeleteTunnel,
            Self::ListTunnels,
            Self::RestartTunnel,
        ];
        if mode == TunnelMode::Easytier {
            actions.extend([Self::Peers, Self::AutoRestart]);
        }
        actions.extend([
            Self::Forwards,
            Self::Dns,
            Self::Logs,
            Self::SwitchTunnelMode,
            Self::Exit,
        ]);
        actions
    }
}

pub async fn run(app: &App) -> anyhow::Result<()> {
    loop {
        let tunnel_mode = tunnel_mode(app.adapters.state.as_ref()).await;
        let forward_mode = forward_mode(app.adapters.state.as_ref()).await;

        prompt::heading(&format!(
            "VortexL2 v{}  |  tunnel: {}  |  forwarding: {}",
            env!("CARGO_PKG_VERSION"),
            tunnel_mode,
            forward_mode
        ));

        let actions = MainAction::for_mode(tunnel_mode);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let action = actions[prompt::select("Select an option", &labels)?];

        let result = match action {
            MainAction::CreateTunnel => tunnels::create(app, tunnel_mode).await,
            MainAction::DeleteTunnel => tunnels::delete(app).await,
            MainAction::ListTunnels => tunnels::list(app).await,
            MainAction::RestartTunnel => tunnels::restart(app).await,
            MainAction::Peers => tunnels::peers(app).await,
            MainAction::AutoRestart => tunnels::auto_restart(app).await,
            MainAction::Forwards => forwards::run(app).await,
            MainAction::Dns => dns::run(app).await,
            MainAction::Logs => logs::run(app, tunnel_mode).await,
            MainAction::SwitchTunnelMode => switch_tunnel_mode(app, tunnel_mode).await,
            MainAction::Exit => return Ok(()),
        };

        if let Err(e) = result {
            warn!(error = %e, "Menu action failed");
            prompt::failure(e);
        }
    }
}

/// Unreadable state is reported and shown as the default mode.
async fn tunnel_mode(state: &dyn GlobalStateRepository) -> TunnelMode {
    state.tunnel_mode().await.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to read tunnel mode");
        prompt::failure(&e);
        TunnelMode::default()
    })
}

pub(super) async fn forward_mode(state: &dyn GlobalStateRepository) -> ForwardMode {
    state.forward_mode().await.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to read forward mode");
        prompt::failure(&e);
        ForwardMode::default()
    })
}

async fn switch_tunnel_mode(app: &App, current: TunnelMode) -> anyhow::Result<()> {
    let target = match current {
        TunnelMode::L2tpv3 => TunnelMode::Easytier,
        TunnelMode::Easytier => TunnelMode::L2tpv3,
    };
    let question = format!(
        "Switch from {} to {}? Existing tunnels stay on disk but are no longer listed",
        current, target
    );
    if !prompt::confirm(&question, false)? {
        return Ok(());
    }
    app.adapters.state.set_tunnel_mode(target).await?;
    prompt::success(format!("Tunnel mode set to {}", target));
    Ok(())
}
