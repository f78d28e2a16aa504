use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::info;
use vortexl2_domain::CliOverrides;

mod bootstrap;
mod commands;
mod di;
mod menu;

#[derive(Parser)]
#[command(name = "vortexl2")]
#[command(version)]
#[command(about = "VortexL2 - L2TPv3 / EasyTier tunnel manager with port forwarding and DNS selection")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// State directory (tunnel documents, DNS and global state)
    #[arg(long, value_name = "DIR")]
    state_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start every configured tunnel and forward (used at boot)
    Apply,
    /// Scan the DNS catalog and apply the fastest server (used by cron)
    DnsCheck,
    /// Keep every forward of the active mode alive
    ForwardDaemon,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        state_dir: cli.state_dir.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::ensure_root()?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting VortexL2");

    let app = di::App::build(config);

    let ok = match cli.command {
        None => {
            menu::run(&app).await?;
            true
        }
        Some(Command::Apply) => commands::apply(&app).await?,
        Some(Command::DnsCheck) => commands::dns_check(&app).await?,
        Some(Command::ForwardDaemon) => {
            commands::forward_daemon(&app).await?;
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
