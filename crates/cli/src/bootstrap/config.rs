use tracing::info;
use vortexl2_domain::{CliOverrides, Config};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// Everything this tool touches (systemd units, cron, `ip l2tp`, resolver
/// files) needs root.
pub fn ensure_root() -> anyhow::Result<()> {
    // SAFETY: geteuid has no preconditions and cannot fail
    let euid = unsafe { libc::geteuid() };
    if euid != 0 {
        anyhow::bail!("vortexl2 must be run as root (try: sudo vortexl2)");
    }
    info!("Running as root");
    Ok(())
}
