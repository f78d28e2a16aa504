use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Filesystem locations and external binaries used by the adapters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    #[serde(default = "default_haproxy_config")]
    pub haproxy_config: PathBuf,

    #[serde(default = "default_systemd_dir")]
    pub systemd_dir: PathBuf,

    #[serde(default = "default_cron_dir")]
    pub cron_dir: PathBuf,

    #[serde(default = "default_resolv_conf")]
    pub resolv_conf: PathBuf,

    #[serde(default = "default_easytier_core")]
    pub easytier_core: PathBuf,

    #[serde(default = "default_easytier_cli")]
    pub easytier_cli: PathBuf,

    /// Command line cron and systemd invoke to reach this binary
    #[serde(default = "default_self_binary")]
    pub self_binary: PathBuf,
}

impl PathsConfig {
    pub fn tunnels_dir(&self) -> PathBuf {
        self.state_dir.join("tunnels")
    }

    pub fn dns_state_file(&self) -> PathBuf {
        self.state_dir.join("dns_config.yaml")
    }

    pub fn global_state_file(&self) -> PathBuf {
        self.state_dir.join("config.yaml")
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            haproxy_config: default_haproxy_config(),
            systemd_dir: default_systemd_dir(),
            cron_dir: default_cron_dir(),
            resolv_conf: default_resolv_conf(),
            easytier_core: default_easytier_core(),
            easytier_cli: default_easytier_cli(),
            self_binary: default_self_binary(),
        }
    }
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("/etc/vortexl2")
}

fn default_haproxy_config() -> PathBuf {
    PathBuf::from("/etc/haproxy/haproxy.cfg")
}

fn default_systemd_dir() -> PathBuf {
    PathBuf::from("/etc/systemd/system")
}

fn default_cron_dir() -> PathBuf {
    PathBuf::from("/etc/cron.d")
}

fn default_resolv_conf() -> PathBuf {
    PathBuf::from("/etc/resolv.conf")
}

fn default_easytier_core() -> PathBuf {
    PathBuf::from("/usr/local/bin/easytier-core")
}

fn default_easytier_cli() -> PathBuf {
    PathBuf::from("/usr/local/bin/easytier-cli")
}

fn default_self_binary() -> PathBuf {
    PathBuf::from("/usr/local/bin/vortexl2")
}
