use std::fmt::Write;
use vortexl2_domain::ForwardEntry;

const HEADER: &str = "\
# Generated by vortexl2. Changes are overwritten on the next forward update.
global
    log /dev/log local0
    maxconn 4096
    daemon

defaults
    mode tcp
    log global
    option tcplog
    option dontlognull
    timeout connect 5s
    timeout client 1m
    timeout server 1m
";

/// Full `haproxy.cfg`: one frontend/backend pair per forwarded port.
pub fn render(entries: &[ForwardEntry]) -> String {
    let mut sorted: Vec<&ForwardEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.port);

    let mut cfg = String::from(HEADER);
    for entry in sorted {
        let _ = write!(
            cfg,
            "\nfrontend vortexl2_fe_{port}\n    bind *:{port}\n    default_backend vortexl2_be_{port}\n\nbackend vortexl2_be_{port}\n    server {tunnel}_{port} {endpoint} check\n",
            port = entry.port,
            tunnel = entry.tunnel,
            endpoint = entry.remote_endpoint(),
        );
    }
    cfg
}

/// Ports with a `vortexl2_fe_<port>` frontend in a rendered config.
pub fn frontend_ports(cfg: &str) -> Vec<u16> {
    cfg.lines()
        .filter_map(|line| line.trim().strip_prefix("frontend vortexl2_fe_"))
        .filter_map(|port| port.trim().parse().ok())
        .collect()
}
