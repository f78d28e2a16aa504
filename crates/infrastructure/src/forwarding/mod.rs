pub mod haproxy;
pub mod haproxy_config;
pub mod socat;

pub use haproxy::HaproxyDriver;
pub use socat::SocatDriver;

use vortexl2_application::ports::{PortInspector, TunnelRepository};
use vortexl2_domain::{DomainError, ForwardEntry, ForwardStatus, Forwardable, TunnelConfig};

/// Forward entries of every stored tunnel, with `edited` standing in for its
/// stored document (or appended when it has not been saved yet).
pub(crate) async fn collect_entries(
    tunnels: &dyn TunnelRepository,
    edited: Option<&TunnelConfig>,
) -> Result<Vec<ForwardEntry>, DomainError> {
    let mut stored = tunnels.list().await?;

    if let Some(edited) = edited {
        match stored.iter_mut().find(|t| t.name() == edited.name()) {
            Some(slot) => *slot = edited.clone(),
            None => stored.push(edited.clone()),
        }
    }

    Ok(stored.iter().flat_map(|t| t.forward_entries()).collect())
}

pub(crate) async fn live_statuses(
    inspector: &dyn PortInspector,
    entries: Vec<ForwardEntry>,
) -> Result<Vec<ForwardStatus>, DomainError> {
    let mut statuses = Vec::with_capacity(entries.len());

    for entry in entries {
        let listener = inspector.listener(entry.port).await?;
        statuses.push(ForwardStatus {
            port: entry.port,
            remote: entry.remote_endpoint(),
            tunnel: entry.tunnel,
            live: listener.is_some(),
            process: listener.map(|l| l.describe()),
        });
    }

    Ok(statuses)
}
