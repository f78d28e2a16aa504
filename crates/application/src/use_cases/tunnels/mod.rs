mod apply_tunnels;
mod create_tunnel;
mod delete_tunnel;
mod get_peers;
mod list_tunnels;
mod restart_tunnel;
mod schedule_restart;

pub use apply_tunnels::{ApplyReport, ApplyTunnelsUseCase};
pub use create_tunnel::CreateTunnelUseCase;
pub use delete_tunnel::DeleteTunnelUseCase;
pub use get_peers::GetPeersUseCase;
pub use list_tunnels::{ListTunnelsUseCase, TunnelSummary};
pub use restart_tunnel::RestartTunnelUseCase;
pub use schedule_restart::{ScheduleTunnelRestartUseCase, TUNNEL_RESTART_TASK};
