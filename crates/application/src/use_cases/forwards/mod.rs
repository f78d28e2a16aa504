mod add_forwards;
mod list_forwards;
mod reload_forwards;
mod remove_forwards;
mod set_remote_target;
mod start_forwards;
mod switch_mode;

pub use add_forwards::AddForwardsUseCase;
pub use list_forwards::ListForwardsUseCase;
pub use reload_forwards::ReloadForwardsUseCase;
pub use remove_forwards::RemoveForwardsUseCase;
pub use set_remote_target::SetRemoteTargetUseCase;
pub use start_forwards::StartForwardsUseCase;
pub use switch_mode::{SwitchForwardModeUseCase, FORWARD_DAEMON_UNIT};

use std::sync::Arc;
use vortexl2_domain::{DomainError, TunnelConfig};

use crate::ports::TunnelRepository;

async fn load_tunnel(
    tunnels: &Arc<dyn TunnelRepository>,
    name: &str,
) -> Result<TunnelConfig, DomainError> {
    tunnels
        .get(name)
        .await?
        .ok_or_else(|| DomainError::TunnelNotFound(name.to_string()))
}
