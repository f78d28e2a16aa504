use std::sync::Arc;
use tracing::instrument;
use vortexl2_domain::DomainError;

use crate::ports::GlobalStateRepository;
use crate::services::ForwardDrivers;

pub struct ReloadForwardsUseCase {
    state: Arc<dyn GlobalStateRepository>,
    drivers: ForwardDrivers,
}

impl ReloadForwardsUseCase {
    pub fn new(state: Arc<dyn GlobalStateRepository>, drivers: ForwardDrivers) -> Self {
        Self { state, drivers }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<String, DomainError> {
        let driver = self
            .drivers
            .for_mode(self.state.forward_mode().await?)
            .ok_or(DomainError::ForwardingDisabled)?;
        driver.validate_and_reload().await
    }
}
