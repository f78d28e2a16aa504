use std::sync::Arc;
use vortexl2_domain::ForwardMode;

use crate::ports::ForwardDriver;

/// The two forward drivers; the persisted mode decides which one is active.
#[derive(Clone)]
pub struct ForwardDrivers {
    proxy: Arc<dyn ForwardDriver>,
    relay: Arc<dyn ForwardDriver>,
}

impl ForwardDrivers {
    pub fn new(proxy: Arc<dyn ForwardDriver>, relay: Arc<dyn ForwardDriver>) -> Self {
        Self { proxy, relay }
    }

    /// `None` when forwarding is disabled.
    pub fn for_mode(&self, mode: ForwardMode) -> Option<Arc<dyn ForwardDriver>> {
        match mode {
            ForwardMode::Disabled => None,
            ForwardMode::Proxy => Some(Arc::clone(&self.proxy)),
            ForwardMode::Relay => Some(Arc::clone(&self.relay)),
        }
    }
}
