use std::sync::Arc;
use vortexl2_domain::TunnelMode;

use crate::ports::TunnelRuntime;

#[derive(Clone)]
pub struct TunnelRuntimes {
    l2tp: Arc<dyn TunnelRuntime>,
    easytier: Arc<dyn TunnelRuntime>,
}

impl TunnelRuntimes {
    pub fn new(l2tp: Arc<dyn TunnelRuntime>, easytier: Arc<dyn TunnelRuntime>) -> Self {
        Self { l2tp, easytier }
    }

    pub fn for_mode(&self, mode: TunnelMode) -> Arc<dyn TunnelRuntime> {
        match mode {
            TunnelMode::L2tpv3 => Arc::clone(&self.l2tp),
            TunnelMode::Easytier => Arc::clone(&self.easytier),
        }
    }
}
