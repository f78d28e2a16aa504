use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use vortexl2_application::ports::{ListenerInfo, PortInspector};
use vortexl2_domain::DomainError;

#[derive(Default)]
pub struct FakePortInspector {
    listeners: Mutex<HashMap<u16, ListenerInfo>>,
    lookups: AtomicU64,
}

impl FakePortInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&self, port: u16, process: &str, pid: u32) {
        self.listeners.lock().unwrap().insert(
            port,
            ListenerInfo {
                process: process.to_string(),
                pid: Some(pid),
            },
        );
    }

    pub fn release(&self, port: u16) {
        self.listeners.lock().unwrap().remove(&port);
    }

    pub fn is_listening(&self, port: u16) -> bool {
        self.listeners.lock().unwrap().contains_key(&port)
    }

    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PortInspector for FakePortInspector {
    async fn listener(&self, port: u16) -> Result<Option<ListenerInfo>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.listeners.lock().unwrap().get(&port).cloned())
    }
}
