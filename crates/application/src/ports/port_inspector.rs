use async_trait::async_trait;
use vortexl2_domain::DomainError;

/// Process bound to a listening TCP port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerInfo {
    pub process: String,
    pub pid: Option<u32>,
}

impl ListenerInfo {
    pub fn describe(&self) -> String {
        match self.pid {
            Some(pid) => format!("{} (PID: {})", self.process, pid),
            None => self.process.clone(),
        }
    }
}

#[async_trait]
pub trait PortInspector: Send + Sync {
    /// `None` when nothing listens on `port`.
    async fn listener(&self, port: u16) -> Result<Option<ListenerInfo>, DomainError>;
}
