use async_trait::async_trait;
use std::net::IpAddr;
use std::path::PathBuf;
use vortexl2_application::ports::DnsApplyMechanism;
use vortexl2_domain::DomainError;

use crate::system::atomic_file::write_atomic;

/// Last resort: replace the resolver file outright.
pub struct ResolvConfApplier {
    path: PathBuf,
}

impl ResolvConfApplier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DnsApplyMechanism for ResolvConfApplier {
    fn name(&self) -> &'static str {
        "resolv.conf"
    }

    async fn check_available(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn apply(&self, address: IpAddr) -> Result<String, DomainError> {
        let contents = format!("nameserver {}\n", address);
        write_atomic(&self.path, contents.as_bytes(), 0o644).await?;
        Ok(format!(
            "Applied by writing {}: DNS={}",
            self.path.display(),
            address
        ))
    }
}
