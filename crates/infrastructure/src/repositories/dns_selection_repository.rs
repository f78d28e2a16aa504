use async_trait::async_trait;
use std::path::PathBuf;
use vortexl2_application::ports::DnsSelectionRepository;
use vortexl2_domain::{DnsSelection, DomainError};

use super::yaml_store::YamlDocument;

/// `dns_config.yaml` in the state directory.
pub struct YamlDnsSelectionRepository {
    document: YamlDocument<DnsSelection>,
}

impl YamlDnsSelectionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: YamlDocument::new(path, 0o644),
        }
    }
}

#[async_trait]
impl DnsSelectionRepository for YamlDnsSelectionRepository {
    async fn load(&self) -> Result<DnsSelection, DomainError> {
        Ok(self.document.read().await?.unwrap_or_default())
    }

    async fn save(&self, selection: &DnsSelection) -> Result<(), DomainError> {
        self.document.write(selection).await
    }
}
