use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vortexl2_application::ports::GlobalStateRepository;
use vortexl2_domain::{DomainError, ForwardMode, TunnelMode};

use super::yaml_store::YamlDocument;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GlobalStateDocument {
    #[serde(default)]
    tunnel_mode: TunnelMode,
    #[serde(default)]
    forward_mode: ForwardMode,
}

/// `config.yaml` in the state directory; each setter is a read-modify-write.
pub struct YamlGlobalStateRepository {
    document: YamlDocument<GlobalStateDocument>,
}

impl YamlGlobalStateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: YamlDocument::new(path, 0o644),
        }
    }

    async fn load(&self) -> Result<GlobalStateDocument, DomainError> {
        Ok(self.document.read().await?.unwrap_or_default())
    }
}

#[async_trait]
impl GlobalStateRepository for YamlGlobalStateRepository {
    async fn forward_mode(&self) -> Result<ForwardMode, DomainError> {
        Ok(self.load().await?.forward_mode)
    }

    async fn set_forward_mode(&self, mode: ForwardMode) -> Result<(), DomainError> {
        let mut state = self.load().await?;
        state.forward_mode = mode;
        self.document.write(&state).await
    }

    async fn tunnel_mode(&self) -> Result<TunnelMode, DomainError> {
        Ok(self.load().await?.tunnel_mode)
    }

    async fn set_tunnel_mode(&self, mode: TunnelMode) -> Result<(), DomainError> {
        let mut state = self.load().await?;
        state.tunnel_mode = mode;
        self.document.write(&state).await
    }
}
