use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};
use vortexl2_application::ports::TunnelRepository;
use vortexl2_domain::{DomainError, Forwardable, TunnelConfig};

use super::yaml_store::YamlDocument;
use crate::system::atomic_file::io_error;

/// Tunnel documents may carry a shared secret
const TUNNEL_FILE_MODE: u32 = 0o600;

/// One `<name>.yaml` per tunnel under the tunnels directory.
pub struct YamlTunnelRepository {
    dir: PathBuf,
}

impl YamlTunnelRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn document(&self, name: &str) -> Result<YamlDocument<TunnelConfig>, DomainError> {
        TunnelConfig::validate_name(name).map_err(DomainError::InvalidTunnelName)?;
        Ok(YamlDocument::new(
            self.dir.join(format!("{}.yaml", name)),
            TUNNEL_FILE_MODE,
        ))
    }
}

#[async_trait]
impl TunnelRepository for YamlTunnelRepository {
    async fn list(&self) -> Result<Vec<TunnelConfig>, DomainError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("read directory", &self.dir, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error("read directory", &self.dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();

        let mut tunnels = Vec::with_capacity(names.len());
        for name in names {
            match self.get(&name).await {
                Ok(Some(tunnel)) => tunnels.push(tunnel),
                Ok(None) => {}
                Err(e) => warn!(tunnel = %name, error = %e, "Skipping unreadable tunnel document"),
            }
        }

        debug!(count = tunnels.len(), "Tunnel documents loaded");
        Ok(tunnels)
    }

    async fn get(&self, name: &str) -> Result<Option<TunnelConfig>, DomainError> {
        self.document(name)?.read().await
    }

    async fn save(&self, tunnel: &TunnelConfig) -> Result<(), DomainError> {
        self.document(tunnel.name())?.write(tunnel).await
    }

    async fn delete(&self, name: &str) -> Result<(), DomainError> {
        self.document(name)?.remove().await?;
        Ok(())
    }
}
