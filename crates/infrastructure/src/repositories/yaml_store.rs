use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use vortexl2_domain::DomainError;

use crate::system::atomic_file::{read_optional, remove_if_exists, write_atomic};

/// A single YAML file holding one `T`, replaced atomically on every write.
pub struct YamlDocument<T> {
    path: PathBuf,
    mode: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> YamlDocument<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>, mode: u32) -> Self {
        Self {
            path: path.into(),
            mode,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when the file does not exist. An empty file also reads as `None`.
    pub async fn read(&self) -> Result<Option<T>, DomainError> {
        let Some(content) = read_optional(&self.path).await? else {
            return Ok(None);
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_yaml::from_str(&content).map(Some).map_err(|e| {
            DomainError::ConfigError(format!("Invalid YAML in {}: {}", self.path.display(), e))
        })
    }

    pub async fn write(&self, value: &T) -> Result<(), DomainError> {
        let yaml = serde_yaml::to_string(value).map_err(|e| {
            DomainError::ConfigError(format!(
                "Failed to serialize {}: {}",
                self.path.display(),
                e
            ))
        })?;
        write_atomic(&self.path, yaml.as_bytes(), self.mode).await
    }

    pub async fn remove(&self) -> Result<bool, DomainError> {
        remove_if_exists(&self.path).await
    }
}
