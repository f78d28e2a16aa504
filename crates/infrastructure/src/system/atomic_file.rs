use std::io::ErrorKind;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use vortexl2_domain::DomainError;

/// Sibling path used while a file is being replaced.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` to a temp file in the same directory, then rename it over
/// `path`. Readers see either the old or the new file, never a partial one.
pub async fn write_atomic(path: &Path, contents: &[u8], mode: u32) -> Result<(), DomainError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error("create directory", parent, e))?;
    }

    let tmp = staging_path(path);
    fs::write(&tmp, contents)
        .await
        .map_err(|e| io_error("write", &tmp, e))?;
    fs::set_permissions(&tmp, std::fs::Permissions::from_mode(mode))
        .await
        .map_err(|e| io_error("chmod", &tmp, e))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| io_error("rename", path, e))
}

/// Remove `path`; a missing file counts as removed.
pub async fn remove_if_exists(path: &Path) -> Result<bool, DomainError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error("remove", path, e)),
    }
}

/// `None` for a missing file.
pub async fn read_optional(path: &Path) -> Result<Option<String>, DomainError> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error("read", path, e)),
    }
}

pub(crate) fn io_error(action: &str, path: &Path, e: std::io::Error) -> DomainError {
    DomainError::IoError(format!("Failed to {} {}: {}", action, path.display(), e))
}
