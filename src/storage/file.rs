//! JSON file state store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::StateStore;
use crate::resource::{ResourceData, StoredState};
use crate::{Error, Result};

/// State file holding every instance, keyed by address.
///
/// The file contains secrets and is written with owner-only permissions on Unix.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<HashMap<String, StoredState>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse state file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn write_all(&self, entries: &HashMap<String, StoredState>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, content).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600)).await?;
        }

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self, address: &str) -> Result<Option<ResourceData>> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        Ok(entries.remove(address).map(ResourceData::from))
    }

    async fn save(&self, address: &str, state: &ResourceData) -> Result<()> {
        let stored = state.to_stored()?;
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(address.to_string(), stored);
        self.write_all(&entries).await?;
        tracing::debug!(path = %self.path.display(), address, "Saved resource state");
        Ok(())
    }

    async fn remove(&self, address: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        if entries.remove(address).is_none() {
            return Ok(false);
        }
        self.write_all(&entries).await?;
        Ok(true)
    }
}
