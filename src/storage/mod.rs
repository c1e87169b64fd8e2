//! Persisted resource state.

mod file;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Result;
use crate::resource::{ResourceData, StoredState};

pub use file::FileStateStore;

/// Keyed storage for resource instance state.
///
/// Addresses are opaque strings such as `slack-token_refresh.main`.
#[async_trait]
pub trait StateStore: Send + Sync {
    fn name(&self) -> &str;

    async fn load(&self, address: &str) -> Result<Option<ResourceData>>;

    /// Fails with a configuration error when `state` still holds unknown values.
    async fn save(&self, address: &str, state: &ResourceData) -> Result<()>;

    /// Returns whether an entry was removed.
    async fn remove(&self, address: &str) -> Result<bool>;
}

/// In-process store, mostly for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: RwLock<HashMap<String, StoredState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self, address: &str) -> Result<Option<ResourceData>> {
        let entries = self.entries.read().await;
        Ok(entries.get(address).cloned().map(ResourceData::from))
    }

    async fn save(&self, address: &str, state: &ResourceData) -> Result<()> {
        let stored = state.to_stored()?;
        self.entries
            .write()
            .await
            .insert(address.to_string(), stored);
        Ok(())
    }

    async fn remove(&self, address: &str) -> Result<bool> {
        Ok(self.entries.write().await.remove(address).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::credential::CredentialRecord;
    use crate::resource::AttributeValue;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStateStore::new();
        assert!(store.load("a").await.unwrap().is_none());

        let state = ResourceData::from(CredentialRecord::new("T", "R", 42).unwrap());
        store.save("a", &state).await.unwrap();
        assert_eq!(store.len().await, 1);

        let loaded = store.load("a").await.unwrap().unwrap();
        assert!(loaded.same_as(&state));
        assert_eq!(loaded.token.as_known().unwrap().expose_secret(), "T");

        assert!(store.remove("a").await.unwrap());
        assert!(!store.remove("a").await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_memory_store_rejects_unknown() {
        let store = MemoryStateStore::new();
        let state = ResourceData {
            expires: AttributeValue::Unknown,
            ..ResourceData::imported("R1")
        };
        assert!(matches!(
            store.save("a", &state).await,
            Err(Error::Configuration(_))
        ));
        assert!(store.is_empty().await);
    }
}
