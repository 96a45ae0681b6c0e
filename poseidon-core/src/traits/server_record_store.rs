//! Local server record persistence

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use poseidon_provider::{ProviderKind, Server};

use crate::error::{CoreError, CoreResult};

/// Local mirror of provisioned servers.
///
/// Records are keyed by internal id. Cloud ids are only unique within one
/// provider, so they are always looked up together with the provider kind.
///
/// Implementations:
/// - `InMemoryServerRecordStore` (this crate)
/// - `SqliteServerStore` (`poseidon-app`, feature `sqlite-store`)
#[async_trait]
pub trait ServerRecordStore: Send + Sync {
    /// Persist a new record.
    ///
    /// Returns `false` when the store declines it (duplicate id, or a cloud id
    /// already recorded for the same provider).
    async fn insert(&self, server: &Server) -> CoreResult<bool>;

    /// Look up a record by internal id.
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Server>>;

    /// Look up a record by the cloud id `provider` issued.
    async fn find_by_cloud_id(
        &self,
        provider: ProviderKind,
        cloud_id: &str,
    ) -> CoreResult<Option<Server>>;

    /// Remove the record `provider` knows as `cloud_id`. Returns whether one existed.
    async fn delete(&self, provider: ProviderKind, cloud_id: &str) -> CoreResult<bool>;

    /// Every record, in no particular order.
    async fn find_all(&self) -> CoreResult<Vec<Server>>;
}

/// In-memory record store
///
/// Default implementation for tests and short-lived processes.
#[derive(Clone, Default)]
pub struct InMemoryServerRecordStore {
    servers: Arc<RwLock<HashMap<String, Server>>>,
}

impl InMemoryServerRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServerRecordStore for InMemoryServerRecordStore {
    async fn insert(&self, server: &Server) -> CoreResult<bool> {
        let id = server
            .id
            .clone()
            .ok_or_else(|| CoreError::Persistence("server has no internal id".to_string()))?;

        let mut servers = self.servers.write().await;
        if servers.contains_key(&id)
            || servers
                .values()
                .any(|s| s.provider == server.provider && s.cloud_id == server.cloud_id)
        {
            return Ok(false);
        }
        servers.insert(id, server.clone());
        Ok(true)
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Server>> {
        Ok(self.servers.read().await.get(id).cloned())
    }

    async fn find_by_cloud_id(
        &self,
        provider: ProviderKind,
        cloud_id: &str,
    ) -> CoreResult<Option<Server>> {
        Ok(self
            .servers
            .read()
            .await
            .values()
            .find(|s| s.provider == provider && s.cloud_id == cloud_id)
            .cloned())
    }

    async fn delete(&self, provider: ProviderKind, cloud_id: &str) -> CoreResult<bool> {
        let mut servers = self.servers.write().await;
        let before = servers.len();
        servers.retain(|_, s| !(s.provider == provider && s.cloud_id == cloud_id));
        Ok(servers.len() != before)
    }

    async fn find_all(&self) -> CoreResult<Vec<Server>> {
        Ok(self.servers.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_server;

    const DO: ProviderKind = ProviderKind::DigitalOcean;

    #[tokio::test]
    async fn insert_rejects_duplicate_cloud_id() {
        let store = InMemoryServerRecordStore::new();
        let first = test_server("mock-aaa");
        assert!(store.insert(&first).await.unwrap());

        let mut second = test_server("mock-aaa");
        second.id = Some("another-id".to_string());
        assert!(!store.insert(&second).await.unwrap());
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn lookups_by_both_keys() {
        let store = InMemoryServerRecordStore::new();
        let server = test_server("mock-bbb");
        store.insert(&server).await.unwrap();

        let id = server.id.clone().unwrap();
        assert_eq!(store.find_by_id(&id).await.unwrap(), Some(server.clone()));
        assert_eq!(
            store.find_by_cloud_id(DO, "mock-bbb").await.unwrap(),
            Some(server)
        );
        assert_eq!(store.find_by_cloud_id(DO, "missing").await.unwrap(), None);
        assert_eq!(
            store
                .find_by_cloud_id(ProviderKind::Ovh, "mock-bbb")
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn delete_reports_whether_removed() {
        let store = InMemoryServerRecordStore::new();
        store.insert(&test_server("mock-ccc")).await.unwrap();
        assert!(store.delete(DO, "mock-ccc").await.unwrap());
        assert!(!store.delete(DO, "mock-ccc").await.unwrap());
    }

    #[tokio::test]
    async fn same_cloud_id_under_two_providers() {
        let store = InMemoryServerRecordStore::new();
        let droplet = test_server("12345");
        let mut instance = test_server("12345");
        instance.provider = ProviderKind::Ovh;

        assert!(store.insert(&droplet).await.unwrap());
        assert!(store.insert(&instance).await.unwrap());
        assert_eq!(
            store
                .find_by_cloud_id(ProviderKind::Ovh, "12345")
                .await
                .unwrap()
                .and_then(|s| s.id),
            instance.id
        );

        assert!(store.delete(ProviderKind::Ovh, "12345").await.unwrap());
        assert_eq!(
            store.find_by_cloud_id(DO, "12345").await.unwrap(),
            Some(droplet)
        );
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn server_without_internal_id_is_an_error() {
        let store = InMemoryServerRecordStore::new();
        let mut server = test_server("mock-ddd");
        server.id = None;
        assert!(matches!(
            store.insert(&server).await,
            Err(CoreError::Persistence(_))
        ));
    }
}
