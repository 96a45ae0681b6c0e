//! Test helpers
//!
//! Mock store and provider doubles plus small factories.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use poseidon_provider::{
    CloudProvider, CreateServerRequest, InstanceSizeBase, MockProvider, ProviderError,
    ProviderFeatures, ProviderKind, Server, UpdateServerRequest,
};

use crate::error::{CoreError, CoreResult};
use crate::services::CloudManager;
use crate::traits::ServerRecordStore;

// ===== MockServerRecordStore =====

pub struct MockServerRecordStore {
    servers: RwLock<HashMap<String, Server>>,
    /// When `Some`, `insert` fails with this message (orphan paths)
    insert_error: RwLock<Option<String>>,
}

impl MockServerRecordStore {
    pub fn new() -> Self {
        Self {
            servers: RwLock::new(HashMap::new()),
            insert_error: RwLock::new(None),
        }
    }

    pub async fn set_insert_error(&self, err: Option<String>) {
        *self.insert_error.write().await = err;
    }
}

#[async_trait]
impl ServerRecordStore for MockServerRecordStore {
    async fn insert(&self, server: &Server) -> CoreResult<bool> {
        if let Some(ref msg) = *self.insert_error.read().await {
            return Err(CoreError::Persistence(msg.clone()));
        }
        let Some(id) = server.id.clone() else {
            return Ok(false);
        };
        let mut servers = self.servers.write().await;
        if servers
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
        Ok(servers.len() < before)
    }

    async fn find_all(&self) -> CoreResult<Vec<Server>> {
        Ok(self.servers.read().await.values().cloned().collect())
    }
}

// ===== FailingProvider =====

/// Provider whose every call fails with the same error.
pub struct FailingProvider {
    error: ProviderError,
}

impl FailingProvider {
    pub fn new(error: ProviderError) -> Self {
        Self { error }
    }

    fn fail<T>(&self) -> poseidon_provider::Result<T> {
        Err(self.error.clone())
    }
}

#[async_trait]
impl CloudProvider for FailingProvider {
    fn id(&self) -> &'static str {
        "failing"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::DigitalOcean
    }

    fn features(&self) -> ProviderFeatures {
        ProviderFeatures {
            ssh_keys: true,
            requires_ssh_key: true,
        }
    }

    async fn create_server(&self, _req: &CreateServerRequest) -> poseidon_provider::Result<Server> {
        self.fail()
    }

    async fn get_server(&self, _cloud_id: &str) -> poseidon_provider::Result<Server> {
        self.fail()
    }

    async fn update_server(&self, _req: &UpdateServerRequest) -> poseidon_provider::Result<Server> {
        self.fail()
    }

    async fn delete_server(&self, _cloud_id: &str) -> poseidon_provider::Result<()> {
        self.fail()
    }

    async fn list_images(
        &self,
        _region: Option<&str>,
    ) -> poseidon_provider::Result<Vec<InstanceSizeBase>> {
        self.fail()
    }

    async fn list_sizes(
        &self,
        _region: Option<&str>,
    ) -> poseidon_provider::Result<Vec<InstanceSizeBase>> {
        self.fail()
    }

    async fn list_regions(&self) -> poseidon_provider::Result<Vec<InstanceSizeBase>> {
        self.fail()
    }
}

// ===== Factories =====

/// A `CloudManager` bound to a fresh mock, plus the mock for request counting.
pub fn mock_manager(kind: ProviderKind) -> (CloudManager, Arc<MockProvider>) {
    let provider = Arc::new(MockProvider::new(kind, "10.0.0.5"));
    (CloudManager::new(provider.clone()), provider)
}

/// A complete create request using entries of the mock catalogue.
pub fn valid_request(kind: ProviderKind) -> CreateServerRequest {
    match kind {
        ProviderKind::DigitalOcean => CreateServerRequest {
            name: "web1".to_string(),
            size: "s-1vcpu-1gb".to_string(),
            image: "ubuntu-22-04-x64".to_string(),
            region: "nyc1".to_string(),
            ssh_key_id: Some("512189".to_string()),
        },
        ProviderKind::Ovh => CreateServerRequest {
            name: "web1".to_string(),
            size: "0f1e3c5a-2d6b-4c8e-9a71-5b3d2f4e6a80".to_string(),
            image: "b4e0f5c2-6a1d-4e8b-9c3f-2d7a5e1b8c46".to_string(),
            region: "GRA11".to_string(),
            ssh_key_id: None,
        },
    }
}

/// A recorded server with a fresh internal id.
pub fn test_server(cloud_id: &str) -> Server {
    Server {
        id: Some(uuid::Uuid::new_v4().to_string()),
        cloud_id: cloud_id.to_string(),
        name: "web1".to_string(),
        size: "s-1vcpu-1gb".to_string(),
        image: "ubuntu-22-04-x64".to_string(),
        region: "nyc1".to_string(),
        provider: ProviderKind::DigitalOcean,
        ip_address: Some("10.0.0.5".to_string()),
        status: Some("active".to_string()),
        created_at: None,
    }
}
