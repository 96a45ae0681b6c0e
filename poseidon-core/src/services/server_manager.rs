//! Local server record management

use std::sync::Arc;

use poseidon_provider::{ProviderKind, Server};

use crate::error::{CoreError, CoreResult};
use crate::services::required_attribute;
use crate::traits::ServerRecordStore;

/// Reads and writes the local mirror of provisioned servers.
///
/// Never touches a provider.
pub struct ServerManager {
    store: Arc<dyn ServerRecordStore>,
}

impl ServerManager {
    #[must_use]
    pub fn new(store: Arc<dyn ServerRecordStore>) -> Self {
        Self { store }
    }

    /// Persist a freshly created server. `true` iff the store accepted it.
    ///
    /// A server without a cloud id or internal id is rejected; neither is invented here.
    pub async fn insert_server(&self, server: &Server) -> CoreResult<bool> {
        let mut missing = Vec::new();
        if server.cloud_id.trim().is_empty() {
            missing.push(required_attribute("cloud_id"));
        }
        if server.id.as_deref().is_none_or(|id| id.trim().is_empty()) {
            missing.push(required_attribute("id"));
        }
        if !missing.is_empty() {
            return Err(CoreError::Validation(missing));
        }

        let inserted = self.store.insert(server).await?;
        if inserted {
            log::info!(
                "Server {} ({}) recorded for {}",
                server.cloud_id,
                server.name,
                server.provider
            );
        } else {
            log::warn!("Store declined server {}", server.cloud_id);
        }
        Ok(inserted)
    }

    /// Record by internal id.
    pub async fn get_server(&self, id: &str) -> CoreResult<Option<Server>> {
        self.store.find_by_id(id).await
    }

    /// Record by the cloud id `provider` issued.
    pub async fn get_server_by_cloud_id(
        &self,
        provider: ProviderKind,
        cloud_id: &str,
    ) -> CoreResult<Option<Server>> {
        self.store.find_by_cloud_id(provider, cloud_id).await
    }

    /// Remove the local record only. `true` iff one existed.
    pub async fn delete_server(&self, provider: ProviderKind, cloud_id: &str) -> CoreResult<bool> {
        let deleted = self.store.delete(provider, cloud_id).await?;
        if deleted {
            log::info!("Server record {cloud_id} removed for {provider}");
        }
        Ok(deleted)
    }

    /// Every local record.
    pub async fn list_servers(&self) -> CoreResult<Vec<Server>> {
        self.store.find_all().await
    }
}
