//! Validated operations against one bound provider

use std::sync::Arc;

use poseidon_provider::{
    CloudProvider, CreateServerRequest, InstanceSizeBase, ProviderKind, Server, SshKey,
    UpdateServerRequest,
};

use crate::error::{CoreError, CoreResult};
use crate::services::{provider_failure, required_attribute};

/// Cloud operations for a single provider, fixed at construction.
///
/// Requests are validated before anything is sent. Every create, update and
/// delete is exactly one round trip to the provider, with no retries.
pub struct CloudManager {
    provider: Arc<dyn CloudProvider>,
}

impl CloudManager {
    #[must_use]
    pub fn new(provider: Arc<dyn CloudProvider>) -> Self {
        Self { provider }
    }

    /// Kind of the bound provider.
    pub fn kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    /// Provision a server.
    ///
    /// Every blank attribute is reported in one `Validation` error. An SSH key
    /// is required only where the provider needs one and dropped where the
    /// provider has no key support.
    pub async fn create_server(&self, req: &CreateServerRequest) -> CoreResult<Server> {
        let features = self.provider.features();
        let missing = req.missing_fields(features.requires_ssh_key);
        if !missing.is_empty() {
            return Err(CoreError::Validation(
                missing.into_iter().map(required_attribute).collect(),
            ));
        }

        let mut req = req.clone();
        if !features.ssh_keys && req.ssh_key_id.take().is_some() {
            log::debug!("[{}] SSH key omitted, not supported", self.provider.id());
        }

        self.provider
            .create_server(&req)
            .await
            .map_err(|e| provider_failure(&format!("Failed to create server '{}'", req.name), e))
    }

    /// Fetch a server by cloud id.
    pub async fn get_server(&self, cloud_id: &str) -> CoreResult<Server> {
        require_cloud_id(cloud_id)?;
        self.provider
            .get_server(cloud_id)
            .await
            .map_err(|e| provider_failure(&format!("Failed to get server {cloud_id}"), e))
    }

    /// Rename a server.
    ///
    /// The returned server carries the cloud id and the accepted name; fields
    /// the rename reply does not confirm are left blank.
    pub async fn update_server(&self, req: &UpdateServerRequest) -> CoreResult<Server> {
        require_cloud_id(&req.cloud_id)?;
        if !req.has_changes() {
            return Err(CoreError::Validation(vec!["No data provided".to_string()]));
        }
        self.provider.update_server(req).await.map_err(|e| {
            provider_failure(&format!("Failed to update server {}", req.cloud_id), e)
        })
    }

    /// Destroy a server.
    pub async fn delete_server(&self, cloud_id: &str) -> CoreResult<()> {
        require_cloud_id(cloud_id)?;
        self.provider
            .delete_server(cloud_id)
            .await
            .map_err(|e| provider_failure(&format!("Failed to delete server {cloud_id}"), e))
    }

    pub async fn get_available_images(
        &self,
        region: Option<&str>,
    ) -> CoreResult<Vec<InstanceSizeBase>> {
        self.provider
            .list_images(region)
            .await
            .map_err(|e| provider_failure("Failed to get images", e))
    }

    pub async fn get_available_sizes(
        &self,
        region: Option<&str>,
    ) -> CoreResult<Vec<InstanceSizeBase>> {
        self.provider
            .list_sizes(region)
            .await
            .map_err(|e| provider_failure("Failed to get sizes", e))
    }

    pub async fn get_regions(&self) -> CoreResult<Vec<InstanceSizeBase>> {
        self.provider
            .list_regions()
            .await
            .map_err(|e| provider_failure("Failed to get regions", e))
    }

    /// SSH keys of the account; empty where the provider has no key support.
    pub async fn get_ssh_keys(&self) -> CoreResult<Vec<SshKey>> {
        if !self.provider.features().ssh_keys {
            return Ok(Vec::new());
        }
        self.provider
            .list_ssh_keys()
            .await
            .map_err(|e| provider_failure("Failed to get ssh keys", e))
    }
}

fn require_cloud_id(cloud_id: &str) -> CoreResult<()> {
    if cloud_id.trim().is_empty() {
        return Err(CoreError::Validation(vec![required_attribute("cloud_id")]));
    }
    Ok(())
}
