//! Network-free provider double
//!
//! Mimics the capabilities of one real provider kind, keeps created servers in
//! an in-memory table and reports the configured address for every server.

mod fixtures;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::error::{ProviderError, Result};
use crate::providers::common::{new_internal_id, renamed_server, requested_name};
use crate::traits::{CloudProvider, filter_by_region};
use crate::types::{
    CreateServerRequest, InstanceSizeBase, ProviderFeatures, ProviderKind, Server, SshKey,
    UpdateServerRequest,
};

/// In-memory stand-in for a DigitalOcean or OVH account.
///
/// ```rust
/// use poseidon_provider::{MockProvider, ProviderKind};
///
/// let provider = MockProvider::new(ProviderKind::Ovh, "10.0.0.5");
/// assert_eq!(provider.request_count(), 0);
/// ```
pub struct MockProvider {
    kind: ProviderKind,
    ip_address: String,
    servers: RwLock<HashMap<String, Server>>,
    requests: AtomicUsize,
}

impl MockProvider {
    pub fn new(kind: ProviderKind, ip_address: impl Into<String>) -> Self {
        Self {
            kind,
            ip_address: ip_address.into(),
            servers: RwLock::new(HashMap::new()),
            requests: AtomicUsize::new(0),
        }
    }

    /// Number of provider calls served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Deterministic cloud id for a server of this kind.
    pub fn cloud_id_for(kind: ProviderKind, name: &str, region: &str) -> String {
        let digest = Sha256::digest(format!("{}|{name}|{region}", kind.as_str()).as_bytes());
        format!("mock-{}", &hex::encode(digest)[..12])
    }

    fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn not_found(&self, cloud_id: &str) -> ProviderError {
        ProviderError::ServerNotFound {
            provider: self.id().to_string(),
            cloud_id: cloud_id.to_string(),
            raw_message: None,
        }
    }
}

#[async_trait]
impl CloudProvider for MockProvider {
    fn id(&self) -> &'static str {
        match self.kind {
            ProviderKind::DigitalOcean => "mock-digitalocean",
            ProviderKind::Ovh => "mock-ovh",
        }
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn features(&self) -> ProviderFeatures {
        match self.kind {
            ProviderKind::DigitalOcean => ProviderFeatures {
                ssh_keys: true,
                requires_ssh_key: true,
            },
            ProviderKind::Ovh => ProviderFeatures::default(),
        }
    }

    async fn create_server(&self, req: &CreateServerRequest) -> Result<Server> {
        self.record_request();
        let cloud_id = Self::cloud_id_for(self.kind, &req.name, &req.region);

        let mut servers = self.servers.write().await;
        if servers.contains_key(&cloud_id) {
            return Err(ProviderError::InvalidParameter {
                provider: self.id().to_string(),
                param: "name".to_string(),
                detail: format!("A server named '{}' already exists in {}", req.name, req.region),
            });
        }

        let server = Server {
            id: Some(new_internal_id()),
            cloud_id: cloud_id.clone(),
            name: req.name.clone(),
            size: req.size.clone(),
            image: req.image.clone(),
            region: req.region.clone(),
            provider: self.kind,
            ip_address: Some(self.ip_address.clone()),
            status: Some("active".to_string()),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        servers.insert(cloud_id, Server { id: None, ..server.clone() });
        log::info!("[{}] Server {} created", self.id(), server.cloud_id);
        Ok(server)
    }

    async fn get_server(&self, cloud_id: &str) -> Result<Server> {
        self.record_request();
        self.servers
            .read()
            .await
            .get(cloud_id)
            .cloned()
            .ok_or_else(|| self.not_found(cloud_id))
    }

    async fn update_server(&self, req: &UpdateServerRequest) -> Result<Server> {
        let name = requested_name(self.id(), req)?;
        self.record_request();
        let mut servers = self.servers.write().await;
        let server = servers
            .get_mut(&req.cloud_id)
            .ok_or_else(|| self.not_found(&req.cloud_id))?;
        server.name = name.to_string();
        Ok(renamed_server(self.kind, &req.cloud_id, name))
    }

    async fn delete_server(&self, cloud_id: &str) -> Result<()> {
        self.record_request();
        self.servers
            .write()
            .await
            .remove(cloud_id)
            .map(|_| ())
            .ok_or_else(|| self.not_found(cloud_id))
    }

    async fn list_images(&self, region: Option<&str>) -> Result<Vec<InstanceSizeBase>> {
        self.record_request();
        Ok(filter_by_region(fixtures::images(self.kind), region))
    }

    async fn list_sizes(&self, region: Option<&str>) -> Result<Vec<InstanceSizeBase>> {
        self.record_request();
        Ok(filter_by_region(fixtures::sizes(self.kind), region))
    }

    async fn list_regions(&self) -> Result<Vec<InstanceSizeBase>> {
        self.record_request();
        Ok(fixtures::regions(self.kind))
    }

    async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        self.record_request();
        Ok(match self.kind {
            ProviderKind::DigitalOcean => fixtures::ssh_keys(),
            ProviderKind::Ovh => Vec::new(),
        })
    }
}
