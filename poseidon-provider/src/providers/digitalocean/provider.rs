//! DigitalOcean `CloudProvider` implementation

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::providers::common::{
    format_memory_mb, new_internal_id, renamed_server, requested_name,
};
use crate::traits::{CloudProvider, ErrorContext, ProviderErrorMapper, filter_by_region};
use crate::types::{
    CreateServerRequest, FieldType, InstanceSizeBase, ProviderCredentialField, ProviderFeatures,
    ProviderKind, ProviderMetadata, Server, SshKey, UpdateServerRequest,
};

use super::types::{
    ActionEnvelope, CreateDropletBody, DoImage, DoRegion, DoSize, DoSshKey, Droplet,
    DropletActionBody, DropletEnvelope, ImagesEnvelope, RegionsEnvelope, SizesEnvelope,
    SshKeysEnvelope,
};
use super::{DigitalOceanProvider, MAX_PAGE_SIZE};

const FEATURES: ProviderFeatures = ProviderFeatures {
    ssh_keys: true,
    requires_ssh_key: true,
};

impl DigitalOceanProvider {
    /// Provider metadata (type level, no instance needed).
    pub fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderKind::DigitalOcean,
            name: "DigitalOcean".to_string(),
            description: "DigitalOcean droplets".to_string(),
            required_fields: vec![ProviderCredentialField {
                key: "apiKey".to_string(),
                label: "API Key".to_string(),
                field_type: FieldType::Password,
                help_text: Some("Personal access token with read and write scope".to_string()),
            }],
            features: FEATURES,
        }
    }

    /// Convert a droplet into a `Server`
    pub(crate) fn droplet_to_server(droplet: Droplet) -> Server {
        let ip_address = droplet
            .networks
            .v4
            .iter()
            .find(|n| n.network_type == "public")
            .map(|n| n.ip_address.clone());

        let image = droplet
            .image
            .slug
            .or_else(|| droplet.image.id.map(|id| id.to_string()))
            .unwrap_or_default();

        Server {
            id: None,
            cloud_id: droplet.id.to_string(),
            name: droplet.name,
            size: droplet.size_slug,
            image,
            region: droplet.region.slug,
            provider: ProviderKind::DigitalOcean,
            ip_address,
            status: Some(droplet.status),
            created_at: droplet.created_at,
        }
    }

    pub(crate) fn image_to_entry(image: DoImage) -> InstanceSizeBase {
        let mut metadata = BTreeMap::new();
        if let Some(distribution) = image.distribution {
            metadata.insert("distribution".to_string(), distribution);
        }
        if let Some(min_disk) = image.min_disk_size {
            metadata.insert("minDiskSize".to_string(), format!("{min_disk} GB"));
        }

        InstanceSizeBase {
            id: image.slug.unwrap_or_else(|| image.id.to_string()),
            name: image.name,
            regions: image.regions,
            metadata,
        }
    }

    pub(crate) fn size_to_entry(size: DoSize) -> InstanceSizeBase {
        let mut metadata = BTreeMap::from([
            ("memory".to_string(), format_memory_mb(size.memory)),
            ("vcpus".to_string(), size.vcpus.to_string()),
            ("disk".to_string(), format!("{} GB", size.disk)),
            ("priceMonthly".to_string(), format!("{:.2}", size.price_monthly)),
        ]);
        if let Some(description) = size.description.as_ref() {
            metadata.insert("description".to_string(), description.clone());
        }

        InstanceSizeBase {
            name: size.description.unwrap_or_else(|| size.slug.clone()),
            id: size.slug,
            regions: size.regions,
            metadata,
        }
    }

    pub(crate) fn region_to_entry(region: DoRegion) -> InstanceSizeBase {
        InstanceSizeBase {
            id: region.slug,
            name: region.name,
            regions: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub(crate) fn key_to_ssh_key(key: DoSshKey) -> SshKey {
        SshKey {
            id: key.id.to_string(),
            name: key.name,
            fingerprint: key.fingerprint,
            public_key: key.public_key,
        }
    }

    /// DigitalOcean accepts numeric key ids or fingerprints.
    fn ssh_key_value(key: &str) -> Value {
        key.parse::<u64>()
            .map_or_else(|_| Value::String(key.to_string()), Value::from)
    }
}

#[async_trait]
impl CloudProvider for DigitalOceanProvider {
    fn id(&self) -> &'static str {
        "digitalocean"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::DigitalOcean
    }

    fn features(&self) -> ProviderFeatures {
        FEATURES
    }

    async fn create_server(&self, req: &CreateServerRequest) -> Result<Server> {
        let body = CreateDropletBody {
            name: req.name.clone(),
            region: req.region.clone(),
            size: req.size.clone(),
            image: req.image.clone(),
            ssh_keys: req
                .ssh_key_id
                .as_deref()
                .map(Self::ssh_key_value)
                .into_iter()
                .collect(),
        };

        let envelope: DropletEnvelope = self
            .post("/droplets", &body, ErrorContext::default())
            .await?;

        let mut server = Self::droplet_to_server(envelope.droplet);
        server.id = Some(new_internal_id());
        log::info!(
            "[{}] Droplet {} created ({})",
            self.provider_name(),
            server.cloud_id,
            server.name
        );
        Ok(server)
    }

    async fn get_server(&self, cloud_id: &str) -> Result<Server> {
        let envelope: DropletEnvelope = self
            .get(
                &format!("/droplets/{}", urlencoding::encode(cloud_id)),
                ErrorContext::server(cloud_id),
            )
            .await?;
        Ok(Self::droplet_to_server(envelope.droplet))
    }

    async fn update_server(&self, req: &UpdateServerRequest) -> Result<Server> {
        let name = requested_name(self.provider_name(), req)?;
        let body = DropletActionBody {
            action_type: "rename",
            name: Some(name),
        };
        let envelope: ActionEnvelope = self
            .post(
                &format!("/droplets/{}/actions", urlencoding::encode(&req.cloud_id)),
                &body,
                ErrorContext::server(&req.cloud_id),
            )
            .await?;
        log::info!(
            "[{}] Rename action {} for droplet {} is {}",
            self.provider_name(),
            envelope.action.id,
            req.cloud_id,
            envelope.action.status
        );
        // The action completes asynchronously; report the accepted name
        Ok(renamed_server(ProviderKind::DigitalOcean, &req.cloud_id, name))
    }

    async fn delete_server(&self, cloud_id: &str) -> Result<()> {
        self.delete(
            &format!("/droplets/{}", urlencoding::encode(cloud_id)),
            ErrorContext::server(cloud_id),
        )
        .await?;
        log::info!("[{}] Droplet {cloud_id} deleted", self.provider_name());
        Ok(())
    }

    async fn list_images(&self, region: Option<&str>) -> Result<Vec<InstanceSizeBase>> {
        let envelope: ImagesEnvelope = self
            .get(
                &format!("/images?type=distribution&per_page={MAX_PAGE_SIZE}"),
                ErrorContext::default(),
            )
            .await?;
        let images = envelope
            .images
            .into_iter()
            .map(Self::image_to_entry)
            .collect();
        Ok(filter_by_region(images, region))
    }

    async fn list_sizes(&self, region: Option<&str>) -> Result<Vec<InstanceSizeBase>> {
        let envelope: SizesEnvelope = self
            .get(
                &format!("/sizes?per_page={MAX_PAGE_SIZE}"),
                ErrorContext::default(),
            )
            .await?;
        let sizes = envelope
            .sizes
            .into_iter()
            .filter(|s| s.available)
            .map(Self::size_to_entry)
            .collect();
        Ok(filter_by_region(sizes, region))
    }

    async fn list_regions(&self) -> Result<Vec<InstanceSizeBase>> {
        let envelope: RegionsEnvelope = self
            .get(
                &format!("/regions?per_page={MAX_PAGE_SIZE}"),
                ErrorContext::default(),
            )
            .await?;
        Ok(envelope
            .regions
            .into_iter()
            .filter(|r| r.available)
            .map(Self::region_to_entry)
            .collect())
    }

    async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        let envelope: SshKeysEnvelope = self
            .get(
                &format!("/account/keys?per_page={MAX_PAGE_SIZE}"),
                ErrorContext::default(),
            )
            .await?;
        Ok(envelope
            .ssh_keys
            .into_iter()
            .map(Self::key_to_ssh_key)
            .collect())
    }
}
