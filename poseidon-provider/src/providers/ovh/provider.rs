//! OVH `CloudProvider` implementation

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::providers::common::{
    format_memory_mb, new_internal_id, renamed_server, requested_name,
};
use crate::traits::{CloudProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{
    CreateServerRequest, FieldType, InstanceSizeBase, ProviderCredentialField, ProviderFeatures,
    ProviderKind, ProviderMetadata, Server, UpdateServerRequest,
};

use super::OvhProvider;
use super::types::{CreateInstanceBody, Flavor, Image, Instance, RenameInstanceBody};

const FEATURES: ProviderFeatures = ProviderFeatures {
    ssh_keys: false,
    requires_ssh_key: false,
};

impl OvhProvider {
    /// Provider metadata (type level, no instance needed).
    pub fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderKind::Ovh,
            name: "OVH".to_string(),
            description: "OVH Public Cloud instances".to_string(),
            required_fields: vec![
                ProviderCredentialField {
                    key: "applicationKey".to_string(),
                    label: "Application Key".to_string(),
                    field_type: FieldType::Text,
                    help_text: None,
                },
                ProviderCredentialField {
                    key: "applicationSecret".to_string(),
                    label: "Application Secret".to_string(),
                    field_type: FieldType::Password,
                    help_text: None,
                },
                ProviderCredentialField {
                    key: "consumerKey".to_string(),
                    label: "Consumer Key".to_string(),
                    field_type: FieldType::Password,
                    help_text: Some("Consumer key validated for /cloud/project/*".to_string()),
                },
                ProviderCredentialField {
                    key: "project".to_string(),
                    label: "Project".to_string(),
                    field_type: FieldType::Text,
                    help_text: Some("Public Cloud project id".to_string()),
                },
            ],
            features: FEATURES,
        }
    }

    /// Convert an instance into a `Server`.
    ///
    /// Size and image are always the catalogue ids, so they match
    /// `list_sizes`/`list_images` whether or not the reply expanded them.
    pub(crate) fn instance_to_server(instance: Instance) -> Server {
        let ip_address = instance
            .ip_addresses
            .iter()
            .find(|a| a.address_type == "public" && a.version == 4)
            .map(|a| a.ip.clone());

        let size = instance
            .flavor_id
            .or_else(|| instance.flavor.map(|f| f.id))
            .unwrap_or_default();
        let image = instance
            .image_id
            .or_else(|| instance.image.map(|i| i.id))
            .unwrap_or_default();

        Server {
            id: None,
            cloud_id: instance.id,
            name: instance.name,
            size,
            image,
            region: instance.region,
            provider: ProviderKind::Ovh,
            ip_address,
            status: Some(instance.status),
            created_at: instance.created,
        }
    }

    pub(crate) fn flavor_to_entry(flavor: Flavor) -> InstanceSizeBase {
        let mut metadata = BTreeMap::from([
            ("memory".to_string(), format_memory_mb(flavor.ram)),
            ("vcpus".to_string(), flavor.vcpus.to_string()),
            ("disk".to_string(), format!("{} GB", flavor.disk)),
        ]);
        if let Some(os_type) = flavor.os_type {
            metadata.insert("osType".to_string(), os_type);
        }

        InstanceSizeBase {
            id: flavor.id,
            name: flavor.name,
            regions: flavor.region.into_iter().collect(),
            metadata,
        }
    }

    pub(crate) fn image_to_entry(image: Image) -> InstanceSizeBase {
        let mut metadata = BTreeMap::new();
        if let Some(os_type) = image.os_type {
            metadata.insert("osType".to_string(), os_type);
        }
        if let Some(min_disk) = image.min_disk {
            metadata.insert("minDiskSize".to_string(), format!("{min_disk} GB"));
        }

        InstanceSizeBase {
            id: image.id,
            name: image.name,
            regions: image.region.into_iter().collect(),
            metadata,
        }
    }

    /// Append `?region=` when a non-blank region is given.
    fn with_region_query(path: String, region: Option<&str>) -> String {
        match region.map(str::trim).filter(|r| !r.is_empty()) {
            Some(region) => format!("{path}?region={}", urlencoding::encode(region)),
            None => path,
        }
    }

    fn instance_path(&self, cloud_id: &str) -> String {
        self.project_path(&format!("instance/{}", urlencoding::encode(cloud_id)))
    }
}

#[async_trait]
impl CloudProvider for OvhProvider {
    fn id(&self) -> &'static str {
        "ovh"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Ovh
    }

    fn features(&self) -> ProviderFeatures {
        FEATURES
    }

    async fn create_server(&self, req: &CreateServerRequest) -> Result<Server> {
        if req.ssh_key_id.is_some() {
            log::debug!("[{}] SSH key ignored on create", self.provider_name());
        }
        let body = CreateInstanceBody {
            name: req.name.clone(),
            flavor_id: req.size.clone(),
            image_id: req.image.clone(),
            region: req.region.clone(),
        };

        let instance: Instance = self
            .post(&self.project_path("instance"), &body, ErrorContext::default())
            .await?;

        let mut server = Self::instance_to_server(instance);
        server.id = Some(new_internal_id());
        log::info!(
            "[{}] Instance {} created ({})",
            self.provider_name(),
            server.cloud_id,
            server.name
        );
        Ok(server)
    }

    async fn get_server(&self, cloud_id: &str) -> Result<Server> {
        let instance: Instance = self
            .get(&self.instance_path(cloud_id), ErrorContext::server(cloud_id))
            .await?;
        Ok(Self::instance_to_server(instance))
    }

    async fn update_server(&self, req: &UpdateServerRequest) -> Result<Server> {
        let name = requested_name(self.provider_name(), req)?;
        self.put(
            &self.instance_path(&req.cloud_id),
            &RenameInstanceBody {
                instance_name: name,
            },
            ErrorContext::server(&req.cloud_id),
        )
        .await?;
        log::info!(
            "[{}] Instance {} renamed to {name}",
            self.provider_name(),
            req.cloud_id
        );
        Ok(renamed_server(ProviderKind::Ovh, &req.cloud_id, name))
    }

    async fn delete_server(&self, cloud_id: &str) -> Result<()> {
        self.delete(&self.instance_path(cloud_id), ErrorContext::server(cloud_id))
            .await?;
        log::info!("[{}] Instance {cloud_id} deleted", self.provider_name());
        Ok(())
    }

    async fn list_images(&self, region: Option<&str>) -> Result<Vec<InstanceSizeBase>> {
        let path = Self::with_region_query(self.project_path("image"), region);
        let images: Vec<Image> = self.get(&path, ErrorContext::default()).await?;
        Ok(images.into_iter().map(Self::image_to_entry).collect())
    }

    async fn list_sizes(&self, region: Option<&str>) -> Result<Vec<InstanceSizeBase>> {
        let path = Self::with_region_query(self.project_path("flavor"), region);
        let flavors: Vec<Flavor> = self.get(&path, ErrorContext::default()).await?;
        Ok(flavors
            .into_iter()
            .filter(|f| f.available)
            .map(Self::flavor_to_entry)
            .collect())
    }

    async fn list_regions(&self) -> Result<Vec<InstanceSizeBase>> {
        let regions: Vec<String> = self
            .get(&self.project_path("region"), ErrorContext::default())
            .await?;
        Ok(regions
            .into_iter()
            .map(|region| InstanceSizeBase {
                name: region.clone(),
                id: region,
                regions: Vec::new(),
                metadata: BTreeMap::new(),
            })
            .collect())
    }
}
