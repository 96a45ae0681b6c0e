use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    CreateServerRequest, InstanceSizeBase, ProviderFeatures, ProviderKind, Server, SshKey,
    UpdateServerRequest,
};

/// Raw API error as reported by a provider (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status of the failed response, when there was one.
    pub status: Option<u16>,
    /// Provider error code (`"not_found"`, `"Client::NotFound"`, ...).
    pub code: Option<String>,
    /// Original error message.
    pub message: String,
}

impl RawApiError {
    pub fn with_status(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            code,
            message: message.into(),
        }
    }
}

/// Extra information used when mapping an error (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Cloud id the request targeted, for `ServerNotFound`.
    pub cloud_id: Option<String>,
}

impl ErrorContext {
    pub fn server(cloud_id: &str) -> Self {
        Self {
            cloud_id: Some(cloud_id.to_string()),
        }
    }
}

/// Maps raw API errors onto [`ProviderError`] (internal).
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier used in error messages.
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: serialization failure.
    fn serialization_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unmapped error (fallback).
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// A cloud provider that can provision and describe virtual servers.
///
/// Every implementation speaks one provider's API and returns the normalized
/// types of this crate. Implementations keep no state between calls.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// Which cloud this provider talks to.
    fn kind(&self) -> ProviderKind;

    /// Capability flags of this provider instance.
    fn features(&self) -> ProviderFeatures;

    /// Provision a server. The returned server carries a fresh local id.
    async fn create_server(&self, req: &CreateServerRequest) -> Result<Server>;

    /// Fetch a server by cloud id.
    async fn get_server(&self, cloud_id: &str) -> Result<Server>;

    /// Apply the non-empty fields of `req` to the server.
    async fn update_server(&self, req: &UpdateServerRequest) -> Result<Server>;

    /// Destroy a server.
    async fn delete_server(&self, cloud_id: &str) -> Result<()>;

    /// Images, optionally restricted to one region.
    async fn list_images(&self, region: Option<&str>) -> Result<Vec<InstanceSizeBase>>;

    /// Sizes / flavors, optionally restricted to one region.
    async fn list_sizes(&self, region: Option<&str>) -> Result<Vec<InstanceSizeBase>>;

    /// Regions.
    async fn list_regions(&self) -> Result<Vec<InstanceSizeBase>>;

    /// SSH keys registered on the account.
    ///
    /// Providers without key support keep this default and return an empty list.
    async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        Ok(Vec::new())
    }
}

/// Keep only the entries offered in `region`; `None` keeps everything.
pub(crate) fn filter_by_region(
    entries: Vec<InstanceSizeBase>,
    region: Option<&str>,
) -> Vec<InstanceSizeBase> {
    match region.map(str::trim).filter(|r| !r.is_empty()) {
        Some(region) => entries
            .into_iter()
            .filter(|e| e.available_in(region))
            .collect(),
        None => entries,
    }
}
