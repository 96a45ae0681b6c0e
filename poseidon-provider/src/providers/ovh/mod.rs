//! OVH Public Cloud Provider

mod error;
mod http;
mod provider;
mod sign;
/// OVH API-specific request/response types.
pub(crate) mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;

/// OVH Europe API root.
pub(crate) const OVH_EU_ENDPOINT: &str = "https://eu.api.ovh.com/1.0";

/// OVH Public Cloud instance provider.
///
/// Every request is signed with the application secret and consumer key, and
/// all paths live under `/cloud/project/{project}`.
pub struct OvhProvider {
    pub(crate) client: Client,
    pub(crate) application_key: String,
    pub(crate) application_secret: String,
    pub(crate) consumer_key: String,
    pub(crate) project: String,
    pub(crate) endpoint: String,
}

impl OvhProvider {
    /// Create a provider. `endpoint` defaults to OVH Europe.
    pub fn new(
        application_key: String,
        application_secret: String,
        consumer_key: String,
        project: String,
        endpoint: Option<String>,
    ) -> Result<Self> {
        let endpoint = endpoint
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| OVH_EU_ENDPOINT.to_string());
        Ok(Self {
            client: create_http_client("ovh")?,
            application_key,
            application_secret,
            consumer_key,
            project,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Path of a project-scoped resource.
    pub(crate) fn project_path(&self, resource: &str) -> String {
        format!(
            "/cloud/project/{}/{resource}",
            urlencoding::encode(&self.project)
        )
    }
}
