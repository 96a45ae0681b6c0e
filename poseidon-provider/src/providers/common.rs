//! Helpers shared by provider implementations

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::{ProviderKind, Server, UpdateServerRequest};

// ============ HTTP Client ============

/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build an HTTP client with the default timeouts.
pub fn create_http_client(provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ Normalization ============

/// Generate a fresh local id for a newly provisioned server.
pub fn new_internal_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The name a rename request asks for.
///
/// Blank or absent names are rejected before any request is sent.
pub fn requested_name<'a>(provider: &str, req: &'a UpdateServerRequest) -> Result<&'a str> {
    req.new_name().ok_or_else(|| ProviderError::InvalidParameter {
        provider: provider.to_string(),
        param: "name".to_string(),
        detail: "A non-blank name is required".to_string(),
    })
}

/// The server as confirmed by a rename.
///
/// A rename reply carries no size, image, region or address, so those stay
/// blank for the caller to fill from its own record.
pub fn renamed_server(kind: ProviderKind, cloud_id: &str, name: &str) -> Server {
    Server {
        id: None,
        cloud_id: cloud_id.to_string(),
        name: name.to_string(),
        size: String::new(),
        image: String::new(),
        region: String::new(),
        provider: kind,
        ip_address: None,
        status: None,
        created_at: None,
    }
}

/// Format a memory amount given in MiB ("1024" -> "1 GB", "512" -> "512 MB").
pub fn format_memory_mb(mb: u64) -> String {
    if mb >= 1024 && mb % 1024 == 0 {
        format!("{} GB", mb / 1024)
    } else {
        format!("{mb} MB")
    }
}
