//! DigitalOcean Provider

mod error;
mod http;
mod provider;
/// DigitalOcean API-specific request/response types.
pub(crate) mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::utils::log_sanitizer::mask_secret;

pub(crate) const DO_API_BASE: &str = "https://api.digitalocean.com/v2";
/// Largest `per_page` the DigitalOcean API accepts.
pub(crate) const MAX_PAGE_SIZE: u32 = 200;

/// DigitalOcean droplet provider.
///
/// Authenticates with a personal access token sent as a bearer token.
///
/// ```rust,no_run
/// use poseidon_provider::DigitalOceanProvider;
///
/// let provider = DigitalOceanProvider::new("your-api-key".to_string()).unwrap();
/// ```
pub struct DigitalOceanProvider {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl DigitalOceanProvider {
    /// Create a provider talking to the public DigitalOcean API.
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DO_API_BASE.to_string())
    }

    /// Create a provider talking to a different API root (proxies, test servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        log::debug!(
            "[digitalocean] Using token {} against {base_url}",
            mask_secret(&api_key)
        );
        Ok(Self {
            client: create_http_client("digitalocean")?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}
