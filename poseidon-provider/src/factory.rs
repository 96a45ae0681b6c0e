//! Provider factory functions and metadata.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::MockProvider;
use crate::traits::CloudProvider;
use crate::types::{ProviderCredentials, ProviderMetadata};

#[cfg(feature = "digitalocean")]
use crate::providers::DigitalOceanProvider;
#[cfg(feature = "ovh")]
use crate::providers::OvhProvider;

/// Creates a [`CloudProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`]
/// variant; `Mock` credentials yield a network-free double of the given kind.
///
/// # Examples
///
/// ```rust,no_run
/// use poseidon_provider::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::DigitalOcean {
///     api_key: "your-token".to_string(),
/// }).unwrap();
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn CloudProvider>> {
    match credentials {
        #[cfg(feature = "digitalocean")]
        ProviderCredentials::DigitalOcean { api_key } => {
            Ok(Arc::new(DigitalOceanProvider::new(api_key)?))
        }
        #[cfg(feature = "ovh")]
        ProviderCredentials::Ovh {
            application_key,
            application_secret,
            consumer_key,
            project,
            endpoint,
        } => Ok(Arc::new(OvhProvider::new(
            application_key,
            application_secret,
            consumer_key,
            project,
            endpoint,
        )?)),
        ProviderCredentials::Mock { kind, ip_address } => {
            Ok(Arc::new(MockProvider::new(kind, ip_address)))
        }
    }
}

/// Returns metadata for all providers enabled via feature flags.
pub fn get_all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![
        #[cfg(feature = "digitalocean")]
        DigitalOceanProvider::metadata(),
        #[cfg(feature = "ovh")]
        OvhProvider::metadata(),
    ]
}
