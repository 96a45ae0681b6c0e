//! # poseidon-provider
//!
//! One server-provisioning API over several cloud platforms.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [DigitalOcean](https://www.digitalocean.com/) | `digitalocean` | Bearer Token |
//! | [OVH Public Cloud](https://www.ovhcloud.com/en/public-cloud/) | `ovh` | `$1$` SHA-1 request signature |
//! | Mock (always built) | - | none |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: Enable every provider listed above.
//! - **`digitalocean`** / **`ovh`**: Enable a single provider.
//! - **`native-tls`** *(default)* or **`rustls`**: TLS backend for reqwest.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use poseidon_provider::{create_provider, CreateServerRequest, ProviderCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::DigitalOcean {
//!         api_key: "your-token".to_string(),
//!     })?;
//!
//!     for size in provider.list_sizes(Some("nyc1")).await? {
//!         println!("{} ({})", size.id, size.name);
//!     }
//!
//!     let server = provider
//!         .create_server(&CreateServerRequest {
//!             name: "web1".to_string(),
//!             size: "s-1vcpu-1gb".to_string(),
//!             image: "ubuntu-22-04-x64".to_string(),
//!             region: "nyc1".to_string(),
//!             ssh_key_id: Some("512189".to_string()),
//!         })
//!         .await?;
//!     println!("created {} as {}", server.name, server.cloud_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError). Requests
//! are sent once; nothing is retried. [`ProviderError::is_expected`] separates
//! caller mistakes (bad parameters, missing servers) from infrastructure
//! failures.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::{create_provider, get_all_provider_metadata};

// Internal traits (error mapping) are not exported
pub use traits::CloudProvider;

pub use types::{
    CreateServerRequest, CredentialValidationError, FieldType, InstanceSizeBase,
    ProviderCredentialField, ProviderCredentials, ProviderFeatures, ProviderKind,
    ProviderMetadata, Server, SshKey, UpdateServerRequest,
};

pub use providers::MockProvider;

#[cfg(feature = "digitalocean")]
pub use providers::DigitalOceanProvider;

#[cfg(feature = "ovh")]
pub use providers::OvhProvider;
