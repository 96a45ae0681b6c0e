//! Cloud provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "digitalocean")]
mod digitalocean;
mod mock;
#[cfg(feature = "ovh")]
mod ovh;

#[cfg(feature = "digitalocean")]
pub use digitalocean::DigitalOceanProvider;
pub use mock::MockProvider;
#[cfg(feature = "ovh")]
pub use ovh::OvhProvider;
