//! Business logic service layer

mod cloud_manager;
mod cloud_service;
mod server_manager;

pub use cloud_manager::CloudManager;
pub use cloud_service::{CloudService, ServerUpdate};
pub use server_manager::ServerManager;

use poseidon_provider::ProviderError;

use crate::error::CoreError;

/// Log a provider failure with full detail and convert it.
///
/// Expected failures go to `warn`, everything else to `error`.
pub(crate) fn provider_failure(context: &str, err: ProviderError) -> CoreError {
    if err.is_expected() {
        log::warn!("{context}: {err}");
    } else {
        log::error!("{context}: {err}");
    }
    CoreError::from(err)
}

/// `"Attribute X is required"` for one rejected field.
pub(crate) fn required_attribute(field: &str) -> String {
    let name: String = field
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect();
    format!("Attribute {name} is required")
}
