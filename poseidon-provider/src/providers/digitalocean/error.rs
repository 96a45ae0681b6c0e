//! DigitalOcean error mapping
//!
//! Reference: <https://docs.digitalocean.com/reference/api/api-reference/#section/Introduction/HTTP-Statuses>
//!
//! DigitalOcean reports failures through the HTTP status plus a body of the
//! form `{"id": "not_found", "message": "..."}`, so mapping keys on both.

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::DigitalOceanProvider;

/// Guess which request field a 422 message is about.
fn param_from_message(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    if lower.contains("size") {
        "size"
    } else if lower.contains("region") {
        "region"
    } else if lower.contains("image") {
        "image"
    } else if lower.contains("ssh") || lower.contains("key") {
        "ssh_key_id"
    } else if lower.contains("name") {
        "name"
    } else {
        "general"
    }
}

impl ProviderErrorMapper for DigitalOceanProvider {
    fn provider_name(&self) -> &'static str {
        "digitalocean"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match (raw.status, raw.code.as_deref()) {
            (Some(401), _) | (_, Some("unauthorized")) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            (Some(403), _) | (_, Some("forbidden")) => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // 404 on a droplet path means the droplet is gone
            (Some(404), _) | (_, Some("not_found")) if context.cloud_id.is_some() => {
                ProviderError::ServerNotFound {
                    provider: self.provider_name().to_string(),
                    cloud_id: context.cloud_id.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            // "You have reached the droplet limit" style errors
            (Some(422), _) | (_, Some("unprocessable_entity"))
                if raw.message.to_lowercase().contains("limit") =>
            {
                ProviderError::QuotaExceeded {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            (Some(400 | 422), _) | (_, Some("unprocessable_entity" | "bad_request")) => {
                ProviderError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    param: param_from_message(&raw.message).to_string(),
                    detail: raw.message,
                }
            }

            _ => self.unknown_error(raw),
        }
    }
}
