//! OVH error mapping
//!
//! OVH answers failures with `{"class": "Client::NotFound", "message": "..."}`.
//! Authentication problems arrive as 401 or as 403 with a credential message,
//! so 403 is split on the message text.

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::OvhProvider;

const CREDENTIAL_MARKERS: [&str; 4] = [
    "invalid application key",
    "credential does not exist",
    "invalid signature",
    "invalid credential",
];

fn param_from_message(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    if lower.contains("flavor") {
        "size"
    } else if lower.contains("image") {
        "image"
    } else if lower.contains("region") {
        "region"
    } else if lower.contains("name") {
        "name"
    } else {
        "general"
    }
}

impl ProviderErrorMapper for OvhProvider {
    fn provider_name(&self) -> &'static str {
        "ovh"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let lower = raw.message.to_lowercase();
        let is_credential_message = CREDENTIAL_MARKERS.iter().any(|m| lower.contains(m));

        match (raw.status, raw.code.as_deref()) {
            (Some(401), _) | (_, Some("Client::Unauthorized")) => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            (Some(403), _) | (_, Some("Client::Forbidden")) if is_credential_message => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            (Some(403), _) | (_, Some("Client::Forbidden")) => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            (Some(404), _) | (_, Some("Client::NotFound")) if context.cloud_id.is_some() => {
                ProviderError::ServerNotFound {
                    provider: self.provider_name().to_string(),
                    cloud_id: context.cloud_id.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            (Some(400), _) | (_, Some("Client::BadRequest")) if lower.contains("quota") => {
                ProviderError::QuotaExceeded {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            (Some(400), _) | (_, Some("Client::BadRequest")) => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: param_from_message(&raw.message).to_string(),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}
