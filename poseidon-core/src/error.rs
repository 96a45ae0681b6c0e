//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

pub use poseidon_provider::{CredentialValidationError, ProviderError};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// One entry per rejected attribute, collected before any remote call.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Server not found, remotely or locally.
    #[error("Server not found: {0}")]
    NotFound(String),

    /// Provider error (converted from the provider crate)
    #[error("{0}")]
    Provider(ProviderError),

    /// Server record store failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// No service is configured for this provider kind.
    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    /// Credential validation errors (structured, field level)
    #[error("{0}")]
    CredentialValidation(CredentialValidationError),
}

impl From<ProviderError> for CoreError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ServerNotFound { cloud_id, .. } => Self::NotFound(cloud_id),
            other => Self::Provider(other),
        }
    }
}

impl From<CredentialValidationError> for CoreError {
    fn from(err: CredentialValidationError) -> Self {
        Self::CredentialValidation(err)
    }
}

impl CoreError {
    /// Whether this is caller-caused (bad input, missing server).
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation(_)
            | Self::NotFound(_)
            | Self::ProviderNotConfigured(_)
            | Self::CredentialValidation(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Persistence(_) => false,
        }
    }

    /// Opaque message for callers outside the process.
    ///
    /// The detailed error is only logged; the outward message depends on the
    /// operation alone.
    #[must_use]
    pub fn public_message(&self, operation: Operation) -> &'static str {
        match self {
            Self::ProviderNotConfigured(_) | Self::CredentialValidation(_) => {
                "Provider is not configured"
            }
            _ => operation.failure_message(),
        }
    }
}

/// Operations exposed to callers, used to pick the public failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateServer,
    GetServer,
    UpdateServer,
    DeleteServer,
    ListImages,
    ListSizes,
    ListRegions,
    ListSshKeys,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::CreateServer => "Failed to create server",
            Self::GetServer => "Failed to get server",
            Self::UpdateServer => "Failed to update server",
            Self::DeleteServer => "Failed to delete server",
            Self::ListImages => "Failed to get images",
            Self::ListSizes => "Failed to get sizes",
            Self::ListRegions => "Failed to get regions",
            Self::ListSshKeys => "Failed to get ssh keys",
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_not_found_becomes_not_found() {
        let err: CoreError = ProviderError::ServerNotFound {
            provider: "ovh".to_string(),
            cloud_id: "i-1".to_string(),
            raw_message: None,
        }
        .into();
        assert!(matches!(err, CoreError::NotFound(ref id) if id == "i-1"));
        assert!(err.is_expected());
    }

    #[test]
    fn other_provider_errors_are_preserved() {
        let err: CoreError = ProviderError::Timeout {
            provider: "digitalocean".to_string(),
            detail: "30s".to_string(),
        }
        .into();
        assert!(matches!(err, CoreError::Provider(ProviderError::Timeout { .. })));
        assert!(!err.is_expected());
    }

    #[test]
    fn validation_lists_every_field() {
        let err = CoreError::Validation(vec![
            "Attribute Name is required".to_string(),
            "Attribute Size is required".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: Attribute Name is required; Attribute Size is required"
        );
    }

    #[test]
    fn public_message_hides_details() {
        let err = CoreError::Persistence("disk full".to_string());
        assert_eq!(
            err.public_message(Operation::CreateServer),
            "Failed to create server"
        );
        assert!(!err.public_message(Operation::CreateServer).contains("disk"));
    }

    #[test]
    fn serializes_with_code_tag() {
        let value = serde_json::to_value(CoreError::NotFound("mock-62ce0f0f832d".to_string()))
            .unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "code": "NotFound", "details": "mock-62ce0f0f832d" })
        );
    }
}
