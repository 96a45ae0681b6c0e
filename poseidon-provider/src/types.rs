use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============ Provider Types ============

/// Identifies which cloud a server lives in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// DigitalOcean droplets.
    DigitalOcean,
    /// OVH Public Cloud instances.
    Ovh,
}

impl ProviderKind {
    /// All provider kinds, in display order.
    pub const ALL: [Self; 2] = [Self::DigitalOcean, Self::Ovh];

    /// Stable lowercase identifier, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DigitalOcean => "digitalocean",
            Self::Ovh => "ovh",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "digitalocean" | "do" => Ok(Self::DigitalOcean),
            "ovh" => Ok(Self::Ovh),
            other => Err(format!("unknown provider kind: {other}")),
        }
    }
}

// ============ Server Types ============

/// A virtual server, normalized across providers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Local identity. Assigned when the server is provisioned through this
    /// library; `None` on values read back from a provider.
    pub id: Option<String>,
    /// Identifier issued by the provider.
    pub cloud_id: String,
    /// Server name (hostname).
    pub name: String,
    /// Size / flavor slug.
    pub size: String,
    /// Image slug.
    pub image: String,
    /// Region slug.
    pub region: String,
    /// Provider hosting the server.
    pub provider: ProviderKind,
    /// Public IPv4 address, once known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Provider-reported status (`new`, `active`, `BUILD`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Creation time as reported by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Normalized description of an image, size, or region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSizeBase {
    /// Slug or provider id used when creating servers.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Regions this entry is available in. Empty for region entries themselves.
    #[serde(default)]
    pub regions: Vec<String>,
    /// Provider-specific attributes (memory, vcpus, distribution, price, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl InstanceSizeBase {
    /// Whether this entry is offered in `region`.
    pub fn available_in(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r.eq_ignore_ascii_case(region))
    }
}

/// An SSH public key registered at the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SshKey {
    /// Provider id of the key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Key fingerprint.
    pub fingerprint: String,
    /// Public key material.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

/// Request to provision a server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServerRequest {
    /// Server name.
    pub name: String,
    /// Size / flavor slug.
    pub size: String,
    /// Image slug.
    pub image: String,
    /// Region slug.
    pub region: String,
    /// SSH key to install. Providers without key support ignore it.
    #[serde(default)]
    pub ssh_key_id: Option<String>,
}

impl CreateServerRequest {
    /// Names of every required field that is blank.
    ///
    /// `ssh_key_id` counts as required only when `require_ssh_key` is set.
    pub fn missing_fields(&self, require_ssh_key: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (field, value) in [
            ("name", self.name.as_str()),
            ("size", self.size.as_str()),
            ("image", self.image.as_str()),
            ("region", self.region.as_str()),
        ] {
            if value.trim().is_empty() {
                missing.push(field);
            }
        }
        if require_ssh_key && self.ssh_key_id.as_deref().is_none_or(|k| k.trim().is_empty()) {
            missing.push("ssh_key_id");
        }
        missing
    }
}

/// Partial update of a server. Only non-empty fields are sent to the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServerRequest {
    /// Cloud id of the server to update.
    pub cloud_id: String,
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
}

impl UpdateServerRequest {
    /// The new name, if one was given and is not blank.
    pub fn new_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// Whether the request carries any change at all.
    pub fn has_changes(&self) -> bool {
        self.new_name().is_some()
    }
}

// ============ Provider Metadata ============

/// Input type for a credential field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked secret input.
    Password,
}

/// Describes one credential field a provider needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialField {
    /// Machine-readable field key (e.g., `"apiKey"`).
    pub key: String,
    /// Human-readable label (e.g., `"API Key"`).
    pub label: String,
    /// Input type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Optional help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Capability flags that differ between providers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFeatures {
    /// The provider exposes account SSH keys.
    pub ssh_keys: bool,
    /// Server creation needs an SSH key id.
    pub requires_ssh_key: bool,
}

/// Static description of a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider identifier.
    pub id: ProviderKind,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Credential fields required to authenticate with this provider.
    pub required_fields: Vec<ProviderCredentialField>,
    /// Capability flags.
    pub features: ProviderFeatures,
}

// ============ Credentials ============

/// Validation error for provider credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is absent or blank.
    MissingField {
        /// Which provider the error relates to.
        provider: ProviderKind,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field has an invalid format.
    InvalidFormat {
        /// Which provider the error relates to.
        provider: ProviderKind,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
        /// Description of what's wrong with the format.
        reason: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField {
                provider, label, ..
            } => write!(f, "[{provider}] Missing required field: {label}"),
            Self::InvalidFormat { label, reason, .. } => write!(f, "{label}: {reason}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Type-safe credential container for all supported providers.
///
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate a provider.
///
/// ```json
/// { "provider": "digitalocean", "credentials": { "api_key": "..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// DigitalOcean credentials. Requires feature `digitalocean`.
    #[cfg(feature = "digitalocean")]
    #[serde(rename = "digitalocean")]
    DigitalOcean {
        /// Personal access token.
        api_key: String,
    },

    /// OVH credentials. Requires feature `ovh`.
    #[cfg(feature = "ovh")]
    #[serde(rename = "ovh")]
    Ovh {
        /// Application key.
        application_key: String,
        /// Application secret.
        application_secret: String,
        /// Consumer key bound to the application.
        consumer_key: String,
        /// Public Cloud project id.
        project: String,
        /// API endpoint; `None` selects OVH Europe.
        #[serde(default)]
        endpoint: Option<String>,
    },

    /// Network-free test double standing in for `kind`.
    #[serde(rename = "mock")]
    Mock {
        /// Provider whose capabilities the double mimics.
        kind: ProviderKind,
        /// Address reported for every synthetic server.
        ip_address: String,
    },
}

impl ProviderCredentials {
    /// Provider kind these credentials target.
    pub fn kind(&self) -> ProviderKind {
        match self {
            #[cfg(feature = "digitalocean")]
            Self::DigitalOcean { .. } => ProviderKind::DigitalOcean,
            #[cfg(feature = "ovh")]
            Self::Ovh { .. } => ProviderKind::Ovh,
            Self::Mock { kind, .. } => *kind,
        }
    }

    /// Check that no required field is blank.
    pub fn validate(&self) -> Result<(), CredentialValidationError> {
        let kind = self.kind();
        let fields: Vec<(&str, &str, &str)> = match self {
            #[cfg(feature = "digitalocean")]
            Self::DigitalOcean { api_key } => vec![("apiKey", "API Key", api_key.as_str())],
            #[cfg(feature = "ovh")]
            Self::Ovh {
                application_key,
                application_secret,
                consumer_key,
                project,
                ..
            } => vec![
                ("applicationKey", "Application Key", application_key.as_str()),
                ("applicationSecret", "Application Secret", application_secret.as_str()),
                ("consumerKey", "Consumer Key", consumer_key.as_str()),
                ("project", "Project", project.as_str()),
            ],
            Self::Mock { ip_address, .. } => {
                if ip_address.parse::<std::net::IpAddr>().is_err() {
                    return Err(CredentialValidationError::InvalidFormat {
                        provider: kind,
                        field: "ipAddress".to_string(),
                        label: "Mock IP Address".to_string(),
                        reason: format!("'{ip_address}' is not an IP address"),
                    });
                }
                Vec::new()
            }
        };

        for (key, label, value) in fields {
            if value.trim().is_empty() {
                return Err(CredentialValidationError::MissingField {
                    provider: kind,
                    field: key.to_string(),
                    label: label.to_string(),
                });
            }
        }
        Ok(())
    }
}
