//! Cloud credentials and mock switches

use std::env;

use serde::{Deserialize, Serialize};

use poseidon_provider::{CredentialValidationError, ProviderCredentials, ProviderKind};

/// Everything needed to build the providers, passed around explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudConfig {
    pub digital_ocean_api_key: Option<String>,
    pub ovh_application_key: Option<String>,
    pub ovh_application_secret: Option<String>,
    pub ovh_customer_key: Option<String>,
    pub ovh_project: Option<String>,
    /// OVH API root; unset means OVH Europe.
    pub ovh_endpoint: Option<String>,
    pub mock_digital_ocean: bool,
    pub mock_ovh: bool,
    /// Address reported by mocked providers.
    pub mock_ip_address: Option<String>,
}

impl CloudConfig {
    /// Read `POSEIDON_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (environment, tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let flag = |key: &str| {
            lookup(key).is_some_and(|v| {
                matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
            })
        };

        Self {
            digital_ocean_api_key: text("POSEIDON_DIGITALOCEAN_API_KEY"),
            ovh_application_key: text("POSEIDON_OVH_APPLICATION_KEY"),
            ovh_application_secret: text("POSEIDON_OVH_APPLICATION_SECRET"),
            ovh_customer_key: text("POSEIDON_OVH_CUSTOMER_KEY"),
            ovh_project: text("POSEIDON_OVH_PROJECT"),
            ovh_endpoint: text("POSEIDON_OVH_ENDPOINT"),
            mock_digital_ocean: flag("POSEIDON_MOCK_DIGITALOCEAN"),
            mock_ovh: flag("POSEIDON_MOCK_OVH"),
            mock_ip_address: text("POSEIDON_MOCK_IP_ADDRESS"),
        }
    }

    /// Whether `kind` is served by the network-free double.
    pub fn is_mocked(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::DigitalOcean => self.mock_digital_ocean,
            ProviderKind::Ovh => self.mock_ovh,
        }
    }

    /// Credentials for `kind`, checked for missing or malformed fields.
    pub fn credentials_for(
        &self,
        kind: ProviderKind,
    ) -> Result<ProviderCredentials, CredentialValidationError> {
        let credentials = if self.is_mocked(kind) {
            ProviderCredentials::Mock {
                kind,
                ip_address: required(
                    kind,
                    self.mock_ip_address.as_deref(),
                    "mockIpAddress",
                    "Mock IP Address",
                )?,
            }
        } else {
            match kind {
                ProviderKind::DigitalOcean => ProviderCredentials::DigitalOcean {
                    api_key: required(
                        kind,
                        self.digital_ocean_api_key.as_deref(),
                        "apiKey",
                        "API Key",
                    )?,
                },
                ProviderKind::Ovh => ProviderCredentials::Ovh {
                    application_key: required(
                        kind,
                        self.ovh_application_key.as_deref(),
                        "applicationKey",
                        "Application Key",
                    )?,
                    application_secret: required(
                        kind,
                        self.ovh_application_secret.as_deref(),
                        "applicationSecret",
                        "Application Secret",
                    )?,
                    consumer_key: required(
                        kind,
                        self.ovh_customer_key.as_deref(),
                        "consumerKey",
                        "Consumer Key",
                    )?,
                    project: required(kind, self.ovh_project.as_deref(), "project", "Project")?,
                    endpoint: self.ovh_endpoint.clone(),
                },
            }
        };

        credentials.validate()?;
        Ok(credentials)
    }

    /// Kinds with either a mock switch or at least one credential set.
    pub fn configured_kinds(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|&kind| {
                self.is_mocked(kind)
                    || match kind {
                        ProviderKind::DigitalOcean => self.digital_ocean_api_key.is_some(),
                        ProviderKind::Ovh => {
                            self.ovh_application_key.is_some() || self.ovh_project.is_some()
                        }
                    }
            })
            .collect()
    }
}

fn required(
    kind: ProviderKind,
    value: Option<&str>,
    field: &str,
    label: &str,
) -> Result<String, CredentialValidationError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| CredentialValidationError::MissingField {
            provider: kind,
            field: field.to_string(),
            label: label.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_poseidon_variables() {
        let config = CloudConfig::from_lookup(lookup(&[
            ("POSEIDON_DIGITALOCEAN_API_KEY", "dop_v1_x"),
            ("POSEIDON_MOCK_OVH", "true"),
            ("POSEIDON_MOCK_IP_ADDRESS", "10.0.0.5"),
            ("POSEIDON_OVH_PROJECT", "  "),
        ]));
        assert_eq!(config.digital_ocean_api_key.as_deref(), Some("dop_v1_x"));
        assert!(config.mock_ovh);
        assert!(!config.mock_digital_ocean);
        assert_eq!(config.ovh_project, None);
    }

    #[test]
    fn mocked_kind_yields_mock_credentials() {
        let config = CloudConfig {
            mock_digital_ocean: true,
            mock_ip_address: Some("10.0.0.5".to_string()),
            ..CloudConfig::default()
        };
        let creds = config.credentials_for(ProviderKind::DigitalOcean).unwrap();
        assert!(matches!(
            creds,
            ProviderCredentials::Mock { kind: ProviderKind::DigitalOcean, ref ip_address }
                if ip_address == "10.0.0.5"
        ));
    }

    #[test]
    fn mock_needs_an_address() {
        let config = CloudConfig {
            mock_ovh: true,
            ..CloudConfig::default()
        };
        let err = config.credentials_for(ProviderKind::Ovh).unwrap_err();
        assert!(matches!(
            err,
            CredentialValidationError::MissingField { ref field, .. } if field == "mockIpAddress"
        ));
    }

    #[test]
    fn mock_rejects_malformed_address() {
        let config = CloudConfig {
            mock_ovh: true,
            mock_ip_address: Some("not-an-ip".to_string()),
            ..CloudConfig::default()
        };
        let err = config.credentials_for(ProviderKind::Ovh).unwrap_err();
        assert!(matches!(err, CredentialValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn ovh_reports_first_missing_field() {
        let config = CloudConfig {
            ovh_application_key: Some("ak".to_string()),
            ovh_application_secret: Some("as".to_string()),
            ..CloudConfig::default()
        };
        let err = config.credentials_for(ProviderKind::Ovh).unwrap_err();
        assert_eq!(err.to_string(), "[ovh] Missing required field: Consumer Key");
    }

    #[test]
    fn configured_kinds_follow_credentials_and_switches() {
        let config = CloudConfig {
            digital_ocean_api_key: Some("k".to_string()),
            ..CloudConfig::default()
        };
        assert_eq!(config.configured_kinds(), vec![ProviderKind::DigitalOcean]);

        let config = CloudConfig {
            mock_ovh: true,
            ..CloudConfig::default()
        };
        assert_eq!(config.configured_kinds(), vec![ProviderKind::Ovh]);
    }
}
