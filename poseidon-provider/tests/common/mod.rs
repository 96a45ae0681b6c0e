//! Shared helpers for provider integration tests

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use poseidon_provider::{
    CloudProvider, CreateServerRequest, ProviderCredentials, ProviderKind, create_provider,
};

/// Return early when any of the named environment variables is unset.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: {} is not set", $var);
                return;
            }
        )+
    };
}

/// Assert an `Option` is `Some` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert a `Result` is `Ok` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(res.is_ok(), "{}: {res:?}", format_args!($($msg)+));
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique, recognisable name for servers created by tests.
pub fn generate_test_server_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("poseidon-test-{}", &uuid.to_string()[..8])
}

/// A provider plus the region and catalogue entries tests provision with.
pub struct TestContext {
    pub provider: Arc<dyn CloudProvider>,
    pub region: String,
    pub size: String,
    pub image: String,
    pub ssh_key_id: Option<String>,
}

impl TestContext {
    pub fn mock(kind: ProviderKind) -> Option<Self> {
        let provider = create_provider(ProviderCredentials::Mock {
            kind,
            ip_address: "10.0.0.5".to_string(),
        })
        .ok()?;
        let (region, size, image, ssh_key_id) = match kind {
            ProviderKind::DigitalOcean => (
                "nyc1",
                "s-1vcpu-1gb",
                "ubuntu-22-04-x64",
                Some("512189".to_string()),
            ),
            ProviderKind::Ovh => (
                "GRA11",
                "0f1e3c5a-2d6b-4c8e-9a71-5b3d2f4e6a80",
                "b4e0f5c2-6a1d-4e8b-9c3f-2d7a5e1b8c46",
                None,
            ),
        };
        Some(Self {
            provider,
            region: region.to_string(),
            size: size.to_string(),
            image: image.to_string(),
            ssh_key_id,
        })
    }

    pub fn digitalocean() -> Option<Self> {
        let api_key = env::var("DIGITALOCEAN_API_KEY").ok()?;
        let provider = create_provider(ProviderCredentials::DigitalOcean { api_key }).ok()?;
        Some(Self {
            provider,
            region: env::var("TEST_REGION").unwrap_or_else(|_| "nyc1".to_string()),
            size: env::var("TEST_SIZE").unwrap_or_else(|_| "s-1vcpu-512mb-10gb".to_string()),
            image: env::var("TEST_IMAGE").unwrap_or_else(|_| "ubuntu-22-04-x64".to_string()),
            ssh_key_id: env::var("DIGITALOCEAN_SSH_KEY_ID").ok(),
        })
    }

    pub fn ovh() -> Option<Self> {
        let provider = create_provider(ProviderCredentials::Ovh {
            application_key: env::var("OVH_APPLICATION_KEY").ok()?,
            application_secret: env::var("OVH_APPLICATION_SECRET").ok()?,
            consumer_key: env::var("OVH_CONSUMER_KEY").ok()?,
            project: env::var("OVH_PROJECT").ok()?,
            endpoint: env::var("OVH_ENDPOINT").ok(),
        })
        .ok()?;
        Some(Self {
            provider,
            region: env::var("TEST_REGION").unwrap_or_else(|_| "GRA11".to_string()),
            size: env::var("TEST_SIZE").ok()?,
            image: env::var("TEST_IMAGE").ok()?,
            ssh_key_id: None,
        })
    }

    pub fn create_request(&self, name: &str) -> CreateServerRequest {
        CreateServerRequest {
            name: name.to_string(),
            size: self.size.clone(),
            image: self.image.clone(),
            region: self.region.clone(),
            ssh_key_id: self.ssh_key_id.clone(),
        }
    }

    /// Best-effort removal of a server created by a test.
    pub async fn cleanup_server(&self, cloud_id: &str) {
        if let Err(e) = self.provider.delete_server(cloud_id).await {
            eprintln!("cleanup of {cloud_id} failed: {e}");
        }
    }
}
