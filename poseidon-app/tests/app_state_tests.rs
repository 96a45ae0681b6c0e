#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and the startup reconciliation pass.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use poseidon_app::{AppState, AppStateBuilder, NoopStartupHooks, StartupHooks};
use poseidon_core::{CloudConfig, CoreError, CreateServerRequest, ServerRecordStore};
use poseidon_provider::{CloudProvider, MockProvider, ProviderKind, Server};
use tokio::sync::Mutex;

// ===== Helpers =====

fn mocked_config() -> CloudConfig {
    CloudConfig {
        mock_digital_ocean: true,
        mock_ovh: true,
        mock_ip_address: Some("10.0.0.5".to_string()),
        ..CloudConfig::default()
    }
}

fn do_request(name: &str) -> CreateServerRequest {
    CreateServerRequest {
        name: name.to_string(),
        size: "s-1vcpu-1gb".to_string(),
        image: "ubuntu-22-04-x64".to_string(),
        region: "nyc1".to_string(),
        ssh_key_id: Some("512189".to_string()),
    }
}

/// Records every hook call.
#[derive(Default)]
struct RecordingHooks {
    orphans: Mutex<Vec<(ProviderKind, Vec<Server>)>>,
    failures: Mutex<Vec<ProviderKind>>,
}

#[async_trait]
impl StartupHooks for RecordingHooks {
    async fn orphans_found(&self, kind: ProviderKind, servers: &[Server]) {
        self.orphans.lock().await.push((kind, servers.to_vec()));
    }

    async fn reconcile_failed(&self, kind: ProviderKind, _error: &CoreError) {
        self.failures.lock().await.push(kind);
    }
}

// ===== Builder =====

#[test]
fn empty_config_configures_nothing() {
    let state = AppStateBuilder::new().build().unwrap();
    assert!(state.configured_kinds().is_empty());
    assert!(matches!(
        state.service(ProviderKind::Ovh),
        Err(CoreError::ProviderNotConfigured(ref kind)) if kind == "ovh"
    ));
}

#[test]
fn mocked_config_configures_both_kinds() {
    let state = AppStateBuilder::new().config(mocked_config()).build().unwrap();
    assert_eq!(
        state.configured_kinds(),
        vec![ProviderKind::DigitalOcean, ProviderKind::Ovh]
    );
    assert_eq!(
        state.service(ProviderKind::Ovh).unwrap().kind(),
        ProviderKind::Ovh
    );
}

#[test]
fn live_credentials_build_a_client() {
    let config = CloudConfig {
        digital_ocean_api_key: Some("dop_v1_test".to_string()),
        ..CloudConfig::default()
    };
    let state = AppStateBuilder::new().config(config).build().unwrap();
    assert_eq!(state.configured_kinds(), vec![ProviderKind::DigitalOcean]);
    assert!(state.service(ProviderKind::Ovh).is_err());
}

#[test]
fn incomplete_credentials_fail_the_build() {
    let config = CloudConfig {
        ovh_application_key: Some("ak".to_string()),
        ..CloudConfig::default()
    };
    let err = AppStateBuilder::new().config(config).build().err().unwrap();
    assert!(matches!(err, CoreError::CredentialValidation(_)));
    assert!(err.is_expected());
}

#[test]
fn mock_without_address_fails_the_build() {
    let config = CloudConfig {
        mock_digital_ocean: true,
        ..CloudConfig::default()
    };
    assert!(matches!(
        AppStateBuilder::new().config(config).build(),
        Err(CoreError::CredentialValidation(_))
    ));
}

#[test]
fn injected_provider_wins_over_config() {
    let provider = Arc::new(MockProvider::new(ProviderKind::DigitalOcean, "192.0.2.7"));
    let config = CloudConfig {
        digital_ocean_api_key: Some("dop_v1_test".to_string()),
        ..CloudConfig::default()
    };
    let state = AppStateBuilder::new()
        .config(config)
        .provider(provider)
        .build()
        .unwrap();
    assert_eq!(state.configured_kinds(), vec![ProviderKind::DigitalOcean]);
}

#[test]
fn metadata_lists_every_provider() {
    let metadata = AppState::provider_metadata();
    assert_eq!(metadata.len(), 2);
}

// ===== Services share the store =====

#[tokio::test]
async fn created_servers_land_in_the_shared_store() {
    let state = AppStateBuilder::new().config(mocked_config()).build().unwrap();
    let service = state.service(ProviderKind::DigitalOcean).unwrap();

    let server = service.create_server(&do_request("web1")).await.unwrap();
    assert_eq!(server.ip_address.as_deref(), Some("10.0.0.5"));

    let recorded = state
        .store
        .find_by_cloud_id(ProviderKind::DigitalOcean, &server.cloud_id)
        .await
        .unwrap();
    assert_eq!(recorded.and_then(|s| s.id), server.id);
}

// ===== Startup =====

#[tokio::test]
async fn startup_without_records_completes() {
    let state = AppStateBuilder::new().config(mocked_config()).build().unwrap();
    let hooks = RecordingHooks::default();

    state.run_startup(&hooks).await;

    assert!(state.startup_completed.load(Ordering::SeqCst));
    assert!(hooks.orphans.lock().await.is_empty());
    assert!(hooks.failures.lock().await.is_empty());
}

#[tokio::test]
async fn startup_reports_records_missing_remotely() {
    let provider = Arc::new(MockProvider::new(ProviderKind::DigitalOcean, "10.0.0.5"));
    let state = AppStateBuilder::new()
        .provider(provider.clone())
        .build()
        .unwrap();
    let service = state.service(ProviderKind::DigitalOcean).unwrap();

    service.create_server(&do_request("kept")).await.unwrap();
    let gone = service.create_server(&do_request("gone")).await.unwrap();
    provider.delete_server(&gone.cloud_id).await.unwrap();

    let hooks = RecordingHooks::default();
    state.run_startup(&hooks).await;

    let orphans = hooks.orphans.lock().await;
    assert_eq!(orphans.len(), 1);
    let (kind, servers) = &orphans[0];
    assert_eq!(*kind, ProviderKind::DigitalOcean);
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0].cloud_id, gone.cloud_id);

    // Reconciliation only reports
    assert!(
        state
            .store
            .find_by_cloud_id(ProviderKind::DigitalOcean, &gone.cloud_id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn noop_hooks_still_mark_startup_complete() {
    let state = AppStateBuilder::new().build().unwrap();
    state.run_startup(&NoopStartupHooks).await;
    assert!(state.startup_completed.load(Ordering::SeqCst));
}
