#![cfg(feature = "sqlite-store")]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `SqliteServerStore`.

use std::sync::Arc;

use poseidon_app::AppStateBuilder;
use poseidon_app::adapters::SqliteServerStore;
use poseidon_core::{CoreError, CreateServerRequest, ServerRecordStore};
use poseidon_provider::{MockProvider, ProviderKind, Server};

// ===== Helpers =====

const OVH: ProviderKind = ProviderKind::Ovh;

async fn create_test_store() -> (SqliteServerStore, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = tmp.path().join("servers.db");
    let store = SqliteServerStore::new(&db_path)
        .await
        .expect("failed to create SqliteServerStore");
    (store, tmp)
}

fn make_server(id: &str, cloud_id: &str, name: &str) -> Server {
    Server {
        id: Some(id.to_string()),
        cloud_id: cloud_id.to_string(),
        name: name.to_string(),
        size: "0f1e3c5a-2d6b-4c8e-9a71-5b3d2f4e6a80".to_string(),
        image: "b4e0f5c2-6a1d-4e8b-9c3f-2d7a5e1b8c46".to_string(),
        region: "GRA11".to_string(),
        provider: ProviderKind::Ovh,
        ip_address: Some("10.0.0.5".to_string()),
        status: Some("ACTIVE".to_string()),
        created_at: None,
    }
}

// ===== ServerRecordStore =====

#[tokio::test]
async fn find_all_empty() {
    let (store, _tmp) = create_test_store().await;
    assert!(store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn insert_then_find_by_either_id() {
    let (store, _tmp) = create_test_store().await;
    let server = make_server("id-1", "cloud-1", "web1");

    assert!(store.insert(&server).await.unwrap());

    assert_eq!(store.find_by_id("id-1").await.unwrap(), Some(server.clone()));
    assert_eq!(
        store.find_by_cloud_id(OVH, "cloud-1").await.unwrap(),
        Some(server)
    );
    assert_eq!(store.find_by_id("missing").await.unwrap(), None);
}

#[tokio::test]
async fn duplicate_cloud_id_is_declined() {
    let (store, _tmp) = create_test_store().await;
    assert!(
        store
            .insert(&make_server("id-1", "cloud-1", "web1"))
            .await
            .unwrap()
    );
    assert!(
        !store
            .insert(&make_server("id-2", "cloud-1", "web1-copy"))
            .await
            .unwrap()
    );
    assert_eq!(store.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_internal_id_is_declined() {
    let (store, _tmp) = create_test_store().await;
    store
        .insert(&make_server("id-1", "cloud-1", "web1"))
        .await
        .unwrap();
    assert!(
        !store
            .insert(&make_server("id-1", "cloud-2", "web2"))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn server_without_internal_id_is_rejected() {
    let (store, _tmp) = create_test_store().await;
    let mut server = make_server("id-1", "cloud-1", "web1");
    server.id = None;

    assert!(matches!(
        store.insert(&server).await,
        Err(CoreError::Persistence(_))
    ));
}

#[tokio::test]
async fn delete_by_cloud_id() {
    let (store, _tmp) = create_test_store().await;
    store
        .insert(&make_server("id-1", "cloud-1", "web1"))
        .await
        .unwrap();

    assert!(store.delete(OVH, "cloud-1").await.unwrap());
    assert!(!store.delete(OVH, "cloud-1").await.unwrap());
    assert_eq!(store.find_by_cloud_id(OVH, "cloud-1").await.unwrap(), None);
}

#[tokio::test]
async fn cloud_id_is_unique_per_provider_only() {
    let (store, _tmp) = create_test_store().await;
    let instance = make_server("id-1", "12345", "web1");
    let mut droplet = make_server("id-2", "12345", "web1");
    droplet.provider = ProviderKind::DigitalOcean;

    assert!(store.insert(&instance).await.unwrap());
    assert!(store.insert(&droplet).await.unwrap());
    assert_eq!(
        store
            .find_by_cloud_id(ProviderKind::DigitalOcean, "12345")
            .await
            .unwrap(),
        Some(droplet.clone())
    );

    assert!(store.delete(OVH, "12345").await.unwrap());
    assert_eq!(store.find_by_cloud_id(OVH, "12345").await.unwrap(), None);
    assert_eq!(store.find_all().await.unwrap(), vec![droplet]);
}

#[tokio::test]
async fn find_all_is_ordered_by_name() {
    let (store, _tmp) = create_test_store().await;
    store
        .insert(&make_server("id-b", "cloud-b", "beta"))
        .await
        .unwrap();
    store
        .insert(&make_server("id-a", "cloud-a", "alpha"))
        .await
        .unwrap();

    let names: Vec<String> = store
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}

#[tokio::test]
async fn records_survive_reopening() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("nested").join("servers.db");

    {
        let store = SqliteServerStore::new(&db_path).await.unwrap();
        store
            .insert(&make_server("id-1", "cloud-1", "web1"))
            .await
            .unwrap();
    }

    let reopened = SqliteServerStore::new(&db_path).await.unwrap();
    let server = reopened.find_by_id("id-1").await.unwrap().unwrap();
    assert_eq!(server.provider, ProviderKind::Ovh);
    assert_eq!(server.ip_address.as_deref(), Some("10.0.0.5"));
}

// ===== Wired into AppState =====

#[tokio::test]
async fn app_state_records_into_sqlite() {
    let (store, _tmp) = create_test_store().await;
    let store = Arc::new(store);
    let state = AppStateBuilder::new()
        .provider(Arc::new(MockProvider::new(ProviderKind::Ovh, "10.0.0.5")))
        .server_store(store.clone())
        .build()
        .unwrap();

    let created = state
        .service(ProviderKind::Ovh)
        .unwrap()
        .create_server(&CreateServerRequest {
            name: "web1".to_string(),
            size: "0f1e3c5a-2d6b-4c8e-9a71-5b3d2f4e6a80".to_string(),
            image: "b4e0f5c2-6a1d-4e8b-9c3f-2d7a5e1b8c46".to_string(),
            region: "GRA11".to_string(),
            ssh_key_id: None,
        })
        .await
        .unwrap();

    let recorded = store.find_by_cloud_id(OVH, &created.cloud_id).await.unwrap();
    assert_eq!(recorded.and_then(|s| s.id), created.id);
}
