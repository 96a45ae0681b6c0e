//! Application bootstrap for Poseidon.
//!
//! Provides `AppState` (one `CloudService` per configured provider),
//! `AppStateBuilder` (config and adapter injection), and `StartupHooks`
//! (callbacks for the startup reconciliation pass).

pub mod adapters;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use poseidon_core::{
    CloudConfig, CloudService, CoreError, CoreResult, InMemoryServerRecordStore,
    ServerRecordStore,
};
use poseidon_provider::{
    CloudProvider, ProviderKind, ProviderMetadata, Server, create_provider,
    get_all_provider_metadata,
};

/// Callbacks for the startup sequence.
///
/// Use `NoopStartupHooks` when nothing needs to react to stale records.
#[async_trait::async_trait]
pub trait StartupHooks: Send + Sync {
    /// Called once per provider with local records whose server is gone remotely.
    async fn orphans_found(&self, _kind: ProviderKind, _servers: &[Server]) {}

    /// Called when a provider could not be reconciled at all.
    async fn reconcile_failed(&self, _kind: ProviderKind, _error: &CoreError) {}
}

/// No-op startup hooks.
pub struct NoopStartupHooks;

#[async_trait::async_trait]
impl StartupHooks for NoopStartupHooks {}

/// Application state shared by every frontend.
pub struct AppState {
    /// Shared server record store
    pub store: Arc<dyn ServerRecordStore>,
    services: HashMap<ProviderKind, Arc<CloudService>>,
    /// Whether the startup reconciliation pass has completed
    pub startup_completed: AtomicBool,
}

impl AppState {
    /// The service bound to `kind`.
    ///
    /// # Errors
    /// `CoreError::ProviderNotConfigured` when `kind` was not configured.
    pub fn service(&self, kind: ProviderKind) -> CoreResult<Arc<CloudService>> {
        self.services
            .get(&kind)
            .cloned()
            .ok_or_else(|| CoreError::ProviderNotConfigured(kind.to_string()))
    }

    /// Configured kinds, in display order.
    pub fn configured_kinds(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.services.contains_key(kind))
            .collect()
    }

    /// Credential forms for every supported provider.
    pub fn provider_metadata() -> Vec<ProviderMetadata> {
        get_all_provider_metadata()
    }

    /// Look for local records whose remote server has disappeared.
    ///
    /// Nothing is deleted; hooks decide what to do. Sets `startup_completed`
    /// when done.
    pub async fn run_startup(&self, hooks: &dyn StartupHooks) {
        for kind in self.configured_kinds() {
            let Some(service) = self.services.get(&kind) else {
                continue;
            };
            match service.find_orphans().await {
                Ok(orphans) if orphans.is_empty() => {
                    log::info!("[{kind}] Server records are in sync");
                }
                Ok(orphans) => {
                    log::warn!(
                        "[{kind}] {} server record(s) have no remote server",
                        orphans.len()
                    );
                    hooks.orphans_found(kind, &orphans).await;
                }
                Err(e) => {
                    log::error!("[{kind}] Reconciliation failed: {e}");
                    hooks.reconcile_failed(kind, &e).await;
                }
            }
        }
        self.startup_completed.store(true, Ordering::SeqCst);
    }
}

/// Builder for `AppState`.
///
/// # Optional
/// - `config` : defaults to `CloudConfig::default()` (no providers)
/// - `server_store` : defaults to `InMemoryServerRecordStore`
/// - `provider` : replaces the provider built from config for one kind
pub struct AppStateBuilder {
    config: CloudConfig,
    server_store: Option<Arc<dyn ServerRecordStore>>,
    providers: HashMap<ProviderKind, Arc<dyn CloudProvider>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CloudConfig::default(),
            server_store: None,
            providers: HashMap::new(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: CloudConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn server_store(mut self, store: Arc<dyn ServerRecordStore>) -> Self {
        self.server_store = Some(store);
        self
    }

    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn CloudProvider>) -> Self {
        self.providers.insert(provider.kind(), provider);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::CredentialValidation` if a configured provider has
    /// missing or malformed credentials, or `CoreError::Provider` if its
    /// client cannot be built.
    pub fn build(self) -> CoreResult<AppState> {
        let store = self
            .server_store
            .unwrap_or_else(|| Arc::new(InMemoryServerRecordStore::new()));

        let mut providers = self.providers;
        for kind in self.config.configured_kinds() {
            if providers.contains_key(&kind) {
                continue;
            }
            let credentials = self.config.credentials_for(kind)?;
            providers.insert(kind, create_provider(credentials)?);
        }

        let services = providers
            .into_iter()
            .map(|(kind, provider)| {
                log::info!("[{kind}] Using provider {}", provider.id());
                (
                    kind,
                    Arc::new(CloudService::new(provider, Arc::clone(&store))),
                )
            })
            .collect();

        Ok(AppState {
            store,
            services,
            startup_completed: AtomicBool::new(false),
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
