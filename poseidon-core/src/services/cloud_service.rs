//! Remote-then-local server flows for one provider

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use poseidon_provider::{CloudProvider, CreateServerRequest, ProviderKind, Server, UpdateServerRequest};

use crate::error::{CoreError, CoreResult};
use crate::services::{CloudManager, ServerManager};
use crate::traits::ServerRecordStore;

/// Update addressed by cloud id or by internal id.
///
/// The cloud id wins when both are given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerUpdate {
    pub id: Option<String>,
    pub cloud_id: Option<String>,
    pub name: Option<String>,
}

/// Combines a [`CloudManager`] and a [`ServerManager`].
///
/// Remote calls always come first. The sequences are not transactional: a
/// local failure after a remote success leaves an orphan, which is logged at
/// `error` with its cloud id.
pub struct CloudService {
    cloud: CloudManager,
    servers: ServerManager,
}

impl CloudService {
    #[must_use]
    pub fn new(provider: Arc<dyn CloudProvider>, store: Arc<dyn ServerRecordStore>) -> Self {
        Self {
            cloud: CloudManager::new(provider),
            servers: ServerManager::new(store),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        self.cloud.kind()
    }

    /// Catalogue and remote-only operations.
    pub fn cloud(&self) -> &CloudManager {
        &self.cloud
    }

    /// Local record operations.
    pub fn servers(&self) -> &ServerManager {
        &self.servers
    }

    /// Create remotely, then record locally.
    ///
    /// A failed remote create records nothing.
    pub async fn create_server(&self, req: &CreateServerRequest) -> CoreResult<Server> {
        let server = self.cloud.create_server(req).await?;

        match self.servers.insert_server(&server).await {
            Ok(true) => Ok(server),
            Ok(false) => {
                log::error!(
                    "Orphaned server {} at {}: local record was declined",
                    server.cloud_id,
                    server.provider
                );
                Err(CoreError::Persistence(format!(
                    "server {} could not be recorded",
                    server.cloud_id
                )))
            }
            Err(e) => {
                log::error!(
                    "Orphaned server {} at {}: {e}",
                    server.cloud_id,
                    server.provider
                );
                Err(e)
            }
        }
    }

    /// Remote state, carrying the internal id of the local record when there is one.
    pub async fn get_server(&self, cloud_id: &str) -> CoreResult<Server> {
        let server = self.cloud.get_server(cloud_id).await?;
        self.merge_local(server).await
    }

    /// Rename a server addressed by cloud id or internal id.
    ///
    /// One remote request. Fields the rename reply leaves blank are filled
    /// from the local record.
    pub async fn update_server(&self, update: &ServerUpdate) -> CoreResult<Server> {
        let cloud_id = self.resolve_cloud_id(update).await?;
        let server = self
            .cloud
            .update_server(&UpdateServerRequest {
                cloud_id,
                name: update.name.clone(),
            })
            .await?;
        self.merge_local(server).await
    }

    /// Delete remotely, then drop the local record.
    pub async fn delete_server(&self, cloud_id: &str) -> CoreResult<()> {
        self.cloud.delete_server(cloud_id).await?;

        match self.servers.delete_server(self.kind(), cloud_id).await {
            Ok(true) => {}
            Ok(false) => log::debug!("Server {cloud_id} had no local record"),
            Err(e) => {
                log::error!("Server {cloud_id} deleted remotely but its record remains: {e}");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Local records of this provider whose server no longer exists remotely.
    ///
    /// Lookups run concurrently. Records whose lookup fails for another reason
    /// are skipped with a warning.
    pub async fn find_orphans(&self) -> CoreResult<Vec<Server>> {
        let kind = self.kind();
        let records: Vec<Server> = self
            .servers
            .list_servers()
            .await?
            .into_iter()
            .filter(|s| s.provider == kind)
            .collect();

        let lookups = records
            .iter()
            .map(|record| self.cloud.get_server(&record.cloud_id));
        let results = join_all(lookups).await;

        let mut orphans = Vec::new();
        for (record, result) in records.into_iter().zip(results) {
            match result {
                Ok(_) => {}
                Err(CoreError::NotFound(_)) => orphans.push(record),
                Err(e) => log::warn!("Could not check server {}: {e}", record.cloud_id),
            }
        }
        if !orphans.is_empty() {
            log::warn!("{} stale server record(s) for {kind}", orphans.len());
        }
        Ok(orphans)
    }

    async fn resolve_cloud_id(&self, update: &ServerUpdate) -> CoreResult<String> {
        if let Some(cloud_id) = update.cloud_id.as_deref().filter(|c| !c.trim().is_empty()) {
            return Ok(cloud_id.to_string());
        }
        let Some(id) = update.id.as_deref().filter(|i| !i.trim().is_empty()) else {
            return Err(CoreError::Validation(vec![
                "No id has been provided".to_string(),
            ]));
        };
        self.servers
            .get_server(id)
            .await?
            .map(|s| s.cloud_id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    async fn merge_local(&self, mut server: Server) -> CoreResult<Server> {
        let Some(local) = self
            .servers
            .get_server_by_cloud_id(self.kind(), &server.cloud_id)
            .await?
        else {
            return Ok(server);
        };

        server.id = server.id.or(local.id);
        for (field, recorded) in [
            (&mut server.size, local.size),
            (&mut server.image, local.image),
            (&mut server.region, local.region),
        ] {
            if field.is_empty() {
                *field = recorded;
            }
        }
        server.ip_address = server.ip_address.or(local.ip_address);
        server.status = server.status.or(local.status);
        server.created_at = server.created_at.or(local.created_at);
        Ok(server)
    }
}
