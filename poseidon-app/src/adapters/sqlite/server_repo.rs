//! `ServerRecordStore` implementation for `SqliteServerStore`.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, SqlErr};

use poseidon_core::{CoreError, CoreResult, ServerRecordStore};
use poseidon_provider::{ProviderKind, Server};

use super::SqliteServerStore;
use super::entity::server;

impl server::Model {
    fn into_server(self) -> CoreResult<Server> {
        let provider = self
            .provider
            .parse::<ProviderKind>()
            .map_err(|e| CoreError::Persistence(format!("Invalid provider: {e}")))?;

        Ok(Server {
            id: Some(self.id),
            cloud_id: self.cloud_id,
            name: self.name,
            size: self.size,
            image: self.image,
            region: self.region,
            provider,
            ip_address: self.ip_address,
            status: self.status,
            created_at: self.created_at,
        })
    }
}

fn server_to_active_model(server: &Server) -> CoreResult<server::ActiveModel> {
    let id = server.id.clone().ok_or_else(|| {
        CoreError::Persistence(format!("server {} has no internal id", server.cloud_id))
    })?;

    Ok(server::ActiveModel {
        id: Set(id),
        cloud_id: Set(server.cloud_id.clone()),
        name: Set(server.name.clone()),
        size: Set(server.size.clone()),
        image: Set(server.image.clone()),
        region: Set(server.region.clone()),
        provider: Set(server.provider.as_str().to_string()),
        ip_address: Set(server.ip_address.clone()),
        status: Set(server.status.clone()),
        created_at: Set(server.created_at.clone()),
    })
}

#[async_trait]
impl ServerRecordStore for SqliteServerStore {
    async fn insert(&self, server: &Server) -> CoreResult<bool> {
        let active_model = server_to_active_model(server)?;

        match server::Entity::insert(active_model).exec(&self.db).await {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                log::warn!(
                    "Server {} is already recorded for {}",
                    server.cloud_id,
                    server.provider
                );
                Ok(false)
            }
            Err(e) => Err(CoreError::Persistence(format!("Failed to insert server: {e}"))),
        }
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Server>> {
        let row = server::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::Persistence(format!("Failed to query server: {e}")))?;

        row.map(server::Model::into_server).transpose()
    }

    async fn find_by_cloud_id(
        &self,
        provider: ProviderKind,
        cloud_id: &str,
    ) -> CoreResult<Option<Server>> {
        let row = server::Entity::find()
            .filter(server::Column::Provider.eq(provider.as_str()))
            .filter(server::Column::CloudId.eq(cloud_id))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::Persistence(format!("Failed to query server: {e}")))?;

        row.map(server::Model::into_server).transpose()
    }

    async fn delete(&self, provider: ProviderKind, cloud_id: &str) -> CoreResult<bool> {
        let result = server::Entity::delete_many()
            .filter(server::Column::Provider.eq(provider.as_str()))
            .filter(server::Column::CloudId.eq(cloud_id))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::Persistence(format!("Failed to delete server: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn find_all(&self) -> CoreResult<Vec<Server>> {
        let rows = server::Entity::find()
            .order_by_asc(server::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::Persistence(format!("Failed to query servers: {e}")))?;

        rows.into_iter().map(server::Model::into_server).collect()
    }
}
