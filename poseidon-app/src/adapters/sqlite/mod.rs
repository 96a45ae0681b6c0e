//! SQLite-backed server record store using `SeaORM`.

mod entity;
mod migration;
mod server_repo;

use std::path::Path;

use poseidon_core::{CoreError, CoreResult};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use migration::Migrator;

/// Server record store kept in a local `SQLite` file.
///
/// `cloud_id` carries a unique index, so a second record for the same remote
/// server is declined rather than duplicated.
pub struct SqliteServerStore {
    db: DatabaseConnection,
}

impl SqliteServerStore {
    /// Open (or create) the database at `db_path` and bring its schema up to date.
    ///
    /// # Errors
    /// Returns `CoreError::Persistence` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::Persistence(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::Persistence(format!("Failed to connect to SQLite: {e}")))?;

        Migrator::up(&db, None)
            .await
            .map_err(|e| CoreError::Persistence(format!("Failed to run migrations: {e}")))?;

        log::info!("Server records stored at {}", db_path.display());
        Ok(Self { db })
    }
}
