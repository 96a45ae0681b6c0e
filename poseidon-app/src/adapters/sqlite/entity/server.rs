//! `SeaORM` entity for the `servers` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "servers")]
/// One provisioned server.
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub cloud_id: String,
    pub name: String,
    pub size: String,
    pub image: String,
    pub region: String,
    pub provider: String,
    pub ip_address: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
