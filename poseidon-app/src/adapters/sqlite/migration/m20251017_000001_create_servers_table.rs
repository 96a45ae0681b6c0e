use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Servers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Servers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Servers::CloudId).string().not_null())
                    .col(ColumnDef::new(Servers::Name).string().not_null())
                    .col(ColumnDef::new(Servers::Size).string().not_null())
                    .col(ColumnDef::new(Servers::Image).string().not_null())
                    .col(ColumnDef::new(Servers::Region).string().not_null())
                    .col(ColumnDef::new(Servers::Provider).string().not_null())
                    .col(ColumnDef::new(Servers::IpAddress).string().null())
                    .col(ColumnDef::new(Servers::Status).string().null())
                    .col(ColumnDef::new(Servers::CreatedAt).string().null())
                    .to_owned(),
            )
            .await?;

        // Cloud ids are only unique within one provider
        manager
            .create_index(
                Index::create()
                    .name("idx_servers_provider_cloud_id")
                    .table(Servers::Table)
                    .col(Servers::Provider)
                    .col(Servers::CloudId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Servers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Servers {
    Table,
    Id,
    CloudId,
    Name,
    Size,
    Image,
    Region,
    Provider,
    IpAddress,
    Status,
    CreatedAt,
}
