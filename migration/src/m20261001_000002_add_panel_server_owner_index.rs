use sea_orm_migration::prelude::*;

use crate::m20261001_000001_create_panel_server_table::PanelServer;

#[derive(DeriveMigrationName)]

pub struct Migration;

const INDEX_NAME: &str = "idx_panel_server_owner_guild_id";

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(PanelServer::Table)
                    .col(PanelServer::OwnerGuildId)
                    .col(PanelServer::IsActive)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(INDEX_NAME)
                    .table(PanelServer::Table)
                    .to_owned(),
            )
            .await
    }
}
