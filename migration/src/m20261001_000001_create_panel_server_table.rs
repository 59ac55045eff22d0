use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]

pub struct Migration;

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PanelServer::Table)
                    .if_not_exists()
                    .col(string(PanelServer::Id).primary_key())
                    .col(string(PanelServer::Name))
                    .col(string(PanelServer::Host))
                    .col(integer(PanelServer::Port))
                    .col(string(PanelServer::WebBasePath).default(""))
                    .col(string(PanelServer::Username))
                    .col(string(PanelServer::Password))
                    .col(boolean(PanelServer::IsActive).default(true))
                    .col(string_null(PanelServer::OwnerGuildId))
                    .col(integer_null(PanelServer::DefaultInboundId))
                    .col(timestamp_with_time_zone(PanelServer::CreatedAt))
                    .col(timestamp_with_time_zone(PanelServer::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PanelServer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]

pub enum PanelServer {
    Table,
    Id,
    Name,
    Host,
    Port,
    WebBasePath,
    Username,
    Password,
    IsActive,
    OwnerGuildId,
    DefaultInboundId,
    CreatedAt,
    UpdatedAt,
}
