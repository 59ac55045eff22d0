use sea_orm::entity::prelude::*;

/// A configured 3x-ui panel.
///
/// `owner_guild_id` holds the Discord guild snowflake as a string; `None` marks a
/// global panel visible from every guild.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "panel_server")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub host: String,
    pub port: i32,
    pub web_base_path: String,
    pub username: String,
    pub password: String,
    pub is_active: bool,
    pub owner_guild_id: Option<String>,
    pub default_inbound_id: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
