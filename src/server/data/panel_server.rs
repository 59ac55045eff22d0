use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::model::panel::{PanelConfig, UpdatePanelConfigParam};

/// Durable store of panel configurations keyed by panel id.
pub struct PanelServerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PanelServerRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new panel server row
    ///
    /// # Arguments
    /// - `config`: Panel configuration to persist, guild id stored as string
    ///
    /// # Returns
    /// - `Ok(Model)`: The created row
    /// - `Err(DbErr)`: Database error, including a primary key conflict
    pub async fn create(
        &self,
        config: &PanelConfig,
    ) -> Result<entity::panel_server::Model, DbErr> {
        let now = Utc::now();

        entity::panel_server::ActiveModel {
            id: ActiveValue::Set(config.id.clone()),
            name: ActiveValue::Set(config.name.clone()),
            host: ActiveValue::Set(config.host.clone()),
            port: ActiveValue::Set(i32::from(config.port)),
            web_base_path: ActiveValue::Set(config.web_base_path.clone()),
            username: ActiveValue::Set(config.username.clone()),
            password: ActiveValue::Set(config.password.clone()),
            is_active: ActiveValue::Set(config.is_active),
            owner_guild_id: ActiveValue::Set(config.owner_guild_id.map(|id| id.to_string())),
            default_inbound_id: ActiveValue::Set(config.default_inbound_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }

    /// Gets a panel server by id
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: Row found
    /// - `Ok(None)`: No row with this id
    /// - `Err(DbErr)`: Database error
    pub async fn get_by_id(&self, id: &str) -> Result<Option<entity::panel_server::Model>, DbErr> {
        entity::prelude::PanelServer::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Gets every panel server regardless of activity or owner
    pub async fn get_all(&self) -> Result<Vec<entity::panel_server::Model>, DbErr> {
        ordered(entity::prelude::PanelServer::find())
            .all(self.db)
            .await
    }

    /// Gets all active panel servers
    pub async fn get_active(&self) -> Result<Vec<entity::panel_server::Model>, DbErr> {
        ordered(
            entity::prelude::PanelServer::find()
                .filter(entity::panel_server::Column::IsActive.eq(true)),
        )
        .all(self.db)
        .await
    }

    /// Gets active panel servers owned by a guild, excluding global ones
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID (u64)
    pub async fn get_active_by_guild(
        &self,
        guild_id: u64,
    ) -> Result<Vec<entity::panel_server::Model>, DbErr> {
        ordered(
            entity::prelude::PanelServer::find()
                .filter(entity::panel_server::Column::IsActive.eq(true))
                .filter(entity::panel_server::Column::OwnerGuildId.eq(guild_id.to_string())),
        )
        .all(self.db)
        .await
    }

    /// Gets active panel servers a guild may use: its own plus global ones
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID (u64)
    pub async fn get_accessible(
        &self,
        guild_id: u64,
    ) -> Result<Vec<entity::panel_server::Model>, DbErr> {
        ordered(
            entity::prelude::PanelServer::find()
                .filter(entity::panel_server::Column::IsActive.eq(true))
                .filter(
                    Condition::any()
                        .add(entity::panel_server::Column::OwnerGuildId.is_null())
                        .add(entity::panel_server::Column::OwnerGuildId.eq(guild_id.to_string())),
                ),
        )
        .all(self.db)
        .await
    }

    /// Applies a partial update to a panel server
    ///
    /// Only fields set in `param` are written; `updated_at` is always bumped.
    ///
    /// # Returns
    /// - `Ok(Model)`: The updated row
    /// - `Err(DbErr::RecordNotFound)`: No row with this id
    /// - `Err(DbErr)`: Other database error
    pub async fn update(
        &self,
        id: &str,
        param: &UpdatePanelConfigParam,
    ) -> Result<entity::panel_server::Model, DbErr> {
        let server = self.find_existing(id).await?;

        let mut active_model: entity::panel_server::ActiveModel = server.into();
        if let Some(name) = &param.name {
            active_model.name = ActiveValue::Set(name.clone());
        }
        if let Some(host) = &param.host {
            active_model.host = ActiveValue::Set(host.clone());
        }
        if let Some(port) = param.port {
            active_model.port = ActiveValue::Set(i32::from(port));
        }
        if let Some(web_base_path) = &param.web_base_path {
            active_model.web_base_path = ActiveValue::Set(web_base_path.clone());
        }
        if let Some(username) = &param.username {
            active_model.username = ActiveValue::Set(username.clone());
        }
        if let Some(password) = &param.password {
            active_model.password = ActiveValue::Set(password.clone());
        }
        if let Some(is_active) = param.is_active {
            active_model.is_active = ActiveValue::Set(is_active);
        }
        if let Some(owner_guild_id) = param.owner_guild_id {
            active_model.owner_guild_id = ActiveValue::Set(owner_guild_id.map(|id| id.to_string()));
        }
        if let Some(default_inbound_id) = param.default_inbound_id {
            active_model.default_inbound_id = ActiveValue::Set(default_inbound_id);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        active_model.update(self.db).await
    }

    /// Sets the active flag of a panel server
    ///
    /// # Returns
    /// - `Ok(Model)`: The updated row
    /// - `Err(DbErr::RecordNotFound)`: No row with this id
    pub async fn set_active(
        &self,
        id: &str,
        is_active: bool,
    ) -> Result<entity::panel_server::Model, DbErr> {
        let server = self.find_existing(id).await?;

        let mut active_model: entity::panel_server::ActiveModel = server.into();
        active_model.is_active = ActiveValue::Set(is_active);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        active_model.update(self.db).await
    }

    /// Deletes a panel server
    ///
    /// # Returns
    /// - `Ok(true)`: Row deleted
    /// - `Ok(false)`: No row with this id
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::PanelServer::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn find_existing(&self, id: &str) -> Result<entity::panel_server::Model, DbErr> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Panel server with id {} not found", id)))
    }
}

/// Stable listing order: creation time, then id.
fn ordered(
    select: Select<entity::prelude::PanelServer>,
) -> Select<entity::prelude::PanelServer> {
    select
        .order_by_asc(entity::panel_server::Column::CreatedAt)
        .order_by_asc(entity::panel_server::Column::Id)
}
