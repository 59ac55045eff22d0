//! Panel server factory for creating test panel server rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test panel servers with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::panel_server::PanelServerFactory;
///
/// let server = PanelServerFactory::new(&db)
///     .id("p1")
///     .host("http://127.0.0.1")
///     .port(8080)
///     .owner_guild_id(42)
///     .build()
///     .await?;
/// ```
pub struct PanelServerFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    name: String,
    host: String,
    port: i32,
    web_base_path: String,
    username: String,
    password: String,
    is_active: bool,
    owner_guild_id: Option<String>,
    default_inbound_id: Option<i32>,
}

impl<'a> PanelServerFactory<'a> {
    /// Creates a new PanelServerFactory with default values.
    ///
    /// Defaults:
    /// - id: `"panel-{n}"` where n is auto-incremented
    /// - name: `"Panel {n}"`
    /// - host: `"http://127.0.0.1"`, port `2053`, empty web base path
    /// - credentials: `admin` / `admin`
    /// - active, global, no default inbound
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            id: format!("panel-{}", id),
            name: format!("Panel {}", id),
            host: "http://127.0.0.1".to_string(),
            port: 2053,
            web_base_path: String::new(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            is_active: true,
            owner_guild_id: None,
            default_inbound_id: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: i32) -> Self {
        self.port = port;
        self
    }

    pub fn web_base_path(mut self, web_base_path: impl Into<String>) -> Self {
        self.web_base_path = web_base_path.into();
        self
    }

    /// Sets both login credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets the owning guild, stored as string like every Discord id.
    pub fn owner_guild_id(mut self, guild_id: u64) -> Self {
        self.owner_guild_id = Some(guild_id.to_string());
        self
    }

    pub fn default_inbound_id(mut self, inbound_id: i32) -> Self {
        self.default_inbound_id = Some(inbound_id);
        self
    }

    /// Builds and inserts the panel server entity into the database.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created panel server entity
    /// - `Err(DbErr)` - Database error during insertion
    pub async fn build(self) -> Result<entity::panel_server::Model, DbErr> {
        let now = Utc::now();

        entity::panel_server::ActiveModel {
            id: ActiveValue::Set(self.id),
            name: ActiveValue::Set(self.name),
            host: ActiveValue::Set(self.host),
            port: ActiveValue::Set(self.port),
            web_base_path: ActiveValue::Set(self.web_base_path),
            username: ActiveValue::Set(self.username),
            password: ActiveValue::Set(self.password),
            is_active: ActiveValue::Set(self.is_active),
            owner_guild_id: ActiveValue::Set(self.owner_guild_id),
            default_inbound_id: ActiveValue::Set(self.default_inbound_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a global active panel server with default values.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(Model)` - The created panel server entity
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_panel_server(
    db: &DatabaseConnection,
) -> Result<entity::panel_server::Model, DbErr> {
    PanelServerFactory::new(db).build().await
}

/// Creates an active panel server owned by `guild_id`.
pub async fn create_guild_panel_server(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::panel_server::Model, DbErr> {
    PanelServerFactory::new(db)
        .owner_guild_id(guild_id)
        .build()
        .await
}
