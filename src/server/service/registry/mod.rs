//! Multi-panel registry.
//!
//! `ServerRegistry` is the in-memory index of every configured 3x-ui panel, partitioned
//! by owning guild, together with one `PanelClient` per active panel. It loads from the
//! `panel_server` table on first use, writes every mutation to the store before touching
//! the cache, and decides which guild may act on which panel.
//!
//! Cache entries are replaced whole, never patched, so concurrent readers observe either
//! the old or the new config of a panel.

mod fan_out;
mod proxy;
pub mod state;

#[cfg(test)]
mod test;

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tokio::sync::{Mutex, RwLock};

use crate::server::{
    data::panel_server::PanelServerRepository,
    error::{config::ConfigError, AppError},
    model::panel::{PanelConfig, Partition, UpdatePanelConfigParam},
    panel::PanelClient,
    service::registry::state::{RegistryState, RegistryStatus},
};

/// Registry of configured panels and their live clients.
///
/// Cloning is cheap and every clone shares the same cache.
#[derive(Clone)]
pub struct ServerRegistry {
    db: DatabaseConnection,
    http: reqwest::Client,
    /// Panel derived from process config, used when the store holds no active panel.
    fallback: Option<PanelConfig>,
    init_lock: Arc<Mutex<()>>,
    state: Arc<RwLock<RegistryState>>,
}

impl ServerRegistry {
    /// Creates an uninitialized registry.
    ///
    /// # Arguments
    /// - `db` - Database connection backing the `panel_server` table
    /// - `http` - HTTP client shared by every panel client
    /// - `fallback` - Optional panel used when the store has no active panels
    pub fn new(
        db: DatabaseConnection,
        http: reqwest::Client,
        fallback: Option<PanelConfig>,
    ) -> Self {
        Self {
            db,
            http,
            fallback,
            init_lock: Arc::new(Mutex::new(())),
            state: Arc::new(RwLock::new(RegistryState::default())),
        }
    }

    pub async fn status(&self) -> RegistryStatus {
        self.state.read().await.status
    }

    /// Loads active panels from the store once.
    ///
    /// Later calls return immediately. A failed store read is logged and treated as an
    /// empty store. When no active panel is found the fallback panel is used and
    /// persisted; a failure to persist it is logged and the panel stays usable in
    /// memory. With neither, the registry is ready with zero panels.
    pub async fn initialize(&self) {
        if self.status().await == RegistryStatus::Ready {
            return;
        }

        let _guard = self.init_lock.lock().await;
        if self.status().await == RegistryStatus::Ready {
            return;
        }
        self.state.write().await.status = RegistryStatus::Initializing;

        let mut configs = match self.load_active().await {
            Ok(configs) => configs,
            Err(err) => {
                tracing::warn!("Failed to load panel servers, starting from fallback: {}", err);
                Vec::new()
            }
        };

        if configs.is_empty() {
            configs.extend(self.fallback_for_empty_store().await);
        }

        let mut state = self.state.write().await;
        let rejected = state.reset(configs, &self.http);
        log_rejected(&rejected);
        state.status = RegistryStatus::Ready;

        tracing::info!(
            "Server registry ready with {} panel(s)",
            state.configs().count()
        );
    }

    /// All cached configs across every partition.
    pub async fn get_servers(&self) -> Vec<PanelConfig> {
        self.initialize().await;
        self.state.read().await.configs().cloned().collect()
    }

    /// Cached config with `id`, if any.
    pub async fn get_server(&self, id: &str) -> Option<PanelConfig> {
        self.initialize().await;
        self.state.read().await.get(id).cloned()
    }

    /// Cached config with `id`, or the stored row for panels not in the cache.
    ///
    /// # Returns
    /// - `Ok(PanelConfig)`: Cached or stored config
    /// - `Err(AppError::ServerNotFound)`: Neither cached nor stored
    /// - `Err(AppError::DbErr)`: Store read failed
    pub async fn find_server(&self, id: &str) -> Result<PanelConfig, AppError> {
        match self.get_server(id).await {
            Some(config) => Ok(config),
            None => self.load_one(id).await,
        }
    }

    /// Active panels a guild may operate on.
    ///
    /// `None` returns every active panel. A guild gets its own active panels plus
    /// active global ones.
    pub async fn get_accessible_servers(&self, guild_id: Option<u64>) -> Vec<PanelConfig> {
        self.initialize().await;
        self.state
            .read()
            .await
            .configs()
            .filter(|config| config.is_accessible_from(guild_id))
            .cloned()
            .collect()
    }

    /// Cached panels owned by `guild_id`, active or not.
    pub async fn get_servers_for_guild_cached(&self, guild_id: u64) -> Vec<PanelConfig> {
        self.initialize().await;
        self.state
            .read()
            .await
            .partition(Partition::Guild(guild_id))
            .to_vec()
    }

    /// Returns the panel iff it is accessible from `guild_id`.
    pub async fn validate_access(&self, server_id: &str, guild_id: Option<u64>) -> Option<PanelConfig> {
        self.initialize().await;
        self.state
            .read()
            .await
            .get(server_id)
            .filter(|config| config.is_accessible_from(guild_id))
            .cloned()
    }

    /// Live client of an active panel.
    ///
    /// # Returns
    /// - `Ok(Arc<PanelClient>)`: Client of the active panel
    /// - `Err(AppError::ServerNotFound)`: Unknown id or inactive panel
    pub async fn get_client(&self, server_id: &str) -> Result<Arc<PanelClient>, AppError> {
        self.initialize().await;
        self.state
            .read()
            .await
            .client(server_id)
            .ok_or_else(|| AppError::server_not_found(server_id))
    }

    /// Validates, persists and caches a new panel.
    ///
    /// # Returns
    /// - `Ok(PanelConfig)`: The stored config
    /// - `Err(AppError::ConfigErr)`: Invalid config or an id already in use
    /// - `Err(AppError::DbErr)`: Store write failed; the cache is unchanged
    pub async fn add_server(&self, config: PanelConfig) -> Result<PanelConfig, AppError> {
        self.initialize().await;
        config.validate()?;

        let repo = PanelServerRepository::new(&self.db);
        let cached = self.state.read().await.get(&config.id).is_some();
        if cached || repo.get_by_id(&config.id).await?.is_some() {
            return Err(ConfigError::DuplicateServerId(config.id).into());
        }

        let model = repo.create(&config).await.map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::from(ConfigError::DuplicateServerId(config.id.clone()))
            }
            _ => err.into(),
        })?;
        let stored = PanelConfig::from_entity(model)?;
        self.state.write().await.upsert(stored.clone(), &self.http)?;

        tracing::info!(server_id = %stored.id, "Added panel server {}", stored.name);

        Ok(stored)
    }

    /// Persists a partial update and replaces the cached config.
    ///
    /// The panel's client is rebuilt when host, port, base path or credentials change,
    /// forcing a fresh login on the next call.
    ///
    /// # Returns
    /// - `Ok(PanelConfig)`: The updated config
    /// - `Err(AppError::ServerNotFound)`: No panel with this id
    /// - `Err(AppError::ConfigErr)`: The merged config is invalid
    /// - `Err(AppError::DbErr)`: Store write failed; the cache is unchanged
    pub async fn update_server(
        &self,
        server_id: &str,
        update: UpdatePanelConfigParam,
    ) -> Result<PanelConfig, AppError> {
        self.initialize().await;

        let cached = self.state.read().await.get(server_id).cloned();
        let current = match cached {
            Some(config) => config,
            None => self.load_one(server_id).await?,
        };
        current.merged(&update).validate()?;

        let model = PanelServerRepository::new(&self.db)
            .update(server_id, &update)
            .await
            .map_err(|err| not_found_as(server_id, err))?;
        let stored = PanelConfig::from_entity(model)?;
        self.state.write().await.upsert(stored.clone(), &self.http)?;

        tracing::info!(server_id = %stored.id, "Updated panel server {}", stored.name);

        Ok(stored)
    }

    /// Deletes a panel from the store and drops it with its client.
    ///
    /// # Returns
    /// - `Ok(())`: Panel deleted
    /// - `Err(AppError::ServerNotFound)`: No panel with this id
    /// - `Err(AppError::DbErr)`: Store write failed; the cache is unchanged
    pub async fn delete_server(&self, server_id: &str) -> Result<(), AppError> {
        self.initialize().await;

        let deleted = PanelServerRepository::new(&self.db)
            .delete(server_id)
            .await?;
        let evicted = self.state.write().await.remove(server_id).is_some();
        if !deleted && !evicted {
            return Err(AppError::server_not_found(server_id));
        }

        tracing::info!(server_id = %server_id, "Deleted panel server");

        Ok(())
    }

    /// Persists the active flag and builds or drops the panel's client.
    ///
    /// Panels missing from the cache are looked up in the store, so a panel dropped by
    /// a refresh while inactive can be activated again.
    ///
    /// # Returns
    /// - `Ok(PanelConfig)`: The updated config
    /// - `Err(AppError::ServerNotFound)`: No panel with this id
    /// - `Err(AppError::ConfigErr)`: Activating a panel that cannot get a client; nothing
    ///   is persisted
    /// - `Err(AppError::DbErr)`: Store write failed; the cache is unchanged
    pub async fn set_active(&self, server_id: &str, is_active: bool) -> Result<PanelConfig, AppError> {
        self.initialize().await;

        let current = self.find_server(server_id).await?;
        if is_active {
            PanelConfig {
                is_active,
                ..current
            }
            .validate()?;
        }

        let model = PanelServerRepository::new(&self.db)
            .set_active(server_id, is_active)
            .await
            .map_err(|err| not_found_as(server_id, err))?;
        let stored = PanelConfig::from_entity(model)?;
        self.state.write().await.upsert(stored.clone(), &self.http)?;

        tracing::info!(
            server_id = %stored.id,
            "Panel server {} is now {}",
            stored.name,
            if is_active { "active" } else { "inactive" }
        );

        Ok(stored)
    }

    /// Reloads every active panel from the store.
    ///
    /// The cache is replaced only after a successful read.
    ///
    /// # Returns
    /// - `Ok(usize)`: Number of panels loaded
    /// - `Err(AppError::DbErr)`: Store read failed; the cache is unchanged
    pub async fn refresh(&self) -> Result<usize, AppError> {
        let _guard = self.init_lock.lock().await;

        let configs = self.load_active().await?;

        let mut state = self.state.write().await;
        let rejected = state.reset(configs, &self.http);
        log_rejected(&rejected);
        state.status = RegistryStatus::Ready;

        let count = state.configs().count();
        tracing::info!("Refreshed server registry with {} panel(s)", count);

        Ok(count)
    }

    /// Reloads the active panels owned by one guild.
    ///
    /// Global panels and other guilds' partitions are left as they are.
    ///
    /// # Returns
    /// - `Ok(usize)`: Number of panels loaded for the guild
    /// - `Err(AppError::DbErr)`: Store read failed; the cache is unchanged
    pub async fn refresh_for_guild(&self, guild_id: u64) -> Result<usize, AppError> {
        self.initialize().await;

        let models = PanelServerRepository::new(&self.db)
            .get_active_by_guild(guild_id)
            .await?;
        let configs = convert_models(models);

        let mut state = self.state.write().await;
        let rejected = state.replace_partition(Partition::Guild(guild_id), configs, &self.http);
        log_rejected(&rejected);

        let count = state.partition(Partition::Guild(guild_id)).len();
        tracing::info!(guild_id = guild_id, "Refreshed {} panel(s) for guild", count);

        Ok(count)
    }

    /// Active configs from the store; rows that cannot be converted are skipped.
    async fn load_active(&self) -> Result<Vec<PanelConfig>, DbErr> {
        let models = PanelServerRepository::new(&self.db).get_active().await?;

        Ok(convert_models(models))
    }

    async fn load_one(&self, server_id: &str) -> Result<PanelConfig, AppError> {
        let model = PanelServerRepository::new(&self.db)
            .get_by_id(server_id)
            .await?
            .ok_or_else(|| AppError::server_not_found(server_id))?;

        PanelConfig::from_entity(model)
    }

    /// The fallback panel to use when the store holds no active panel.
    ///
    /// A stored row with the fallback id means the panel was deactivated on purpose,
    /// so no fallback is used. Otherwise the fallback is persisted; a failed write is
    /// logged and the fallback is still used.
    async fn fallback_for_empty_store(&self) -> Option<PanelConfig> {
        let fallback = self.fallback.clone()?;
        let repo = PanelServerRepository::new(&self.db);

        match repo.get_by_id(&fallback.id).await {
            Ok(Some(_)) => {
                tracing::info!(
                    server_id = %fallback.id,
                    "Stored fallback panel server is inactive, not using fallback"
                );
                return None;
            }
            Ok(None) => match repo.create(&fallback).await {
                Ok(_) => {
                    tracing::info!(server_id = %fallback.id, "Persisted fallback panel server")
                }
                Err(err) => tracing::warn!(
                    server_id = %fallback.id,
                    "Failed to persist fallback panel server, using it in memory only: {}",
                    err
                ),
            },
            Err(err) => tracing::warn!(
                server_id = %fallback.id,
                "Failed to look up fallback panel server, using it in memory only: {}",
                err
            ),
        }

        Some(fallback)
    }
}

fn not_found_as(server_id: &str, err: DbErr) -> AppError {
    match err {
        DbErr::RecordNotFound(_) => AppError::server_not_found(server_id),
        other => other.into(),
    }
}

fn convert_models(models: Vec<entity::panel_server::Model>) -> Vec<PanelConfig> {
    models
        .into_iter()
        .filter_map(|model| {
            let id = model.id.clone();
            match PanelConfig::from_entity(model) {
                Ok(config) => Some(config),
                Err(err) => {
                    tracing::error!(server_id = %id, "Skipping stored panel server: {}", err);
                    None
                }
            }
        })
        .collect()
}

fn log_rejected(rejected: &[(PanelConfig, ConfigError)]) {
    for (config, err) in rejected {
        tracing::error!(server_id = %config.id, "Panel server has no usable client: {}", err);
    }
}
