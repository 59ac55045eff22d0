//! Panel configuration domain model.
//!
//! `PanelConfig` is the boundary type between the `panel_server` table and the rest of
//! the server. Entity models are converted at the repository boundary and never leak
//! into the registry or the bot layer.

use std::fmt;

use url::Url;

use crate::server::{
    error::{config::ConfigError, internal::InternalError, AppError},
    util::parse::parse_u64_from_string,
};

/// Registry bucket a panel lives in.
///
/// `Global` panels have no owning guild and are visible everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Partition {
    Global,
    Guild(u64),
}

impl From<Option<u64>> for Partition {
    fn from(owner_guild_id: Option<u64>) -> Self {
        match owner_guild_id {
            Some(guild_id) => Self::Guild(guild_id),
            None => Self::Global,
        }
    }
}

/// A configured backend 3x-ui panel.
///
/// `id` is unique across the whole registry regardless of owning guild. Credentials
/// are kept in plaintext, exactly as they are persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Stable user-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Base URL including scheme, e.g. `http://10.0.0.1`.
    pub host: String,
    /// Panel port.
    pub port: u16,
    /// URL prefix the panel is served under, may be empty.
    pub web_base_path: String,
    /// Panel login username.
    pub username: String,
    /// Panel login password.
    pub password: String,
    /// Inactive panels keep their row but get no client.
    pub is_active: bool,
    /// Owning Discord guild; `None` means global.
    pub owner_guild_id: Option<u64>,
    /// Inbound used when a command does not name one.
    pub default_inbound_id: Option<i32>,
}

impl fmt::Debug for PanelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelConfig")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("web_base_path", &self.web_base_path)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("is_active", &self.is_active)
            .field("owner_guild_id", &self.owner_guild_id)
            .field("default_inbound_id", &self.default_inbound_id)
            .finish()
    }
}

impl PanelConfig {
    /// Converts an entity model to a panel config.
    ///
    /// # Arguments
    /// - `entity`: The entity model from the database
    ///
    /// # Returns
    /// - `Ok(PanelConfig)`: The converted config
    /// - `Err(AppError::InternalErr)`: Stored guild id or port cannot be represented
    pub fn from_entity(entity: entity::panel_server::Model) -> Result<Self, AppError> {
        let port = u16::try_from(entity.port).map_err(|source| InternalError::ColumnOutOfRange {
            column: "port",
            value: i64::from(entity.port),
            source,
        })?;

        let owner_guild_id = entity
            .owner_guild_id
            .map(parse_u64_from_string)
            .transpose()?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            host: entity.host,
            port,
            web_base_path: entity.web_base_path,
            username: entity.username,
            password: entity.password,
            is_active: entity.is_active,
            owner_guild_id,
            default_inbound_id: entity.default_inbound_id,
        })
    }

    /// The registry bucket matching the current owner.
    pub fn partition(&self) -> Partition {
        Partition::from(self.owner_guild_id)
    }

    /// Whether the panel is visible from `guild_id`, regardless of activity.
    ///
    /// A `None` guild sees every panel. A guild sees its own panels plus global
    /// ones, never another guild's.
    pub fn is_visible_to(&self, guild_id: Option<u64>) -> bool {
        match (guild_id, self.owner_guild_id) {
            (None, _) | (_, None) => true,
            (Some(guild_id), Some(owner)) => guild_id == owner,
        }
    }

    /// Whether commands issued from `guild_id` may operate on this panel.
    pub fn is_accessible_from(&self, guild_id: Option<u64>) -> bool {
        self.is_active && self.is_visible_to(guild_id)
    }

    /// Builds `host:port/webBasePath` as a URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid_host = || ConfigError::InvalidHost {
            server_id: self.id.clone(),
            host: self.host.clone(),
        };

        let mut url = Url::parse(self.host.trim()).map_err(|_| invalid_host())?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(invalid_host());
        }

        url.set_port(Some(self.port)).map_err(|_| invalid_host())?;

        let path = self.web_base_path.trim().trim_matches('/');
        if path.is_empty() {
            url.set_path("/");
        } else {
            url.set_path(&format!("/{}/", path));
        }

        Ok(url)
    }

    /// Validates the config before it is persisted.
    ///
    /// # Returns
    /// - `Ok(())`: Config can be stored and connected to
    /// - `Err(ConfigError)`: Empty id, blank credentials, zero port or a host without
    ///   an http(s) scheme
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::EmptyServerId);
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidPort {
                server_id: self.id.clone(),
                port: self.port.to_string(),
            });
        }

        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(ConfigError::MissingCredentials(self.id.clone()));
        }

        self.base_url().map(|_| ())
    }

    /// Whether switching from `self` to `other` requires a fresh client and login.
    pub fn connection_differs(&self, other: &PanelConfig) -> bool {
        self.host != other.host
            || self.port != other.port
            || self.web_base_path != other.web_base_path
            || self.username != other.username
            || self.password != other.password
    }

    /// Returns a new config with every field set in `update` replaced.
    pub fn merged(&self, update: &UpdatePanelConfigParam) -> PanelConfig {
        PanelConfig {
            id: self.id.clone(),
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            host: update.host.clone().unwrap_or_else(|| self.host.clone()),
            port: update.port.unwrap_or(self.port),
            web_base_path: update
                .web_base_path
                .clone()
                .unwrap_or_else(|| self.web_base_path.clone()),
            username: update
                .username
                .clone()
                .unwrap_or_else(|| self.username.clone()),
            password: update
                .password
                .clone()
                .unwrap_or_else(|| self.password.clone()),
            is_active: update.is_active.unwrap_or(self.is_active),
            owner_guild_id: update.owner_guild_id.unwrap_or(self.owner_guild_id),
            default_inbound_id: update.default_inbound_id.unwrap_or(self.default_inbound_id),
        }
    }
}

/// Partial update of a panel config.
///
/// `None` leaves a field unchanged. The nested options of `owner_guild_id` and
/// `default_inbound_id` distinguish "leave as is" from "clear".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePanelConfigParam {
    pub name: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub web_base_path: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub owner_guild_id: Option<Option<u64>>,
    pub default_inbound_id: Option<Option<i32>>,
}

impl UpdatePanelConfigParam {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PanelConfig {
        PanelConfig {
            id: "p1".to_string(),
            name: "Panel 1".to_string(),
            host: "http://10.0.0.1".to_string(),
            port: 2053,
            web_base_path: String::new(),
            username: "admin".to_string(),
            password: "secret".to_string(),
            is_active: true,
            owner_guild_id: Some(1),
            default_inbound_id: None,
        }
    }

    /// Tests building the base URL with and without a web base path.
    ///
    /// Expected: port applied, path normalized to a trailing slash
    #[test]
    fn builds_base_url() {
        let mut config = config();
        assert_eq!(config.base_url().unwrap().as_str(), "http://10.0.0.1:2053/");

        config.web_base_path = "panel".to_string();
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "http://10.0.0.1:2053/panel/"
        );

        config.web_base_path = "/nested/path/".to_string();
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "http://10.0.0.1:2053/nested/path/"
        );
    }

    /// Tests that hosts without an http(s) scheme are rejected.
    ///
    /// Expected: Err(InvalidHost) for bare hosts and other schemes
    #[test]
    fn rejects_host_without_scheme() {
        for host in ["10.0.0.1", "ftp://10.0.0.1", "panel.example.com:2053"] {
            let mut config = config();
            config.host = host.to_string();
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidHost { .. })),
                "{host} should be rejected"
            );
        }
    }

    /// Tests the remaining validation rules.
    ///
    /// Expected: Err for empty id, zero port and blank credentials
    #[test]
    fn validates_id_port_and_credentials() {
        assert!(config().validate().is_ok());

        let mut empty_id = config();
        empty_id.id = "  ".to_string();
        assert!(matches!(empty_id.validate(), Err(ConfigError::EmptyServerId)));

        let mut zero_port = config();
        zero_port.port = 0;
        assert!(matches!(
            zero_port.validate(),
            Err(ConfigError::InvalidPort { .. })
        ));

        let mut no_password = config();
        no_password.password = String::new();
        assert!(matches!(
            no_password.validate(),
            Err(ConfigError::MissingCredentials(_))
        ));
    }

    /// Tests guild visibility rules.
    ///
    /// Expected: owner and global visible, other guilds not, inactive never accessible
    #[test]
    fn applies_guild_visibility() {
        let owned = config();
        let mut global = config();
        global.owner_guild_id = None;

        assert!(owned.is_accessible_from(Some(1)));
        assert!(!owned.is_accessible_from(Some(2)));
        assert!(owned.is_accessible_from(None));
        assert!(global.is_accessible_from(Some(2)));

        let mut inactive = config();
        inactive.is_active = false;
        assert!(inactive.is_visible_to(Some(1)));
        assert!(!inactive.is_accessible_from(Some(1)));
    }

    /// Tests merging a partial update.
    ///
    /// Expected: only provided fields replaced, connection change detected
    #[test]
    fn merges_partial_update() {
        let current = config();
        let update = UpdatePanelConfigParam {
            name: Some("Renamed".to_string()),
            owner_guild_id: Some(None),
            ..Default::default()
        };

        let merged = current.merged(&update);
        assert_eq!(merged.name, "Renamed");
        assert_eq!(merged.owner_guild_id, None);
        assert_eq!(merged.password, current.password);
        assert!(!current.connection_differs(&merged));

        let rotated = current.merged(&UpdatePanelConfigParam {
            password: Some("rotated".to_string()),
            ..Default::default()
        });
        assert!(current.connection_differs(&rotated));
    }

    /// Tests that Debug output never contains the password.
    ///
    /// Expected: password replaced by a placeholder
    #[test]
    fn debug_redacts_password() {
        let output = format!("{:?}", config());
        assert!(!output.contains("secret"));
        assert!(output.contains("<redacted>"));
    }
}
