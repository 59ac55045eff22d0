use std::time::Duration;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::panel::PanelConfig,
    util::parse::parse_port,
};

pub const DEFAULT_PANEL_PORT: u16 = 2053;
const DEFAULT_PANEL_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const FALLBACK_SERVER_ID: &str = "default";
pub const FALLBACK_SERVER_NAME: &str = "Default Server";

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    /// Registers slash commands to this guild only when set.
    pub command_guild_id: Option<u64>,

    /// Single panel described by the legacy `API_*` variables.
    pub fallback_panel: Option<PanelConfig>,

    pub panel_request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required =
            |name: &str| var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let command_guild_id = var("DISCORD_COMMAND_GUILD_ID")
            .map(|value| {
                value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnvVar {
                    name: "DISCORD_COMMAND_GUILD_ID".to_string(),
                    value,
                })
            })
            .transpose()?;

        let panel_request_timeout = match var("PANEL_REQUEST_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidEnvVar {
                        name: "PANEL_REQUEST_TIMEOUT_SECS".to_string(),
                        value,
                    }
                    .into())
                }
            },
            None => Duration::from_secs(DEFAULT_PANEL_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            command_guild_id,
            fallback_panel: fallback_panel(&var)?,
            panel_request_timeout,
        })
    }
}

/// Derives the global fallback panel from `API_HOST`, `API_PORT`, `API_WEBBASEPATH`,
/// `API_USERNAME` and `API_PASSWORD`.
///
/// Returns `None` unless host, username and password are all present.
fn fallback_panel<F>(var: &F) -> Result<Option<PanelConfig>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let (Some(host), Some(username), Some(password)) =
        (var("API_HOST"), var("API_USERNAME"), var("API_PASSWORD"))
    else {
        return Ok(None);
    };

    let port = match var("API_PORT") {
        Some(value) => parse_port(FALLBACK_SERVER_ID, &value)?,
        None => DEFAULT_PANEL_PORT,
    };

    let config = PanelConfig {
        id: FALLBACK_SERVER_ID.to_string(),
        name: FALLBACK_SERVER_NAME.to_string(),
        host,
        port,
        web_base_path: var("API_WEBBASEPATH").unwrap_or_default(),
        username,
        password,
        is_active: true,
        owner_guild_id: None,
        default_inbound_id: None,
    };
    config.validate()?;

    Ok(Some(config))
}
