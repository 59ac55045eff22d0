use crate::server::{
    error::{config::ConfigError, ErrorKind},
    model::panel::{PanelConfig, UpdatePanelConfigParam},
    service::registry::{state::RegistryStatus, ServerRegistry},
};
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::json;
use test_utils::{
    builder::TestBuilder,
    factory,
    mock_panel::{inbound_json, session_cookie, MockPanel},
};

mod add_server;
mod delete_server;
mod refresh;

fn registry(db: &DatabaseConnection, fallback: Option<PanelConfig>) -> ServerRegistry {
    ServerRegistry::new(db.clone(), reqwest::Client::new(), fallback)
}

fn panel_config(id: &str, owner_guild_id: Option<u64>) -> PanelConfig {
    PanelConfig {
        id: id.to_string(),
        name: format!("Panel {}", id),
        host: "http://10.0.0.1".to_string(),
        port: 2053,
        web_base_path: String::new(),
        username: "admin".to_string(),
        password: "secret".to_string(),
        is_active: true,
        owner_guild_id,
        default_inbound_id: None,
    }
}

/// Config pointing at a running mock panel.
fn mock_config(panel: &MockPanel, id: &str, owner_guild_id: Option<u64>) -> PanelConfig {
    PanelConfig {
        host: panel.host(),
        port: panel.port(),
        ..panel_config(id, owner_guild_id)
    }
}

/// A local port nothing listens on.
fn unreachable_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
