use serde_json::{json, Value};
use serenity::all::CreateEmbed;
use test_utils::{
    builder::TestBuilder,
    mock_panel::{inbound_json, session_cookie, MockPanel},
};

use crate::server::{
    bot::command::{
        options::{OptionMap, OptionValue},
        CommandTable, Invocation,
    },
    error::ErrorKind,
    model::panel::PanelConfig,
    service::registry::ServerRegistry,
};

mod dispatch;
mod manage_servers;

const GUILD: u64 = 1111;
const OTHER_GUILD: u64 = 2222;

fn invocation(registry: &ServerRegistry, guild_id: Option<u64>, is_admin: bool) -> Invocation {
    Invocation {
        registry: registry.clone(),
        guild_id,
        user_name: "alice".to_string(),
        is_admin,
        subcommand: None,
        options: OptionMap::new(),
    }
}

fn string(value: &str) -> OptionValue {
    OptionValue::String(value.to_string())
}

fn mock_config(panel: &MockPanel, id: &str, owner_guild_id: Option<u64>) -> PanelConfig {
    PanelConfig {
        id: id.to_string(),
        name: format!("Panel {}", id),
        host: panel.host(),
        port: panel.port(),
        web_base_path: String::new(),
        username: "admin".to_string(),
        password: "secret".to_string(),
        is_active: true,
        owner_guild_id,
        default_inbound_id: None,
    }
}

/// Starts a mock panel accepting `admin`/`secret` and returns it with its cookie.
async fn logged_in_panel(cookie_value: &str) -> (MockPanel, String) {
    let panel = MockPanel::start().await;
    let cookie = session_cookie(cookie_value);
    panel.mock_login("admin", "secret", &cookie).await;
    (panel, cookie)
}

fn embed_json(embed: CreateEmbed) -> Value {
    serde_json::to_value(embed).unwrap()
}

/// Value of the embed field called `name`.
fn field(embed: &Value, name: &str) -> Option<String> {
    embed["fields"].as_array()?.iter().find_map(|field| {
        (field["name"] == name).then(|| field["value"].as_str().unwrap_or_default().to_string())
    })
}

async fn run(table: &CommandTable, name: &str, invocation: &Invocation) -> Value {
    embed_json(table.dispatch(name, invocation).await.unwrap())
}
