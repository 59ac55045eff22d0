use crate::server::{
    error::panel::PanelError,
    model::{panel::PanelConfig, xui::Client},
    panel::PanelClient,
};
use serde_json::json;
use test_utils::mock_panel::{inbound_json, session_cookie, MockPanel};


const USERNAME: &str = "admin";
const PASSWORD: &str = "secret";

fn panel_config(panel: &MockPanel) -> PanelConfig {
    PanelConfig {
        id: "p1".to_string(),
        name: "Panel 1".to_string(),
        host: panel.host(),
        port: panel.port(),
        web_base_path: String::new(),
        username: USERNAME.to_string(),
        password: PASSWORD.to_string(),
        is_active: true,
        owner_guild_id: None,
        default_inbound_id: None,
    }
}

fn client_for(panel: &MockPanel) -> PanelClient {
    PanelClient::new(reqwest::Client::new(), panel_config(panel)).unwrap()
}
