use crate::server::{
    data::panel_server::PanelServerRepository,
    model::panel::{PanelConfig, UpdatePanelConfigParam},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_accessible;
mod get_active;
mod set_active;
mod update;

fn panel_config(id: &str, owner_guild_id: Option<u64>) -> PanelConfig {
    PanelConfig {
        id: id.to_string(),
        name: format!("Panel {}", id),
        host: "http://10.0.0.1".to_string(),
        port: 2053,
        web_base_path: "/panel".to_string(),
        username: "admin".to_string(),
        password: "secret".to_string(),
        is_active: true,
        owner_guild_id,
        default_inbound_id: Some(3),
    }
}
