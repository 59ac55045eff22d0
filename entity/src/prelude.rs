pub use super::panel_server::Entity as PanelServer;
