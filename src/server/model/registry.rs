use crate::server::{error::AppError, model::panel::PanelConfig};

/// Outcome of one panel's share of a fan-out operation.
#[derive(Debug)]
pub struct PanelResult<T> {
    pub server_id: String,
    pub server_name: String,
    pub outcome: Result<T, AppError>,
}

impl<T> PanelResult<T> {
    pub fn new(config: &PanelConfig, outcome: Result<T, AppError>) -> Self {
        Self {
            server_id: config.id.clone(),
            server_name: config.name.clone(),
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Connection details of a panel client's config snapshot, without credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub id: String,
    pub name: String,
    pub host: String,
    pub port: u16,
}
