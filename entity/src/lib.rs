//! SeaORM entities for the relay's persistent state.

pub mod panel_server;
pub mod prelude;
