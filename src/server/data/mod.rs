//! Database repository layer.
//!
//! Repositories wrap SeaORM queries against a borrowed `DatabaseConnection` and return
//! entity models. Conversion to domain models happens in the service layer.

pub mod panel_server;

#[cfg(test)]
mod test;
