//! Relay Test Utils
//!
//! Provides shared testing utilities for the relay's repository and registry tests. This
//! crate offers a builder pattern for creating test contexts with in-memory SQLite
//! databases, factories for panel server rows, and a mock 3x-ui panel.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Panel server rows with sensible defaults
//! - **mock_panel**: An `httpmock` server speaking the panel's login and inbound API
//!
//! # Usage
//!
//! ```rust,ignore
//! use entity::prelude::PanelServer;
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_panel_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(PanelServer)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     let server = factory::create_panel_server(db).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod mock_panel;
