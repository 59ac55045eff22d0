//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Global active panel with defaults
//! let server = factory::create_panel_server(&db).await?;
//!
//! // Customized panel
//! let server = factory::panel_server::PanelServerFactory::new(&db)
//!     .id("p1")
//!     .owner_guild_id(42)
//!     .active(false)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `panel_server` - Create panel server entities
//! - `helpers` - Unique id generation shared by factories

pub mod helpers;
pub mod panel_server;

pub use panel_server::{create_guild_panel_server, create_panel_server};
