//! Backend of the relay: panel registry, persistence and the Discord bot.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Bot Layer** (`bot/`) - Gateway event handlers and slash commands rendering embeds
//! - **Service Layer** (`service/`) - The `ServerRegistry` caching panels per guild and
//!   routing calls to them
//! - **Panel Layer** (`panel/`) - Authenticated HTTP client for one 3x-ui panel
//! - **Data Layer** (`data/`) - Database operations on the `panel_server` table
//! - **Model Layer** (`model/`) - Domain models and the panel API wire types
//! - **Error Layer** (`error/`) - Application error types and their classification
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **Startup** (`startup`) - Database connection, migrations and the HTTP client
//! - **Util** (`util/`) - Parsing and formatting helpers
//!
//! # Command Flow
//!
//! 1. **Bot** receives a slash command and builds an `Invocation`
//! 2. **Command** checks access through the registry and reads its options
//! 3. **Service** resolves the panel's client, or fans out over several panels
//! 4. **Panel** logs in when needed and performs the HTTP call
//! 5. **Command** renders the result or the error as an embed

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod panel;
pub mod service;
pub mod startup;
pub mod util;
