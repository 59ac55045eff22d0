//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot's command layer and the data (repository) layer.
//! They work with domain models rather than entity models and coordinate the store,
//! the in-memory cache and the remote panels.

pub mod registry;
