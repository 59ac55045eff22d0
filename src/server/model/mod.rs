//! Domain models used across the server.
//!
//! - `panel` - Panel configuration and its partial update param
//! - `registry` - Registry results shared with the command layer
//! - `xui` - Wire types of the 3x-ui panel API

pub mod panel;
pub mod registry;
pub mod xui;
