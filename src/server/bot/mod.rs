//! Discord bot exposing the panel registry as slash commands.
//!
//! The bot only needs the `GUILDS` intent: it reacts to slash command interactions
//! and never reads messages or member lists. Commands are registered once the
//! gateway reports ready, either to a single guild when `DISCORD_COMMAND_GUILD_ID`
//! is set or globally.

pub mod command;
pub mod handler;
pub mod start;
