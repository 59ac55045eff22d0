//! Ready event handler for bot initialization.
//!
//! Fired once the bot has connected to Discord's gateway. Slash command definitions
//! are (re)registered here on every connection, which keeps Discord in sync with the
//! command table of the running build.

use serenity::all::{ActivityData, Command, Context, GuildId, Ready};

use crate::server::bot::command::CommandTable;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `commands` - Command table whose definitions are registered
/// - `command_guild_id` - Guild to register to, global registration when `None`
/// - `ctx` - Discord context for the HTTP client and activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(
    commands: &CommandTable,
    command_guild_id: Option<u64>,
    ctx: Context,
    ready: Ready,
) {
    tracing::info!("{} is connected to Discord", ready.user.name);
    ctx.set_activity(Some(ActivityData::watching("3x-ui panels")));

    let definitions = commands.definitions();
    let count = definitions.len();

    let result = match command_guild_id {
        Some(guild_id) => GuildId::new(guild_id)
            .set_commands(&ctx.http, definitions)
            .await
            .map(|_| ()),
        None => Command::set_global_commands(&ctx.http, definitions)
            .await
            .map(|_| ()),
    };

    match (result, command_guild_id) {
        (Ok(()), Some(guild_id)) => {
            tracing::info!(guild_id = guild_id, "Registered {} slash commands", count)
        }
        (Ok(()), None) => tracing::info!("Registered {} global slash commands", count),
        (Err(e), _) => tracing::error!("Failed to register slash commands: {:?}", e),
    }
}
