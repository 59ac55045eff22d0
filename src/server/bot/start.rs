use serenity::all::{Client, GatewayIntents};

use crate::server::{
    bot::handler::Handler, config::Config, error::AppError, service::registry::ServerRegistry,
};

/// Initializes the Discord bot client.
///
/// Creates the client with its event handler but does not connect. Callers can take
/// the client's shard manager for a graceful shutdown before starting it.
///
/// # Arguments
/// - `config` - Application configuration
/// - `registry` - Panel registry the slash commands operate on
///
/// # Returns
/// - `Ok(Client)` - The configured bot client
/// - `Err(AppError)` - If bot initialization fails
pub async fn init_bot(config: &Config, registry: ServerRegistry) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS;

    let handler = Handler::new(registry, config.command_guild_id);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Connects the bot and runs it until its shards shut down.
///
/// # Arguments
/// - `client` - The Discord client to start
///
/// # Returns
/// - `Ok(())` - The bot shut down cleanly
/// - `Err(AppError)` - The connection failed
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
