use std::sync::Arc;

use serenity::all::{Context, EventHandler, Interaction, Ready};
use serenity::async_trait;

use crate::server::{bot::command::CommandTable, service::registry::ServerRegistry};

pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub registry: ServerRegistry,
    pub commands: Arc<CommandTable>,
    /// Guild to register commands to instead of registering them globally.
    pub command_guild_id: Option<u64>,
}

impl Handler {
    pub fn new(registry: ServerRegistry, command_guild_id: Option<u64>) -> Self {
        Self {
            registry,
            commands: Arc::new(CommandTable::new()),
            command_guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.commands, self.command_guild_id, ctx, ready).await;
    }

    /// Called for every interaction; only slash commands are handled
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.registry, &self.commands, ctx, interaction)
            .await;
    }
}
