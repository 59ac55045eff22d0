use serenity::all::{CreateCommand, CreateEmbed};

use crate::server::{bot::command::{embeds, Invocation}, error::AppError};

pub const NAME: &str = "list-servers";

/// Discord caps embeds at 25 fields.
const MAX_FIELDS: usize = 25;

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME).description("List the 3x-ui servers available to this Discord server")
}

pub async fn run(invocation: &Invocation) -> Result<CreateEmbed, AppError> {
    let servers = invocation
        .registry
        .get_accessible_servers(invocation.guild_id)
        .await;

    if servers.is_empty() {
        return Ok(embeds::warning_embed("No Servers Available")
            .description("No active servers are configured for this Discord server."));
    }

    let mut embed = embeds::info_embed("🖥️ Available Servers")
        .description(format!("{} server(s) available", servers.len()));

    for server in servers.iter().take(MAX_FIELDS) {
        let scope = match server.owner_guild_id {
            Some(_) => "This Discord server",
            None => "Global",
        };
        let mut value = format!("Host: {}:{}\nScope: {}", server.host, server.port, scope);
        if let Some(inbound_id) = server.default_inbound_id {
            value.push_str(&format!("\nDefault inbound: {}", inbound_id));
        }

        embed = embed.field(format!("{} (`{}`)", server.name, server.id), value, false);
    }

    Ok(embed)
}
