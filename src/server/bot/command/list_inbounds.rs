use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, CreateEmbed};

use crate::server::{
    bot::command::{accessible_server, embeds, require_success, Invocation},
    error::AppError,
    util::format::format_bytes,
};

pub const NAME: &str = "list-inbounds";

const MAX_FIELDS: usize = 25;

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("List the inbounds of a 3x-ui server")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "server",
                "Server ID (use /list-servers to see available servers)",
            )
            .required(true),
        )
}

pub async fn run(invocation: &Invocation) -> Result<CreateEmbed, AppError> {
    let server_id = invocation.options.required_string("server")?;
    let server = accessible_server(invocation, server_id).await?;

    let response = require_success(
        server_id,
        invocation.registry.get_inbounds(server_id).await?,
    )?;
    let inbounds = response.obj.unwrap_or_default();

    if inbounds.is_empty() {
        return Ok(embeds::warning_embed("No Inbounds")
            .description(format!("Server **{}** has no inbounds configured.", server.name)));
    }

    let mut embed = embeds::info_embed(format!("📡 Inbounds on {}", server.name))
        .description(format!("{} inbound(s)", inbounds.len()));

    for inbound in inbounds.iter().take(MAX_FIELDS) {
        embed = embed.field(
            format!("#{} {}", inbound.id, inbound.remark),
            format!(
                "Protocol: {}\nPort: {}\nStatus: {}\nClients: {}\nTraffic: ↑ {} ↓ {}",
                inbound.protocol,
                inbound.port,
                embeds::status_label(inbound.enable),
                inbound.client_stats.len(),
                format_bytes(inbound.up),
                format_bytes(inbound.down),
            ),
            true,
        );
    }

    Ok(embed)
}
