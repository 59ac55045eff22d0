use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, CreateEmbed, Permissions,
};

use crate::server::{
    bot::command::{accessible_server, embeds, require_success, Invocation},
    error::AppError,
};

pub const NAME: &str = "delete-client";

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Delete a client from a 3x-ui inbound")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "server", "Server ID")
                .required(true),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::Integer, "inbound-id", "Inbound ID")
                .required(true),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "uuid", "Client UUID")
                .required(true),
        )
}

pub async fn run(invocation: &Invocation) -> Result<CreateEmbed, AppError> {
    let options = &invocation.options;
    let server_id = options.required_string("server")?;
    let inbound_id = options.required_i32("inbound-id")?;
    let uuid = options.required_string("uuid")?;

    let server = accessible_server(invocation, server_id).await?;
    require_success(
        server_id,
        invocation
            .registry
            .delete_client(server_id, inbound_id, uuid)
            .await?,
    )?;

    tracing::info!(server_id = %server_id, inbound_id = inbound_id, "Deleted client {}", uuid);

    Ok(embeds::success_embed("Client Deleted")
        .field("Server", server.name, true)
        .field("Inbound ID", inbound_id.to_string(), true)
        .field("UUID", uuid, true))
}
