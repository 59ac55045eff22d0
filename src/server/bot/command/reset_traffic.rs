use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, CreateEmbed, Permissions,
};

use crate::server::{
    bot::command::{accessible_server, embeds, require_success, Invocation},
    error::AppError,
};

pub const NAME: &str = "reset-traffic";

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Reset the traffic counters of a client")
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
            CreateCommandOption::new(CommandOptionType::String, "email", "Client email")
                .required(true),
        )
}

pub async fn run(invocation: &Invocation) -> Result<CreateEmbed, AppError> {
    let options = &invocation.options;
    let server_id = options.required_string("server")?;
    let inbound_id = options.required_i32("inbound-id")?;
    let email = options.required_string("email")?;

    let server = accessible_server(invocation, server_id).await?;
    require_success(
        server_id,
        invocation
            .registry
            .reset_client_traffic(server_id, inbound_id, email)
            .await?,
    )?;

    tracing::info!(server_id = %server_id, inbound_id = inbound_id, "Reset traffic of {}", email);

    Ok(embeds::success_embed("Traffic Reset")
        .field("Server", server.name, true)
        .field("Inbound ID", inbound_id.to_string(), true)
        .field("Email", email, true))
}
