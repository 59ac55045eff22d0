use chrono::Utc;
use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, CreateEmbed, Permissions,
};

use crate::server::{
    bot::command::{
        accessible_server, embeds, expiry_label, quota_label, require_success, Invocation,
    },
    error::AppError,
    model::xui::Client,
};

pub const NAME: &str = "add-client";

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Add a new client to a 3x-ui inbound")
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
            CreateCommandOption::new(CommandOptionType::String, "email", "Client email/username")
                .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::Integer,
            "total-gb",
            "Total GB limit (0 for unlimited)",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Integer,
            "expiry-days",
            "Days until expiry (0 for no expiry)",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Integer,
            "limit-ip",
            "IP connection limit (0 for unlimited)",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Boolean,
            "enabled",
            "Enable the client (default: true)",
        ))
}

pub async fn run(invocation: &Invocation) -> Result<CreateEmbed, AppError> {
    let options = &invocation.options;
    let server_id = options.required_string("server")?;
    let inbound_id = options.required_i32("inbound-id")?;
    let email = options.required_string("email")?;
    let total_gb = options.integer("total-gb").unwrap_or(0);
    let expiry_days = options.integer("expiry-days").unwrap_or(0);
    let limit_ip = options.i32("limit-ip")?.unwrap_or(0);
    let enabled = options.boolean("enabled").unwrap_or(true);

    let server = accessible_server(invocation, server_id).await?;

    let client = Client::new_provisioned(
        email.to_string(),
        total_gb,
        expiry_days,
        limit_ip,
        enabled,
        Utc::now().timestamp_millis(),
    );
    require_success(
        server_id,
        invocation
            .registry
            .add_client(server_id, inbound_id, &client)
            .await?,
    )?;

    tracing::info!(
        server_id = %server_id,
        inbound_id = inbound_id,
        "Added client {}",
        client.email
    );

    Ok(embeds::success_embed("Client Added Successfully")
        .field("Server", server.name, true)
        .field("Email", client.email, true)
        .field("Inbound ID", inbound_id.to_string(), true)
        .field("UUID", client.id, true)
        .field("Total GB", quota_label(total_gb), true)
        .field("Expiry", expiry_label(expiry_days), true)
        .field("Status", embeds::status_label(enabled), true))
}
