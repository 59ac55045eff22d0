use chrono::Utc;
use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, CreateEmbed, Permissions,
};

use crate::server::{
    bot::command::{
        accessible_server, embeds, expiry_label, quota_label, require_success, Invocation,
    },
    error::AppError,
    model::xui::{expiry_from_days, gb_to_bytes, generate_sub_id, Client, ClientTraffic},
};

pub const NAME: &str = "update-client";

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Update an existing client of a 3x-ui inbound")
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
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "email",
            "New client email/username",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Integer,
            "total-gb",
            "New total GB limit (0 for unlimited)",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Integer,
            "expiry-days",
            "New days until expiry, counted from now (0 for no expiry)",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Integer,
            "limit-ip",
            "New IP connection limit (0 for unlimited)",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Boolean,
            "enabled",
            "Enable or disable the client",
        ))
}

/// Field changes requested for a client, `None` keeping the current value.
#[derive(Debug, Default)]
pub struct ClientChanges {
    pub email: Option<String>,
    pub total_gb: Option<i64>,
    pub expiry_days: Option<i64>,
    pub limit_ip: Option<i32>,
    pub enabled: Option<bool>,
}

impl ClientChanges {
    /// Applies the changes on top of the client's current traffic record.
    ///
    /// The traffic record carries no IP limit or subscription id, so an unset
    /// `limit_ip` resets to unlimited and a fresh subscription id is issued.
    pub fn apply(&self, uuid: &str, current: &ClientTraffic, now_ms: i64) -> Client {
        Client {
            id: uuid.to_string(),
            flow: String::new(),
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
            limit_ip: self.limit_ip.unwrap_or(0),
            total_gb: self.total_gb.map(gb_to_bytes).unwrap_or(current.total),
            expiry_time: self
                .expiry_days
                .map(|days| expiry_from_days(days, now_ms))
                .unwrap_or(current.expiry_time),
            enable: self.enabled.unwrap_or(current.enable),
            tg_id: String::new(),
            sub_id: generate_sub_id(),
            reset: current.reset,
        }
    }
}

pub async fn run(invocation: &Invocation) -> Result<CreateEmbed, AppError> {
    let options = &invocation.options;
    let server_id = options.required_string("server")?;
    let inbound_id = options.required_i32("inbound-id")?;
    let uuid = options.required_string("uuid")?;
    let changes = ClientChanges {
        email: options.string("email").map(str::to_string),
        total_gb: options.integer("total-gb"),
        expiry_days: options.integer("expiry-days"),
        limit_ip: options.i32("limit-ip")?,
        enabled: options.boolean("enabled"),
    };

    let server = accessible_server(invocation, server_id).await?;
    let registry = &invocation.registry;

    let traffic = require_success(
        server_id,
        registry.get_client_traffic_by_id(server_id, uuid).await?,
    )?;
    let Some(current) = traffic.obj.and_then(|records| records.into_iter().next()) else {
        return Err(AppError::BadRequest(format!(
            "Could not find a client with UUID '{}' on server '{}'",
            uuid, server.name
        )));
    };

    let updated = changes.apply(uuid, &current, Utc::now().timestamp_millis());
    require_success(
        server_id,
        registry
            .update_client(server_id, uuid, inbound_id, &updated)
            .await?,
    )?;

    tracing::info!(server_id = %server_id, "Updated client {}", uuid);

    Ok(embeds::success_embed("Client Updated Successfully")
        .field("Server", server.name, true)
        .field("UUID", uuid, true)
        .field("Email", updated.email, true)
        .field("Inbound ID", inbound_id.to_string(), true)
        .field(
            "Total GB",
            changes
                .total_gb
                .map(quota_label)
                .unwrap_or_else(|| "Unchanged".to_string()),
            true,
        )
        .field(
            "Expiry",
            changes
                .expiry_days
                .map(expiry_label)
                .unwrap_or_else(|| "Unchanged".to_string()),
            true,
        )
        .field("Status", embeds::status_label(updated.enable), true))
}
