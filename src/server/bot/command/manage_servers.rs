//! `/manage-servers`: panel administration for the invoking guild.
//!
//! Panels added here are owned by the guild. Edit, remove and toggle only act on
//! panels the guild owns; global panels are managed outside Discord.

use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, CreateEmbed, Permissions,
};

use crate::server::{
    bot::command::{accessible_server, embeds, options::OptionMap, Invocation},
    config::DEFAULT_PANEL_PORT,
    error::AppError,
    model::panel::{PanelConfig, UpdatePanelConfigParam},
    util::parse::parse_port,
};

pub const NAME: &str = "manage-servers";

/// Discord's limit on the length of an embed field value.
const FIELD_VALUE_LIMIT: usize = 1024;

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Manage the 3x-ui servers of this Discord server")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .dm_permission(false)
        .add_option(connection_options(
            CreateCommandOption::new(CommandOptionType::SubCommand, "add", "Add a new server")
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::String, "server-id", "Unique server ID")
                        .required(true),
                ),
            true,
        ))
        .add_option(connection_options(
            CreateCommandOption::new(CommandOptionType::SubCommand, "edit", "Edit a server")
                .add_sub_option(server_id_option()),
            false,
        ))
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "remove", "Remove a server")
                .add_sub_option(server_id_option()),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "toggle",
                "Activate or deactivate a server",
            )
            .add_sub_option(server_id_option())
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Boolean, "active", "Whether the server is active")
                    .required(true),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "refresh",
            "Reload this Discord server's servers from the database",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "test",
                "Test the connection to one or all servers",
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::String,
                "server-id",
                "Server ID, all accessible servers when omitted",
            )),
        )
}

fn server_id_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "server-id", "Server ID").required(true)
}

/// Adds the connection options, required for `add` and optional for `edit`.
fn connection_options(subcommand: CreateCommandOption, required: bool) -> CreateCommandOption {
    subcommand
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::String, "name", "Display name")
                .required(required),
        )
        .add_sub_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "host",
                "Panel host including scheme, e.g. https://vpn.example.com",
            )
            .required(required),
        )
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::String, "username", "Panel username")
                .required(required),
        )
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::String, "password", "Panel password")
                .required(required),
        )
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::Integer, "port", "Panel port (default 2053)")
                .min_int_value(1)
                .max_int_value(65535),
        )
        .add_sub_option(CreateCommandOption::new(
            CommandOptionType::String,
            "web-base-path",
            "Panel web base path",
        ))
        .add_sub_option(CreateCommandOption::new(
            CommandOptionType::Integer,
            "default-inbound-id",
            "Inbound used when none is given",
        ))
}

pub async fn run(invocation: &Invocation) -> Result<CreateEmbed, AppError> {
    let Some(guild_id) = invocation.guild_id else {
        return Err(AppError::BadRequest(
            "Servers can only be managed from within a Discord server".to_string(),
        ));
    };

    match invocation.subcommand.as_deref() {
        Some("add") => add(invocation, guild_id).await,
        Some("edit") => edit(invocation, guild_id).await,
        Some("remove") => remove(invocation, guild_id).await,
        Some("toggle") => toggle(invocation, guild_id).await,
        Some("refresh") => refresh(invocation, guild_id).await,
        Some("test") => test(invocation, guild_id).await,
        other => Err(AppError::BadRequest(format!(
            "Unknown subcommand '{}'",
            other.unwrap_or_default()
        ))),
    }
}

async fn add(invocation: &Invocation, guild_id: u64) -> Result<CreateEmbed, AppError> {
    let options = &invocation.options;
    let id = options.required_string("server-id")?;

    let config = PanelConfig {
        id: id.to_string(),
        name: options.required_string("name")?.to_string(),
        host: options.required_string("host")?.trim_end_matches('/').to_string(),
        port: port(options, id)?.unwrap_or(DEFAULT_PANEL_PORT),
        web_base_path: options.string("web-base-path").unwrap_or_default().to_string(),
        username: options.required_string("username")?.to_string(),
        password: options.required_string("password")?.to_string(),
        is_active: true,
        owner_guild_id: Some(guild_id),
        default_inbound_id: options.i32("default-inbound-id")?,
    };

    let stored = invocation.registry.add_server(config).await?;

    Ok(embeds::success_embed("Server Added")
        .field("Server ID", stored.id, true)
        .field("Name", stored.name, true)
        .field("Host", format!("{}:{}", stored.host, stored.port), true)
        .field("Discord Server", guild_id.to_string(), true))
}

async fn edit(invocation: &Invocation, guild_id: u64) -> Result<CreateEmbed, AppError> {
    let options = &invocation.options;
    let id = options.required_string("server-id")?;
    owned_server(invocation, id, guild_id).await?;

    let update = UpdatePanelConfigParam {
        name: options.string("name").map(str::to_string),
        host: options
            .string("host")
            .map(|host| host.trim_end_matches('/').to_string()),
        port: port(options, id)?,
        web_base_path: options.string("web-base-path").map(str::to_string),
        username: options.string("username").map(str::to_string),
        password: options.string("password").map(str::to_string),
        default_inbound_id: options.i32("default-inbound-id")?.map(Some),
        ..Default::default()
    };
    if update.is_empty() {
        return Err(AppError::BadRequest("No changes were provided".to_string()));
    }

    let updated = invocation.registry.update_server(id, update).await?;

    Ok(embeds::success_embed("Server Updated")
        .field("Server ID", updated.id, true)
        .field("Name", updated.name, true)
        .field("Host", format!("{}:{}", updated.host, updated.port), true))
}

async fn remove(invocation: &Invocation, guild_id: u64) -> Result<CreateEmbed, AppError> {
    let id = invocation.options.required_string("server-id")?;
    let server = owned_server(invocation, id, guild_id).await?;

    invocation.registry.delete_server(id).await?;

    Ok(embeds::success_embed("Server Removed")
        .field("Server ID", server.id, true)
        .field("Name", server.name, true))
}

async fn toggle(invocation: &Invocation, guild_id: u64) -> Result<CreateEmbed, AppError> {
    let options = &invocation.options;
    let id = options.required_string("server-id")?;
    let active = options.required_boolean("active")?;
    owned_server(invocation, id, guild_id).await?;

    let updated = invocation.registry.set_active(id, active).await?;

    Ok(embeds::success_embed(if active {
        "Server Activated"
    } else {
        "Server Deactivated"
    })
    .field("Server ID", updated.id, true)
    .field("Name", updated.name, true)
    .field("Status", embeds::status_label(updated.is_active), true))
}

async fn refresh(invocation: &Invocation, guild_id: u64) -> Result<CreateEmbed, AppError> {
    let registry = &invocation.registry;
    let count = registry.refresh_for_guild(guild_id).await?;

    let servers = registry.get_servers_for_guild_cached(guild_id).await;
    let listing = if servers.is_empty() {
        "No servers are owned by this Discord server".to_string()
    } else {
        server_listing(&servers)
    };

    Ok(embeds::success_embed("Servers Refreshed")
        .description(format!("Loaded {} active server(s)", count))
        .field("Servers", listing, false))
}

async fn test(invocation: &Invocation, guild_id: u64) -> Result<CreateEmbed, AppError> {
    let registry = &invocation.registry;

    if let Some(id) = invocation.options.string("server-id") {
        let server = accessible_server(invocation, id).await?;
        let inbounds = registry.test_connection(id).await?;

        return Ok(embeds::success_embed("Connection Successful")
            .field("Server", server.name, true)
            .field("Inbounds", inbounds.to_string(), true));
    }

    let results = registry.test_all_connections_for_guild(guild_id).await;
    if results.is_empty() {
        return Err(AppError::BadRequest(
            "No servers are available for this Discord server".to_string(),
        ));
    }

    let failed = results.iter().filter(|result| !result.is_success()).count();
    let mut embed = if failed == 0 {
        embeds::success_embed("All Connections Successful")
    } else {
        embeds::warning_embed(format!("{} of {} Connections Failed", failed, results.len()))
    };

    for result in results.iter().take(25) {
        let value = match &result.outcome {
            Ok(inbounds) => format!("✅ {} inbound(s)", inbounds),
            Err(err) => format!("❌ {}", err.user_message()),
        };
        embed = embed.field(
            format!("{} (`{}`)", result.server_name, result.server_id),
            value,
            false,
        );
    }

    Ok(embed)
}

/// The panel `id` if it exists and is owned by `guild_id`.
///
/// Looks past the cache so inactive panels can be managed after a refresh.
async fn owned_server(
    invocation: &Invocation,
    id: &str,
    guild_id: u64,
) -> Result<PanelConfig, AppError> {
    let server = invocation.registry.find_server(id).await?;

    if server.owner_guild_id != Some(guild_id) {
        return Err(AppError::server_not_found(id));
    }

    Ok(server)
}

/// One line per server, ending in "… and N more" when the lines exceed one field.
fn server_listing(servers: &[PanelConfig]) -> String {
    let marker_room = format!("\n… and {} more", servers.len()).chars().count();
    let mut listing = String::new();
    let mut used = 0;

    for (index, server) in servers.iter().enumerate() {
        let line = format!("• **{}** (`{}`)", server.name, server.id);
        let needed = line.chars().count() + usize::from(index > 0);
        let room = if index + 1 == servers.len() {
            FIELD_VALUE_LIMIT
        } else {
            FIELD_VALUE_LIMIT - marker_room
        };

        if index > 0 {
            listing.push('\n');
        }
        if used + needed > room {
            listing.push_str(&format!("… and {} more", servers.len() - index));
            return listing;
        }

        listing.push_str(&line);
        used += needed;
    }

    listing
}

fn port(options: &OptionMap, id: &str) -> Result<Option<u16>, AppError> {
    options
        .integer("port")
        .map(|port| parse_port(id, &port.to_string()).map_err(AppError::from))
        .transpose()
}
