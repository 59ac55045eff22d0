//! `/get-traffic`: traffic counters of one client.
//!
//! Administrators may look up any email or UUID on any accessible server. Other
//! members only get the client named after their Discord username. Without a server
//! the lookup runs on every panel accessible from the guild.

use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, CreateEmbed};

use crate::server::{
    bot::command::{
        accessible_server,
        embeds::{self, Colors},
        Invocation,
    },
    error::AppError,
    model::{
        registry::PanelResult,
        xui::{ApiResponse, ClientTraffic},
    },
    util::format::{format_bytes, format_expiry, format_quota, usage_percent},
};

pub const NAME: &str = "get-traffic";

/// Usage share above which the reply turns red.
const HIGH_USAGE_PERCENT: f64 = 80.0;

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Get client traffic information (defaults to your Discord username)")
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "server",
            "Server ID to search",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "email",
            "Client email (defaults to your Discord username)",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "uuid",
            "Client UUID",
        ))
}

/// Who to look up.
#[derive(Debug, Clone, PartialEq)]
enum Lookup {
    Email(String),
    Uuid(String),
}

impl Lookup {
    fn label(&self) -> String {
        match self {
            Self::Email(email) => format!("Email: {}", email),
            Self::Uuid(uuid) => format!("UUID: {}", uuid),
        }
    }
}

/// A traffic record found on one panel.
struct Hit {
    server_name: String,
    traffic: ClientTraffic,
}

pub async fn run(invocation: &Invocation) -> Result<CreateEmbed, AppError> {
    let options = &invocation.options;

    if !invocation.is_admin
        && (options.string("email").is_some()
            || options.string("uuid").is_some()
            || options.string("server").is_some())
    {
        return Ok(embeds::warning_embed("Access Restricted")
            .description("You can only view your own traffic data. Run the command without options.")
            .field("Your Email", invocation.user_name.clone(), true));
    }

    let lookup = match options.string("uuid") {
        Some(uuid) => Lookup::Uuid(uuid.to_string()),
        None => Lookup::Email(
            options
                .string("email")
                .unwrap_or(&invocation.user_name)
                .to_string(),
        ),
    };

    let hits = match options.string("server") {
        Some(server_id) => lookup_one(invocation, server_id, &lookup).await?,
        None => lookup_all(invocation, &lookup).await?,
    };

    match hits.as_slice() {
        [] => Err(AppError::BadRequest(format!(
            "No client found with the provided identifier ({})",
            lookup.label()
        ))),
        [hit] => Ok(detail_embed(hit, &lookup, invocation.is_admin)),
        hits => Ok(summary_embed(hits, &lookup)),
    }
}

async fn lookup_one(
    invocation: &Invocation,
    server_id: &str,
    lookup: &Lookup,
) -> Result<Vec<Hit>, AppError> {
    let server = accessible_server(invocation, server_id).await?;
    let registry = &invocation.registry;

    let traffic = match lookup {
        Lookup::Email(email) => found(registry.get_client_traffic(server_id, email).await?),
        Lookup::Uuid(uuid) => {
            found_first(registry.get_client_traffic_by_id(server_id, uuid).await?)
        }
    };

    Ok(traffic
        .map(|traffic| Hit {
            server_name: server.name,
            traffic,
        })
        .into_iter()
        .collect())
}

async fn lookup_all(invocation: &Invocation, lookup: &Lookup) -> Result<Vec<Hit>, AppError> {
    let registry = &invocation.registry;

    if registry
        .get_accessible_servers(invocation.guild_id)
        .await
        .is_empty()
    {
        return Err(AppError::BadRequest(
            "No servers are available for this Discord server".to_string(),
        ));
    }

    let hits = match (lookup, invocation.guild_id) {
        (Lookup::Email(email), Some(guild_id)) => {
            collect(registry.find_client_by_email_for_guild(guild_id, email).await, found)
        }
        (Lookup::Email(email), None) => collect(registry.find_client_by_email(email).await, found),
        (Lookup::Uuid(uuid), Some(guild_id)) => collect(
            registry.find_client_by_uuid_for_guild(guild_id, uuid).await,
            found_first,
        ),
        (Lookup::Uuid(uuid), None) => {
            collect(registry.find_client_by_uuid(uuid).await, found_first)
        }
    };

    Ok(hits)
}

/// Keeps the panels that found the client; failed panels were logged by the registry.
fn collect<T>(
    results: Vec<PanelResult<ApiResponse<T>>>,
    extract: fn(ApiResponse<T>) -> Option<ClientTraffic>,
) -> Vec<Hit> {
    results
        .into_iter()
        .filter_map(|result| {
            let traffic = extract(result.outcome.ok()?)?;
            Some(Hit {
                server_name: result.server_name,
                traffic,
            })
        })
        .collect()
}

fn found(response: ApiResponse<ClientTraffic>) -> Option<ClientTraffic> {
    if !response.success {
        return None;
    }
    response.obj
}

fn found_first(response: ApiResponse<Vec<ClientTraffic>>) -> Option<ClientTraffic> {
    if !response.success {
        return None;
    }
    response.obj?.into_iter().next()
}

fn summary_embed(hits: &[Hit], lookup: &Lookup) -> CreateEmbed {
    let mut embed = embeds::info_embed("📊 Client Found on Multiple Servers").description(format!(
        "Found client \"{}\" on {} server(s)",
        lookup.label(),
        hits.len()
    ));

    for hit in hits {
        embed = embed.field(
            format!("Server: {}", hit.server_name),
            format!("Status: {}", embeds::status_label(hit.traffic.enable)),
            true,
        );
    }

    embed
}

fn detail_embed(hit: &Hit, lookup: &Lookup, is_admin: bool) -> CreateEmbed {
    let traffic = &hit.traffic;
    let used = traffic.up.saturating_add(traffic.down);
    let usage = usage_percent(used, traffic.total);
    let high_usage = usage.is_some_and(|percent| percent > HIGH_USAGE_PERCENT);

    let title = match lookup {
        Lookup::Email(_) => "📊 Client Traffic Information (by Email)",
        Lookup::Uuid(_) => "📊 Client Traffic Information (by UUID)",
    };
    let color = if high_usage {
        Colors::ERROR
    } else if traffic.enable {
        Colors::SUCCESS
    } else {
        Colors::WARNING
    };

    let mut embed = embeds::colored_embed(color)
        .title(title)
        .description(format!(
            "Server: **{}**\nQueried by {}{}",
            hit.server_name,
            lookup.label(),
            if is_admin { "" } else { " (your Discord username)" }
        ))
        .field("Email", traffic.email.clone(), true)
        .field("ID", traffic.id.to_string(), true)
        .field("Inbound ID", traffic.inbound_id.to_string(), true)
        .field("Status", embeds::status_label(traffic.enable), true)
        .field("Upload", format_bytes(traffic.up), true)
        .field("Download", format_bytes(traffic.down), true)
        .field("Total Used", format_bytes(used), true)
        .field("Total Limit", format_quota(traffic.total), true)
        .field(
            "Usage",
            usage
                .map(|percent| format!("{:.2}%", percent))
                .unwrap_or_else(|| "N/A".to_string()),
            true,
        )
        .field("Expiry Time", format_expiry(traffic.expiry_time), false)
        .field("Reset Count", traffic.reset.to_string(), true);

    if high_usage {
        embed = embed.field("⚠️ Warning", "High usage detected!", false);
    }

    embed
}
