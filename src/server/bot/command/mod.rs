//! Slash commands.
//!
//! Every command is a `SlashCommand` entry in the `CommandTable` built once at
//! startup. Commands are independent of the gateway: they receive an `Invocation`
//! describing who called them with which options and return the embed to reply with.

pub mod add_client;
pub mod delete_client;
pub mod embeds;
pub mod get_traffic;
pub mod list_inbounds;
pub mod list_servers;
pub mod manage_servers;
pub mod options;
pub mod reset_traffic;
pub mod update_client;

#[cfg(test)]
mod test;

use std::collections::HashMap;

use futures::future::BoxFuture;
use serenity::all::{CreateCommand, CreateEmbed};

use crate::server::{
    bot::command::options::OptionMap,
    error::{panel::PanelError, AppError},
    model::{panel::PanelConfig, xui::ApiResponse},
    service::registry::ServerRegistry,
};

/// A single slash command call.
pub struct Invocation {
    pub registry: ServerRegistry,
    /// Guild the command was used in, `None` in DMs.
    pub guild_id: Option<u64>,
    /// Discord username of the caller.
    pub user_name: String,
    pub is_admin: bool,
    pub subcommand: Option<String>,
    pub options: OptionMap,
}

pub type CommandFuture<'a> = BoxFuture<'a, Result<CreateEmbed, AppError>>;

pub struct SlashCommand {
    pub name: &'static str,
    /// Restricts the command to members with the Administrator permission.
    pub admin_only: bool,
    pub definition: fn() -> CreateCommand,
    pub run: for<'a> fn(&'a Invocation) -> CommandFuture<'a>,
}

/// Name to command lookup.
pub struct CommandTable {
    commands: HashMap<&'static str, SlashCommand>,
}

impl CommandTable {
    pub fn new() -> Self {
        let commands = [
            SlashCommand {
                name: list_servers::NAME,
                admin_only: false,
                definition: list_servers::definition,
                run: |invocation| Box::pin(list_servers::run(invocation)),
            },
            SlashCommand {
                name: list_inbounds::NAME,
                admin_only: false,
                definition: list_inbounds::definition,
                run: |invocation| Box::pin(list_inbounds::run(invocation)),
            },
            SlashCommand {
                name: add_client::NAME,
                admin_only: true,
                definition: add_client::definition,
                run: |invocation| Box::pin(add_client::run(invocation)),
            },
            SlashCommand {
                name: update_client::NAME,
                admin_only: true,
                definition: update_client::definition,
                run: |invocation| Box::pin(update_client::run(invocation)),
            },
            SlashCommand {
                name: delete_client::NAME,
                admin_only: true,
                definition: delete_client::definition,
                run: |invocation| Box::pin(delete_client::run(invocation)),
            },
            SlashCommand {
                name: get_traffic::NAME,
                admin_only: false,
                definition: get_traffic::definition,
                run: |invocation| Box::pin(get_traffic::run(invocation)),
            },
            SlashCommand {
                name: reset_traffic::NAME,
                admin_only: true,
                definition: reset_traffic::definition,
                run: |invocation| Box::pin(reset_traffic::run(invocation)),
            },
            SlashCommand {
                name: manage_servers::NAME,
                admin_only: true,
                definition: manage_servers::definition,
                run: |invocation| Box::pin(manage_servers::run(invocation)),
            },
        ];

        Self {
            commands: commands
                .into_iter()
                .map(|command| (command.name, command))
                .collect(),
        }
    }

    /// Definitions to register with Discord, sorted by name.
    pub fn definitions(&self) -> Vec<CreateCommand> {
        let mut commands: Vec<&SlashCommand> = self.commands.values().collect();
        commands.sort_by_key(|command| command.name);
        commands
            .into_iter()
            .map(|command| (command.definition)())
            .collect()
    }

    /// Runs the command called `name`.
    ///
    /// # Returns
    /// - `Ok(CreateEmbed)`: Reply of the command
    /// - `Err(AppError::BadRequest)`: Unknown command, or an admin command used by a
    ///   non-admin
    /// - `Err(AppError)`: The command failed
    pub async fn dispatch(&self, name: &str, invocation: &Invocation) -> Result<CreateEmbed, AppError> {
        let Some(command) = self.commands.get(name) else {
            return Err(AppError::BadRequest(format!("Unknown command '{}'", name)));
        };

        if command.admin_only && !invocation.is_admin {
            return Err(AppError::BadRequest(
                "This command requires the Administrator permission.".to_string(),
            ));
        }

        (command.run)(invocation).await
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The panel `server_id` if the invoking guild may use it.
pub(crate) async fn accessible_server(
    invocation: &Invocation,
    server_id: &str,
) -> Result<PanelConfig, AppError> {
    invocation
        .registry
        .validate_access(server_id, invocation.guild_id)
        .await
        .ok_or_else(|| AppError::server_not_found(server_id))
}

/// Treats a `success: false` envelope as a failed panel call.
pub(crate) fn require_success<T>(
    server_id: &str,
    response: ApiResponse<T>,
) -> Result<ApiResponse<T>, AppError> {
    if response.success {
        return Ok(response);
    }

    let message = if response.msg.is_empty() {
        "Unknown error occurred".to_string()
    } else {
        response.msg
    };

    Err(PanelError::Api {
        server_id: server_id.to_string(),
        status: 200,
        message,
    }
    .into())
}

/// `N GB` or `Unlimited` for a quota given in gigabytes.
pub(crate) fn quota_label(total_gb: i64) -> String {
    if total_gb <= 0 {
        "Unlimited".to_string()
    } else {
        format!("{} GB", total_gb)
    }
}

/// `N days` or `No expiry` for an expiry given in days.
pub(crate) fn expiry_label(expiry_days: i64) -> String {
    if expiry_days <= 0 {
        "No expiry".to_string()
    } else {
        format!("{} days", expiry_days)
    }
}
