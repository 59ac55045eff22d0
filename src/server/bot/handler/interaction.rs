use serenity::all::{CommandInteraction, Context, EditInteractionResponse, Interaction};

use crate::server::{
    bot::command::{embeds, options::OptionMap, CommandTable, Invocation},
    service::registry::ServerRegistry,
};

/// Runs a slash command and replies with its embed.
///
/// The reply is deferred as ephemeral first since panel calls can outlast Discord's
/// three second response window. Command errors are rendered as error embeds.
pub async fn handle_interaction_create(
    registry: &ServerRegistry,
    commands: &CommandTable,
    ctx: Context,
    interaction: Interaction,
) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::error!(command = %command.data.name, "Failed to defer reply: {:?}", e);
        return;
    }

    let (subcommand, options) = OptionMap::from_resolved(command.data.options());
    let invocation = Invocation {
        registry: registry.clone(),
        guild_id: command.guild_id.map(|id| id.get()),
        user_name: command.user.name.clone(),
        is_admin: is_admin(&command),
        subcommand,
        options,
    };

    tracing::debug!(
        command = %command.data.name,
        guild_id = ?invocation.guild_id,
        "Running slash command"
    );

    let embed = match commands.dispatch(&command.data.name, &invocation).await {
        Ok(embed) => embed,
        Err(err) => {
            tracing::warn!(command = %command.data.name, "Command failed: {}", err);
            embeds::app_error_embed(&err)
        }
    };

    if let Err(e) = command
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await
    {
        tracing::error!(command = %command.data.name, "Failed to send reply: {:?}", e);
    }
}

/// Whether the invoking member has the Administrator permission; false in DMs.
fn is_admin(command: &CommandInteraction) -> bool {
    command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator())
}
