use serenity::all::{CreateEmbed, CreateEmbedFooter, Timestamp};

use crate::server::error::{AppError, ErrorKind};

/// Embed colors shared by every command.
pub struct Colors;

impl Colors {
    pub const SUCCESS: u32 = 0x00FF00;
    pub const INFO: u32 = 0x0099FF;
    pub const WARNING: u32 = 0xFF9900;
    pub const ERROR: u32 = 0xFF0000;
}

/// Embed with the shared footer and timestamp in `color`.
pub fn colored_embed(color: u32) -> CreateEmbed {
    CreateEmbed::new()
        .color(color)
        .footer(CreateEmbedFooter::new("3x-ui relay"))
        .timestamp(Timestamp::now())
}

pub fn success_embed(title: impl Into<String>) -> CreateEmbed {
    colored_embed(Colors::SUCCESS).title(format!("✅ {}", title.into()))
}

pub fn info_embed(title: impl Into<String>) -> CreateEmbed {
    colored_embed(Colors::INFO).title(title)
}

pub fn warning_embed(title: impl Into<String>) -> CreateEmbed {
    colored_embed(Colors::WARNING).title(format!("⚠️ {}", title.into()))
}

pub fn error_embed(title: impl Into<String>) -> CreateEmbed {
    colored_embed(Colors::ERROR).title(format!("❌ {}", title.into()))
}

/// Renders an error as a red embed titled by its kind.
///
/// The offending panel id is added as a field when the error carries one.
pub fn app_error_embed(err: &AppError) -> CreateEmbed {
    let title = match err.kind() {
        ErrorKind::Config => "Invalid Server Configuration",
        ErrorKind::Auth => "Authentication Failed",
        ErrorKind::Api => "Panel Request Failed",
        ErrorKind::NotFound => "Server Not Found",
        ErrorKind::Network => "Server Unreachable",
        ErrorKind::BadRequest => "Invalid Request",
        ErrorKind::Store | ErrorKind::Discord | ErrorKind::Internal => "Error",
    };

    let embed = error_embed(title).description(err.user_message());
    match err.server_id() {
        Some(server_id) => embed.field("Server", format!("`{}`", server_id), true),
        None => embed,
    }
}

/// `Enabled` or `Disabled` with a status marker.
pub fn status_label(enabled: bool) -> &'static str {
    if enabled {
        "✅ Enabled"
    } else {
        "❌ Disabled"
    }
}
