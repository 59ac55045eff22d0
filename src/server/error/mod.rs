//! Error types and user-facing error rendering.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors. Each error can report
//! its `ErrorKind` and the id of the panel it concerns, which is everything the bot
//! layer needs to render an error embed without further lookups.

pub mod config;
pub mod internal;
pub mod panel;

use thiserror::Error;

use crate::server::error::{config::ConfigError, internal::InternalError, panel::PanelError};

/// Coarse classification of an `AppError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or duplicate panel configuration, or missing environment.
    Config,
    /// The remote panel rejected the login.
    Auth,
    /// The remote panel answered with a failure status.
    Api,
    /// Unknown panel id, or a known id without a live client.
    NotFound,
    /// Timeout or connection failure reaching a panel.
    Network,
    /// Persistence layer failure.
    Store,
    /// Discord API failure.
    Discord,
    /// Invalid command input.
    BadRequest,
    /// Bug or unexpected state.
    Internal,
}

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most
/// variants use `#[from]` for automatic error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or while validating a panel.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Failure talking to a remote panel.
    #[error(transparent)]
    PanelErr(#[from] PanelError),

    /// Database operation error from SeaORM.
    ///
    /// Every failed store write surfaces through this variant before the in-memory
    /// registry is touched.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Internal error indicating a bug or corrupted stored data.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// No live client exists for the panel id.
    ///
    /// Covers both an unknown id and an id whose panel is currently inactive.
    #[error("Server with ID '{server_id}' not found or inactive")]
    ServerNotFound {
        /// The id that was looked up
        server_id: String,
    },

    /// Invalid request error.
    ///
    /// # Fields
    /// - Message describing what was invalid about the request
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Shorthand for `AppError::ServerNotFound`.
    pub fn server_not_found(server_id: impl Into<String>) -> Self {
        Self::ServerNotFound {
            server_id: server_id.into(),
        }
    }

    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigErr(_) => ErrorKind::Config,
            Self::PanelErr(PanelError::Auth { .. }) => ErrorKind::Auth,
            Self::PanelErr(PanelError::Network { .. }) => ErrorKind::Network,
            Self::PanelErr(PanelError::Encode { .. }) => ErrorKind::Internal,
            Self::PanelErr(PanelError::Api { .. } | PanelError::Decode { .. }) => ErrorKind::Api,
            Self::DbErr(sea_orm::DbErr::RecordNotFound(_)) => ErrorKind::NotFound,
            Self::DbErr(_) => ErrorKind::Store,
            Self::DiscordErr(_) => ErrorKind::Discord,
            Self::InternalErr(_) => ErrorKind::Internal,
            Self::ServerNotFound { .. } => ErrorKind::NotFound,
            Self::BadRequest(_) => ErrorKind::BadRequest,
        }
    }

    /// Id of the panel the error concerns, when known.
    pub fn server_id(&self) -> Option<&str> {
        match self {
            Self::PanelErr(err) => Some(err.server_id()),
            Self::ServerNotFound { server_id } => Some(server_id.as_str()),
            Self::ConfigErr(
                ConfigError::DuplicateServerId(server_id)
                | ConfigError::MissingCredentials(server_id)
                | ConfigError::InvalidHost { server_id, .. }
                | ConfigError::InvalidPort { server_id, .. },
            ) => Some(server_id.as_str()),
            _ => None,
        }
    }

    /// Message safe to show to Discord users.
    ///
    /// Store, Discord and internal failures are logged in full and replaced by a
    /// generic message to avoid leaking implementation details.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Store | ErrorKind::Discord | ErrorKind::Internal => {
                tracing::error!("{}", self);
                "An internal error occurred, please try again later.".to_string()
            }
            ErrorKind::NotFound => match self {
                Self::DbErr(_) => "The requested server no longer exists.".to_string(),
                other => other.to_string(),
            },
            _ => self.to_string(),
        }
    }
}
