use thiserror::Error;

/// Failures talking to a single remote 3x-ui panel.
///
/// Every variant carries the id of the panel involved so callers can report the
/// failure without looking the panel up again.
#[derive(Error, Debug)]
pub enum PanelError {
    /// The panel rejected the login or returned no session cookie.
    #[error("Login to server '{server_id}' failed: {message}")]
    Auth {
        /// Id of the panel
        server_id: String,
        /// Reason reported by the panel, or a description of what was missing
        message: String,
    },

    /// Non-2xx response, including an authorization failure that survived the
    /// single re-login retry.
    #[error("Server '{server_id}' responded with status {status}: {message}")]
    Api {
        /// Id of the panel
        server_id: String,
        /// HTTP status code of the final response
        status: u16,
        /// Response body or status description
        message: String,
    },

    /// Connection failure or timeout.
    #[error("Request to server '{server_id}' failed: {source}")]
    Network {
        /// Id of the panel
        server_id: String,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The client settings payload could not be serialized.
    #[error("Failed to encode request for server '{server_id}': {source}")]
    Encode {
        /// Id of the panel
        server_id: String,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The response body was not a valid panel envelope.
    #[error("Server '{server_id}' returned an unreadable response: {source}")]
    Decode {
        /// Id of the panel
        server_id: String,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl PanelError {
    /// Id of the panel the failure came from.
    pub fn server_id(&self) -> &str {
        match self {
            Self::Auth { server_id, .. }
            | Self::Api { server_id, .. }
            | Self::Network { server_id, .. }
            | Self::Encode { server_id, .. }
            | Self::Decode { server_id, .. } => server_id,
        }
    }
}
