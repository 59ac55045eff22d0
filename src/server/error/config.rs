use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value cannot be used.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar {
        /// Name of the offending variable
        name: String,
        /// The rejected value
        value: String,
    },

    /// Panel id was empty after trimming.
    #[error("Server ID must not be empty")]
    EmptyServerId,

    /// A panel with this id is already registered, regardless of owning guild.
    #[error("Server with ID '{0}' already exists")]
    DuplicateServerId(String),

    /// Host lacks an `http://` or `https://` scheme or is not a valid URL.
    #[error("Host '{host}' for server '{server_id}' must start with http:// or https://")]
    InvalidHost {
        /// Id of the panel being configured
        server_id: String,
        /// The rejected host value
        host: String,
    },

    /// Port is not a number in 1..=65535.
    #[error("Port '{port}' for server '{server_id}' must be a number between 1 and 65535")]
    InvalidPort {
        /// Id of the panel being configured
        server_id: String,
        /// The rejected port value
        port: String,
    },

    /// Username or password is blank.
    #[error("Server '{0}' requires both a username and a password")]
    MissingCredentials(String),
}
