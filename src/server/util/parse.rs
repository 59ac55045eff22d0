use crate::server::error::{config::ConfigError, internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalError(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|source| InternalError::ParseStringId { value, source })?;

    Ok(result)
}

/// Parses a panel port supplied as text.
///
/// # Arguments
/// - `server_id` - Id of the panel the port belongs to, used in the error
/// - `value` - The text to parse, surrounding whitespace is ignored
///
/// # Returns
/// - `Ok(u16)` - Port in 1..=65535
/// - `Err(ConfigError::InvalidPort)` - Not a number, zero or above 65535
pub fn parse_port(server_id: &str, value: &str) -> Result<u16, ConfigError> {
    match value.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort {
            server_id: server_id.to_string(),
            port: value.to_string(),
        }),
    }
}
