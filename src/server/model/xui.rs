//! Wire types of the 3x-ui panel API.
//!
//! Field names follow the panel's camelCase JSON. Every field has a serde default so
//! panels that omit or null fields still decode.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

const BYTES_PER_GB: i64 = 1024 * 1024 * 1024;
const MILLIS_PER_DAY: i64 = 86_400_000;
const SUB_ID_LEN: usize = 16;
const SUB_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Envelope every panel endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub msg: String,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub obj: Option<T>,
}

/// A listener configured on a panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Inbound {
    pub id: i32,
    pub up: i64,
    pub down: i64,
    pub total: i64,
    pub remark: String,
    pub enable: bool,
    pub expiry_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub client_stats: Vec<ClientTraffic>,
    pub listen: String,
    pub port: i32,
    pub protocol: String,
    /// JSON-encoded protocol settings, including the client list.
    pub settings: String,
    pub stream_settings: String,
    pub tag: String,
    pub sniffing: String,
    pub allocate: String,
}

/// A VPN credential provisioned under an inbound.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    /// Client UUID.
    pub id: String,
    pub flow: String,
    pub email: String,
    pub limit_ip: i32,
    /// Traffic quota in bytes, 0 for unlimited.
    #[serde(rename = "totalGB")]
    pub total_gb: i64,
    /// Expiry as unix milliseconds, 0 for never.
    pub expiry_time: i64,
    pub enable: bool,
    pub tg_id: String,
    pub sub_id: String,
    pub reset: i32,
}

impl Client {
    /// Creates a client with a fresh UUID and subscription id.
    ///
    /// # Arguments
    /// - `email` - Unique client email on the panel
    /// - `total_gb` - Quota in gigabytes, 0 for unlimited
    /// - `expiry_days` - Days until expiry counted from `now_ms`, 0 for never
    /// - `limit_ip` - Concurrent IP limit, 0 for unlimited
    /// - `enable` - Whether the client starts enabled
    /// - `now_ms` - Current time as unix milliseconds
    pub fn new_provisioned(
        email: String,
        total_gb: i64,
        expiry_days: i64,
        limit_ip: i32,
        enable: bool,
        now_ms: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            flow: String::new(),
            email,
            limit_ip,
            total_gb: gb_to_bytes(total_gb),
            expiry_time: expiry_from_days(expiry_days, now_ms),
            enable,
            tg_id: String::new(),
            sub_id: generate_sub_id(),
            reset: 0,
        }
    }
}

/// Traffic counters of one client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientTraffic {
    pub id: i32,
    pub inbound_id: i32,
    pub enable: bool,
    pub email: String,
    pub up: i64,
    pub down: i64,
    pub expiry_time: i64,
    pub total: i64,
    pub reset: i32,
}

/// `{clients: [client]}` payload carried in the `settings` form field.
#[derive(Serialize)]
struct ClientSettings<'a> {
    clients: [&'a Client; 1],
}

/// Serializes `client` the way the panel expects it in the `settings` form field.
pub fn client_settings_json(client: &Client) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ClientSettings { clients: [client] })
}

/// Converts a gigabyte quota to bytes, clamping negatives to unlimited.
pub fn gb_to_bytes(total_gb: i64) -> i64 {
    total_gb.max(0).saturating_mul(BYTES_PER_GB)
}

/// Returns the expiry timestamp `expiry_days` after `now_ms`, or 0 for never.
pub fn expiry_from_days(expiry_days: i64, now_ms: i64) -> i64 {
    if expiry_days <= 0 {
        return 0;
    }
    now_ms.saturating_add(expiry_days.saturating_mul(MILLIS_PER_DAY))
}

/// Generates a 16-character lowercase alphanumeric subscription id.
pub fn generate_sub_id() -> String {
    let mut rng = rand::rng();
    (0..SUB_ID_LEN)
        .map(|_| SUB_ID_CHARSET[rng.random_range(0..SUB_ID_CHARSET.len())] as char)
        .collect()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
