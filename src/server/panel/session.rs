use reqwest::header::{HeaderMap, SET_COOKIE};
use tokio::sync::RwLock;

/// Name of the cookie 3x-ui issues on login.
pub const SESSION_COOKIE_NAME: &str = "3x-ui";

/// Session cookie of one panel client.
///
/// Holds at most one cookie; a login replaces it and a rejected session clears it.
#[derive(Default)]
pub struct PanelSession {
    cookie: RwLock<Option<String>>,
}

impl PanelSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current `name=value` cookie, if logged in.
    pub async fn cookie(&self) -> Option<String> {
        self.cookie.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.cookie.read().await.is_some()
    }

    pub async fn store(&self, cookie: String) {
        *self.cookie.write().await = Some(cookie);
    }

    pub async fn clear(&self) {
        *self.cookie.write().await = None;
    }
}

/// Picks the panel session cookie out of a login response's `Set-Cookie` headers.
///
/// Returns the `name=value` pair with attributes stripped.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{}=", SESSION_COOKIE_NAME);

    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .map(str::trim)
        .find(|pair| pair.starts_with(&prefix) && pair.len() > prefix.len())
        .map(str::to_string)
}
