use reqwest::{
    header::{CONTENT_TYPE, COOKIE},
    Method, StatusCode, Url,
};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::server::{
    error::{config::ConfigError, panel::PanelError},
    model::{
        panel::PanelConfig,
        registry::ServerInfo,
        xui::{client_settings_json, ApiResponse, Client, ClientTraffic, Inbound},
    },
    panel::session::{extract_session_cookie, PanelSession},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const INBOUNDS_PATH: [&str; 3] = ["panel", "api", "inbounds"];
const MAX_ERROR_BODY_CHARS: usize = 200;

struct PanelRequest {
    method: Method,
    url: Url,
    form: Vec<(&'static str, String)>,
}

impl PanelRequest {
    fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            form: Vec::new(),
        }
    }

    fn post(url: Url, form: Vec<(&'static str, String)>) -> Self {
        Self {
            method: Method::POST,
            url,
            form,
        }
    }
}

/// Authenticated HTTP client for one 3x-ui panel.
///
/// The client captures a snapshot of its panel's config at construction. When host,
/// port or credentials change the registry builds a new client instead of patching
/// this one.
pub struct PanelClient {
    http: reqwest::Client,
    config: PanelConfig,
    base_url: Url,
    session: PanelSession,
    /// Serializes logins so concurrent calls share one fresh session.
    login_lock: Mutex<()>,
}

impl PanelClient {
    /// Creates a client for `config` sharing the given HTTP client.
    ///
    /// # Returns
    /// - `Ok(PanelClient)`: Client with no session yet
    /// - `Err(ConfigError::InvalidHost)`: Host and port do not form a usable base URL
    pub fn new(http: reqwest::Client, config: PanelConfig) -> Result<Self, ConfigError> {
        let base_url = config.base_url()?;

        Ok(Self {
            http,
            config,
            base_url,
            session: PanelSession::new(),
            login_lock: Mutex::new(()),
        })
    }

    pub fn server_id(&self) -> &str {
        &self.config.id
    }

    /// Connection details of the config snapshot this client was built from.
    pub fn server_info(&self) -> ServerInfo {
        ServerInfo {
            id: self.config.id.clone(),
            name: self.config.name.clone(),
            host: self.config.host.clone(),
            port: self.config.port,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.is_authenticated().await
    }

    /// Logs in with the snapshot credentials and stores the session cookie.
    ///
    /// # Returns
    /// - `Ok(())`: Session cookie stored
    /// - `Err(PanelError::Auth)`: Panel reported failure or set no session cookie
    /// - `Err(PanelError::Network)`: Panel unreachable or timed out
    pub async fn login(&self) -> Result<(), PanelError> {
        let _guard = self.login_lock.lock().await;
        self.login_locked().await
    }

    pub async fn list_inbounds(&self) -> Result<ApiResponse<Vec<Inbound>>, PanelError> {
        self.call(PanelRequest::get(self.inbounds_endpoint(&["list"])))
            .await
    }

    pub async fn get_inbound(&self, inbound_id: i32) -> Result<ApiResponse<Inbound>, PanelError> {
        let inbound_id = inbound_id.to_string();
        self.call(PanelRequest::get(
            self.inbounds_endpoint(&["get", inbound_id.as_str()]),
        ))
        .await
    }

    /// Adds `client` to an inbound, wrapped as `{clients: [client]}` in the settings field.
    pub async fn add_client(
        &self,
        inbound_id: i32,
        client: &Client,
    ) -> Result<ApiResponse<serde_json::Value>, PanelError> {
        let settings = self.settings(client)?;
        self.call(PanelRequest::post(
            self.inbounds_endpoint(&["addClient"]),
            vec![("id", inbound_id.to_string()), ("settings", settings)],
        ))
        .await
    }

    /// Replaces the client addressed by `uuid`.
    pub async fn update_client(
        &self,
        uuid: &str,
        inbound_id: i32,
        client: &Client,
    ) -> Result<ApiResponse<serde_json::Value>, PanelError> {
        let settings = self.settings(client)?;
        self.call(PanelRequest::post(
            self.inbounds_endpoint(&["updateClient", uuid]),
            vec![("id", inbound_id.to_string()), ("settings", settings)],
        ))
        .await
    }

    pub async fn delete_client(
        &self,
        inbound_id: i32,
        uuid: &str,
    ) -> Result<ApiResponse<serde_json::Value>, PanelError> {
        self.call(PanelRequest::post(
            self.inbounds_endpoint(&["delClient", uuid]),
            vec![("id", inbound_id.to_string()), ("uuid", uuid.to_string())],
        ))
        .await
    }

    /// Traffic of the client with `email`, as a single record.
    pub async fn get_client_traffic(
        &self,
        email: &str,
    ) -> Result<ApiResponse<ClientTraffic>, PanelError> {
        self.call(PanelRequest::get(
            self.inbounds_endpoint(&["getClientTraffics", email]),
        ))
        .await
    }

    /// Traffic of the client with `uuid`. The panel answers with a list here.
    pub async fn get_client_traffic_by_id(
        &self,
        uuid: &str,
    ) -> Result<ApiResponse<Vec<ClientTraffic>>, PanelError> {
        self.call(PanelRequest::get(
            self.inbounds_endpoint(&["getClientTrafficsById", uuid]),
        ))
        .await
    }

    pub async fn reset_client_traffic(
        &self,
        inbound_id: i32,
        email: &str,
    ) -> Result<ApiResponse<serde_json::Value>, PanelError> {
        self.call(PanelRequest::post(
            self.inbounds_endpoint(&["resetClientTraffic", email]),
            vec![("id", inbound_id.to_string()), ("email", email.to_string())],
        ))
        .await
    }

    /// Sends `request`, logging in first when there is no session.
    ///
    /// A 401 clears the session, triggers one login and one retry. The retry's
    /// response is final: a second 401 surfaces as `PanelError::Api`.
    async fn call<T: DeserializeOwned>(
        &self,
        request: PanelRequest,
    ) -> Result<ApiResponse<T>, PanelError> {
        self.ensure_authenticated().await?;

        let cookie = self.session.cookie().await;
        let mut response = self.send(&request, cookie.as_deref()).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                server_id = %self.config.id,
                "Panel rejected session, logging in again"
            );
            self.reauthenticate(cookie.as_deref()).await?;

            let cookie = self.session.cookie().await;
            response = self.send(&request, cookie.as_deref()).await?;
        }

        self.decode(response).await
    }

    async fn ensure_authenticated(&self) -> Result<(), PanelError> {
        if self.session.is_authenticated().await {
            return Ok(());
        }

        let _guard = self.login_lock.lock().await;
        if self.session.is_authenticated().await {
            return Ok(());
        }

        self.login_locked().await
    }

    /// Replaces the `rejected` cookie with a fresh session.
    ///
    /// Skips the login when another call already replaced that cookie.
    async fn reauthenticate(&self, rejected: Option<&str>) -> Result<(), PanelError> {
        let _guard = self.login_lock.lock().await;

        if let Some(current) = self.session.cookie().await {
            if Some(current.as_str()) != rejected {
                return Ok(());
            }
        }

        self.session.clear().await;
        self.login_locked().await
    }

    /// Logs in; callers must hold `login_lock`.
    async fn login_locked(&self) -> Result<(), PanelError> {
        let response = self
            .http
            .post(self.endpoint(&["login"]))
            .form(&[
                ("username", self.config.username.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .send()
            .await
            .map_err(|source| self.network_error(source))?;

        let status = response.status();
        let cookie = extract_session_cookie(response.headers());
        let body = response
            .text()
            .await
            .map_err(|source| self.network_error(source))?;

        match serde_json::from_str::<ApiResponse<serde_json::Value>>(&body) {
            Ok(envelope) if status.is_success() && envelope.success => {}
            Ok(envelope) if !envelope.msg.is_empty() => {
                return Err(self.auth_error(envelope.msg));
            }
            _ => {
                return Err(self.auth_error(format!("login rejected with status {}", status)));
            }
        }

        let Some(cookie) = cookie else {
            return Err(self.auth_error("panel returned no session cookie".to_string()));
        };

        self.session.store(cookie).await;
        tracing::info!(
            server_id = %self.config.id,
            "Logged in to panel {}",
            self.config.name
        );

        Ok(())
    }

    async fn send(
        &self,
        request: &PanelRequest,
        cookie: Option<&str>,
    ) -> Result<reqwest::Response, PanelError> {
        tracing::debug!(
            server_id = %self.config.id,
            method = %request.method,
            path = request.url.path(),
            "Sending panel request"
        );

        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE);

        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }

        builder
            .send()
            .await
            .map_err(|source| self.network_error(source))
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>, PanelError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| self.network_error(source))?;

        if !status.is_success() {
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.chars().take(MAX_ERROR_BODY_CHARS).collect()
            };

            return Err(PanelError::Api {
                server_id: self.config.id.clone(),
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| PanelError::Decode {
            server_id: self.config.id.clone(),
            source,
        })
    }

    fn settings(&self, client: &Client) -> Result<String, PanelError> {
        client_settings_json(client).map_err(|source| PanelError::Encode {
            server_id: self.config.id.clone(),
            source,
        })
    }

    /// Appends percent-encoded `segments` to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn inbounds_endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(INBOUNDS_PATH).extend(segments);
        }
        url
    }

    fn network_error(&self, source: reqwest::Error) -> PanelError {
        PanelError::Network {
            server_id: self.config.id.clone(),
            source,
        }
    }

    fn auth_error(&self, message: String) -> PanelError {
        PanelError::Auth {
            server_id: self.config.id.clone(),
            message,
        }
    }
}
