//! A mock 3x-ui panel backed by `httpmock`.
//!
//! Helpers register mocks for the endpoints the relay talks to. Every data endpoint
//! mock only matches requests carrying the given session cookie, so a test can tell a
//! fresh session from a stale one.

use httpmock::{
    Method::{GET, POST},
    Mock, MockServer,
};
use serde_json::{json, Value};

/// Cookie name 3x-ui uses for its session.
pub const SESSION_COOKIE_NAME: &str = "3x-ui";

/// Builds a `name=value` session cookie.
pub fn session_cookie(value: &str) -> String {
    format!("{}={}", SESSION_COOKIE_NAME, value)
}

pub struct MockPanel {
    pub server: MockServer,
}

impl MockPanel {
    /// Starts a mock panel on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start_async().await,
        }
    }

    /// Host including scheme, as stored in a panel config.
    pub fn host(&self) -> String {
        format!("http://{}", self.server.host())
    }

    pub fn port(&self) -> u16 {
        self.server.port()
    }

    /// Accepts a login with the given credentials and issues `cookie`.
    ///
    /// `cookie` is a full `name=value` pair, see `session_cookie`.
    pub async fn mock_login(&self, username: &str, password: &str, cookie: &str) -> Mock<'_> {
        let set_cookie = format!("{}; Path=/; HttpOnly", cookie);
        self.server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/login")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .x_www_form_urlencoded_tuple("username", username)
                    .x_www_form_urlencoded_tuple("password", password);
                then.status(200)
                    .header("set-cookie", set_cookie.as_str())
                    .json_body(json!({"success": true, "msg": "Login Successfully", "obj": null}));
            })
            .await
    }

    /// Rejects every login with `success: false`.
    pub async fn mock_login_rejected(&self) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(POST).path("/login");
                then.status(200)
                    .json_body(json!({"success": false, "msg": "Invalid username or password", "obj": null}));
            })
            .await
    }

    /// Accepts every login but sets no session cookie.
    pub async fn mock_login_without_cookie(&self) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(POST).path("/login");
                then.status(200)
                    .json_body(json!({"success": true, "msg": "Login Successfully", "obj": null}));
            })
            .await
    }

    /// Serves `inbounds` from the list endpoint to requests carrying `cookie`.
    pub async fn mock_list_inbounds(&self, cookie: &str, inbounds: Value) -> Mock<'_> {
        self.mock_get_json(
            "/panel/api/inbounds/list",
            cookie,
            json!({"success": true, "msg": "", "obj": inbounds}),
        )
        .await
    }

    /// Answers a GET on `path` carrying `cookie` with `body`.
    pub async fn mock_get_json(&self, path: &str, cookie: &str, body: Value) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(GET).path(path).header("cookie", cookie);
                then.status(200).json_body(body);
            })
            .await
    }

    /// Answers a POST on `path` carrying `cookie` with a successful envelope.
    pub async fn mock_post_ok(&self, path: &str, cookie: &str) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(POST).path(path).header("cookie", cookie);
                then.status(200)
                    .json_body(json!({"success": true, "msg": "", "obj": null}));
            })
            .await
    }

    /// Answers a GET on `path` carrying `cookie` with 401.
    pub async fn mock_unauthorized(&self, path: &str, cookie: &str) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(GET).path(path).header("cookie", cookie);
                then.status(401);
            })
            .await
    }
}

/// Minimal inbound JSON as the panel returns it.
pub fn inbound_json(id: i32, remark: &str) -> Value {
    json!({
        "id": id,
        "up": 0,
        "down": 0,
        "total": 0,
        "remark": remark,
        "enable": true,
        "expiryTime": 0,
        "clientStats": [],
        "listen": "",
        "port": 443,
        "protocol": "vless",
        "settings": "{\"clients\":[]}",
        "streamSettings": "{}",
        "tag": format!("inbound-{}", id),
        "sniffing": "{}",
        "allocate": "{}"
    })
}
