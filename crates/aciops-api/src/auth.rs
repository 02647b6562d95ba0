// Session authentication
//
// Cookie-based login/logout/refresh against the `aaaLogin` family of
// endpoints. A successful login sets `APIC-cookie` in the client's jar;
// subsequent requests carry it automatically.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApicClient;
use crate::error::Error;
use crate::query::Query;
use crate::tree::{Encoding, Tree};

/// Bodies the controller returns for rejected logins, sometimes with HTTP 200.
const LOGIN_FAILURE_MARKERS: &[&str] = &[
    "FAILED local authentication",
    "Failed to parse login request",
];

/// What the controller reported about a freshly issued session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInfo {
    /// Seconds until the token must be refreshed, when reported.
    pub refresh_timeout_secs: Option<u64>,
}

fn session_info(body: &str) -> SessionInfo {
    let refresh_timeout_secs = Tree::parse(body, Encoding::Json)
        .ok()
        .and_then(|tree| {
            tree.nodes_of_class("aaaLogin")
                .find_map(|n| n.attribute("refreshTimeoutSeconds"))
                .and_then(|s| s.parse().ok())
        });
    SessionInfo {
        refresh_timeout_secs,
    }
}

impl ApicClient {
    /// Authenticate with username/password.
    ///
    /// `POST /api/aaaLogin.json` with `{"aaaUser":{"attributes":{"name","pwd"}}}`.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SessionInfo, Error> {
        let url = self.api_url("aaaLogin.json", &Query::new())?;
        debug!("logging in at {}", url);

        let body = json!({
            "aaaUser": {
                "attributes": {
                    "name": username,
                    "pwd": password.expose_secret(),
                }
            }
        });

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        if let Some(marker) = LOGIN_FAILURE_MARKERS.iter().find(|m| text.contains(**m)) {
            return Err(Error::Authentication {
                message: (*marker).to_owned(),
            });
        }

        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status})"),
            });
        }

        if let Ok(tree) = Tree::parse(&text, Encoding::Json) {
            if let Some(err) = tree.error_record() {
                return Err(Error::Authentication {
                    message: err.attribute("text").unwrap_or("login rejected").to_owned(),
                });
            }
        }

        debug!("login successful");
        Ok(session_info(&text))
    }

    /// End the current session.
    ///
    /// `POST /api/aaaLogout.json` with `{"aaaUser":{"attributes":{"name"}}}`.
    pub async fn logout(&self, username: &str) -> Result<(), Error> {
        let url = self.api_url("aaaLogout.json", &Query::new())?;
        debug!("logging out at {}", url);

        let _resp = self
            .http()
            .post(url)
            .json(&json!({ "aaaUser": { "attributes": { "name": username } } }))
            .send()
            .await
            .map_err(Error::Transport)?;

        debug!("logout complete");
        Ok(())
    }

    /// Renew the session token before it times out.
    ///
    /// `GET /api/aaaRefresh.json`
    pub async fn refresh(&self) -> Result<SessionInfo, Error> {
        let url = self.api_url("aaaRefresh.json", &Query::new())?;
        let body = self.get_text(url).await?;
        Ok(session_info(&body))
    }
}
