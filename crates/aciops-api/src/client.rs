// APIC HTTP client
//
// Wraps `reqwest::Client` with object-tree URL construction, error-envelope
// detection, and decoding into the shared `Tree` view. Session endpoints
// (login, logout, refresh) live in `auth.rs` as inherent methods.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::query::Query;
use crate::transport::TransportConfig;
use crate::tree::{Encoding, Tree};

const BODY_PREVIEW: usize = 200;

fn preview(body: &str) -> &str {
    let mut end = body.len().min(BODY_PREVIEW);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Raw HTTP client for the APIC REST API.
///
/// All reads come back as a [`Tree`] regardless of encoding; all writes
/// are JSON and come back as the raw `serde_json::Value` the controller
/// returned, after the error envelope has been checked.
pub struct ApicClient {
    http: reqwest::Client,
    base_url: Url,
    /// Cookie jar reference for inspecting the session cookie.
    cookie_jar: Option<Arc<Jar>>,
}

impl ApicClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (the session token travels as `APIC-cookie`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            cookie_jar,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this when you already have a client carrying a session cookie.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            cookie_jar: None,
        }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether the cookie jar currently holds a cookie for the controller.
    pub fn has_session_cookie(&self) -> bool {
        self.cookie_jar
            .as_ref()
            .and_then(|jar| jar.cookies(&self.base_url))
            .is_some()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/api/{path}` with the query options appended.
    pub fn api_url(&self, path: &str, query: &Query) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/api/{path}"))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
        Ok(url)
    }

    /// Class query: `/api/node/class/{class}.{ext}`
    pub fn class_url(&self, class: &str, encoding: Encoding, query: &Query) -> Result<Url, Error> {
        self.api_url(
            &format!("node/class/{class}.{}", encoding.extension()),
            query,
        )
    }

    /// Managed-object query: `/api/node/mo/{dn}.{ext}`
    pub fn mo_url(&self, dn: &str, encoding: Encoding, query: &Query) -> Result<Url, Error> {
        self.api_url(&format!("node/mo/{dn}.{}", encoding.extension()), query)
    }

    /// Write target: `/api/mo/{dn}.json`
    pub fn post_url(&self, dn: &str) -> Result<Url, Error> {
        self.api_url(&format!("mo/{dn}.json"), &Query::new())
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a URL and return the raw body, mapping HTTP failures to errors.
    pub async fn get_text(&self, url: Url) -> Result<String, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::read_body(resp).await
    }

    /// GET a URL and decode it as a `Tree` in the given encoding.
    pub async fn get_tree(&self, url: Url, encoding: Encoding) -> Result<Tree, Error> {
        let body = self.get_text(url).await?;
        let tree = Tree::parse(&body, encoding)?;
        if let Some(err) = apic_error(&tree, 200) {
            return Err(err);
        }
        trace!(records = tree.records().len(), "decoded {encoding} response");
        Ok(tree)
    }

    /// POST a JSON body and return the controller's JSON response.
    pub async fn post_json(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<serde_json::Value, Error> {
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        let text = Self::read_body(resp).await?;

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&text)),
                body: text.clone(),
            })?;

        if let Ok(tree) = Tree::from_json_value(&value) {
            if let Some(err) = apic_error(&tree, 200) {
                return Err(err);
            }
        }

        Ok(value)
    }

    /// Check the HTTP status and return the body text.
    async fn read_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "session expired or invalid credentials".into(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if status == reqwest::StatusCode::FORBIDDEN {
            // The controller answers an expired token with 403 + "Token was invalid".
            if body.contains("Token was invalid") || body.contains("Token timeout") {
                return Err(Error::SessionExpired);
            }
            return Err(Error::Apic {
                code: None,
                text: "insufficient permissions (HTTP 403)".into(),
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let tree = Tree::parse(&body, Encoding::Json)
                .or_else(|_| Tree::parse(&body, Encoding::Xml))
                .ok();
            if let Some(err) = tree.as_ref().and_then(|t| apic_error(t, status.as_u16())) {
                return Err(err);
            }
            return Err(Error::Apic {
                code: None,
                text: format!("HTTP {status}: {}", preview(&body)),
                status: status.as_u16(),
            });
        }

        Ok(body)
    }
}

/// Translate an `error` record into [`Error::Apic`].
fn apic_error(tree: &Tree, status: u16) -> Option<Error> {
    let record = tree.error_record()?;
    let code = record.attribute("code").map(String::from);
    let text = record
        .attribute("text")
        .unwrap_or("unknown controller error")
        .to_owned();
    // Error records sometimes carry the real HTTP status in `code`.
    let status = code
        .as_deref()
        .and_then(|c| c.parse::<u16>().ok())
        .filter(|c| (400..600).contains(c))
        .unwrap_or(status);
    Some(Error::Apic { code, text, status })
}
