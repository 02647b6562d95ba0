use thiserror::Error;

use crate::tree::Encoding;

/// Top-level error type for the `aciops-api` crate.
///
/// Covers every failure mode of the controller channel: authentication,
/// transport, controller-reported errors, and undecodable payloads.
/// `aciops-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (wrong credentials, unknown domain, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Session token expired or was revoked by the controller.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Controller ──────────────────────────────────────────────────
    /// Error reported by the controller, either as an HTTP failure or as
    /// the `{"imdata":[{"error":{"attributes":{...}}}]}` envelope.
    #[error("APIC error (HTTP {status}): {text}")]
    Apic {
        code: Option<String>,
        text: String,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// The payload could not be decoded in the requested encoding.
    #[error("Malformed {encoding} response: {message}")]
    MalformedResponse { encoding: Encoding, message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates auth has expired
    /// and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::SessionExpired)
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Apic { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the payload itself was unreadable.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedResponse { .. } | Self::Deserialization { .. }
        )
    }

    /// Extract the controller error code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Apic { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
