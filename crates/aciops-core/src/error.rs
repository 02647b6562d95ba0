// ── Core error types ──
//
// User-facing errors from aciops-core. These are NOT transport-specific --
// consumers never see reqwest errors or raw envelopes directly. The
// `From<aciops_api::Error>` impl translates transport-layer errors into
// domain-appropriate variants.
//
// "Already exists" and "parent missing" are absent here: those are
// steady-state outcomes reported through `CommandResult`, not errors.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("No active controller session")]
    NotConnected,

    #[error("Controller request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Validation errors (raised before any remote call) ────────────
    #[error("Invalid Scope \"{token}\" - Expecting private|public|shared")]
    InvalidScope { token: String },

    #[error("Invalid arg \"{token}\" - Expecting yes/no")]
    InvalidToggle { token: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Controller error code (e.g. "103" for a failed property validation).
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Malformed controller response: {message}")]
    MalformedResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Validation failures never reach the controller.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidScope { .. } | Self::InvalidToggle { .. } | Self::ValidationFailed { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<aciops_api::Error> for CoreError {
    fn from(err: aciops_api::Error) -> Self {
        match err {
            aciops_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            aciops_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            aciops_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            aciops_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            aciops_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            aciops_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            aciops_api::Error::Apic { code, text, status } => CoreError::Api {
                message: text,
                code,
                status: Some(status),
            },
            aciops_api::Error::MalformedResponse { encoding, message } => {
                CoreError::MalformedResponse {
                    message: format!("{encoding}: {message}"),
                }
            }
            aciops_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}
