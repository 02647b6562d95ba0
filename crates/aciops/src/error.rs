//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use aciops_config::ConfigError;
use aciops_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(aciops::connection_failed),
        help(
            "Check that the APIC is reachable.\n\
             Reason: {reason}\n\
             Self-signed certificates are accepted unless ca_cert is set; try --insecure."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("No active controller session")]
    #[diagnostic(code(aciops::not_connected))]
    NotConnected,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(aciops::auth_failed),
        help(
            "Verify the username and password for this profile.\n\
             Run: aciops config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(aciops::no_credentials),
        help(
            "Configure credentials with: aciops config init\n\
             Or set ACIOPS_USERNAME and ACIOPS_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Fabric outcomes ──────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(aciops::not_found),
        help("{hint}")
    )]
    NotFound { message: String, hint: String },

    #[error("{message}")]
    #[diagnostic(code(aciops::conflict), help("Nothing was written."))]
    Conflict { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("APIC error {}: {message}", .code.as_deref().unwrap_or("-"))]
    #[diagnostic(code(aciops::api_error))]
    ApiError {
        code: Option<String>,
        message: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(aciops::invalid_argument))]
    InvalidArgument { message: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(aciops::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(aciops::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: aciops config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(aciops::no_config),
        help(
            "Create one with: aciops config init\n\
             Expected at: {path}\n\
             Or pass --controller with ACIOPS_USERNAME and ACIOPS_PASSWORD."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(aciops::config))]
    Config(ConfigError),

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(aciops::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout { seconds: u64 },

    #[error("{0}")]
    #[diagnostic(code(aciops::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::NotConnected => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::InvalidArgument { .. } | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::NotConnected => CliError::NotConnected,
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            err @ (CoreError::InvalidScope { .. }
            | CoreError::InvalidToggle { .. }
            | CoreError::ValidationFailed { .. }) => CliError::InvalidArgument {
                message: err.to_string(),
            },
            CoreError::Api { message, code, .. } => CliError::ApiError { code, message },
            CoreError::MalformedResponse { message } => CliError::ApiError {
                code: None,
                message: format!("malformed response: {message}"),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failures_are_usage_errors() {
        let err = CliError::from(CoreError::InvalidScope {
            token: "global".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert_eq!(
            err.to_string(),
            "Invalid Scope \"global\" - Expecting private|public|shared"
        );
    }

    #[test]
    fn transport_failures_map_to_connection() {
        let err = CliError::from(CoreError::ConnectionFailed {
            url: "https://apic".into(),
            reason: "refused".into(),
        });
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn missing_credentials_are_auth_errors() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "lab".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
