// ── Runtime connection configuration ──
//
// These types describe *how* to reach an APIC. They carry credential
// data and connection tuning, but never touch disk. The CLI constructs
// a `FabricConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Pods probed by the health snapshot unless configured otherwise.
pub const DEFAULT_MAX_PODS: u8 = 9;

/// How to authenticate with the controller.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Local or remote-domain user, logged in through `aaaLogin`.
    Password {
        username: String,
        password: SecretString,
    },
}

impl AuthCredentials {
    pub fn username(&self) -> &str {
        match self {
            Self::Password { username, .. } => username,
        }
    }
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Default for controllers.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single fabric controller.
///
/// Built by the CLI, passed to `Fabric::connect` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct FabricConfig {
    /// Controller URL (e.g., `https://apic1.example.net`).
    pub url: Url,
    /// Authentication credentials.
    pub auth: AuthCredentials,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Highest pod number probed by the health snapshot.
    pub max_pods: u8,
}

impl FabricConfig {
    pub fn new(url: Url, auth: AuthCredentials) -> Self {
        Self {
            url,
            auth,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            max_pods: DEFAULT_MAX_PODS,
        }
    }
}
