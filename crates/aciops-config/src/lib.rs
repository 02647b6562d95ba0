//! Shared configuration for the aciops CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `aciops_core::FabricConfig`. The CLI layers its
//! `GlobalOpts` overrides on top of what this crate resolves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use aciops_core::config::DEFAULT_MAX_PODS;
use aciops_core::{AuthCredentials, FabricConfig, TlsVerification};

/// Keyring service name for stored passwords.
pub const KEYRING_SERVICE: &str = "aciops";

/// Environment variable consulted first for the password.
pub const PASSWORD_ENV: &str = "ACIOPS_PASSWORD";

/// Environment variable consulted when a profile names no user.
pub const USERNAME_ENV: &str = "ACIOPS_USERNAME";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named controller profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named controller profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// APIC base URL (e.g., "https://apic1.example.net").
    pub controller: String,

    /// Login user; `domain\user` style names pass through unchanged.
    pub username: Option<String>,

    /// Password (plaintext, prefer keyring).
    pub password: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Highest pod probed by `health`.
    pub max_pods: Option<u8>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "aciops", "aciops").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("aciops");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, still layering `ACIOPS_*` variables on top.
///
/// Nested keys use a double underscore: `ACIOPS_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ACIOPS_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/password"),
    )?)
}

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}

/// Resolve the login user and password without CLI flags.
///
/// Password order: `ACIOPS_PASSWORD`, system keyring, plaintext in config.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var(USERNAME_ENV).ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok((username, SecretString::from(pw)));
    }

    // 2. Keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(pw) = entry.get_password() {
            return Ok((username, SecretString::from(pw)));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok((username, SecretString::from(pw.clone())));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthCredentials, ConfigError> {
    let (username, password) = resolve_credentials(profile, profile_name)?;
    Ok(AuthCredentials::Password { username, password })
}

/// Parse and check the profile's controller URL.
pub fn controller_url(profile: &Profile) -> Result<url::Url, ConfigError> {
    let url: url::Url = profile
        .controller
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "controller".into(),
            reason: format!("invalid URL: {}", profile.controller),
        })?;
    if !matches!(url.scheme(), "https" | "http") {
        return Err(ConfigError::Validation {
            field: "controller".into(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

/// TLS strategy for a profile: an explicit CA wins unless `insecure` is set.
pub fn profile_tls(profile: &Profile) -> TlsVerification {
    if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::DangerAcceptInvalid // controllers are typically self-signed
    }
}

/// Build a `FabricConfig` from a profile with no CLI flag overrides.
pub fn profile_to_fabric_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<FabricConfig, ConfigError> {
    let url = controller_url(profile)?;
    let auth = resolve_auth(profile, profile_name)?;

    Ok(FabricConfig {
        url,
        auth,
        tls: profile_tls(profile),
        timeout: Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout)),
        max_pods: profile.max_pods.unwrap_or(DEFAULT_MAX_PODS),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_profiles_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "lab"

[defaults]
output = "json"

[profiles.lab]
controller = "https://apic1.lab.example"
username = "admin"
password = "plain"
max_pods = 2
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("lab"));
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.timeout, 30);
        let lab = &cfg.profiles["lab"];
        assert_eq!(lab.username.as_deref(), Some("admin"));
        assert_eq!(lab.max_pods, Some(2));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                controller: "https://apic".into(),
                username: Some("admin".into()),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();
        let back = load_config_from(&path).unwrap();
        assert_eq!(back.profiles["default"].controller, "https://apic");
    }

    #[test]
    fn rejects_non_http_controller() {
        let profile = Profile {
            controller: "ftp://apic".into(),
            ..Profile::default()
        };
        assert!(matches!(
            controller_url(&profile),
            Err(ConfigError::Validation { .. })
        ));
        let profile = Profile {
            controller: "not a url".into(),
            ..Profile::default()
        };
        assert!(controller_url(&profile).is_err());
    }

    #[test]
    fn custom_ca_applies_unless_insecure() {
        let mut profile = Profile {
            controller: "https://apic".into(),
            ca_cert: Some("/etc/ssl/apic.pem".into()),
            ..Profile::default()
        };
        assert_eq!(
            profile_tls(&profile),
            TlsVerification::CustomCa("/etc/ssl/apic.pem".into())
        );
        profile.insecure = Some(true);
        assert_eq!(profile_tls(&profile), TlsVerification::DangerAcceptInvalid);
    }
}
