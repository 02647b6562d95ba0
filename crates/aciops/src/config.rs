//! CLI configuration -- thin wrapper around `aciops_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--controller, --username, etc.).

use std::time::Duration;

use secrecy::SecretString;

use aciops_core::config::DEFAULT_MAX_PODS;
use aciops_core::{AuthCredentials, FabricConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use aciops_config::{
    Config, Defaults, PASSWORD_ENV, Profile, config_path, load_config_or_default, save_config,
    store_password,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the `FabricConfig` for this invocation.
///
/// A matching profile is used with flag overrides on top. Without one,
/// `--controller` plus `ACIOPS_USERNAME` / `ACIOPS_PASSWORD` suffice.
pub fn build_fabric_config(global: &GlobalOpts) -> Result<FabricConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global, cfg.defaults.timeout);
    }
    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
        });
    }

    let url_str = global.controller.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let url = parse_controller(url_str)?;

    let username = global.username.clone().ok_or_else(|| CliError::NoCredentials {
        profile: profile_name.clone(),
    })?;
    let password = std::env::var(PASSWORD_ENV).map_err(|_| CliError::NoCredentials {
        profile: profile_name.clone(),
    })?;

    let mut config = FabricConfig::new(
        url,
        AuthCredentials::Password {
            username,
            password: SecretString::from(password),
        },
    );
    config.timeout = Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout));
    Ok(config)
}

/// Translate a `Profile` + global flags into a `FabricConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    default_timeout: u64,
) -> Result<FabricConfig, CliError> {
    // 1. Controller URL (flag > env > profile)
    let url = match global.controller.as_deref() {
        Some(url_str) => parse_controller(url_str)?,
        None => aciops_config::controller_url(profile)?,
    };

    // 2. Credentials: the flag only replaces the user, the password chain stays
    let (username, password) = match &global.username {
        Some(username) => {
            let overridden = Profile {
                username: Some(username.clone()),
                password: profile.password.clone(),
                ..Profile::default()
            };
            aciops_config::resolve_credentials(&overridden, profile_name)?
        }
        None => aciops_config::resolve_credentials(profile, profile_name)?,
    };

    // 3. TLS verification
    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        aciops_config::profile_tls(profile)
    };

    // 4. Timeout
    let timeout = global.timeout.or(profile.timeout).unwrap_or(default_timeout);

    Ok(FabricConfig {
        url,
        auth: AuthCredentials::Password { username, password },
        tls,
        timeout: Duration::from_secs(timeout),
        max_pods: profile.max_pods.unwrap_or(DEFAULT_MAX_PODS),
    })
}

/// Comma-separated profile names, or `(none)`.
pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

fn parse_controller(url_str: &str) -> Result<url::Url, CliError> {
    aciops_config::controller_url(&Profile {
        controller: url_str.to_owned(),
        ..Profile::default()
    })
    .map_err(CliError::from)
}
