//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use aciops_core::{CoreError, Fabric, FabricConfig};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

/// Log in with the invocation's resolved config, run `f`, log out.
pub async fn with_fabric<F, Fut, T>(global: &GlobalOpts, message: &str, f: F) -> Result<T, CliError>
where
    F: FnOnce(Fabric) -> Fut,
    Fut: Future<Output = Result<T, CoreError>>,
{
    let fabric_config = config::build_fabric_config(global)?;
    with_config(fabric_config, global, message, f).await
}

/// Same as [`with_fabric`] for a config the caller already adjusted.
pub async fn with_config<F, Fut, T>(
    fabric_config: FabricConfig,
    global: &GlobalOpts,
    message: &str,
    f: F,
) -> Result<T, CliError>
where
    F: FnOnce(Fabric) -> Fut,
    Fut: Future<Output = Result<T, CoreError>>,
{
    let spinner = spinner(message, global.quiet);
    let result = Fabric::oneshot(fabric_config, f).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    Ok(result?)
}

/// A stderr spinner, only when someone is watching.
fn spinner(message: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// `None` renders as a dash in detail views.
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_owned()
}
