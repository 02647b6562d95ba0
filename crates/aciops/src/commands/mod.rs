//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod catalog;
pub mod config_cmd;
pub mod endpoint;
pub mod gateway;
pub mod health;
pub mod mutate;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a fabric-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Endpoint(args) => endpoint::handle(args, global).await,
        Command::Gateway(args) => gateway::handle(args, global).await,
        Command::Gateways => gateway::list(global).await,
        Command::Health(args) => health::handle(args, global).await,
        Command::List(args) => catalog::handle(args, global).await,
        Command::Create(args) => mutate::handle(mutate::create_command(args)?, global).await,
        Command::Scope(args) => mutate::handle(mutate::scope_command(args)?, global).await,
        Command::Unicast(args) => mutate::handle(mutate::unicast_command(args)?, global).await,
        Command::VrfBd(args) => mutate::handle(mutate::vrf_bd_command(args), global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions run without a fabric session".into(),
        )),
    }
}
