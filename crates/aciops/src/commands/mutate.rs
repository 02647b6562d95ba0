//! Create and modify handlers.
//!
//! Arguments become a core `Command` before any session is opened, so a
//! bad scope or toggle fails without touching the controller.

use tabled::Tabled;

use aciops_core::{
    Command as CoreCommand, CommandResult, FabricClass, GatewayRecord, RoutingScope, Toggle,
};

use crate::cli::{
    CreateArgs, CreateCommand, GlobalOpts, OutputFormat, ScopeArgs, UnicastArgs, VrfBdArgs,
};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "Name")]
    name: String,
}

// ── Argument translation ────────────────────────────────────────────

pub fn create_command(args: CreateArgs) -> Result<CoreCommand, CliError> {
    Ok(match args.command {
        CreateCommand::Tenant { name } => CoreCommand::CreateTenant { tenant: name },
        CreateCommand::Vrf { tenant, name } => CoreCommand::CreateVrf { tenant, vrf: name },
        CreateCommand::BdL2 { tenant, name } => {
            CoreCommand::CreateBridgeDomainL2 { tenant, bd: name }
        }
        CreateCommand::BdL3 {
            tenant,
            name,
            subnet,
            scope,
        } => CoreCommand::CreateBridgeDomainL3 {
            tenant,
            bd: name,
            subnet,
            scope: scope.parse::<RoutingScope>()?,
        },
        CreateCommand::App { tenant, name } => CoreCommand::CreateAppProfile { tenant, app: name },
        CreateCommand::Epg { tenant, app, name } => CoreCommand::CreateEpg {
            tenant,
            app,
            epg: name,
        },
        CreateCommand::Subnet {
            tenant,
            bd,
            ip,
            scope,
        } => CoreCommand::CreateSubnet {
            tenant,
            bd,
            subnet: ip,
            scope: scope.parse::<RoutingScope>()?,
        },
    })
}

pub fn scope_command(args: ScopeArgs) -> Result<CoreCommand, CliError> {
    Ok(CoreCommand::SetRoutingScope {
        scope: args.scope.parse::<RoutingScope>()?,
        tenant: args.tenant,
        bd: args.bd,
        subnet: args.subnet,
    })
}

pub fn unicast_command(args: UnicastArgs) -> Result<CoreCommand, CliError> {
    Ok(CoreCommand::SetUnicastRouting {
        enable: Toggle::parse(&args.enable)?,
        tenant: args.tenant,
        bd: args.bd,
    })
}

pub fn vrf_bd_command(args: VrfBdArgs) -> CoreCommand {
    CoreCommand::AssociateVrf {
        tenant: args.tenant,
        bd: args.bd,
        vrf: args.vrf,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(cmd: CoreCommand, global: &GlobalOpts) -> Result<(), CliError> {
    let summary = describe(&cmd);
    let hint = list_hint(&cmd);

    let result = util::with_fabric(global, &summary, |fabric| async move {
        fabric.execute(cmd).await
    })
    .await?;

    match result {
        CommandResult::AlreadyExists { .. } => Err(CliError::Conflict {
            message: result.to_string(),
        }),
        CommandResult::Missing { class, .. } => Err(CliError::NotFound {
            message: result.to_string(),
            hint: format!("Run: {}", hint(class)),
        }),
        CommandResult::Applied {
            ref catalog,
            ref gateway,
            ..
        } => {
            if !global.quiet {
                eprintln!("✓ {summary}");
            }
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => {
                    applied_listing(&global.output, catalog, gateway.as_ref())
                }
                OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml => {
                    output::render_single(&global.output, &result, |_| String::new(), |_| {
                        String::new()
                    })
                }
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// The re-listed catalog, followed by the gateway view when there is one.
fn applied_listing(
    format: &OutputFormat,
    catalog: &[String],
    gateway: Option<&GatewayRecord>,
) -> String {
    let listing = output::render_list(
        format,
        catalog,
        |n| CatalogRow { name: n.clone() },
        Clone::clone,
    );
    let Some(gw) = gateway else {
        return listing;
    };
    let view = output::detail_lines(&[
        ("BD", gw.bridge_domain.to_string()),
        ("Scope", util::or_dash(gw.scope.as_deref())),
        ("Unicast Routing", util::or_dash(gw.unicast_routing.as_deref())),
        ("VRF", util::or_dash(gw.vrf.as_deref())),
    ]);
    format!("{listing}\n\n{view}")
}

// ── Text helpers ────────────────────────────────────────────────────

/// Past-tense summary of what a successful command did.
fn describe(cmd: &CoreCommand) -> String {
    match cmd {
        CoreCommand::CreateTenant { tenant } => format!("Created tenant {tenant}"),
        CoreCommand::CreateVrf { tenant, vrf } => format!("Created VRF {vrf} in {tenant}"),
        CoreCommand::CreateBridgeDomainL2 { tenant, bd } => {
            format!("Created L2 bridge domain {bd} in {tenant}")
        }
        CoreCommand::CreateBridgeDomainL3 {
            tenant,
            bd,
            subnet,
            scope,
        } => format!("Created bridge domain {bd} in {tenant} with subnet {subnet} ({scope})"),
        CoreCommand::CreateAppProfile { tenant, app } => {
            format!("Created application profile {app} in {tenant}")
        }
        CoreCommand::CreateEpg { tenant, app, epg } => {
            format!("Created EPG {epg} in {tenant}/{app}")
        }
        CoreCommand::CreateSubnet {
            bd, subnet, scope, ..
        } => format!("Added subnet {subnet} ({scope}) to {bd}"),
        CoreCommand::SetRoutingScope {
            bd, subnet, scope, ..
        } => format!("Set scope of {subnet} on {bd} to {scope}"),
        CoreCommand::SetUnicastRouting { bd, enable, .. } => {
            format!("Set unicast routing on {bd} to {}", enable.as_ref())
        }
        CoreCommand::AssociateVrf { bd, vrf, .. } => format!("Associated VRF {vrf} with {bd}"),
    }
}

/// Builds the `aciops list` invocation that shows a missing object's peers.
fn list_hint(cmd: &CoreCommand) -> impl Fn(FabricClass) -> String + use<> {
    let (tenant, bd) = match cmd {
        CoreCommand::CreateTenant { tenant }
        | CoreCommand::CreateVrf { tenant, .. }
        | CoreCommand::CreateBridgeDomainL2 { tenant, .. }
        | CoreCommand::CreateAppProfile { tenant, .. }
        | CoreCommand::CreateEpg { tenant, .. } => (tenant.clone(), None),
        CoreCommand::CreateBridgeDomainL3 { tenant, bd, .. }
        | CoreCommand::CreateSubnet { tenant, bd, .. }
        | CoreCommand::SetRoutingScope { tenant, bd, .. }
        | CoreCommand::SetUnicastRouting { tenant, bd, .. }
        | CoreCommand::AssociateVrf { tenant, bd, .. } => (tenant.clone(), Some(bd.clone())),
    };

    move |class| match class {
        FabricClass::Tenant => "aciops list tenants".into(),
        FabricClass::Vrf => format!("aciops list vrfs --tenant {tenant}"),
        FabricClass::BridgeDomain => format!("aciops list bds --tenant {tenant}"),
        FabricClass::AppProfile | FabricClass::Epg => {
            format!("aciops list apps --tenant {tenant}")
        }
        FabricClass::Subnet => format!(
            "aciops list subnets --tenant {tenant} --bd {}",
            bd.as_deref().unwrap_or("<bd>")
        ),
    }
}
