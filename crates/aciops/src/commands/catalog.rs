//! Catalog listing handler.

use tabled::Tabled;

use aciops_core::{FabricClass, Scope};

use crate::cli::{GlobalOpts, ListArgs, ListCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "Name")]
    name: String,
}

pub async fn handle(args: ListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (class, scope) = target(args.command);

    let names = util::with_fabric(
        global,
        &format!("Listing {}", class.class_name()),
        |fabric| async move { fabric.list(class, &scope).await },
    )
    .await?;

    let out = output::render_list(
        &global.output,
        &names,
        |n| CatalogRow { name: n.clone() },
        Clone::clone,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn target(cmd: ListCommand) -> (FabricClass, Scope) {
    match cmd {
        ListCommand::Tenants => (FabricClass::Tenant, Scope::Fabric),
        ListCommand::Vrfs { tenant } => (FabricClass::Vrf, Scope::tenant(tenant)),
        ListCommand::Bds { tenant } => (FabricClass::BridgeDomain, Scope::tenant(tenant)),
        ListCommand::Apps { tenant } => (FabricClass::AppProfile, Scope::tenant(tenant)),
        ListCommand::Epgs { tenant, app } => (FabricClass::Epg, Scope::app(tenant, app)),
        ListCommand::Subnets { tenant, bd } => {
            (FabricClass::Subnet, Scope::bridge_domain(tenant, bd))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listing_targets_a_valid_scope() {
        let cmds = [
            ListCommand::Tenants,
            ListCommand::Vrfs { tenant: "T".into() },
            ListCommand::Bds { tenant: "T".into() },
            ListCommand::Apps { tenant: "T".into() },
            ListCommand::Epgs {
                tenant: "T".into(),
                app: "A".into(),
            },
            ListCommand::Subnets {
                tenant: "T".into(),
                bd: "B".into(),
            },
        ];
        for cmd in cmds {
            let (class, scope) = target(cmd);
            assert!(class.lives_in(&scope), "{class} outside {scope:?}");
        }
    }
}
