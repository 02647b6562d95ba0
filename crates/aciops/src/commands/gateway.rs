//! Gateway command handlers.

use tabled::Tabled;

use aciops_core::{BridgeDomainRef, GatewayRecord};

use crate::cli::{GatewayArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct GatewayRow {
    #[tabled(rename = "Gateway")]
    gateway: String,
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(args: GatewayArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let fragment = args.fragment;
    let record = util::with_fabric(global, "Resolving gateway", |fabric| async move {
        fabric.resolve_gateway(&fragment).await
    })
    .await?;

    if record.bridge_domain == BridgeDomainRef::Missing {
        return Err(CliError::NotFound {
            message: format!("BD: {}", record.bridge_domain),
            hint: "Run: aciops gateways to see configured subnets".into(),
        });
    }

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &record,
        |r| detail(r, color),
        |r| r.bridge_domain.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn list(global: &GlobalOpts) -> Result<(), CliError> {
    let gateways = util::with_fabric(global, "Listing gateways", |fabric| async move {
        fabric.list_gateways().await
    })
    .await?;

    let out = output::render_list(
        &global.output,
        &gateways,
        |g| GatewayRow { gateway: g.clone() },
        Clone::clone,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn detail(record: &GatewayRecord, color: bool) -> String {
    let bd = match &record.bridge_domain {
        BridgeDomainRef::Named(name) => output::paint_status(name, true, color),
        other => other.to_string(),
    };
    output::detail_lines(&[
        ("BD", bd),
        ("Tenant", util::or_dash(record.tenant.as_deref())),
        ("VRF", util::or_dash(record.vrf.as_deref())),
        ("Scope", util::or_dash(record.scope.as_deref())),
        ("Unicast Routing", util::or_dash(record.unicast_routing.as_deref())),
        ("Unknown Unicast", util::or_dash(record.unknown_unicast.as_deref())),
        ("IP Learning", util::or_dash(record.ip_learning.as_deref())),
        ("Limit Learning", util::or_dash(record.limit_learning.as_deref())),
        ("MTU", util::or_dash(record.mtu.as_deref())),
        ("MAC", util::or_dash(record.mac.as_deref())),
        ("Apps", util::or_dash(record.app_list().as_deref())),
        ("EPGs", util::or_dash(record.epg_list().as_deref())),
        ("L3Outs", util::or_dash(record.l3out_list().as_deref())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspecified_lookup_shows_none() {
        let record = GatewayRecord::unspecified(vec!["10.0.0.1/24".into()]);
        let text = detail(&record, false);
        assert!(text.starts_with("             BD: none"));
        assert!(text.contains("         Tenant: -"));
    }

    #[test]
    fn named_lookup_lists_bindings() {
        let record = GatewayRecord {
            bridge_domain: BridgeDomainRef::Named("BD1".into()),
            epgs: vec!["E1".into(), "E2".into()],
            ..GatewayRecord::default()
        };
        let text = detail(&record, false);
        assert!(text.contains("BD: BD1"));
        assert!(text.contains("EPGs: E1, E2"));
    }
}
