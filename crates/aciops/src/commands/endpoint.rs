//! Endpoint command handler.

use aciops_core::{EndpointKind, EndpointLookup, EndpointPair};

use crate::cli::{EndpointArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(args: EndpointArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let EndpointArgs {
        address,
        no_reverse,
    } = args;

    let pair = util::with_fabric(global, "Locating endpoint", |fabric| async move {
        if no_reverse {
            let kind = EndpointKind::detect(&address);
            Ok(EndpointPair {
                primary: fabric.resolve_endpoint(&address, kind).await?,
                reverse: None,
            })
        } else {
            fabric.resolve_endpoint_pair(&address).await
        }
    })
    .await?;

    if let EndpointLookup::NotFound { identifier } = &pair.primary {
        return Err(CliError::NotFound {
            message: format!(
                "Endpoint {identifier} not found ({} lookup)",
                EndpointKind::detect(identifier)
            ),
            hint: "Only endpoints currently learned by a leaf are visible.".into(),
        });
    }

    let out = output::render_single(&global.output, &pair, detail, |p| {
        p.primary
            .found()
            .map(|r| format!("{}/{}/{}", r.tenant, r.app, r.epg))
            .unwrap_or_default()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

fn detail(pair: &EndpointPair) -> String {
    std::iter::once(&pair.primary)
        .chain(pair.reverse.as_ref())
        .map(lookup_detail)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn lookup_detail(lookup: &EndpointLookup) -> String {
    let record = match lookup {
        EndpointLookup::Found(record) => record,
        EndpointLookup::NotFound { identifier } => return format!("{identifier}: not found"),
    };
    let kind = record.kind.to_string();
    let reverse = record.kind.opposite().to_string();

    output::detail_lines(&[
        (kind.as_str(), record.identifier.clone()),
        (reverse.as_str(), util::or_dash(record.reverse_address.as_deref())),
        ("Tenant", record.tenant.clone()),
        ("App", record.app.clone()),
        ("EPG", record.epg.clone()),
        ("Domain", util::or_dash(record.domain.as_deref())),
        ("Encap", util::or_dash(record.encap.as_deref())),
        ("Paths", util::or_dash(record.path_list().as_deref())),
        ("Switches", util::or_dash(record.switch_list().as_deref())),
    ])
}
