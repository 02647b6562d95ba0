//! Fabric health command handler.

use tabled::Tabled;

use aciops_core::{FabricHealth, PodHealth};

use crate::cli::{GlobalOpts, HealthArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "Pod")]
    pod: String,
    #[tabled(rename = "Health")]
    health: String,
    #[tabled(rename = "Node")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Serial")]
    serial: String,
}

pub async fn handle(args: HealthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut fabric_config = config::build_fabric_config(global)?;
    if let Some(max_pods) = args.max_pods {
        fabric_config.max_pods = max_pods;
    }

    let snapshot = util::with_config(fabric_config, global, "Probing pods", |fabric| async move {
        fabric.health_snapshot().await
    })
    .await?;

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &snapshot,
        |s| table(s, color),
        |s| s.keys().cloned().collect::<Vec<_>>().join("\n"),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn table(snapshot: &FabricHealth, color: bool) -> String {
    if snapshot.is_empty() {
        return "No populated pods".into();
    }
    let rows: Vec<NodeRow> = snapshot.values().flat_map(|pod| rows(pod, color)).collect();
    tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string()
}

/// One row per node; a pod without nodes still gets a row for its score.
fn rows(pod: &PodHealth, color: bool) -> Vec<NodeRow> {
    let health = match pod.change {
        Some(change) if change != 0 => {
            format!("{} ({change:+})", output::paint_score(pod.health, color))
        }
        _ => output::paint_score(pod.health, color),
    };
    let label = format!("pod-{}", pod.pod);

    if pod.nodes.is_empty() {
        return vec![NodeRow {
            pod: label,
            health,
            name: "-".into(),
            role: "-".into(),
            model: "-".into(),
            serial: "-".into(),
        }];
    }

    pod.nodes
        .iter()
        .map(|node| NodeRow {
            pod: label.clone(),
            health: health.clone(),
            name: node.name.clone(),
            role: util::or_dash(node.role.as_deref()),
            model: util::or_dash(node.model.as_deref()),
            serial: util::or_dash(node.serial.as_deref()),
        })
        .collect()
}
