// ── Fabric health snapshot ──

use tracing::{debug, warn};

use aciops_api::{Encoding, Query, QueryTarget, Tree};

use crate::error::CoreError;
use crate::fabric::Fabric;
use crate::model::{FabricHealth, FabricNodeInfo, PodHealth};

impl Fabric {
    /// Probe pods `1..=max_pods` and summarise every populated one.
    ///
    /// Pods that fail to load or report no children are left out.
    pub async fn health_snapshot(&self) -> Result<FabricHealth, CoreError> {
        let mut pods = FabricHealth::new();

        for pod in 1..=self.max_pods() {
            let dn = format!("topology/pod-{pod}");
            let client = self.client()?;
            let url = client.mo_url(&dn, Encoding::Xml, &Query::new().target(QueryTarget::Children))?;
            let uri = url.to_string();

            let Some(tree) = self.fetch_lenient(url, Encoding::Xml).await? else {
                continue;
            };
            if tree.total_count() == Some(0) {
                debug!(pod, "pod empty, skipping");
                continue;
            }

            pods.insert(format!("pod-{pod}"), pod_health(pod, uri, &tree));
        }

        if pods.is_empty() {
            warn!("no populated pods found");
        }
        Ok(pods)
    }
}

pub fn pod_health(pod: u8, uri: String, tree: &Tree) -> PodHealth {
    let nodes = tree
        .nodes_of_class("fabricNode")
        .map(|node| FabricNodeInfo {
            id: node.attribute("id").map(str::to_owned),
            name: node.attribute("name").unwrap_or_default().to_owned(),
            role: node.attribute("role").map(str::to_owned),
            model: node.attribute("model").map(str::to_owned),
            serial: node.attribute("serial").map(str::to_owned),
        })
        .collect();

    let total = tree.nodes_of_class("fabricHealthTotal").next();
    let score = |key: &str| total.and_then(|t| t.attribute(key)).and_then(|v| v.trim().parse().ok());

    PodHealth {
        pod,
        uri,
        nodes,
        health: score("cur"),
        previous: score("prev"),
        change: total
            .and_then(|t| t.attribute("chng"))
            .and_then(|v| v.trim().parse().ok()),
    }
}
