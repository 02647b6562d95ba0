// ── Gateway resolver ──
//
// Given a fragment of a subnet gateway address, finds the bridge domain
// serving it along with the VRF, EPG bindings and L3Outs hanging off
// that bridge domain. The query returns a flat list of every object in
// the fvBD subtrees; correlation between classes is by DN text.

use tracing::debug;

use aciops_api::{Encoding, Node, Query, QueryTarget, Tree};

use crate::error::CoreError;
use crate::fabric::Fabric;
use crate::model::{BridgeDomainRef, GatewayRecord};
use crate::path::{bracket_content, parse_location, split_dn};

impl Fabric {
    /// Resolve the bridge domain whose subnet contains `fragment`.
    ///
    /// An unreachable controller yields the same record as no match.
    pub async fn resolve_gateway(&self, fragment: &str) -> Result<GatewayRecord, CoreError> {
        let tree = self.bridge_domain_subtree().await?;
        let record = match &tree {
            Some(tree) => correlate(fragment, tree),
            None if fragment.is_empty() => GatewayRecord::unspecified(Vec::new()),
            None => GatewayRecord::default(),
        };
        debug!(%fragment, bridge_domain = %record.bridge_domain, "gateway resolved");
        Ok(record)
    }

    /// Every subnet gateway configured in the fabric.
    pub async fn list_gateways(&self) -> Result<Vec<String>, CoreError> {
        Ok(self
            .bridge_domain_subtree()
            .await?
            .map(|tree| gateway_inventory(&tree))
            .unwrap_or_default())
    }

    async fn bridge_domain_subtree(&self) -> Result<Option<Tree>, CoreError> {
        let url = self.client()?.class_url(
            "fvBD",
            Encoding::Xml,
            &Query::new().target(QueryTarget::Subtree),
        )?;
        self.fetch_lenient(url, Encoding::Xml).await
    }
}

fn gateway_inventory(tree: &Tree) -> Vec<String> {
    tree.nodes_of_class("fvSubnet")
        .filter_map(|subnet| subnet.attribute("ip"))
        .map(str::to_owned)
        .collect()
}

/// Correlate one fvBD subtree listing against a subnet fragment.
///
/// The first subnet whose IP contains the fragment wins, even when a
/// later one is a closer match. Among bridge domains whose name occurs
/// in that subnet's DN, the last one listed wins.
pub fn correlate(fragment: &str, tree: &Tree) -> GatewayRecord {
    let gateways = gateway_inventory(tree);
    if fragment.is_empty() {
        return GatewayRecord::unspecified(gateways);
    }

    let mut record = GatewayRecord {
        gateways,
        ..GatewayRecord::default()
    };

    let Some(subnet) = tree.nodes_of_class("fvSubnet").find(|s| {
        s.attribute("ip")
            .is_some_and(|ip| ip.contains(fragment))
    }) else {
        return record;
    };
    record.scope = subnet.attribute("scope").map(str::to_owned);
    let Some(location) = subnet.attribute("dn") else {
        return record;
    };

    let Some(bd) = tree
        .nodes_of_class("fvBD")
        .filter(|bd| {
            bd.attribute("name")
                .is_some_and(|name| !name.is_empty() && location.contains(name))
        })
        .last()
    else {
        return record;
    };
    let Some(bd_name) = bd.attribute("name") else {
        return record;
    };

    record.bridge_domain = BridgeDomainRef::Named(bd_name.to_owned());
    record.unicast_routing = owned(bd, "unicastRoute");
    record.unknown_unicast = owned(bd, "unkMacUcastAct");
    record.ip_learning = owned(bd, "ipLearning");
    record.mtu = owned(bd, "mtu");
    record.limit_learning = owned(bd, "limitIpLearnToSubnets");
    record.mac = owned(bd, "mac");
    record.tenant = tenant_of(location);

    let mentions = |node: &&Node| node.attribute("dn").is_some_and(|dn| dn.contains(bd_name));

    if let Some(vrf) = tree
        .nodes_of_class("fvRsCtx")
        .filter(mentions)
        .filter_map(|rs| rs.attribute("tnFvCtxName"))
        .last()
    {
        record.vrf = Some(vrf).filter(|v| !v.is_empty()).map(str::to_owned);
    }

    for binding in tree.nodes_of_class("fvRtBd").filter(mentions) {
        let Some(dn) = binding.attribute("dn") else {
            continue;
        };
        if let Some(tenant) = tenant_of(dn) {
            record.tenant = Some(tenant);
        }
        let target = binding
            .attribute("tDn")
            .or_else(|| split_dn(dn).last().and_then(|rn| bracket_content(rn)));
        if let Some(epg) = target.and_then(parse_location) {
            record.apps.push(epg.app);
            record.epgs.push(epg.epg);
        }
    }

    for l3out in tree.nodes_of_class("fvRsBDToOut").filter(mentions) {
        let name = l3out
            .attribute("tnL3extOutName")
            .map(str::to_owned)
            .or_else(|| {
                let dn = l3out.attribute("dn")?;
                let rn = split_dn(dn).get(3).copied()?;
                Some(rn.strip_prefix("rsBDToOut-").unwrap_or(rn).to_owned())
            });
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            record.l3outs.push(name);
        }
    }

    record
}

fn owned(node: &Node, key: &str) -> Option<String> {
    node.attribute(key).map(str::to_owned)
}

/// Tenant named by the second segment of a policy DN.
fn tenant_of(dn: &str) -> Option<String> {
    let segments = split_dn(dn);
    let tenant = segments.get(1)?.strip_prefix("tn-")?;
    Some(tenant.to_owned())
}
