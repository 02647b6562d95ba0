// ── Endpoint resolver ──
//
// Locates a MAC or IP endpoint: the EPG it was learned in, how it is
// encapsulated, the interfaces it sits behind and the leaves reporting
// it. Two reads of the same filter are issued, one per encoding, and
// correlated here.

use tracing::debug;

use aciops_api::query::eq_filter;
use aciops_api::{Encoding, Node, Query, RspSubtree, Tree};

use crate::error::CoreError;
use crate::fabric::Fabric;
use crate::model::{EndpointKind, EndpointLookup, EndpointPair, EndpointRecord};
use crate::path::{parse_location, parse_path_group, parse_policy_group, parse_vmm_attachment};

const ENDPOINT_CLASS: &str = "fvCEp";
const PATH_ATTACHMENT: &str = "fvRsCEpToPathEp";
const HYPERVISOR_ATTACHMENT: &str = "fvRsHyper";
const VM_ATTACHMENT: &str = "fvRsToVm";
const LEARNED_IP: &str = "fvIp";
const REPORTING_NODE: &str = "fvReportingNode";

/// Subtree classes requested for a MAC lookup.
const MAC_SUBTREE: &[&str] = &[
    ENDPOINT_CLASS,
    PATH_ATTACHMENT,
    LEARNED_IP,
    HYPERVISOR_ATTACHMENT,
    "fvRsToNic",
    VM_ATTACHMENT,
    REPORTING_NODE,
];

/// Children whose `fvReportingNode` entries name the reporting leaves.
const REPORTING_PARENTS: &[&str] = &[
    LEARNED_IP,
    PATH_ATTACHMENT,
    VM_ATTACHMENT,
    HYPERVISOR_ATTACHMENT,
];

impl Fabric {
    /// Resolve an endpoint by MAC or IP.
    pub async fn resolve_endpoint(
        &self,
        identifier: &str,
        kind: EndpointKind,
    ) -> Result<EndpointLookup, CoreError> {
        let query = endpoint_query(identifier, kind);
        let client = self.client()?;

        let xml_url = client.class_url(ENDPOINT_CLASS, Encoding::Xml, &query)?;
        let json_url = client.class_url(ENDPOINT_CLASS, Encoding::Json, &query)?;

        let primary = self.fetch_lenient(xml_url, Encoding::Xml).await?;
        let secondary = self.fetch_lenient(json_url, Encoding::Json).await?;

        let lookup = correlate(identifier, kind, primary.as_ref(), secondary.as_ref());
        debug!(%identifier, %kind, found = lookup.found().is_some(), "endpoint resolved");
        Ok(lookup)
    }

    /// Resolve by the identifier's apparent kind, then resolve the
    /// reverse address that lookup discovered.
    pub async fn resolve_endpoint_pair(&self, identifier: &str) -> Result<EndpointPair, CoreError> {
        let kind = EndpointKind::detect(identifier);
        let primary = self.resolve_endpoint(identifier, kind).await?;

        let reverse = match primary.found().and_then(|r| r.reverse_address.clone()) {
            Some(address) => Some(self.resolve_endpoint(&address, kind.opposite()).await?),
            None => None,
        };

        Ok(EndpointPair { primary, reverse })
    }
}

fn endpoint_query(identifier: &str, kind: EndpointKind) -> Query {
    match kind {
        EndpointKind::Mac => Query::new()
            .subtree(RspSubtree::Full)
            .subtree_class(MAC_SUBTREE)
            .target_filter(eq_filter("fvCEp.mac", identifier)),
        EndpointKind::Ip => Query::new()
            .subtree(RspSubtree::Full)
            .subtree_include("required")
            .subtree_filter(eq_filter("fvIp.addr", identifier)),
    }
}

/// Build the endpoint view from the two encodings of one lookup.
///
/// Base attributes come from the last endpoint object in the primary
/// tree (falling back to the secondary when the primary is unusable).
/// Paths and reporting leaves are unioned over both trees.
pub fn correlate(
    identifier: &str,
    kind: EndpointKind,
    primary: Option<&Tree>,
    secondary: Option<&Tree>,
) -> EndpointLookup {
    let not_found = || EndpointLookup::NotFound {
        identifier: identifier.to_owned(),
    };

    let base = primary
        .and_then(|t| t.nodes_of_class(ENDPOINT_CLASS).last())
        .or_else(|| secondary.and_then(|t| t.nodes_of_class(ENDPOINT_CLASS).last()));
    let Some(base) = base else {
        return not_found();
    };
    let Some(location) = base.attribute("dn").and_then(parse_location) else {
        return not_found();
    };

    let trees: Vec<&Tree> = primary.into_iter().chain(secondary).collect();

    let mut paths = Vec::new();
    let mut switches = Vec::new();
    for tree in &trees {
        for endpoint in tree.nodes_of_class(ENDPOINT_CLASS) {
            collect_paths(endpoint, &mut paths);
            collect_switches(endpoint, &mut switches);
        }
    }

    EndpointLookup::Found(EndpointRecord {
        identifier: identifier.to_owned(),
        kind,
        reverse_address: non_empty(base.attribute(kind.reverse_attribute())),
        tenant: location.tenant,
        app: location.app,
        epg: location.epg,
        domain: non_empty(base.attribute("lcC")),
        encap: non_empty(base.attribute("encap")),
        paths,
        switches,
    })
}

fn collect_paths(endpoint: &Node, paths: &mut Vec<String>) {
    for attachment in endpoint.children_of_class(PATH_ATTACHMENT) {
        let target = attachment
            .attribute("tDn")
            .or_else(|| attachment.attribute("rn"))
            .unwrap_or_default();
        if let Some(path) = parse_policy_group(target).or_else(|| parse_path_group(target)) {
            push_unique(paths, path);
        }
    }
    for class in [HYPERVISOR_ATTACHMENT, VM_ATTACHMENT] {
        for attachment in endpoint.children_of_class(class) {
            if let Some(path) = attachment.attribute("tDn").and_then(parse_vmm_attachment) {
                push_unique(paths, path);
            }
        }
    }
}

fn collect_switches(endpoint: &Node, switches: &mut Vec<String>) {
    let reporting = endpoint
        .children()
        .iter()
        .filter(|child| REPORTING_PARENTS.contains(&child.class()))
        .flat_map(|child| child.children_of_class(REPORTING_NODE))
        .filter_map(|node| node.attribute("id"));
    for id in reporting {
        push_unique(switches, id.to_owned());
    }
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}
