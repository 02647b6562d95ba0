// ── Distinguished-name decoding ──
//
// Pure helpers that turn DNs and relative names into location triples
// and attachment descriptions. Segments are split on `/` outside of
// `[...]`, so bracketed targets such as `pathep-[eth1/10]` stay whole.

use crate::model::Location;

/// Split a DN into its relative names, respecting bracket nesting.
pub fn split_dn(dn: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in dn.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => {
                segments.push(&dn[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&dn[start..]);
    segments
}

/// Content between the first `[` and the last `]`, if both are present.
pub fn bracket_content(segment: &str) -> Option<&str> {
    let open = segment.find('[')?;
    let close = segment.rfind(']')?;
    (close > open).then(|| &segment[open + 1..close])
}

fn strip<'a>(segment: &'a str, prefix: &str) -> &'a str {
    segment.strip_prefix(prefix).unwrap_or(segment)
}

/// Decode `uni/tn-T/ap-A/epg-E[/...]` into its tenant, app and EPG.
///
/// Fewer than four segments yields `None`. A segment lacking its
/// expected prefix is taken verbatim.
pub fn parse_location(dn: &str) -> Option<Location> {
    let segments = split_dn(dn);
    let [_, tenant, app, epg, ..] = segments.as_slice() else {
        return None;
    };
    Some(Location {
        tenant: strip(tenant, "tn-").to_owned(),
        app: strip(app, "ap-").to_owned(),
        epg: strip(epg, "epg-").to_owned(),
    })
}

/// The DN an attachment points at: bracket content of a relative name
/// such as `rscEpToPathEp-[topology/...]`, or the string itself when it
/// is already a topology DN.
fn attachment_target(rn: &str) -> &str {
    if rn.starts_with("topology/") {
        return rn;
    }
    bracket_content(rn)
        .filter(|inner| inner.starts_with("topology/"))
        .unwrap_or(rn)
}

/// Interface id of a path attachment, e.g. `eth1/10` from
/// `topology/pod-1/paths-101/pathep-[eth1/10]`.
pub fn parse_path_group(rn: &str) -> Option<String> {
    split_dn(attachment_target(rn))
        .iter()
        .rev()
        .find(|segment| segment.starts_with("pathep-"))
        .and_then(|segment| bracket_content(segment))
        .map(str::to_owned)
}

/// Full attachment description `pod->node(s)->interface`, e.g.
/// `pod-1->101-102->vpc-web` for a vPC policy group.
pub fn parse_policy_group(rn: &str) -> Option<String> {
    let target = attachment_target(rn);
    let segments = split_dn(target);
    let [_, pod, group, path, ..] = segments.as_slice() else {
        return None;
    };
    let group = group
        .strip_prefix("protpaths-")
        .or_else(|| group.strip_prefix("paths-"))
        .unwrap_or(group);
    let path = bracket_content(path)?;
    Some(format!("{pod}->{group}->{path}"))
}

/// Last segment of a VMM attachment (`hv-host-10`, `vm-vm-123`).
pub fn parse_vmm_attachment(tdn: &str) -> Option<String> {
    split_dn(tdn)
        .last()
        .filter(|segment| !segment.is_empty())
        .map(|segment| (*segment).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn location_from_endpoint_dn() {
        let loc = parse_location("uni/tn-T1/ap-A1/epg-E1/cep-00:50:56:AA:BB:CC").unwrap_or_else(
            || panic!("expected a location"),
        );
        assert_eq!(loc.tenant, "T1");
        assert_eq!(loc.app, "A1");
        assert_eq!(loc.epg, "E1");
    }

    #[test]
    fn location_requires_four_segments() {
        assert_eq!(parse_location("uni/tn-T1/ap-A1"), None);
        assert_eq!(parse_location(""), None);
    }

    #[test]
    fn location_keeps_unprefixed_segments() {
        let loc = parse_location("uni/T1/ap-A1/E1").unwrap_or_else(|| panic!("expected a location"));
        assert_eq!(loc.tenant, "T1");
        assert_eq!(loc.epg, "E1");
    }

    #[test]
    fn brackets_survive_splitting() {
        assert_eq!(
            split_dn("uni/tn-T1/BD-BD1/rtbd-[uni/tn-T1/ap-A1/epg-E1]"),
            vec!["uni", "tn-T1", "BD-BD1", "rtbd-[uni/tn-T1/ap-A1/epg-E1]"]
        );
    }

    #[test]
    fn policy_group_for_vpc() {
        let rn = "rscEpToPathEp-[topology/pod-1/protpaths-101-102/pathep-[vpc-web]]";
        assert_eq!(
            parse_policy_group(rn).as_deref(),
            Some("pod-1->101-102->vpc-web")
        );
    }

    #[test]
    fn policy_group_for_single_port() {
        let tdn = "topology/pod-2/paths-201/pathep-[eth1/10]";
        assert_eq!(
            parse_policy_group(tdn).as_deref(),
            Some("pod-2->201->eth1/10")
        );
        assert_eq!(parse_path_group(tdn).as_deref(), Some("eth1/10"));
    }

    #[test]
    fn short_attachment_is_not_a_policy_group() {
        assert_eq!(parse_policy_group("topology/pod-1/paths-101"), None);
        assert_eq!(parse_path_group("topology/pod-1/paths-101"), None);
        assert_eq!(parse_path_group("pathep-[eth1/3]").as_deref(), Some("eth1/3"));
    }

    #[test]
    fn vmm_attachment_names() {
        assert_eq!(
            parse_vmm_attachment("comp/prov-VMware/ctrlr-[DC1]-vc1/hv-host-10").as_deref(),
            Some("hv-host-10")
        );
        assert_eq!(parse_vmm_attachment(""), None);
    }
}
