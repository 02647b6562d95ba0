// ── Gateway / bridge domain view ──

use std::fmt;

use serde::{Serialize, Serializer};

use super::joined;

/// Which bridge domain a gateway lookup landed on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BridgeDomainRef {
    Named(String),
    /// A fragment was given but no subnet or bridge domain matched.
    #[default]
    Missing,
    /// No fragment was given, nothing was scanned.
    Unspecified,
}

impl BridgeDomainRef {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Missing | Self::Unspecified => None,
        }
    }
}

impl fmt::Display for BridgeDomainRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Missing => f.write_str("Doesn't exist"),
            Self::Unspecified => f.write_str("none"),
        }
    }
}

impl Serialize for BridgeDomainRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unspecified => serializer.serialize_none(),
            other => serializer.collect_str(other),
        }
    }
}

/// Everything the fabric says about the bridge domain serving a subnet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GatewayRecord {
    pub bridge_domain: BridgeDomainRef,
    /// `unicastRoute` on the bridge domain.
    pub unicast_routing: Option<String>,
    /// Subnet scope, e.g. `public,shared`.
    pub scope: Option<String>,
    /// `unkMacUcastAct` on the bridge domain.
    pub unknown_unicast: Option<String>,
    pub tenant: Option<String>,
    pub apps: Vec<String>,
    pub epgs: Vec<String>,
    pub l3outs: Vec<String>,
    pub vrf: Option<String>,
    pub ip_learning: Option<String>,
    pub mtu: Option<String>,
    pub limit_learning: Option<String>,
    pub mac: Option<String>,
    /// Every subnet gateway configured in the fabric.
    pub gateways: Vec<String>,
}

impl GatewayRecord {
    pub fn unspecified(gateways: Vec<String>) -> Self {
        Self {
            bridge_domain: BridgeDomainRef::Unspecified,
            gateways,
            ..Self::default()
        }
    }

    pub fn app_list(&self) -> Option<String> {
        joined(&self.apps)
    }

    pub fn epg_list(&self) -> Option<String> {
        joined(&self.epgs)
    }

    pub fn l3out_list(&self) -> Option<String> {
        joined(&self.l3outs)
    }

    pub fn gateway_list(&self) -> Option<String> {
        joined(&self.gateways)
    }
}
