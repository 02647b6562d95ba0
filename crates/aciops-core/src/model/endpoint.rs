// ── Endpoint domain types ──

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::joined;

/// Which identifier an endpoint lookup was keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
    Mac,
    Ip,
}

impl EndpointKind {
    /// Anything that parses as a dotted IPv4 address is an IP lookup,
    /// everything else is treated as a MAC.
    pub fn detect(identifier: &str) -> Self {
        if identifier.parse::<Ipv4Addr>().is_ok() {
            Self::Ip
        } else {
            Self::Mac
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Mac => Self::Ip,
            Self::Ip => Self::Mac,
        }
    }

    /// Attribute on the endpoint object holding the *other* address.
    pub(crate) fn reverse_attribute(self) -> &'static str {
        match self {
            Self::Mac => "ip",
            Self::Ip => "mac",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mac => "MAC",
            Self::Ip => "IP",
        })
    }
}

/// Tenant / application profile / EPG triple decoded from a DN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub tenant: String,
    pub app: String,
    pub epg: String,
}

/// A learned endpoint and where the fabric sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub identifier: String,
    pub kind: EndpointKind,
    /// IP for a MAC lookup, MAC for an IP lookup.
    pub reverse_address: Option<String>,
    pub tenant: String,
    pub app: String,
    pub epg: String,
    /// Learning source / domain (`lcC`, e.g. `learned,vmm`).
    pub domain: Option<String>,
    /// Encapsulation, e.g. `vlan-110`.
    pub encap: Option<String>,
    /// Interface or policy-group attachments, in discovery order.
    pub paths: Vec<String>,
    /// Reporting leaf node ids, de-duplicated in discovery order.
    pub switches: Vec<String>,
}

impl EndpointRecord {
    pub fn path_list(&self) -> Option<String> {
        joined(&self.paths)
    }

    pub fn switch_list(&self) -> Option<String> {
        joined(&self.switches)
    }
}

/// Outcome of a single endpoint lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum EndpointLookup {
    Found(EndpointRecord),
    NotFound { identifier: String },
}

impl EndpointLookup {
    pub fn found(&self) -> Option<&EndpointRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound { .. } => None,
        }
    }
}

/// A lookup followed by the lookup of its reverse address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointPair {
    pub primary: EndpointLookup,
    pub reverse: Option<EndpointLookup>,
}
