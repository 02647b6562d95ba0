// ── Command API ──
//
// All write operations flow through a unified `Command` enum. Each
// variant carries already-validated arguments; `Fabric::execute` runs
// the existence checks, builds the payload and posts it.

pub mod validate;

use std::fmt;

use serde::Serialize;

use crate::model::{FabricClass, GatewayRecord};

pub use validate::{RoutingScope, ScopeFlag, Toggle};

/// All possible write operations against the fabric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // ── Creation ─────────────────────────────────────────────────────
    CreateTenant {
        tenant: String,
    },
    CreateVrf {
        tenant: String,
        vrf: String,
    },
    /// Layer-2 bridge domain: name only.
    CreateBridgeDomainL2 {
        tenant: String,
        bd: String,
    },
    /// Layer-3 bridge domain with its first subnet, in one write.
    CreateBridgeDomainL3 {
        tenant: String,
        bd: String,
        subnet: String,
        scope: RoutingScope,
    },
    CreateAppProfile {
        tenant: String,
        app: String,
    },
    CreateEpg {
        tenant: String,
        app: String,
        epg: String,
    },
    /// Additional subnet on an existing bridge domain.
    CreateSubnet {
        tenant: String,
        bd: String,
        subnet: String,
        scope: RoutingScope,
    },

    // ── Modification ─────────────────────────────────────────────────
    SetRoutingScope {
        tenant: String,
        bd: String,
        subnet: String,
        scope: RoutingScope,
    },
    SetUnicastRouting {
        tenant: String,
        bd: String,
        enable: Toggle,
    },
    AssociateVrf {
        tenant: String,
        bd: String,
        vrf: String,
    },
}

/// Outcome of a command.
///
/// Refusals are steady-state answers, not errors: re-running a create
/// that already happened yields `AlreadyExists` without a write.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum CommandResult {
    /// The write went out. `catalog` is re-listed afterwards.
    Applied {
        response: serde_json::Value,
        catalog: Vec<String>,
        gateway: Option<GatewayRecord>,
    },
    AlreadyExists {
        class: FabricClass,
        name: String,
    },
    /// A required parent or peer object is absent.
    Missing {
        class: FabricClass,
        name: String,
    },
}

impl CommandResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn catalog(&self) -> Option<&[String]> {
        match self {
            Self::Applied { catalog, .. } => Some(catalog),
            _ => None,
        }
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied { .. } => f.write_str("Applied"),
            Self::AlreadyExists { class, name } => write!(f, "{}: {name} Exist", class.label()),
            Self::Missing { class, name } => {
                let label = match class {
                    FabricClass::Vrf => "VRF",
                    other => other.label(),
                };
                write!(f, "{label}: {name} Doesn't Exist")
            }
        }
    }
}
