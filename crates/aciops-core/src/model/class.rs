// ── Object classes and containment scopes ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The policy object classes the catalog and mutation builder operate on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum FabricClass {
    Tenant,
    Vrf,
    BridgeDomain,
    AppProfile,
    Epg,
    Subnet,
}

impl FabricClass {
    /// Managed-object class name on the controller.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Tenant => "fvTenant",
            Self::Vrf => "fvCtx",
            Self::BridgeDomain => "fvBD",
            Self::AppProfile => "fvAp",
            Self::Epg => "fvAEPg",
            Self::Subnet => "fvSubnet",
        }
    }

    /// Human label used in result messages (`"BD: BD1 Exist"`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Tenant => "Tenant",
            Self::Vrf => "Vrf",
            Self::BridgeDomain => "BD",
            Self::AppProfile => "App Profile",
            Self::Epg => "EPG",
            Self::Subnet => "Subnet",
        }
    }

    /// Attribute that identifies an instance within its parent.
    pub fn key_attribute(self) -> &'static str {
        match self {
            Self::Subnet => "ip",
            _ => "name",
        }
    }

    /// Whether instances of this class live directly under `scope`.
    pub fn lives_in(self, scope: &Scope) -> bool {
        matches!(
            (self, scope),
            (Self::Tenant, Scope::Fabric)
                | (
                    Self::Vrf | Self::BridgeDomain | Self::AppProfile,
                    Scope::Tenant { .. }
                )
                | (Self::Epg, Scope::App { .. })
                | (Self::Subnet, Scope::BridgeDomain { .. })
        )
    }
}

/// Containment scope a catalog listing or a write is rooted at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Scope {
    /// The policy universe (`uni`).
    Fabric,
    Tenant { tenant: String },
    App { tenant: String, app: String },
    BridgeDomain { tenant: String, bd: String },
}

impl Scope {
    pub fn tenant(tenant: impl Into<String>) -> Self {
        Self::Tenant {
            tenant: tenant.into(),
        }
    }

    pub fn app(tenant: impl Into<String>, app: impl Into<String>) -> Self {
        Self::App {
            tenant: tenant.into(),
            app: app.into(),
        }
    }

    pub fn bridge_domain(tenant: impl Into<String>, bd: impl Into<String>) -> Self {
        Self::BridgeDomain {
            tenant: tenant.into(),
            bd: bd.into(),
        }
    }

    /// Distinguished name of the scope's container object.
    pub fn dn(&self) -> String {
        match self {
            Self::Fabric => "uni".into(),
            Self::Tenant { tenant } => format!("uni/tn-{tenant}"),
            Self::App { tenant, app } => format!("uni/tn-{tenant}/ap-{app}"),
            Self::BridgeDomain { tenant, bd } => format!("uni/tn-{tenant}/BD-{bd}"),
        }
    }
}
