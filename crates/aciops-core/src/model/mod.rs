// ── Fabric domain model ──
//
// Every type in this module is the canonical representation of a fabric
// object as consumers (the CLI, tests) see it. Nothing here knows about
// XML, JSON or URLs; the resolvers translate object trees into these.

pub mod class;
pub mod endpoint;
pub mod gateway;
pub mod health;

// ── Re-exports ──────────────────────────────────────────────────────

pub use class::{FabricClass, Scope};
pub use endpoint::{EndpointKind, EndpointLookup, EndpointPair, EndpointRecord, Location};
pub use gateway::{BridgeDomainRef, GatewayRecord};
pub use health::{FabricNodeInfo, FabricHealth, PodHealth};

/// Join a list for single-line display; empty lists become `None`.
pub(crate) fn joined(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}
