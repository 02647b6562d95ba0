// aciops-core: Fabric object resolution and mutation engine on top of aciops-api.

pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod fabric;
pub mod model;
pub mod mutation;
pub mod path;
pub mod resolve;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult, RoutingScope, ScopeFlag, Toggle};
pub use config::{AuthCredentials, FabricConfig, TlsVerification};
pub use error::CoreError;
pub use fabric::{Fabric, SessionState};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    BridgeDomainRef, EndpointKind, EndpointLookup, EndpointPair, EndpointRecord, FabricClass,
    FabricHealth, FabricNodeInfo, GatewayRecord, Location, PodHealth, Scope,
};
