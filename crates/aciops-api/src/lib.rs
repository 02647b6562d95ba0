// aciops-api: Async Rust client for the APIC object-tree REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod query;
pub mod transport;
pub mod tree;

pub use auth::SessionInfo;
pub use client::ApicClient;
pub use error::Error;
pub use query::{Query, QueryTarget, RspSubtree};
pub use transport::{TlsMode, TransportConfig};
pub use tree::{Encoding, Node, Tree};
