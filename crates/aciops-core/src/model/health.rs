// ── Fabric health snapshot types ──

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A switch or controller node registered in a pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricNodeInfo {
    pub id: Option<String>,
    pub name: String,
    pub role: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
}

/// Health of one populated pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodHealth {
    pub pod: u8,
    /// Object URI the pod was read from.
    pub uri: String,
    pub nodes: Vec<FabricNodeInfo>,
    /// Current health score (0-100).
    pub health: Option<u32>,
    pub previous: Option<u32>,
    pub change: Option<i32>,
}

/// Pods keyed by `pod-N`, in probe order. Empty pods are absent.
pub type FabricHealth = IndexMap<String, PodHealth>;
