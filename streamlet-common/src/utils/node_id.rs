use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer identity of a participant.
///
/// Identities are assigned densely from zero, so a node id doubles as an
/// index into the orchestrator's engine table and feeds the round-robin
/// leader schedule directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}
