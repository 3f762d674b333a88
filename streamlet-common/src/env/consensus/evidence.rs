use serde::{Deserialize, Serialize};

use crate::utils::NodeId;

/// Record of a participant voting for two distinct blocks within one epoch.
///
/// The conflicting vote is never tallied; this record is what the engine
/// hands back so the environment can surface the offender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquivocationEvidence {
    pub offender: NodeId,
    pub epoch: u64,
    pub block_a: String,
    pub block_b: String,
}
