use serde::{Deserialize, Serialize};

use crate::utils::NodeId;

/// Read-only snapshot of one participant's view of the chain.
///
/// Produced by the engine for the presentation layer; taking a snapshot
/// never mutates consensus state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStats {
    pub node_id: NodeId,

    /// Blocks accepted into the local chain, genesis included.
    pub total_blocks: usize,

    /// Blocks permanently committed to the canonical ledger.
    pub finalized_blocks: usize,

    /// Blocks that reached quorum, genesis included.
    pub notarized_blocks: usize,

    /// Highest epoch among accepted blocks.
    pub latest_epoch: u64,
}
