use serde::{Deserialize, Serialize};

use crate::crypto::hash::compute_block_hash;
use crate::utils::{time::current_time, NodeId};

/// Parent reference carried by the genesis block.
pub const GENESIS_PARENT_HASH: &str = "0";

/// An immutable, content-addressed ledger entry.
///
/// The hash is computed once at construction and never changes; the
/// timestamp is informational and stays outside the hash preimage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Protocol round this block was proposed in.
    pub epoch: u64,

    /// Hash of the predecessor block; `GENESIS_PARENT_HASH` for genesis.
    pub parent_hash: String,

    /// Ordered opaque transaction payloads.
    pub transactions: Vec<String>,

    /// The node that proposed this block.
    pub proposer: NodeId,

    /// Content hash (hex SHA-256) over epoch, parent, transactions, proposer.
    pub hash: String,

    /// Creation time in UNIX seconds. Never consulted by protocol logic.
    pub time: u64,
}

impl Block {
    pub fn new(
        epoch: u64,
        parent_hash: String,
        transactions: Vec<String>,
        proposer: NodeId,
    ) -> Self {
        let hash = compute_block_hash(epoch, &parent_hash, &transactions, proposer);
        Self {
            epoch,
            parent_hash,
            transactions,
            proposer,
            hash,
            time: current_time(),
        }
    }

    /// The genesis block every participant synthesizes locally.
    ///
    /// All fields covered by the hash are fixed, so every engine derives
    /// the same genesis hash without coordination.
    pub fn genesis() -> Self {
        Self::new(0, GENESIS_PARENT_HASH.to_string(), Vec::new(), NodeId(0))
    }

    pub fn is_genesis(&self) -> bool {
        self.epoch == 0 && self.parent_hash == GENESIS_PARENT_HASH
    }

    /// Structural sanity check. Genesis is always considered valid; any
    /// other block must carry a non-empty parent reference.
    pub fn is_valid(&self) -> bool {
        self.is_genesis() || !self.parent_hash.is_empty()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
