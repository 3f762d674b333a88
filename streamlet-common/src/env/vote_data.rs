use serde::{Deserialize, Serialize};

use crate::utils::NodeId;

/// A vote for a block within its epoch, broadcast between participants.
///
/// Identity is asserted by the simulated environment; there is no
/// signature material here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteData {
    pub epoch: u64,
    pub block_hash: String,
    pub voter: NodeId,
}

impl VoteData {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
