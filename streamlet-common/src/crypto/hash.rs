use sha2::{Digest, Sha256};

use crate::utils::NodeId;

/// Computes the SHA-256 digest of the given data and returns it as a hex string.
pub fn digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Computes the content hash of a block.
///
/// The hash covers, in order:
/// - epoch
/// - parent_hash
/// - transactions (each one length-prefixed, in sequence order)
/// - proposer
///
/// It does NOT cover the timestamp, so independently synthesized genesis
/// blocks agree on a single hash.
pub fn compute_block_hash(
    epoch: u64,
    parent_hash: &str,
    transactions: &[String],
    proposer: NodeId,
) -> String {
    let mut hasher = Sha256::new();

    hasher.update(epoch.to_le_bytes());
    hasher.update(parent_hash.as_bytes());
    for tx in transactions {
        // Length prefix keeps ["ab","c"] and ["a","bc"] from colliding.
        hasher.update((tx.len() as u64).to_le_bytes());
        hasher.update(tx.as_bytes());
    }
    hasher.update(proposer.0.to_le_bytes());

    let result = hasher.finalize();
    hex::encode(result)
}
