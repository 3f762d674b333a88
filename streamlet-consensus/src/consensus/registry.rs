use std::collections::{HashMap, HashSet};

use streamlet_common::{env::consensus::evidence::EquivocationEvidence, utils::NodeId};

/// Armazena os votos de cada nó para cada bloco, separados por época.
#[derive(Debug, Default, Clone)]
pub struct VoteRegistry {
    // (Epoch, BlockHash) -> distinct voters
    votes: HashMap<(u64, String), HashSet<NodeId>>,

    // Epoch -> NodeID -> BlockHash (for detecting votes on different blocks in the same epoch)
    voted: HashMap<u64, HashMap<NodeId, String>>,
}

impl VoteRegistry {
    /// Cria um novo registro de votos vazio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra o voto de um nó para um bloco em uma determinada época.
    ///
    /// Returns `Ok(true)` when the vote is newly recorded and `Ok(false)`
    /// when the identical vote was already present (set semantics). A vote
    /// for a different block in the same epoch is not recorded; the
    /// resulting evidence is returned instead.
    pub fn register_vote(
        &mut self,
        epoch: u64,
        block_hash: &str,
        voter: NodeId,
    ) -> Result<bool, EquivocationEvidence> {
        let epoch_index = self.voted.entry(epoch).or_default();

        match epoch_index.get(&voter) {
            Some(previous) if previous != block_hash => {
                return Err(EquivocationEvidence {
                    offender: voter,
                    epoch,
                    block_a: previous.clone(),
                    block_b: block_hash.to_string(),
                });
            }
            Some(_) => return Ok(false),
            None => {
                epoch_index.insert(voter, block_hash.to_string());
            }
        }

        let newly = self
            .votes
            .entry((epoch, block_hash.to_string()))
            .or_default()
            .insert(voter);
        Ok(newly)
    }

    /// Retorna a quantidade de votos distintos para um bloco em sua época.
    pub fn count(&self, epoch: u64, block_hash: &str) -> usize {
        self.votes
            .get(&(epoch, block_hash.to_string()))
            .map(|voters| voters.len())
            .unwrap_or(0)
    }

    /// O hash em que o nó votou nesta época, se houver.
    pub fn voted_for(&self, epoch: u64, voter: NodeId) -> Option<&String> {
        self.voted.get(&epoch).and_then(|index| index.get(&voter))
    }

    /// Todos os votantes de um bloco em uma época (se existirem).
    pub fn voters(&self, epoch: u64, block_hash: &str) -> Option<&HashSet<NodeId>> {
        self.votes.get(&(epoch, block_hash.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_votes() {
        let mut registry = VoteRegistry::new();

        let res = registry.register_vote(1, "block-a", NodeId(0));
        assert!(matches!(res, Ok(true)));
        assert_eq!(registry.count(1, "block-a"), 1);

        // Idempotent (same vote)
        let res = registry.register_vote(1, "block-a", NodeId(0));
        assert!(matches!(res, Ok(false)));
        assert_eq!(registry.count(1, "block-a"), 1);
    }

    #[test]
    fn test_equivocation_is_detected_and_not_recorded() {
        let mut registry = VoteRegistry::new();

        registry.register_vote(1, "block-a", NodeId(0)).unwrap();

        // Same epoch, different block -> evidence, vote dropped.
        let evidence = registry
            .register_vote(1, "block-b", NodeId(0))
            .unwrap_err();
        assert_eq!(evidence.offender, NodeId(0));
        assert_eq!(evidence.epoch, 1);
        assert_eq!(evidence.block_a, "block-a");
        assert_eq!(evidence.block_b, "block-b");

        assert_eq!(registry.count(1, "block-b"), 0);
        assert_eq!(registry.voted_for(1, NodeId(0)), Some(&"block-a".to_string()));
    }

    #[test]
    fn test_different_epochs_are_independent() {
        let mut registry = VoteRegistry::new();

        registry.register_vote(1, "block-a", NodeId(0)).unwrap();

        // Same voter, next epoch, another block -> fine.
        let res = registry.register_vote(2, "block-b", NodeId(0));
        assert!(matches!(res, Ok(true)));
    }

    #[test]
    fn test_distinct_voters_accumulate() {
        let mut registry = VoteRegistry::new();

        for id in 0..3 {
            registry.register_vote(5, "block-x", NodeId(id)).unwrap();
        }
        assert_eq!(registry.count(5, "block-x"), 3);
        assert_eq!(registry.voters(5, "block-x").map(|v| v.len()), Some(3));
    }
}
