use std::collections::HashSet;

use tracing::{debug, info, warn};

use streamlet_common::{
    env::block::{Block, GENESIS_PARENT_HASH},
    env::consensus::{evidence::EquivocationEvidence, types::NodeStats},
    env::vote_data::VoteData,
    utils::NodeId,
};

use super::{chain::ChainStore, evaluator::ConsensusEvaluator, registry::VoteRegistry};

/// Motor de consenso de um único participante.
///
/// Owns a local chain view plus the per-epoch vote tally; every mutation
/// arrives through `receive_proposal` or `receive_vote`, and every rejected
/// input leaves the state untouched.
#[derive(Debug, Clone)]
pub struct ConsensusEngine {
    node_id: NodeId,
    n_nodes: usize,
    store: ChainStore,
    registry: VoteRegistry,
    evaluator: ConsensusEvaluator,
}

impl ConsensusEngine {
    /// Creates the engine and synthesizes the genesis block, notarized by
    /// fiat without any votes.
    pub fn new(node_id: NodeId, n_nodes: usize) -> Self {
        debug_assert!(n_nodes > 0, "a cluster needs at least one participant");
        Self {
            node_id,
            n_nodes,
            store: ChainStore::new(),
            registry: VoteRegistry::new(),
            evaluator: ConsensusEvaluator::new(n_nodes),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn total_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Round-robin leader schedule, identical on every participant.
    pub fn epoch_leader(&self, epoch: u64) -> NodeId {
        NodeId(epoch % self.n_nodes as u64)
    }

    /// Constrói um novo bloco estendendo a cadeia notarizada mais longa.
    ///
    /// The block is returned, not admitted: the environment must deliver it
    /// back through `receive_proposal`, proposer included, so every
    /// participant runs the same admission path.
    pub fn propose_block(&self, epoch: u64, transactions: Vec<String>) -> Block {
        let tip = self.store.longest_notarized_tip();
        let block = Block::new(epoch, tip.hash.clone(), transactions, self.node_id);
        debug!(
            "📦 [{}] proposed block {} for epoch {} extending {}",
            self.node_id, block.hash, epoch, block.parent_hash
        );
        block
    }

    /// Valida e admite uma proposta; em caso de sucesso o próprio nó vota nela.
    ///
    /// Returns false, with no state change, when any check fails.
    pub fn receive_proposal(&mut self, block: Block, proposer: NodeId) -> bool {
        if !self.validate_block(&block, proposer) {
            return false;
        }

        let epoch = block.epoch;
        let hash = block.hash.clone();
        self.store.insert(block);
        info!(
            "📥 [{}] accepted block {} for epoch {}",
            self.node_id, hash, epoch
        );
        self.cast_vote(epoch, &hash);
        true
    }

    /// Ingests a peer's vote for a block this engine already knows about.
    ///
    /// Duplicate deliveries are no-ops. A vote conflicting with the voter's
    /// earlier vote in the same epoch is dropped and returned as evidence.
    pub fn receive_vote(&mut self, vote: VoteData) -> Option<EquivocationEvidence> {
        if vote.voter.0 >= self.n_nodes as u64 {
            warn!(
                "⚠️ [{}] ignored vote from unknown participant [{}]",
                self.node_id, vote.voter
            );
            return None;
        }
        if !self.store.contains(&vote.block_hash) {
            warn!(
                "⚠️ [{}] ignored vote for unknown block {} (epoch {})",
                self.node_id, vote.block_hash, vote.epoch
            );
            return None;
        }

        match self
            .registry
            .register_vote(vote.epoch, &vote.block_hash, vote.voter)
        {
            Ok(true) => {
                debug!(
                    "🗳️ [{}] recorded vote by [{}] for block {} (epoch {})",
                    self.node_id, vote.voter, vote.block_hash, vote.epoch
                );
                self.notarize_block(&vote.block_hash);
                None
            }
            Ok(false) => None,
            Err(evidence) => {
                warn!(
                    "🚨 [{}] equivocation by [{}] in epoch {}: {} vs {}",
                    self.node_id, evidence.offender, evidence.epoch, evidence.block_a, evidence.block_b
                );
                Some(evidence)
            }
        }
    }

    /// Todas as verificações precisam passar; qualquer falha rejeita a proposta.
    fn validate_block(&self, block: &Block, proposer: NodeId) -> bool {
        if !block.is_valid() {
            warn!(
                "⚠️ [{}] rejected block {}: structurally invalid",
                self.node_id, block.hash
            );
            return false;
        }

        if proposer != self.epoch_leader(block.epoch) {
            warn!(
                "⚠️ [{}] rejected block {}: [{}] is not the leader of epoch {}",
                self.node_id, block.hash, proposer, block.epoch
            );
            return false;
        }

        if block.parent_hash != GENESIS_PARENT_HASH
            && !(self.store.contains(&block.parent_hash)
                && self.store.is_notarized(&block.parent_hash))
        {
            warn!(
                "⚠️ [{}] rejected block {}: parent {} unknown or not notarized",
                self.node_id, block.hash, block.parent_hash
            );
            return false;
        }

        if self.store.contains(&block.hash) {
            debug!(
                "⚠️ [{}] rejected block {}: already admitted",
                self.node_id, block.hash
            );
            return false;
        }

        if let Some(previous) = self.registry.voted_for(block.epoch, self.node_id) {
            if *previous != block.hash {
                warn!(
                    "⚠️ [{}] rejected block {}: already voted for {} in epoch {}",
                    self.node_id, block.hash, previous, block.epoch
                );
                return false;
            }
        }

        true
    }

    /// Registra o voto do próprio nó e reavalia a notarização.
    fn cast_vote(&mut self, epoch: u64, block_hash: &str) {
        // validate_block refuses conflicting proposals, so this never
        // produces evidence against ourselves.
        if self
            .registry
            .register_vote(epoch, block_hash, self.node_id)
            .is_ok()
        {
            self.notarize_block(block_hash);
        }
    }

    /// Marca o bloco como notarizado quando o quorum é atingido.
    fn notarize_block(&mut self, block_hash: &str) {
        let Some(epoch) = self.store.get(block_hash).map(|b| b.epoch) else {
            return;
        };

        let votes = self.registry.count(epoch, block_hash);
        if !self.evaluator.reaches_quorum(votes) {
            return;
        }

        if self.store.mark_notarized(block_hash) {
            info!(
                "✅ [{}] notarized block {} ({}/{} votes)",
                self.node_id,
                block_hash,
                votes,
                self.evaluator.quorum()
            );
            self.check_finalization();
        }
    }

    /// Finaliza o prefixo da cadeia ao observar três épocas consecutivas
    /// notarizadas.
    ///
    /// The first two blocks of the trio, plus every not-yet-finalized
    /// ancestor, move into the finalized sequence in ancestor-to-descendant
    /// order. Re-running the scan never re-appends or reorders.
    fn check_finalization(&mut self) {
        let tip = self.store.longest_notarized_tip().clone();
        let path: Vec<Block> = self
            .store
            .path_from_genesis(&tip)
            .into_iter()
            .cloned()
            .collect();

        // Index of the middle block of the consecutive trio closest to the tip.
        let mut boundary = None;
        for i in 2..path.len() {
            if path[i].epoch == path[i - 1].epoch + 1
                && path[i - 1].epoch == path[i - 2].epoch + 1
            {
                boundary = Some(i - 1);
            }
        }
        let Some(end) = boundary else {
            return;
        };

        for block in &path[..=end] {
            let (hash, epoch) = (block.hash.clone(), block.epoch);
            if self.store.append_finalized(block.clone()) {
                info!(
                    "🎉 [{}] finalized block {} (epoch {})",
                    self.node_id, hash, epoch
                );
            }
        }
    }

    /// Read-only snapshot for the presentation layer.
    pub fn stats(&self) -> NodeStats {
        NodeStats {
            node_id: self.node_id,
            total_blocks: self.store.chain().len(),
            finalized_blocks: self.store.finalized().len(),
            notarized_blocks: self.store.notarized().len(),
            latest_epoch: self.store.latest_epoch(),
        }
    }

    /// Accepted blocks in acceptance order, genesis first.
    pub fn blockchain(&self) -> &[Block] {
        self.store.chain()
    }

    /// Permanently committed blocks in ancestor-to-descendant order.
    pub fn finalized_blocks(&self) -> &[Block] {
        self.store.finalized()
    }

    /// Hashes of every block that reached quorum, genesis included.
    pub fn notarized_blocks(&self) -> &HashSet<String> {
        self.store.notarized()
    }

    /// Distinct votes recorded for a block in an epoch.
    pub fn votes_for(&self, epoch: u64, block_hash: &str) -> usize {
        self.registry.count(epoch, block_hash)
    }
}
