use tracing::{info, warn};

use streamlet_common::{env::vote_data::VoteData, utils::NodeId};
use streamlet_consensus::ConsensusEngine;

/// Conduz o protocolo época por época, entregando propostas e votos a todos
/// os participantes.
///
/// Engines are owned by value and never reference each other; blocks and
/// votes cross engine boundaries only as clones, delivered in ascending
/// node-id order so a run is reproducible from its inputs.
#[derive(Debug)]
pub struct EpochOrchestrator {
    engines: Vec<ConsensusEngine>,
}

impl EpochOrchestrator {
    pub fn new(n_nodes: usize) -> Self {
        let engines = (0..n_nodes)
            .map(|id| ConsensusEngine::new(NodeId(id as u64), n_nodes))
            .collect();
        Self { engines }
    }

    pub fn node_count(&self) -> usize {
        self.engines.len()
    }

    pub fn engines(&self) -> &[ConsensusEngine] {
        &self.engines
    }

    /// Computes the epoch leader, solicits its proposal and fans out the
    /// proposal and the resulting votes, so that every honest participant
    /// reaches notarization within the epoch.
    ///
    /// A participant that rejects the proposal simply casts no vote; the
    /// rest of the epoch proceeds without it.
    pub fn run_epoch(&mut self, epoch: u64, transactions: Vec<String>) {
        let leader = NodeId(epoch % self.engines.len() as u64);
        info!(
            "🔄 epoch {}: leader [{}], {} transaction(s)",
            epoch,
            leader,
            transactions.len()
        );

        let block = self.engines[leader.0 as usize].propose_block(epoch, transactions);

        // Proposal fan-out, leader included: acceptance casts the own vote.
        let mut votes: Vec<VoteData> = Vec::new();
        for engine in &mut self.engines {
            if engine.receive_proposal(block.clone(), leader) {
                votes.push(VoteData {
                    epoch,
                    block_hash: block.hash.clone(),
                    voter: engine.node_id(),
                });
            } else {
                warn!("⚠️ [{}] cast no vote in epoch {}", engine.node_id(), epoch);
            }
        }

        // Vote fan-out: every vote reaches every other participant, so all
        // tallies converge before the epoch concludes.
        for vote in &votes {
            for engine in &mut self.engines {
                if engine.node_id() == vote.voter {
                    continue;
                }
                if let Some(evidence) = engine.receive_vote(vote.clone()) {
                    warn!(
                        "🚨 [{}] reported equivocation by [{}] in epoch {}",
                        engine.node_id(),
                        evidence.offender,
                        evidence.epoch
                    );
                }
            }
        }
    }
}
