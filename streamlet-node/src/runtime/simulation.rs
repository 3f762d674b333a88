use thiserror::Error;
use tracing::info;

use crate::{runtime::orchestrator::EpochOrchestrator, summary, txgen};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("a simulation needs at least one node")]
    NoNodes,
}

/// Executa épocas sequenciais com lotes de transações sintéticas.
///
/// Epochs advance one per call, are never replayed and never roll back.
pub struct SimulationRunner {
    orchestrator: EpochOrchestrator,
}

impl SimulationRunner {
    pub fn new(n_nodes: usize) -> Result<Self, SimulationError> {
        if n_nodes == 0 {
            return Err(SimulationError::NoNodes);
        }
        Ok(Self {
            orchestrator: EpochOrchestrator::new(n_nodes),
        })
    }

    /// Drives epochs `1..=num_epochs`, rendering a summary after each one.
    pub fn run(&mut self, num_epochs: u64, txs_per_epoch: usize) {
        for epoch in 1..=num_epochs {
            let batch = txgen::generate_batch(epoch, txs_per_epoch);
            self.orchestrator.run_epoch(epoch, batch);
            summary::show_epoch_summary(&self.orchestrator, epoch);
        }
        info!("🏁 simulation complete after {} epoch(s)", num_epochs);
    }

    pub fn orchestrator(&self) -> &EpochOrchestrator {
        &self.orchestrator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_nodes_is_refused() {
        assert!(matches!(
            SimulationRunner::new(0),
            Err(SimulationError::NoNodes)
        ));
    }

    #[test]
    fn test_runner_drives_all_epochs() {
        let mut runner = SimulationRunner::new(4).expect("four nodes");
        runner.run(3, 2);

        for engine in runner.orchestrator().engines() {
            let stats = engine.stats();
            assert_eq!(stats.latest_epoch, 3);
            assert_eq!(stats.total_blocks, 4); // genesis + 3 epochs
        }
    }
}
