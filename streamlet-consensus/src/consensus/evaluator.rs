use serde::{Deserialize, Serialize};

/// Componente responsável por avaliar notarização com base em votos e quorum.
///
/// The threshold is the Byzantine supermajority `ceil(2n/3)`: for
/// `n = 3f + 1` participants it tolerates up to `f` faulty voters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConsensusEvaluator {
    n_nodes: usize,
}

impl ConsensusEvaluator {
    pub fn new(n_nodes: usize) -> Self {
        Self { n_nodes }
    }

    /// Smallest integer greater than or equal to `2n/3`.
    pub fn quorum(&self) -> usize {
        (2 * self.n_nodes + 2) / 3
    }

    /// True once `votes` meets the quorum threshold.
    pub fn reaches_quorum(&self, votes: usize) -> bool {
        votes >= self.quorum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quorum_thresholds() {
        // n=4, f=1 -> quorum 3
        assert_eq!(ConsensusEvaluator::new(4).quorum(), 3);
        // n=7, f=2 -> quorum 5
        assert_eq!(ConsensusEvaluator::new(7).quorum(), 5);
        assert_eq!(ConsensusEvaluator::new(1).quorum(), 1);
        assert_eq!(ConsensusEvaluator::new(3).quorum(), 2);
    }

    #[test]
    fn test_quorum_boundary_four_nodes() {
        let evaluator = ConsensusEvaluator::new(4);

        assert!(!evaluator.reaches_quorum(2));
        assert!(evaluator.reaches_quorum(3));
        assert!(evaluator.reaches_quorum(4));
    }
}
