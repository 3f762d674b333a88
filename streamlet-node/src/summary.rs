use chrono::{TimeZone, Utc};
use tracing::{info, warn};

use crate::runtime::orchestrator::EpochOrchestrator;

/// Mostra o resumo de uma época a partir dos acessores de leitura.
pub fn show_epoch_summary(orchestrator: &EpochOrchestrator, epoch: u64) {
    for engine in orchestrator.engines() {
        let stats = engine.stats();
        info!(
            "📊 epoch {} [{}]: {} block(s), {} notarized, {} finalized",
            epoch, stats.node_id, stats.total_blocks, stats.notarized_blocks, stats.finalized_blocks
        );
    }
}

/// Final summary across all participants, with an agreement check on the
/// finalized ledger.
pub fn show_final_summary(orchestrator: &EpochOrchestrator) {
    info!("=== FINAL SUMMARY ({} nodes) ===", orchestrator.node_count());

    for engine in orchestrator.engines() {
        let stats = engine.stats();
        let tip_time = engine
            .blockchain()
            .last()
            .map(|block| block.time)
            .unwrap_or(0);
        info!(
            "📊 [{}]: {} block(s), {} notarized, {} finalized, latest epoch {}, tip created {}",
            stats.node_id,
            stats.total_blocks,
            stats.notarized_blocks,
            stats.finalized_blocks,
            stats.latest_epoch,
            format_timestamp(tip_time)
        );
    }

    if chains_agree(orchestrator) {
        info!("✅ All nodes agree on the finalized ledger");
    } else {
        warn!("🚨 Finalized ledgers diverge between nodes");
    }
}

/// True when every engine holds the identical finalized hash sequence.
pub fn chains_agree(orchestrator: &EpochOrchestrator) -> bool {
    let mut sequences = orchestrator.engines().iter().map(|engine| {
        engine
            .finalized_blocks()
            .iter()
            .map(|block| block.hash.as_str())
            .collect::<Vec<_>>()
    });

    match sequences.next() {
        None => true,
        Some(reference) => sequences.all(|sequence| sequence == reference),
    }
}

fn format_timestamp(secs: u64) -> String {
    Utc.timestamp_opt(secs as i64, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}
