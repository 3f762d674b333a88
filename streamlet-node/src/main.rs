use clap::Parser;
use tracing::info;
use tracing_subscriber::prelude::*;

use streamlet_node::{cli::Args, runtime::simulation::SimulationRunner, summary};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logging: stdout with env filter, plus a non-blocking audit file that
    // captures every consensus event.
    let file_appender = tracing_appender::rolling::never(".", "audit.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let consensus_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(tracing_subscriber::filter::filter_fn(|metadata| {
            metadata.target().starts_with("streamlet_consensus")
        }));

    let stdout_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
    );

    tracing_subscriber::registry()
        .with(consensus_layer)
        .with(stdout_layer)
        .init();

    info!("--- INICIANDO SIMULAÇÃO DE FINALIDADE ---");
    info!(
        "Nodes: {} | Epochs: {} | Txs/epoch: {}",
        args.nodes, args.epochs, args.txs_per_epoch
    );

    let mut runner = SimulationRunner::new(args.nodes)?;
    runner.run(args.epochs, args.txs_per_epoch);

    summary::show_final_summary(runner.orchestrator());

    if args.json {
        let stats: Vec<_> = runner
            .orchestrator()
            .engines()
            .iter()
            .map(|engine| engine.stats())
            .collect();
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}
