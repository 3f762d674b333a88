use clap::Parser;

/// Deterministic multi-node finality protocol simulation.
#[derive(Debug, Parser)]
#[command(name = "streamlet-node")]
pub struct Args {
    /// Number of participants in the cluster.
    #[arg(long, default_value_t = 4)]
    pub nodes: usize,

    /// Number of epochs to simulate.
    #[arg(long, default_value_t = 10)]
    pub epochs: u64,

    /// Synthetic transactions generated per epoch.
    #[arg(long = "txs-per-epoch", default_value_t = 3)]
    pub txs_per_epoch: usize,

    /// Emit the final per-node stats as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}
