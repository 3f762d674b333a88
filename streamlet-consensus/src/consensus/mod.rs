//! consensus.rs
//!
//! Per-participant engine for a synchronous, epoch-based finality protocol.
//!
//! Each participant owns a local chain view, a per-epoch vote tally and the
//! notarized/finalized sets. Proposals and votes arrive as plain calls from
//! the environment; rejected input is a local no-op and never an error.
//!
//! The engine is deliberately deterministic: given the same inputs in the
//! same order, every honest participant converges on the same chain tip.

mod chain;
pub mod engine;
pub mod evaluator;
mod registry;

pub use engine::ConsensusEngine;
