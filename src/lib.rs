//! # Court Scheduler
//!
//! Pairing generator for multi-court doubles/singles club events.
//!
//! ## Architecture
//!
//! - **models**: Players, pairing history, candidate matches and round results
//! - **scoring**: Weighted desirability score for a proposed match
//! - **generator**: Greedy round assembly over the available player pool
//! - **snapshot**: JSON event snapshots consumed by the CLI
//! - **config**: Configuration loading and validation
//!
//! The library does no I/O beyond the snapshot and config loaders; round
//! generation is a pure function of its input.

pub mod config;
pub mod generator;
pub mod models;
pub mod scoring;
pub mod snapshot;

pub use generator::{generate_round, GenerateRoundInput, GeneratorError};
pub use models::*;
pub use scoring::{calculate_total_score, ScoringContext, Weights};

/// Split a comma-separated id list (e.g., "p1,p2"), dropping blanks.
pub fn parse_id_list(s: &str) -> Vec<PlayerId> {
    s.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(PlayerId::from)
        .collect()
}
