//! Subcommand implementations.

pub mod categories;
pub mod generate;
pub mod init;
pub mod practice;
pub mod score;
pub mod validate;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use eignung_core::config::EignungConfig;
use eignung_core::model::Difficulty;

/// Difficulty from the command line, else the configured default.
pub(crate) fn resolve_difficulty(arg: Option<String>, config: &EignungConfig) -> Result<Difficulty> {
    match arg {
        Some(s) => s
            .parse::<Difficulty>()
            .with_context(|| format!("invalid --difficulty '{s}'")),
        None => Ok(config.default_difficulty),
    }
}

pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    tracing::debug!(?seed, "seeding question generator");
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
