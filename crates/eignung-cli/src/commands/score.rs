//! The `eignung score` command.

use std::path::PathBuf;

use anyhow::{bail, Result};

use eignung_core::config::load_config_from;
use eignung_core::report::load_records;
use eignung_core::scoring::score_with;

use crate::render;

pub fn execute(
    results_path: PathBuf,
    difficulty: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let difficulty = super::resolve_difficulty(difficulty, &config)?;
    let records = load_records(&results_path)?;

    let report = score_with(&records, difficulty, &config.scoring);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        "text" => println!("{}", render::report(&report)),
        other => bail!("unknown format: {other} (expected text, json or markdown)"),
    }

    Ok(())
}
