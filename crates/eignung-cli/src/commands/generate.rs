//! The `eignung generate` command.

use std::path::PathBuf;

use anyhow::{bail, Result};

use eignung_core::assembler::Assembler;
use eignung_core::config::load_config_from;
use eignung_core::model::Selection;

use crate::render;

pub fn execute(
    category: String,
    difficulty: Option<String>,
    count: Option<usize>,
    seed: Option<u64>,
    format: String,
    answers: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let difficulty = super::resolve_difficulty(difficulty, &config)?;
    let count = config.clamp_count(count.unwrap_or(config.default_count));
    let selection: Selection = category.parse()?;

    let mut rng = super::make_rng(seed);
    let test = Assembler::default().assemble(selection, difficulty, count, &mut rng)?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&test)?),
        "text" => {
            println!(
                "{}, {} ({} Fragen)\n",
                test.selection().label(),
                test.difficulty().label(),
                test.len()
            );
            for (i, q) in test.questions().iter().enumerate() {
                if let Some(material) = render::memorize(q) {
                    println!("{material}");
                }
                println!("{}", render::question(i, test.len(), q));
                if answers {
                    if let Some(solution) = render::solution(q) {
                        println!("  Lösung: {solution}");
                    }
                    println!("  {}\n", q.explanation());
                }
            }
        }
        other => bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
