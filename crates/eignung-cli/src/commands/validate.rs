//! The `eignung validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use eignung_core::model::Test;
use eignung_core::registry::Registry;
use eignung_core::validate::{check_registry, validate_test, ValidationWarning};

pub fn execute(samples: usize, seed: Option<u64>, test_path: Option<PathBuf>) -> Result<()> {
    let warnings = match test_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read test from {}", path.display()))?;
            let test: Test = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse test JSON: {}", path.display()))?;
            println!("Test: {} ({} questions)", test.selection().label(), test.len());
            validate_test(&test)
        }
        None => {
            let registry = Registry::standard();
            println!(
                "Generators: {} ({samples} samples per kind and tier)",
                registry.len()
            );
            let mut rng = super::make_rng(seed);
            check_registry(&registry, samples, &mut rng)
        }
    };

    report_warnings(&warnings)
}

fn report_warnings(warnings: &[ValidationWarning]) -> Result<()> {
    for w in warnings {
        println!("  WARNING: {w}");
    }

    if warnings.is_empty() {
        println!("All questions valid.");
        Ok(())
    } else {
        anyhow::bail!("{} warning(s) found", warnings.len())
    }
}
