//! Score report persistence and Markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::AttemptRecord;
use crate::scoring::ScoreReport;

impl ScoreReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ScoreReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("# Auswertung\n\n");

        if self.is_empty() {
            md.push_str("Keine Antworten vorhanden.\n");
            return md;
        }

        md.push_str(&format!(
            "**Note: {} {}** (Schulnote {})\n\n",
            self.grade.label(),
            self.grade.symbol(),
            self.grade.school_grade()
        ));

        md.push_str("| Wert | Ergebnis |\n|---|---|\n");
        md.push_str(&format!(
            "| Richtig | {} von {} |\n",
            self.correct, self.total
        ));
        md.push_str(&format!("| Basis | {:.1} |\n", self.base));
        match self.average_secs {
            Some(avg) => md.push_str(&format!("| Ø Zeit | {avg:.1} s |\n")),
            None => md.push_str("| Ø Zeit | – |\n"),
        }
        md.push_str(&format!("| Zeitbonus | {:.1} |\n", self.time_bonus));
        md.push_str(&format!(
            "| Schwierigkeitsbonus ({}, ×{:.1}) | {:.1} |\n",
            self.difficulty.label(),
            self.multiplier,
            self.difficulty_bonus
        ));
        md.push_str(&format!("| **Endpunktzahl** | **{:.1}** |\n", self.final_score));

        if !self.categories.is_empty() {
            md.push_str("\n## Kategorien\n\n");
            md.push_str("| Kategorie | Richtig | Quote |\n|---|---|---|\n");
            for c in &self.categories {
                md.push_str(&format!(
                    "| {} | {}/{} | {:.0}% |\n",
                    c.category.label(),
                    c.correct,
                    c.total,
                    c.rate * 100.0
                ));
            }
        }

        if !self.strong.is_empty() {
            let names: Vec<&str> = self.strong.iter().map(|c| c.label()).collect();
            md.push_str(&format!("\n**Stärken:** {}\n", names.join(", ")));
        }
        if !self.weak.is_empty() {
            let names: Vec<&str> = self.weak.iter().map(|c| c.label()).collect();
            md.push_str(&format!("\n**Schwächen:** {}\n", names.join(", ")));
        }

        if !self.study_plan.is_empty() {
            md.push_str("\n## Lernplan\n\n");
            for step in &self.study_plan {
                md.push_str(&format!("- {step}\n"));
            }
        }

        md
    }
}

/// Load attempt records from a JSON array.
pub fn load_records(path: &Path) -> Result<Vec<AttemptRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read results from {}", path.display()))?;
    let records: Vec<AttemptRecord> =
        serde_json::from_str(&content).context("failed to parse results JSON")?;
    Ok(records)
}

/// Save attempt records as a JSON array.
pub fn save_records(records: &[AttemptRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("failed to serialize results")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write results to {}", path.display()))?;
    Ok(())
}
