//! Practice configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Difficulty;
use crate::scoring::ScoringConfig;

/// Top-level eignung configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EignungConfig {
    /// Tier used when none is given on the command line.
    #[serde(default)]
    pub default_difficulty: Difficulty,
    #[serde(default = "default_count")]
    pub default_count: usize,
    #[serde(default = "default_min_count")]
    pub min_count: usize,
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    /// Per-question time limit; absent means untimed.
    #[serde(default = "default_seconds_per_question")]
    pub seconds_per_question: Option<f64>,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

fn default_count() -> usize {
    10
}
fn default_min_count() -> usize {
    5
}
fn default_max_count() -> usize {
    30
}
fn default_seconds_per_question() -> Option<f64> {
    Some(60.0)
}

impl Default for EignungConfig {
    fn default() -> Self {
        Self {
            default_difficulty: Difficulty::default(),
            default_count: default_count(),
            min_count: default_min_count(),
            max_count: default_max_count(),
            seconds_per_question: default_seconds_per_question(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl EignungConfig {
    /// Bring a requested question count into `[min_count, max_count]`.
    pub fn clamp_count(&self, requested: usize) -> usize {
        let (lo, hi) = if self.min_count <= self.max_count {
            (self.min_count, self.max_count)
        } else {
            (self.max_count, self.min_count)
        };
        let count = requested.clamp(lo, hi);
        if count != requested {
            tracing::warn!(requested, count, "question count out of range, clamped");
        }
        count
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `eignung.toml` in the current directory
/// 2. `~/.config/eignung/config.toml`
///
/// Environment variable override: `EIGNUNG_DIFFICULTY`.
pub fn load_config() -> Result<EignungConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EignungConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("eignung.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<EignungConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => EignungConfig::default(),
    };

    if let Ok(value) = std::env::var("EIGNUNG_DIFFICULTY") {
        apply_difficulty_override(&mut config, &value);
    }

    Ok(config)
}

fn apply_difficulty_override(config: &mut EignungConfig, value: &str) {
    match value.parse::<Difficulty>() {
        Ok(difficulty) => config.default_difficulty = difficulty,
        Err(e) => tracing::warn!(%value, error = %e, "ignoring EIGNUNG_DIFFICULTY"),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("eignung"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::UntimedPolicy;

    #[test]
    fn default_config() {
        let config = EignungConfig::default();
        assert_eq!(config.default_count, 10);
        assert_eq!(config.min_count, 5);
        assert_eq!(config.max_count, 30);
        assert_eq!(config.seconds_per_question, Some(60.0));
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
default_difficulty = "hard"
default_count = 20

[scoring]
untimed = "exclude"
weak_threshold = 0.6
"#;
        let config: EignungConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_difficulty, Difficulty::Hard);
        assert_eq!(config.default_count, 20);
        assert_eq!(config.max_count, 30);
        assert_eq!(config.scoring.untimed, UntimedPolicy::Exclude);
        assert!((config.scoring.weak_threshold - 0.6).abs() < 1e-9);
        assert!((config.scoring.time_bonus_base - 60.0).abs() < 1e-9);
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eignung.toml");
        std::fs::write(&path, "min_count = 3\nmax_count = 12\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.min_count, 3);
        assert_eq!(config.clamp_count(50), 12);
        assert_eq!(config.clamp_count(1), 3);
        assert_eq!(config.clamp_count(7), 7);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/eignung.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "default_count = \"viele\"").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }

    #[test]
    fn difficulty_override_accepts_german_names() {
        let mut config = EignungConfig::default();
        apply_difficulty_override(&mut config, "schwer");
        assert_eq!(config.default_difficulty, Difficulty::Hard);
        apply_difficulty_override(&mut config, "unmöglich");
        assert_eq!(config.default_difficulty, Difficulty::Hard);
    }
}
