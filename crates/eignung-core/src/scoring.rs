//! Scoring and grading of a finished attempt.
//!
//! `final = base + time_bonus + base · (multiplier − 1)` where `base` is the
//! percentage of correct answers and the time bonus rewards an average under
//! the configured base time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{AttemptRecord, Category, Difficulty};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How records without an elapsed time enter the average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UntimedPolicy {
    /// Count them as zero seconds.
    #[default]
    Zero,
    /// Leave them out of the average.
    Exclude,
}

/// Tunables of the grading engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Average seconds per question at which the time bonus reaches zero.
    #[serde(default = "default_time_bonus_base")]
    pub time_bonus_base: f64,
    /// Bonus points per second under `time_bonus_base`.
    #[serde(default = "default_time_bonus_factor")]
    pub time_bonus_factor: f64,
    #[serde(default)]
    pub untimed: UntimedPolicy,
    /// Success rate below which an area is weak.
    #[serde(default = "default_weak_threshold")]
    pub weak_threshold: f64,
    /// Success rate from which an area is strong.
    #[serde(default = "default_strong_threshold")]
    pub strong_threshold: f64,
}

fn default_time_bonus_base() -> f64 {
    60.0
}

fn default_time_bonus_factor() -> f64 {
    0.5
}

fn default_weak_threshold() -> f64 {
    0.5
}

fn default_strong_threshold() -> f64 {
    0.8
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            time_bonus_base: default_time_bonus_base(),
            time_bonus_factor: default_time_bonus_factor(),
            untimed: UntimedPolicy::default(),
            weak_threshold: default_weak_threshold(),
            strong_threshold: default_strong_threshold(),
        }
    }
}

// ---------------------------------------------------------------------------
// Grades
// ---------------------------------------------------------------------------

/// Five-tier school-grade banding of the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    VeryGood,
    Good,
    Satisfactory,
    Sufficient,
    KeepPracticing,
}

impl Grade {
    pub fn from_score(final_score: f64) -> Self {
        if final_score >= 90.0 {
            Grade::VeryGood
        } else if final_score >= 80.0 {
            Grade::Good
        } else if final_score >= 70.0 {
            Grade::Satisfactory
        } else if final_score >= 60.0 {
            Grade::Sufficient
        } else {
            Grade::KeepPracticing
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::VeryGood => "Sehr gut",
            Grade::Good => "Gut",
            Grade::Satisfactory => "Befriedigend",
            Grade::Sufficient => "Ausreichend",
            Grade::KeepPracticing => "Weiter üben",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Grade::VeryGood => "🌟",
            Grade::Good => "👏",
            Grade::Satisfactory => "👍",
            Grade::Sufficient => "🙂",
            Grade::KeepPracticing => "💪",
        }
    }

    /// German school grade, 1 (best) to 5.
    pub fn school_grade(self) -> u8 {
        match self {
            Grade::VeryGood => 1,
            Grade::Good => 2,
            Grade::Satisfactory => 3,
            Grade::Sufficient => 4,
            Grade::KeepPracticing => 5,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.label(), self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Success rate of one subject area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub total: usize,
    pub correct: usize,
    /// `correct / total`, between 0 and 1.
    pub rate: f64,
}

/// Read-only result of grading an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub difficulty: Difficulty,
    pub total: usize,
    pub correct: usize,
    /// Percentage of correct answers.
    pub base: f64,
    /// Mean seconds per question; `None` when nothing was timed.
    pub average_secs: Option<f64>,
    pub time_bonus: f64,
    pub multiplier: f64,
    pub difficulty_bonus: f64,
    pub final_score: f64,
    pub grade: Grade,
    pub categories: Vec<CategoryScore>,
    pub weak: Vec<Category>,
    pub strong: Vec<Category>,
    pub study_plan: Vec<String>,
}

impl ScoreReport {
    /// The report for an attempt without answers.
    pub fn neutral(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            total: 0,
            correct: 0,
            base: 0.0,
            average_secs: None,
            time_bonus: 0.0,
            multiplier: difficulty.multiplier(),
            difficulty_bonus: 0.0,
            final_score: 0.0,
            grade: Grade::from_score(0.0),
            categories: Vec::new(),
            weak: Vec::new(),
            strong: Vec::new(),
            study_plan: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

fn average_secs(records: &[AttemptRecord], policy: UntimedPolicy) -> Option<f64> {
    let times: Vec<f64> = match policy {
        UntimedPolicy::Zero => records
            .iter()
            .map(|r| r.elapsed_secs.unwrap_or(0.0).max(0.0))
            .collect(),
        UntimedPolicy::Exclude => records
            .iter()
            .filter_map(|r| r.elapsed_secs)
            .map(|t| t.max(0.0))
            .collect(),
    };
    if times.is_empty() {
        return None;
    }
    Some(times.iter().sum::<f64>() / times.len() as f64)
}

/// Per-area success rates, in category order.
pub fn category_breakdown(records: &[AttemptRecord]) -> Vec<CategoryScore> {
    let mut buckets: BTreeMap<Category, (usize, usize)> = BTreeMap::new();
    for r in records {
        let entry = buckets.entry(r.category).or_default();
        entry.0 += 1;
        if r.correct {
            entry.1 += 1;
        }
    }
    buckets
        .into_iter()
        .map(|(category, (total, correct))| CategoryScore {
            category,
            total,
            correct,
            rate: correct as f64 / total.max(1) as f64,
        })
        .collect()
}

/// Grade an attempt with the default configuration.
pub fn score(records: &[AttemptRecord], difficulty: Difficulty) -> ScoreReport {
    score_with(records, difficulty, &ScoringConfig::default())
}

/// Grade an attempt.
pub fn score_with(
    records: &[AttemptRecord],
    difficulty: Difficulty,
    config: &ScoringConfig,
) -> ScoreReport {
    if records.is_empty() {
        tracing::debug!("scoring an empty attempt");
        return ScoreReport::neutral(difficulty);
    }

    let total = records.len();
    let correct = records.iter().filter(|r| r.correct).count();
    let base = 100.0 * correct as f64 / total as f64;

    let average = average_secs(records, config.untimed);
    let time_bonus = average
        .map(|avg| (config.time_bonus_base - avg).max(0.0) * config.time_bonus_factor)
        .unwrap_or(0.0);

    let multiplier = difficulty.multiplier();
    let difficulty_bonus = base * (multiplier - 1.0);
    let final_score = base + time_bonus + difficulty_bonus;
    let grade = Grade::from_score(final_score);

    let categories = category_breakdown(records);
    let weak: Vec<Category> = categories
        .iter()
        .filter(|c| c.rate < config.weak_threshold)
        .map(|c| c.category)
        .collect();
    let strong: Vec<Category> = categories
        .iter()
        .filter(|c| c.rate >= config.strong_threshold)
        .map(|c| c.category)
        .collect();

    let study_plan = if weak.is_empty() {
        vec!["Keine Schwächen erkannt. Niveau halten und die nächsthöhere Schwierigkeitsstufe ausprobieren.".to_string()]
    } else {
        weak.iter()
            .map(|c| format!("{}: {}", c.label(), c.study_tip()))
            .collect()
    };

    tracing::info!(
        total,
        correct,
        final_score,
        grade = grade.label(),
        "attempt scored"
    );

    ScoreReport {
        difficulty,
        total,
        correct,
        base,
        average_secs: average,
        time_bonus,
        multiplier,
        difficulty_bonus,
        final_score,
        grade,
        categories,
        weak,
        strong,
        study_plan,
    }
}
