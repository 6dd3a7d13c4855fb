//! eignung-core: question generators, answer evaluation, and scoring.
//!
//! This crate defines the data model, the generator registry, and the
//! evaluation and grading logic that the eignung trainer builds on.

pub mod assembler;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod generators;
pub mod model;
pub mod registry;
pub mod report;
pub mod scoring;
pub mod session;
pub mod traits;
pub mod validate;

pub use assembler::{create_test, Assembler};
pub use error::{QuizError, QuizResult};
pub use evaluator::{evaluate, evaluate_raw, Verdict};
pub use registry::Registry;
pub use scoring::{score, score_with, Grade, ScoreReport, ScoringConfig};
pub use session::{LifetimeStats, Session};
