//! Explicit practice state.
//!
//! A [`Session`] walks through one [`Test`] and accumulates the attempt;
//! [`LifetimeStats`] aggregates finished sessions. Neither is shared: the
//! caller owns them and passes them where needed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, QuizResult};
use crate::evaluator::{evaluate, Verdict};
use crate::model::{AttemptRecord, Category, Question, Submission, Test};
use crate::scoring::{score_with, ScoreReport, ScoringConfig};

/// One pass through a test.
#[derive(Debug, Clone)]
pub struct Session {
    test: Test,
    cursor: usize,
    records: Vec<AttemptRecord>,
    time_limit: Option<f64>,
}

impl Session {
    pub fn new(test: Test) -> Self {
        Self {
            test,
            cursor: 0,
            records: Vec::new(),
            time_limit: None,
        }
    }

    /// Answers slower than `seconds` are graded as incorrect.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn test(&self) -> &Test {
        &self.test
    }

    pub fn time_limit(&self) -> Option<f64> {
        self.time_limit
    }

    /// The question awaiting an answer, or `None` once all are answered.
    pub fn current(&self) -> Option<&Question> {
        self.test.get(self.cursor)
    }

    /// Evaluate `submission` for the current question, record it and advance.
    ///
    /// `elapsed` is the time the user took in seconds, if it was measured.
    pub fn submit(&mut self, submission: &Submission, elapsed: Option<f64>) -> QuizResult<Verdict> {
        let question = self.current().ok_or(QuizError::SessionComplete)?;
        let mut verdict = evaluate(question, submission);

        let timed_out = matches!((self.time_limit, elapsed), (Some(limit), Some(t)) if t > limit);
        if timed_out {
            verdict.is_correct = false;
        }

        let record = AttemptRecord {
            question: self.cursor,
            category: question.category,
            kind: question.kind(),
            correct: verdict.is_correct,
            elapsed_secs: elapsed,
        };
        tracing::debug!(
            question = self.cursor,
            kind = %record.kind,
            correct = record.correct,
            timed_out,
            "answer recorded"
        );

        self.records.push(record);
        self.cursor += 1;
        Ok(verdict)
    }

    /// Record a question as unanswered and move on.
    pub fn skip(&mut self, elapsed: Option<f64>) -> QuizResult<Verdict> {
        let question = self.current().ok_or(QuizError::SessionComplete)?;
        let verdict = Verdict {
            is_correct: false,
            explanation: question.explanation().to_string(),
        };
        self.records.push(AttemptRecord {
            question: self.cursor,
            category: question.category,
            kind: question.kind(),
            correct: false,
            elapsed_secs: elapsed,
        });
        self.cursor += 1;
        Ok(verdict)
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.test.len()
    }

    /// `(answered, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.test.len())
    }

    pub fn records(&self) -> &[AttemptRecord] {
        &self.records
    }

    /// Score the session with the default configuration.
    pub fn finish(&self) -> QuizResult<ScoreReport> {
        self.finish_with(&ScoringConfig::default())
    }

    /// Score the session. Fails until every question is answered.
    pub fn finish_with(&self, config: &ScoringConfig) -> QuizResult<ScoreReport> {
        if !self.is_complete() {
            return Err(QuizError::SessionIncomplete {
                answered: self.cursor,
                total: self.test.len(),
            });
        }
        Ok(score_with(&self.records, self.test.difficulty, config))
    }
}

/// Running totals of one category across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub questions: usize,
    pub correct: usize,
}

/// Aggregate over every finished session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifetimeStats {
    pub tests: usize,
    pub questions: usize,
    pub correct: usize,
    pub best_score: Option<f64>,
    pub per_category: BTreeMap<Category, CategoryTotals>,
}

impl LifetimeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished session's report into the totals.
    pub fn record(&mut self, report: &ScoreReport) {
        self.tests += 1;
        self.questions += report.total;
        self.correct += report.correct;
        self.best_score = Some(match self.best_score {
            Some(best) => best.max(report.final_score),
            None => report.final_score,
        });
        for c in &report.categories {
            let totals = self.per_category.entry(c.category).or_default();
            totals.questions += c.total;
            totals.correct += c.correct;
        }
    }

    /// Share of correct answers, 0 when nothing was answered.
    pub fn accuracy(&self) -> f64 {
        if self.questions == 0 {
            return 0.0;
        }
        self.correct as f64 / self.questions as f64
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::Assembler;
    use crate::model::{Answer, Composite, Difficulty, Selection};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(count: usize) -> Session {
        let mut rng = StdRng::seed_from_u64(11);
        let test = Assembler::default()
            .assemble(
                Selection::Composite(Composite::Mixed),
                Difficulty::Medium,
                count,
                &mut rng,
            )
            .unwrap();
        Session::new(test)
    }

    /// The submission that answers `question` correctly.
    fn correct_submission(question: &Question) -> Submission {
        match question.answer() {
            Answer::Integer(n) => Submission::Number(*n as f64),
            Answer::Decimal(x) => Submission::Number(*x),
            Answer::Choice(i) => Submission::Choice(*i),
            Answer::Choices(set) => Submission::Choices(set.clone()),
            Answer::Text(s) => Submission::Text(s.clone()),
            Answer::Open => Submission::Text("Text".into()),
        }
    }

    #[test]
    fn walks_through_all_questions() {
        let mut s = session(5);
        assert_eq!(s.progress(), (0, 5));
        while let Some(q) = s.current() {
            let submission = correct_submission(q);
            assert!(s.submit(&submission, Some(20.0)).unwrap().is_correct);
        }
        assert!(s.is_complete());
        assert_eq!(s.records().len(), 5);

        let report = s.finish().unwrap();
        assert_eq!(report.correct, 5);
        assert!((report.base - 100.0).abs() < 1e-9);
    }

    #[test]
    fn finish_before_last_answer_fails() {
        let mut s = session(5);
        s.skip(None).unwrap();
        assert_eq!(
            s.finish().unwrap_err(),
            QuizError::SessionIncomplete {
                answered: 1,
                total: 5
            }
        );
    }

    #[test]
    fn submit_after_completion_fails() {
        let mut s = session(5);
        for _ in 0..5 {
            s.skip(Some(1.0)).unwrap();
        }
        let err = s.submit(&Submission::Number(1.0), None).unwrap_err();
        assert_eq!(err, QuizError::SessionComplete);
    }

    #[test]
    fn exceeding_time_limit_marks_incorrect() {
        let mut s = session(5).with_time_limit(30.0);
        let q = s.current().unwrap().clone();
        let verdict = s.submit(&correct_submission(&q), Some(45.0)).unwrap();
        assert!(!verdict.is_correct);
        assert_eq!(verdict.explanation, q.explanation());
        assert!(!s.records()[0].correct);

        let q = s.current().unwrap().clone();
        assert!(s.submit(&correct_submission(&q), Some(10.0)).unwrap().is_correct);
    }

    #[test]
    fn lifetime_stats_aggregate_sessions() {
        let mut stats = LifetimeStats::new();
        assert_eq!(stats.accuracy(), 0.0);

        let mut good = session(6);
        while let Some(q) = good.current() {
            let submission = correct_submission(q);
            good.submit(&submission, Some(10.0)).unwrap();
        }
        let mut bad = session(6);
        while !bad.is_complete() {
            bad.skip(Some(10.0)).unwrap();
        }

        let good_report = good.finish().unwrap();
        stats.record(&good_report);
        stats.record(&bad.finish().unwrap());

        assert_eq!(stats.tests, 2);
        assert_eq!(stats.questions, 12);
        assert_eq!(stats.correct, 6);
        assert!((stats.accuracy() - 0.5).abs() < 1e-9);
        assert_eq!(stats.best_score, Some(good_report.final_score));
        let per_category: usize = stats.per_category.values().map(|t| t.questions).sum();
        assert_eq!(per_category, 12);

        stats.reset();
        assert_eq!(stats, LifetimeStats::default());
    }
}
