//! Answer evaluation.
//!
//! The comparison rule is a function of the question kind only. Evaluation
//! never mutates the question and always hands back its stored explanation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, QuizResult};
use crate::model::{Answer, Question, QuestionKind, Submission};

/// Tolerance for derived money and percentage values.
pub const DECIMAL_TOLERANCE: f64 = 0.01;

/// How a kind's submissions are compared against its answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvalRule {
    /// Numeric equality within `tolerance` (0 for integers).
    Numeric { tolerance: f64 },
    /// Submitted index equals the answer index.
    SingleChoice,
    /// Submitted index set equals the answer set exactly.
    MultiChoice,
    /// Whitespace-normalized, case-sensitive string equality.
    TextRecall,
    /// Correct whenever something non-empty was submitted.
    OpenEnded,
}

pub fn rule_for(kind: QuestionKind) -> EvalRule {
    match kind {
        QuestionKind::NumberSequence
        | QuestionKind::Matrix
        | QuestionKind::CubeRotation
        | QuestionKind::PaperFolding
        | QuestionKind::Tangram
        | QuestionKind::SymbolCount => EvalRule::Numeric { tolerance: 0.0 },
        QuestionKind::WordProblem => EvalRule::Numeric {
            tolerance: DECIMAL_TOLERANCE,
        },
        QuestionKind::Syllogism
        | QuestionKind::Analogy
        | QuestionKind::SymbolSequence
        | QuestionKind::CubeNet
        | QuestionKind::Spelling
        | QuestionKind::Grammar
        | QuestionKind::Comprehension
        | QuestionKind::GeneralKnowledge
        | QuestionKind::LatinSquare => EvalRule::SingleChoice,
        QuestionKind::SyllogismMulti => EvalRule::MultiChoice,
        QuestionKind::DigitSpan
        | QuestionKind::NameRecall
        | QuestionKind::CaseNumber => EvalRule::TextRecall,
        QuestionKind::Dictation => EvalRule::OpenEnded,
    }
}

/// Outcome of evaluating one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_correct: bool,
    pub explanation: String,
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

fn malformed(kind: QuestionKind, reason: impl Into<String>) -> QuizError {
    QuizError::MalformedAnswer {
        kind: kind.to_string(),
        reason: reason.into(),
    }
}

/// Collapse whitespace runs and trim.
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a number, accepting a German decimal comma.
fn parse_number(kind: QuestionKind, raw: &str) -> QuizResult<f64> {
    let cleaned = raw.trim().replace(' ', "").replace(',', ".");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| malformed(kind, format!("'{}' is not a number", raw.trim())))
}

/// Parse an option label: a letter (`B`) or a one-based number (`2`).
fn parse_choice(kind: QuestionKind, raw: &str) -> QuizResult<usize> {
    let token = raw.trim().trim_end_matches([')', '.']);
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.clone().next()) {
        if c.is_ascii_alphabetic() {
            return Ok((c.to_ascii_uppercase() as u8 - b'A') as usize);
        }
    }
    match token.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(malformed(kind, format!("'{}' is not an option", raw.trim()))),
    }
}

fn parse_choices(kind: QuestionKind, raw: &str) -> QuizResult<BTreeSet<usize>> {
    let set = raw
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| parse_choice(kind, t))
        .collect::<QuizResult<BTreeSet<usize>>>()?;
    if set.is_empty() {
        return Err(malformed(kind, "no option selected"));
    }
    Ok(set)
}

impl Submission {
    /// Interpret raw user input the way `kind` expects it.
    pub fn parse(kind: QuestionKind, raw: &str) -> QuizResult<Submission> {
        match rule_for(kind) {
            EvalRule::Numeric { .. } => parse_number(kind, raw).map(Submission::Number),
            EvalRule::SingleChoice => parse_choice(kind, raw).map(Submission::Choice),
            EvalRule::MultiChoice => parse_choices(kind, raw).map(Submission::Choices),
            EvalRule::TextRecall | EvalRule::OpenEnded => Ok(Submission::Text(raw.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

fn check(kind: QuestionKind, answer: &Answer, submission: &Submission) -> QuizResult<bool> {
    match rule_for(kind) {
        EvalRule::Numeric { tolerance } => {
            let value = match submission {
                Submission::Number(x) => *x,
                Submission::Text(s) => parse_number(kind, s)?,
                _ => return Err(malformed(kind, "expected a number")),
            };
            let expected = match answer {
                Answer::Integer(n) => *n as f64,
                Answer::Decimal(x) => *x,
                _ => return Ok(false),
            };
            Ok((value - expected).abs() <= tolerance + 1e-9)
        }
        EvalRule::SingleChoice => {
            let index = match submission {
                Submission::Choice(i) => *i,
                Submission::Text(s) => parse_choice(kind, s)?,
                _ => return Err(malformed(kind, "expected one option")),
            };
            Ok(matches!(answer, Answer::Choice(i) if *i == index))
        }
        EvalRule::MultiChoice => {
            let set = match submission {
                Submission::Choices(set) => set.clone(),
                Submission::Choice(i) => BTreeSet::from([*i]),
                Submission::Text(s) => parse_choices(kind, s)?,
                Submission::Number(_) => return Err(malformed(kind, "expected a set of options")),
            };
            Ok(matches!(answer, Answer::Choices(valid) if *valid == set))
        }
        EvalRule::TextRecall => {
            let text = match submission {
                Submission::Text(s) => normalize_text(s),
                Submission::Number(x) if x.fract() == 0.0 => format!("{}", *x as i64),
                _ => return Err(malformed(kind, "expected text")),
            };
            Ok(matches!(answer, Answer::Text(expected) if normalize_text(expected) == text))
        }
        EvalRule::OpenEnded => Ok(!submission.is_empty()),
    }
}

/// Decide whether `submission` answers `question` correctly.
///
/// Submissions that cannot be coerced to the kind's type count as incorrect.
pub fn evaluate(question: &Question, submission: &Submission) -> Verdict {
    let is_correct = match check(question.kind(), question.answer(), submission) {
        Ok(correct) => correct,
        Err(e) => {
            tracing::debug!(kind = %question.kind(), error = %e, "submission graded as incorrect");
            false
        }
    };
    Verdict {
        is_correct,
        explanation: question.explanation().to_string(),
    }
}

/// Parse raw input for `question` and evaluate it.
pub fn evaluate_raw(question: &Question, raw: &str) -> Verdict {
    match Submission::parse(question.kind(), raw) {
        Ok(submission) => evaluate(question, &submission),
        Err(e) => {
            tracing::debug!(kind = %question.kind(), error = %e, "unparseable submission");
            Verdict {
                is_correct: false,
                explanation: question.explanation().to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Payload, QuestionBody, SequenceRule};

    fn question(kind: QuestionKind, answer: Answer) -> Question {
        Question {
            category: Category::Logic,
            body: QuestionBody {
                kind,
                prompt: "?".into(),
                payload: Payload::Dictation { text: String::new() },
                answer,
                explanation: "weil".into(),
            },
        }
    }

    #[test]
    fn sequence_example_is_graded_numerically() {
        let q = Question {
            category: Category::NumberSequences,
            body: QuestionBody {
                kind: QuestionKind::NumberSequence,
                prompt: "Setzen Sie die Zahlenreihe fort:".into(),
                payload: Payload::Sequence {
                    terms: vec![2, 5, 8, 11],
                    rule: SequenceRule::Arithmetic { step: 3 },
                },
                answer: Answer::Integer(14),
                explanation: "Addition von 3".into(),
            },
        };
        assert!(evaluate(&q, &Submission::Number(14.0)).is_correct);
        assert!(evaluate_raw(&q, " 14 ").is_correct);
        assert!(!evaluate(&q, &Submission::Number(15.0)).is_correct);
        assert_eq!(evaluate(&q, &Submission::Number(15.0)).explanation, "Addition von 3");
    }

    #[test]
    fn multi_valid_requires_exact_set() {
        let q = question(
            QuestionKind::SyllogismMulti,
            Answer::Choices(BTreeSet::from([0, 3])),
        );
        assert!(!evaluate(&q, &Submission::choices([0])).is_correct);
        assert!(evaluate(&q, &Submission::choices([0, 3])).is_correct);
        assert!(!evaluate(&q, &Submission::choices([0, 3, 1])).is_correct);
        assert!(evaluate_raw(&q, "a, D").is_correct);
    }

    #[test]
    fn decimal_tolerance_and_german_comma() {
        let q = question(QuestionKind::WordProblem, Answer::Decimal(12.345));
        assert!(evaluate_raw(&q, "12,35").is_correct);
        assert!(evaluate_raw(&q, "12.34").is_correct);
        assert!(!evaluate_raw(&q, "12.4").is_correct);
    }

    #[test]
    fn malformed_input_is_incorrect_not_an_error() {
        let q = question(QuestionKind::Matrix, Answer::Integer(7));
        assert!(!evaluate_raw(&q, "sieben").is_correct);
        assert!(!evaluate(&q, &Submission::Choice(0)).is_correct);
        assert!(Submission::parse(QuestionKind::Matrix, "sieben")
            .unwrap_err()
            .is_answer_error());
    }

    #[test]
    fn choice_labels_parse_as_letters_or_numbers() {
        let q = question(QuestionKind::Analogy, Answer::Choice(1));
        assert!(evaluate_raw(&q, "b").is_correct);
        assert!(evaluate_raw(&q, "B)").is_correct);
        assert!(evaluate_raw(&q, "2").is_correct);
        assert!(!evaluate_raw(&q, "0").is_correct);
    }

    #[test]
    fn recall_is_whitespace_normalized_and_case_sensitive() {
        let q = question(QuestionKind::CaseNumber, Answer::Text("3 O 123/24".into()));
        assert!(evaluate_raw(&q, "  3  O 123/24 ").is_correct);
        assert!(!evaluate_raw(&q, "3 o 123/24").is_correct);
    }

    #[test]
    fn open_ended_accepts_any_non_empty_text() {
        let q = question(QuestionKind::Dictation, Answer::Open);
        assert!(evaluate_raw(&q, "irgendetwas").is_correct);
        assert!(!evaluate_raw(&q, "   ").is_correct);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let q = question(QuestionKind::Grammar, Answer::Choice(2));
        let submission = Submission::Choice(2);
        assert_eq!(evaluate(&q, &submission), evaluate(&q, &submission));
    }
}
