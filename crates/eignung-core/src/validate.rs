//! Self-checks for generated questions and assembled tests.
//!
//! Every payload stores the rule it was built under, so for most kinds the
//! answer can be recomputed and compared with the stored one. Curated
//! multiple-choice items are only range-checked.

use std::collections::HashSet;

use rand::RngCore;

use crate::evaluator::{rule_for, EvalRule, DECIMAL_TOLERANCE};
use crate::generators::memory::count_symbol;
use crate::generators::spatial::{net_opposite, roll, tangram_area, unfolded_holes};
use crate::model::{Answer, Cell, Difficulty, MatrixRule, Payload, QuestionBody, QuestionKind, Test};
use crate::registry::{kinds_for, Registry};

/// A problem found in a question or test.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// Position in the test, if the question belongs to one.
    pub question: Option<usize>,
    pub kind: QuestionKind,
    /// Tier the question was requested at, for registry checks.
    pub difficulty: Option<Difficulty>,
    pub message: String,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(i) = self.question {
            write!(f, "#{} ", i + 1)?;
        }
        write!(f, "[{}", self.kind)?;
        if let Some(d) = self.difficulty {
            write!(f, "/{d}")?;
        }
        write!(f, "] {}", self.message)
    }
}

// ---------------------------------------------------------------------------
// Answer derivation
// ---------------------------------------------------------------------------

fn masked_position(cells: &[Vec<Cell>]) -> Option<(usize, usize)> {
    cells.iter().enumerate().find_map(|(i, row)| {
        row.iter()
            .position(|c| *c == Cell::Masked)
            .map(|j| (i, j))
    })
}

fn number(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Number(n) => Some(*n),
        _ => None,
    }
}

fn derive_grid(cells: &[Vec<Cell>], rule: &MatrixRule, options: &[String]) -> Option<Answer> {
    let (i, j) = masked_position(cells)?;
    let row = cells.get(i)?;
    match rule {
        MatrixRule::RowSum { target } => {
            let others = row
                .iter()
                .filter_map(number)
                .try_fold(0i64, |acc, n| acc.checked_add(n))?;
            target.checked_sub(others).map(Answer::Integer)
        }
        MatrixRule::RowMultiples => {
            let base = if j == 0 {
                number(row.get(1)?)? / 2
            } else {
                number(row.first()?)?
            };
            let factor = i64::try_from(j).ok()?.checked_add(1)?;
            base.checked_mul(factor).map(Answer::Integer)
        }
        MatrixRule::Position { k } => {
            let (i, j) = (i64::try_from(i).ok()?, i64::try_from(j).ok()?);
            let product = (i + 1).checked_mul(j + 1)?;
            k.checked_mul(i + j)?
                .checked_add(product)
                .map(Answer::Integer)
        }
        MatrixRule::LatinSquare => {
            let symbols: HashSet<&str> = options.iter().map(String::as_str).collect();
            let in_row: HashSet<&str> = row
                .iter()
                .filter_map(|c| match c {
                    Cell::Symbol(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect();
            let mut missing = symbols.difference(&in_row);
            let symbol = match (missing.next(), missing.next()) {
                (Some(s), None) => *s,
                _ => return None,
            };
            options.iter().position(|o| o == symbol).map(Answer::Choice)
        }
    }
}

/// Recompute the answer of `body` from its payload.
///
/// Returns `None` for curated items whose answer is not a function of the
/// payload (see [`is_derivable`]), and for payloads too malformed or too
/// large to derive anything from.
pub fn expected_answer(body: &QuestionBody) -> Option<Answer> {
    match &body.payload {
        Payload::Sequence { terms, rule } => rule.next(terms).map(Answer::Integer),
        Payload::Grid {
            cells,
            rule,
            options,
        } => derive_grid(cells, rule, options),
        Payload::Premises { .. } | Payload::Analogy { .. } | Payload::Choices { .. } => None,
        Payload::Symbols { follows, .. } => Some(Answer::Choice(*follows)),
        Payload::Cube { start, moves } => Some(Answer::Integer(i64::from(roll(*start, moves).top))),
        Payload::Net {
            rows,
            face,
            options,
        } => {
            let opposite = net_opposite(rows, *face)?.to_string();
            options.iter().position(|o| *o == opposite).map(Answer::Choice)
        }
        Payload::Folding { folds, punches } => {
            unfolded_holes(*folds, *punches).map(Answer::Integer)
        }
        Payload::Pieces { pieces } => Some(Answer::Integer(tangram_area(pieces))),
        Payload::Arithmetic {
            operation,
            operands,
        } => operation.apply(operands).map(Answer::Decimal),
        Payload::Recall { items, probe } => probe.expected(items).map(Answer::Text),
        Payload::Dictation { .. } => Some(Answer::Open),
        Payload::Count { line, target } => Some(Answer::Integer(count_symbol(line, *target))),
    }
}

/// Whether the answer of `payload` is a function of the payload alone.
pub fn is_derivable(payload: &Payload) -> bool {
    !matches!(
        payload,
        Payload::Premises { .. } | Payload::Analogy { .. } | Payload::Choices { .. }
    )
}

fn answers_agree(expected: &Answer, stored: &Answer) -> bool {
    match (expected, stored) {
        (Answer::Decimal(a), Answer::Decimal(b)) => (a - b).abs() <= DECIMAL_TOLERANCE,
        _ => expected == stored,
    }
}

fn answer_fits_rule(kind: QuestionKind, answer: &Answer) -> bool {
    matches!(
        (rule_for(kind), answer),
        (EvalRule::Numeric { .. }, Answer::Integer(_) | Answer::Decimal(_))
            | (EvalRule::SingleChoice, Answer::Choice(_))
            | (EvalRule::MultiChoice, Answer::Choices(_))
            | (EvalRule::TextRecall, Answer::Text(_))
            | (EvalRule::OpenEnded, Answer::Open)
    )
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Problems with a single question, as messages.
pub fn validate_question(body: &QuestionBody) -> Vec<String> {
    let mut problems = Vec::new();

    if body.prompt.trim().is_empty() {
        problems.push("prompt is empty".to_string());
    }
    if body.explanation.trim().is_empty() {
        problems.push("explanation is empty".to_string());
    }
    if !answer_fits_rule(body.kind, &body.answer) {
        problems.push(format!("answer type does not fit kind: {:?}", body.answer));
    }

    if let Some(options) = body.payload.options() {
        let unique: HashSet<&String> = options.iter().collect();
        if unique.len() != options.len() {
            problems.push("duplicate options".to_string());
        }
        match &body.answer {
            Answer::Choice(i) if *i >= options.len() => {
                problems.push(format!("choice {i} out of range for {} options", options.len()));
            }
            Answer::Choices(set) if set.is_empty() => {
                problems.push("no valid option".to_string());
            }
            Answer::Choices(set) if set.iter().any(|i| *i >= options.len()) => {
                problems.push(format!("choices {set:?} out of range for {} options", options.len()));
            }
            _ => {}
        }
    }

    match expected_answer(body) {
        Some(expected) if !answers_agree(&expected, &body.answer) => {
            problems.push(format!(
                "answer {} is not reproducible from payload (expected {expected})",
                body.answer
            ));
        }
        None if is_derivable(&body.payload) => {
            problems.push(format!(
                "answer {} is not reproducible from payload (no answer derivable)",
                body.answer
            ));
        }
        _ => {}
    }

    problems
}

/// Check an assembled test.
pub fn validate_test(test: &Test) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (i, q) in test.questions.iter().enumerate() {
        if !test.selection.areas().contains(&q.category) {
            warnings.push(ValidationWarning {
                question: Some(i),
                kind: q.kind(),
                difficulty: None,
                message: format!("category {} is not part of {}", q.category, test.selection),
            });
        }
        if !kinds_for(q.category).contains(&q.kind()) {
            warnings.push(ValidationWarning {
                question: Some(i),
                kind: q.kind(),
                difficulty: None,
                message: format!("kind does not belong to category {}", q.category),
            });
        }
        for message in validate_question(&q.body) {
            warnings.push(ValidationWarning {
                question: Some(i),
                kind: q.kind(),
                difficulty: None,
                message,
            });
        }
    }

    warnings
}

/// Generate `samples` questions per kind and tier and validate each one.
pub fn check_registry(
    registry: &Registry,
    samples: usize,
    rng: &mut dyn RngCore,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    for kind in QuestionKind::ALL {
        let Some(generator) = registry.get(kind) else {
            warnings.push(ValidationWarning {
                question: None,
                kind,
                difficulty: None,
                message: "no generator registered".to_string(),
            });
            continue;
        };
        for difficulty in Difficulty::ALL {
            for _ in 0..samples {
                let body = generator.generate(difficulty, rng);
                if body.kind != kind {
                    warnings.push(ValidationWarning {
                        question: None,
                        kind,
                        difficulty: Some(difficulty),
                        message: format!("generator produced kind {}", body.kind),
                    });
                }
                warnings.extend(validate_question(&body).into_iter().map(|message| {
                    ValidationWarning {
                        question: None,
                        kind,
                        difficulty: Some(difficulty),
                        message,
                    }
                }));
            }
        }
    }
    tracing::debug!(warnings = warnings.len(), samples, "registry self-check finished");
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::Assembler;
    use crate::model::{Composite, Question, Selection, SequenceRule};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sequence(answer: i64) -> QuestionBody {
        QuestionBody {
            kind: QuestionKind::NumberSequence,
            prompt: "Setzen Sie die Zahlenreihe fort:".into(),
            payload: Payload::Sequence {
                terms: vec![2, 5, 8, 11],
                rule: SequenceRule::Arithmetic { step: 3 },
            },
            answer: Answer::Integer(answer),
            explanation: "Addition von 3".into(),
        }
    }

    #[test]
    fn every_generator_answer_is_reproducible() {
        let mut rng = StdRng::seed_from_u64(2024);
        let warnings = check_registry(&Registry::standard(), 25, &mut rng);
        assert!(
            warnings.is_empty(),
            "{}",
            warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>().join("\n")
        );
    }

    #[test]
    fn wrong_answer_is_flagged() {
        assert!(validate_question(&sequence(14)).is_empty());
        let problems = validate_question(&sequence(15));
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("not reproducible"));
    }

    #[test]
    fn out_of_range_choice_and_empty_explanation_are_flagged() {
        let body = QuestionBody {
            kind: QuestionKind::Grammar,
            prompt: "Welche Form?".into(),
            payload: Payload::Choices {
                context: None,
                options: vec!["a".into(), "b".into()],
            },
            answer: Answer::Choice(5),
            explanation: " ".into(),
        };
        let problems = validate_question(&body);
        assert_eq!(problems.len(), 2, "{problems:?}");
    }

    #[test]
    fn grid_derivation_handles_every_rule() {
        let cells = vec![
            vec![Cell::Number(2), Cell::Number(4), Cell::Number(6)],
            vec![Cell::Number(5), Cell::Number(10), Cell::Masked],
        ];
        assert_eq!(
            derive_grid(&cells, &MatrixRule::RowMultiples, &[]),
            Some(Answer::Integer(15))
        );
        assert_eq!(
            derive_grid(&cells, &MatrixRule::RowSum { target: 20 }, &[]),
            Some(Answer::Integer(5))
        );
        assert_eq!(
            derive_grid(&cells, &MatrixRule::Position { k: 1 }, &[]),
            Some(Answer::Integer(9))
        );

        let symbol = |s: &str| Cell::Symbol(s.to_string());
        let latin = vec![
            vec![symbol("●"), symbol("■"), symbol("▲")],
            vec![symbol("■"), symbol("▲"), symbol("●")],
            vec![symbol("▲"), symbol("●"), Cell::Masked],
        ];
        let options: Vec<String> = ["▲", "●", "■"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            derive_grid(&latin, &MatrixRule::LatinSquare, &options),
            Some(Answer::Choice(2))
        );
        assert_eq!(derive_grid(&latin, &MatrixRule::LatinSquare, &[]), None);
    }

    fn numeric(kind: QuestionKind, payload: Payload) -> QuestionBody {
        QuestionBody {
            kind,
            prompt: "Wie viele?".into(),
            payload,
            answer: Answer::Integer(2),
            explanation: "Rechnung".into(),
        }
    }

    #[test]
    fn oversized_payloads_are_reported_not_derived() {
        let bodies = [
            numeric(
                QuestionKind::PaperFolding,
                Payload::Folding {
                    folds: 64,
                    punches: 1,
                },
            ),
            numeric(
                QuestionKind::NumberSequence,
                Payload::Sequence {
                    terms: vec![i64::MAX - 1],
                    rule: SequenceRule::Arithmetic { step: 3 },
                },
            ),
            numeric(
                QuestionKind::NumberSequence,
                Payload::Sequence {
                    terms: vec![i64::MAX],
                    rule: SequenceRule::Primes,
                },
            ),
            numeric(
                QuestionKind::NumberSequence,
                Payload::Sequence {
                    terms: vec![1],
                    rule: SequenceRule::Catalan { start: 90 },
                },
            ),
            numeric(
                QuestionKind::Matrix,
                Payload::Grid {
                    cells: vec![vec![Cell::Number(i64::MAX), Cell::Number(1), Cell::Masked]],
                    rule: MatrixRule::RowSum { target: 3 },
                    options: Vec::new(),
                },
            ),
        ];
        for body in &bodies {
            assert_eq!(expected_answer(body), None, "{:?}", body.payload);
            let problems = validate_question(body);
            assert_eq!(problems.len(), 1, "{problems:?}");
            assert!(problems[0].contains("not reproducible"));
        }
    }

    #[test]
    fn tampered_folding_answer_is_flagged() {
        let body = numeric(
            QuestionKind::PaperFolding,
            Payload::Folding {
                folds: 2,
                punches: 1,
            },
        );
        let problems = validate_question(&body);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("expected 4"));
    }

    #[test]
    fn assembled_tests_validate_cleanly() {
        let assembler = Assembler::default();
        let mut rng = StdRng::seed_from_u64(77);
        let test = assembler
            .assemble(
                Selection::Composite(Composite::FullTest),
                Difficulty::Expert,
                30,
                &mut rng,
            )
            .unwrap();
        assert!(validate_test(&test).is_empty());
    }

    #[test]
    fn foreign_category_is_flagged() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut test = Assembler::default()
            .assemble(
                Selection::Composite(Composite::Language),
                Difficulty::Easy,
                5,
                &mut rng,
            )
            .unwrap();
        test.questions.push(Question {
            category: crate::model::Category::NumberSequences,
            body: sequence(14),
        });
        let warnings = validate_test(&test);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].question, Some(5));
    }
}
