//! Number sequence generator.
//!
//! Every sequence is unrolled from seed terms with the same [`SequenceRule`]
//! that later validates it, so the answer is always the rule's continuation
//! of the displayed terms.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::model::{
    catalan, is_prime, Answer, Difficulty, Payload, QuestionBody, QuestionKind, SequenceRule,
};
use crate::traits::Generator;

const PROMPT: &str = "Setzen Sie die Zahlenreihe fort:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Arithmetic,
    Geometric,
    Squares,
    Fibonacci,
    Primes,
    Triangular,
    Alternating,
    Quadratic,
    Factorial,
    Tribonacci,
    Catalan,
    Composite,
    Modular,
}

fn patterns(difficulty: Difficulty) -> &'static [Pattern] {
    match difficulty {
        Difficulty::Easy => &[Pattern::Arithmetic, Pattern::Geometric, Pattern::Squares],
        Difficulty::Medium => &[Pattern::Fibonacci, Pattern::Primes, Pattern::Triangular],
        Difficulty::Hard => &[Pattern::Alternating, Pattern::Quadratic, Pattern::Factorial],
        Difficulty::Expert => &[
            Pattern::Tribonacci,
            Pattern::Catalan,
            Pattern::Composite,
            Pattern::Modular,
        ],
    }
}

/// Extend `terms` with `rule` until it holds `len` terms.
fn unroll(rule: &SequenceRule, mut terms: Vec<i64>, len: usize) -> Vec<i64> {
    while terms.len() < len {
        match rule.next(&terms) {
            Some(term) => terms.push(term),
            None => break,
        }
    }
    terms
}

/// Generates number sequences; the last term is hidden.
pub struct NumberSequenceGenerator;

impl NumberSequenceGenerator {
    fn build(pattern: Pattern, rng: &mut dyn RngCore) -> (SequenceRule, Vec<i64>, String) {
        match pattern {
            Pattern::Arithmetic => {
                let step = rng.gen_range(2..=10);
                (
                    SequenceRule::Arithmetic { step },
                    vec![rng.gen_range(1..=20)],
                    format!("Addition von {step}"),
                )
            }
            Pattern::Geometric => {
                let ratio = rng.gen_range(2..=4);
                (
                    SequenceRule::Geometric { ratio },
                    vec![rng.gen_range(1..=5)],
                    format!("Multiplikation mit {ratio}"),
                )
            }
            Pattern::Squares => {
                let start: i64 = rng.gen_range(1..=5);
                (
                    SequenceRule::Squares,
                    vec![start * start],
                    "Quadratzahlen".to_string(),
                )
            }
            Pattern::Fibonacci => (
                SequenceRule::Fibonacci,
                vec![rng.gen_range(1..=3), rng.gen_range(1..=3)],
                "Fibonacci-Folge: jedes Glied ist die Summe der beiden vorherigen".to_string(),
            ),
            Pattern::Primes => {
                let first = (2..)
                    .filter(|n| is_prime(*n))
                    .nth(rng.gen_range(0..=10))
                    .unwrap_or(2);
                (SequenceRule::Primes, vec![first], "Primzahlen".to_string())
            }
            Pattern::Triangular => {
                let n: i64 = rng.gen_range(1..=6);
                (
                    SequenceRule::Triangular,
                    vec![n * (n + 1) / 2, (n + 1) * (n + 2) / 2],
                    "Dreieckszahlen: die Abstände wachsen jeweils um 1".to_string(),
                )
            }
            Pattern::Alternating => {
                let add = rng.gen_range(2..=5);
                let mul = rng.gen_range(2..=3);
                (
                    SequenceRule::Alternating { add, mul },
                    vec![rng.gen_range(2..=5)],
                    format!("Abwechselnd +{add} und ×{mul}"),
                )
            }
            Pattern::Quadratic => {
                let i: i64 = rng.gen_range(1..=5);
                let f = |n: i64| n * n + n + 1;
                (
                    SequenceRule::Quadratic,
                    vec![f(i), f(i + 1)],
                    "Quadratisch: n² + n + 1".to_string(),
                )
            }
            Pattern::Factorial => {
                let k: i64 = rng.gen_range(1..=3);
                let first: i64 = (1..=k).product();
                (
                    SequenceRule::Factorial,
                    vec![first, first * (k + 1)],
                    "Fakultäten: mit der jeweils nächsten Zahl multiplizieren".to_string(),
                )
            }
            Pattern::Tribonacci => (
                SequenceRule::Tribonacci,
                vec![
                    rng.gen_range(1..=3),
                    rng.gen_range(1..=3),
                    rng.gen_range(1..=3),
                ],
                "Tribonacci: jedes Glied ist die Summe der drei vorherigen".to_string(),
            ),
            Pattern::Catalan => {
                let start = rng.gen_range(1..=2);
                (
                    SequenceRule::Catalan { start },
                    vec![catalan(start).unwrap_or(1)],
                    "Catalan-Zahlen: C(n+1) = C(n) · 2(2n+1) / (n+2)".to_string(),
                )
            }
            Pattern::Composite => {
                let mul = rng.gen_range(2..=3);
                let add = rng.gen_range(1..=3);
                (
                    SequenceRule::Composite { mul, add },
                    vec![rng.gen_range(1..=4)],
                    format!("Zusammengesetzte Operation: ×{mul} + {add}"),
                )
            }
            Pattern::Modular => {
                let modulus = rng.gen_range(7..=13);
                let step = rng.gen_range(3..modulus);
                (
                    SequenceRule::Modular { step, modulus },
                    vec![rng.gen_range(0..modulus)],
                    format!("Modulare Arithmetik: +{step}, dann Rest bei Division durch {modulus}"),
                )
            }
        }
    }
}

impl Generator for NumberSequenceGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::NumberSequence
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let pattern = patterns(difficulty)
            .choose(rng)
            .copied()
            .unwrap_or(Pattern::Arithmetic);
        let len = if difficulty == Difficulty::Expert { 6 } else { 5 };

        let (rule, seeds, explanation) = Self::build(pattern, rng);
        let mut terms = unroll(&rule, seeds, len);
        let answer = terms.pop().unwrap_or_default();

        QuestionBody {
            kind: QuestionKind::NumberSequence,
            prompt: PROMPT.to_string(),
            payload: Payload::Sequence { terms, rule },
            answer: Answer::Integer(answer),
            explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sequences_have_expected_length_and_continuation() {
        let mut rng = StdRng::seed_from_u64(7);
        for difficulty in Difficulty::ALL {
            for _ in 0..50 {
                let q = NumberSequenceGenerator.generate(difficulty, &mut rng);
                let Payload::Sequence { terms, rule } = &q.payload else {
                    panic!("expected sequence payload");
                };
                let shown = if difficulty == Difficulty::Expert { 5 } else { 4 };
                assert_eq!(terms.len(), shown, "{rule:?}");
                assert_eq!(q.answer, Answer::Integer(rule.next(terms).unwrap()));
            }
        }
    }

    #[test]
    fn arithmetic_example() {
        let rule = SequenceRule::Arithmetic { step: 3 };
        let mut terms = unroll(&rule, vec![2], 5);
        assert_eq!(terms, vec![2, 5, 8, 11, 14]);
        assert_eq!(terms.pop(), Some(14));
    }

    #[test]
    fn easy_tier_only_uses_easy_patterns() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..30 {
            let q = NumberSequenceGenerator.generate(Difficulty::Easy, &mut rng);
            let Payload::Sequence { rule, .. } = q.payload else {
                panic!("expected sequence payload");
            };
            assert!(matches!(
                rule,
                SequenceRule::Arithmetic { .. } | SequenceRule::Geometric { .. } | SequenceRule::Squares
            ));
        }
    }
}
