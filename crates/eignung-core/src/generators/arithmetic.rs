//! Arithmetic word problems: percentages, money, rule of three, durations.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::model::{Answer, Difficulty, Operation, Payload, QuestionBody, QuestionKind};
use crate::traits::Generator;

/// Format a number the German way (`12,50`), dropping zero decimals.
pub fn format_de(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}").replace('.', ",")
    }
}

fn operations(difficulty: Difficulty) -> &'static [Operation] {
    match difficulty {
        Difficulty::Easy => &[Operation::PercentOf, Operation::Total],
        Difficulty::Medium => &[Operation::Discount, Operation::RuleOfThree],
        Difficulty::Hard => &[Operation::RuleOfThree, Operation::InverseRuleOfThree],
        Difficulty::Expert => &[Operation::Discount, Operation::InverseRuleOfThree],
    }
}

/// Generates word problems; answers are decimals compared with a tolerance.
pub struct WordProblemGenerator;

impl WordProblemGenerator {
    fn operands(op: Operation, difficulty: Difficulty, rng: &mut dyn RngCore) -> Vec<f64> {
        let hard = matches!(difficulty, Difficulty::Hard | Difficulty::Expert);
        match op {
            Operation::PercentOf => {
                let percent = *[10, 15, 20, 25, 30, 40, 50].choose(rng).unwrap_or(&10);
                let base = rng.gen_range(1..=20i32) * 20;
                vec![f64::from(percent), f64::from(base)]
            }
            Operation::Discount => {
                let price = if hard {
                    f64::from(rng.gen_range(1000..=9999i32)) / 10.0
                } else {
                    f64::from(rng.gen_range(4..=50i32) * 10)
                };
                let percent = *[5, 10, 15, 20, 25, 30].choose(rng).unwrap_or(&10);
                vec![price, f64::from(percent)]
            }
            Operation::RuleOfThree => {
                let units = rng.gen_range(2..=8i32);
                let unit_price = if hard {
                    f64::from(rng.gen_range(150..=990i32)) / 100.0
                } else {
                    f64::from(rng.gen_range(2..=12i32))
                };
                let wanted = rng.gen_range(3..=15i32);
                vec![f64::from(units), unit_price * f64::from(units), f64::from(wanted)]
            }
            Operation::InverseRuleOfThree => {
                let workers = rng.gen_range(2..=6i32);
                let days = rng.gen_range(4..=15i32);
                let mut others = rng.gen_range(2..=8i32);
                if others == workers {
                    others += 1;
                }
                vec![f64::from(workers), f64::from(days), f64::from(others)]
            }
            Operation::Total => {
                let parts = if hard { 4 } else { 3 };
                (0..parts)
                    .map(|_| f64::from(rng.gen_range(5..=90i32)))
                    .collect()
            }
        }
    }

    fn prompt(op: Operation, operands: &[f64]) -> String {
        let n: Vec<String> = operands.iter().map(|v| format_de(*v)).collect();
        match op {
            Operation::PercentOf => format!(
                "Von {} Verfahren wurden {} % durch Vergleich beendet. Wie viele Verfahren sind das?",
                n[1], n[0]
            ),
            Operation::Discount => format!(
                "Ein Drucker kostet {} €. Die Behörde erhält {} % Rabatt. Wie viel Euro kostet der Drucker?",
                n[0], n[1]
            ),
            Operation::RuleOfThree => format!(
                "{} Aktenordner kosten {} €. Wie viel Euro kosten {} Aktenordner?",
                n[0], n[1], n[2]
            ),
            Operation::InverseRuleOfThree => format!(
                "{} Mitarbeitende digitalisieren ein Archiv in {} Tagen. Wie viele Tage brauchen {} Mitarbeitende bei gleicher Leistung?",
                n[0], n[1], n[2]
            ),
            Operation::Total => format!(
                "Eine Sitzung besteht aus Abschnitten von {} Minuten. Wie viele Minuten dauert sie insgesamt?",
                n.join(", ")
            ),
        }
    }

    fn explanation(op: Operation, operands: &[f64], result: f64) -> String {
        let n: Vec<String> = operands.iter().map(|v| format_de(*v)).collect();
        let r = format_de(result);
        match op {
            Operation::PercentOf => format!("{} · {} / 100 = {r}", n[1], n[0]),
            Operation::Discount => format!("{} · (100 − {}) / 100 = {r}", n[0], n[1]),
            Operation::RuleOfThree => format!("Dreisatz: {} / {} · {} = {r}", n[1], n[0], n[2]),
            Operation::InverseRuleOfThree => {
                format!("Umgekehrter Dreisatz: {} · {} / {} = {r}", n[0], n[1], n[2])
            }
            Operation::Total => format!("{} = {r}", n.join(" + ")),
        }
    }
}

impl Generator for WordProblemGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::WordProblem
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let op = operations(difficulty)
            .choose(rng)
            .copied()
            .unwrap_or(Operation::Total);
        let operands = Self::operands(op, difficulty, rng);
        let result = op.apply(&operands).unwrap_or_default();

        QuestionBody {
            kind: QuestionKind::WordProblem,
            prompt: Self::prompt(op, &operands),
            explanation: Self::explanation(op, &operands, result),
            payload: Payload::Arithmetic {
                operation: op,
                operands,
            },
            answer: Answer::Decimal(result),
        }
    }
}
