//! Matrix puzzle generators: numeric rules and Latin squares.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::model::{Answer, Cell, Difficulty, MatrixRule, Payload, QuestionBody, QuestionKind};
use crate::traits::Generator;

const SYMBOLS: [&str; 6] = ["●", "■", "▲", "◆", "★", "✚"];

fn grid_size(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy | Difficulty::Medium => 3,
        Difficulty::Hard | Difficulty::Expert => 4,
    }
}

/// Replace the bottom-right cell with [`Cell::Masked`] and return what it held.
fn mask_last(cells: &mut [Vec<Cell>]) -> Option<Cell> {
    let last = cells.last_mut()?.last_mut()?;
    Some(std::mem::replace(last, Cell::Masked))
}

/// Generates numeric matrices with one hidden cell.
pub struct MatrixGenerator;

impl MatrixGenerator {
    fn row_sum(size: usize, target: i64, rng: &mut dyn RngCore) -> Vec<Vec<i64>> {
        (0..size)
            .map(|_| {
                let mut row = Vec::with_capacity(size);
                let mut remaining = target;
                for j in 0..size - 1 {
                    let reserve = (size - j - 1) as i64;
                    let val = rng.gen_range(1..=remaining - reserve);
                    row.push(val);
                    remaining -= val;
                }
                row.push(remaining);
                row
            })
            .collect()
    }

    fn row_multiples(size: usize, rng: &mut dyn RngCore) -> Vec<Vec<i64>> {
        (0..size)
            .map(|_| {
                let base: i64 = rng.gen_range(2..=6);
                (1..=size as i64).map(|j| base * j).collect()
            })
            .collect()
    }

    fn position(size: usize, k: i64) -> Vec<Vec<i64>> {
        (0..size as i64)
            .map(|i| (0..size as i64).map(|j| (i + 1) * (j + 1) + k * (i + j)).collect())
            .collect()
    }
}

impl Generator for MatrixGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::Matrix
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let size = grid_size(difficulty);
        let (values, rule, explanation) = match difficulty {
            Difficulty::Easy => {
                let target = rng.gen_range(15..=30);
                (
                    Self::row_sum(size, target, rng),
                    MatrixRule::RowSum { target },
                    format!("Jede Zeile summiert sich zu {target}"),
                )
            }
            Difficulty::Medium => (
                Self::row_multiples(size, rng),
                MatrixRule::RowMultiples,
                "Jede Zeile enthält die Vielfachen ihrer ersten Zahl".to_string(),
            ),
            Difficulty::Hard => {
                let k = rng.gen_range(1..=3);
                (
                    Self::position(size, k),
                    MatrixRule::Position { k },
                    format!("Feld (Zeile i, Spalte j) = i · j + {k} · (i + j − 2)"),
                )
            }
            Difficulty::Expert => {
                if rng.gen_bool(0.5) {
                    let target = rng.gen_range(30..=60);
                    (
                        Self::row_sum(size, target, rng),
                        MatrixRule::RowSum { target },
                        format!("Jede Zeile summiert sich zu {target}"),
                    )
                } else {
                    let k = rng.gen_range(2..=5);
                    (
                        Self::position(size, k),
                        MatrixRule::Position { k },
                        format!("Feld (Zeile i, Spalte j) = i · j + {k} · (i + j − 2)"),
                    )
                }
            }
        };

        let mut cells: Vec<Vec<Cell>> = values
            .into_iter()
            .map(|row| row.into_iter().map(Cell::Number).collect())
            .collect();
        let answer = match mask_last(&mut cells) {
            Some(Cell::Number(n)) => n,
            _ => 0,
        };

        QuestionBody {
            kind: QuestionKind::Matrix,
            prompt: "Welche Zahl gehört in das Fragezeichen-Feld?".to_string(),
            payload: Payload::Grid {
                cells,
                rule,
                options: Vec::new(),
            },
            answer: Answer::Integer(answer),
            explanation,
        }
    }
}

/// Generates Latin squares over a symbol set with one hidden cell.
///
/// The symbol set doubles as the lettered options.
pub struct LatinSquareGenerator;

impl Generator for LatinSquareGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::LatinSquare
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let size = grid_size(difficulty);
        let symbols: Vec<&str> = SYMBOLS.choose_multiple(rng, size).copied().collect();

        // Permuting rows and columns of a cyclic square keeps it Latin.
        let mut rows: Vec<usize> = (0..size).collect();
        let mut cols: Vec<usize> = (0..size).collect();
        rows.shuffle(rng);
        cols.shuffle(rng);

        let mut cells: Vec<Vec<Cell>> = rows
            .iter()
            .map(|&i| {
                cols.iter()
                    .map(|&j| Cell::Symbol(symbols[(i + j) % size].to_string()))
                    .collect()
            })
            .collect();
        let missing = match mask_last(&mut cells) {
            Some(Cell::Symbol(s)) => s,
            _ => String::new(),
        };

        let mut options: Vec<String> = symbols.iter().map(|s| s.to_string()).collect();
        options.shuffle(rng);
        let answer = options.iter().position(|o| *o == missing).unwrap_or(0);

        QuestionBody {
            kind: QuestionKind::LatinSquare,
            prompt: "Welches Symbol gehört in das Fragezeichen-Feld?".to_string(),
            payload: Payload::Grid {
                cells,
                rule: MatrixRule::LatinSquare,
                options,
            },
            explanation: format!(
                "Jedes Symbol kommt in jeder Zeile und Spalte genau einmal vor, es fehlt {missing}"
            ),
            answer: Answer::Choice(answer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn numbers(cells: &[Vec<Cell>]) -> Vec<Vec<Option<i64>>> {
        cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        Cell::Number(n) => Some(*n),
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn easy_rows_share_the_target_sum() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..30 {
            let q = MatrixGenerator.generate(Difficulty::Easy, &mut rng);
            let Payload::Grid { cells, rule, .. } = &q.payload else {
                panic!("expected grid");
            };
            let MatrixRule::RowSum { target } = rule else {
                panic!("expected row sum rule");
            };
            assert_eq!(cells.len(), 3);
            let grid = numbers(cells);
            for row in &grid[..2] {
                assert_eq!(row.iter().map(|v| v.unwrap()).sum::<i64>(), *target);
                assert!(row.iter().all(|v| v.unwrap() >= 1));
            }
            let partial: i64 = grid[2][..2].iter().map(|v| v.unwrap()).sum();
            assert_eq!(q.answer, Answer::Integer(target - partial));
        }
    }

    #[test]
    fn hard_matrix_is_four_by_four_with_masked_corner() {
        let mut rng = StdRng::seed_from_u64(5);
        let q = MatrixGenerator.generate(Difficulty::Hard, &mut rng);
        let Payload::Grid { cells, rule, .. } = &q.payload else {
            panic!("expected grid");
        };
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|r| r.len() == 4));
        assert_eq!(cells[3][3], Cell::Masked);
        let MatrixRule::Position { k } = rule else {
            panic!("expected position rule");
        };
        assert_eq!(q.answer, Answer::Integer(16 + k * 6));
    }

    #[test]
    fn latin_square_rows_and_columns_are_unique() {
        let mut rng = StdRng::seed_from_u64(9);
        for difficulty in Difficulty::ALL {
            let q = LatinSquareGenerator.generate(difficulty, &mut rng);
            let Payload::Grid { cells, options, .. } = &q.payload else {
                panic!("expected grid");
            };
            let Answer::Choice(answer) = q.answer else {
                panic!("expected choice answer");
            };
            let n = cells.len();
            assert_eq!(options.len(), n);
            let mut filled = cells.clone();
            filled[n - 1][n - 1] = Cell::Symbol(options[answer].clone());
            for i in 0..n {
                let row: HashSet<String> = filled[i].iter().map(|c| c.to_string()).collect();
                let col: HashSet<String> = filled.iter().map(|r| r[i].to_string()).collect();
                assert_eq!(row.len(), n);
                assert_eq!(col.len(), n);
            }
        }
    }

    #[test]
    fn latin_square_is_answered_by_letter() {
        use crate::evaluator::evaluate_raw;
        use crate::model::{option_letter, Category, Question};

        let mut rng = StdRng::seed_from_u64(10);
        let body = LatinSquareGenerator.generate(Difficulty::Hard, &mut rng);
        let Answer::Choice(i) = *body.answer() else {
            panic!("expected choice answer");
        };
        let question = Question::new(Category::Matrices, body);
        let letter = option_letter(i).to_string();

        assert!(evaluate_raw(&question, &letter).is_correct);
        assert!(evaluate_raw(&question, &letter.to_lowercase()).is_correct);
        assert!(!evaluate_raw(&question, &option_letter((i + 1) % 4).to_string()).is_correct);
        assert_eq!(question.payload().options().map(<[String]>::len), Some(4));
    }
}
