//! Spatial reasoning generators.
//!
//! Symbol sequences, die tilting, cube nets, paper folding and tangram
//! areas. Each payload carries enough state to recompute the answer.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::shuffle_options;
use crate::model::{
    Answer, CubeState, Difficulty, Payload, QuestionBody, QuestionKind, TangramPiece, Tilt,
};
use crate::traits::Generator;

// ---------------------------------------------------------------------------
// Symbol sequences
// ---------------------------------------------------------------------------

const SHAPES: [&str; 8] = ["□", "○", "△", "◇", "★", "▪", "▲", "◆"];
const ARROWS: [&str; 4] = ["↑", "→", "↓", "←"];
const COMPASS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];
/// Filled and hollow variant of the same shape.
const FILLS: [(&str, &str); 4] = [("■", "□"), ("●", "○"), ("▲", "△"), ("◆", "◇")];

/// Generates "which symbol comes next" sequences.
pub struct SymbolSequenceGenerator;

impl SymbolSequenceGenerator {
    /// Returns the full sequence (shown terms plus the answer), the symbol
    /// pool distractors are drawn from, and the explanation.
    fn build(difficulty: Difficulty, rng: &mut dyn RngCore) -> (Vec<String>, Vec<&'static str>, String) {
        match difficulty {
            Difficulty::Easy => {
                let start = rng.gen_range(0..ARROWS.len());
                let seq = (0..5).map(|i| ARROWS[(start + i) % 4].to_string()).collect();
                (
                    seq,
                    ARROWS.to_vec(),
                    "Der Pfeil dreht sich pro Schritt um 90° im Uhrzeigersinn".to_string(),
                )
            }
            Difficulty::Medium => {
                let base: Vec<&str> = SHAPES.choose_multiple(rng, 3).copied().collect();
                let seq = (0..6).map(|i| base[i % 3].to_string()).collect();
                (
                    seq,
                    SHAPES.to_vec(),
                    "Wiederholendes Muster alle 3 Schritte".to_string(),
                )
            }
            Difficulty::Hard => {
                let pairs: Vec<(&str, &str)> = FILLS.choose_multiple(rng, 3).copied().collect();
                let seq = (0..6)
                    .map(|i| {
                        let (filled, hollow) = pairs[i % 3];
                        let symbol = if i % 2 == 0 { filled } else { hollow };
                        symbol.to_string()
                    })
                    .collect();
                let pool = FILLS.iter().flat_map(|(f, h)| [*f, *h]).collect();
                (
                    seq,
                    pool,
                    "Die Form wiederholt sich alle 3 Schritte, gefüllt und leer wechseln sich ab".to_string(),
                )
            }
            Difficulty::Expert => {
                let step = rng.gen_range(1..=3);
                let start = rng.gen_range(0..COMPASS.len());
                let seq = (0..6)
                    .map(|i| COMPASS[(start + i * step) % COMPASS.len()].to_string())
                    .collect();
                (
                    seq,
                    COMPASS.to_vec(),
                    format!("Der Pfeil dreht sich pro Schritt um {}° im Uhrzeigersinn", step * 45),
                )
            }
        }
    }
}

impl Generator for SymbolSequenceGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::SymbolSequence
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let (mut sequence, pool, explanation) = Self::build(difficulty, rng);
        let next = sequence.pop().unwrap_or_default();

        let distractors: Vec<&str> = pool
            .iter()
            .copied()
            .filter(|s| *s != next)
            .collect::<Vec<_>>()
            .choose_multiple(rng, 3)
            .copied()
            .collect();
        let mut candidates = vec![next.as_str()];
        candidates.extend(distractors);
        let (options, correct) = shuffle_options(&candidates, &[0], rng);
        let follows = correct.first().copied().unwrap_or_default();

        QuestionBody {
            kind: QuestionKind::SymbolSequence,
            prompt: "Welche Figur folgt als nächstes?".to_string(),
            payload: Payload::Symbols {
                sequence,
                options,
                follows,
            },
            answer: Answer::Choice(follows),
            explanation,
        }
    }
}

// ---------------------------------------------------------------------------
// Cube rotation
// ---------------------------------------------------------------------------

/// Random die orientation with opposite faces summing to 7.
fn random_cube(rng: &mut dyn RngCore) -> CubeState {
    const FACES: [u8; 6] = [1, 2, 3, 4, 5, 6];
    let top = FACES.choose(rng).copied().unwrap_or(1);
    let fronts: Vec<u8> = FACES
        .iter()
        .copied()
        .filter(|f| *f != top && *f != 7 - top)
        .collect();
    let front = fronts.choose(rng).copied().unwrap_or(2);
    let rights: Vec<u8> = fronts
        .iter()
        .copied()
        .filter(|f| *f != front && *f != 7 - front)
        .collect();
    let right = rights.choose(rng).copied().unwrap_or(3);
    CubeState { top, front, right }
}

/// Apply `moves` to `start` in order.
pub fn roll(start: CubeState, moves: &[Tilt]) -> CubeState {
    moves.iter().fold(start, |cube, tilt| cube.tilt(*tilt))
}

/// Generates die-tilting questions asking for the face on top.
pub struct CubeRotationGenerator;

impl Generator for CubeRotationGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::CubeRotation
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let start = random_cube(rng);
        let count = match difficulty {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        };
        let moves: Vec<Tilt> = (0..count)
            .filter_map(|_| Tilt::ALL.choose(rng).copied())
            .collect();
        let end = roll(start, &moves);

        let steps: Vec<&str> = moves.iter().map(|m| m.label()).collect();
        QuestionBody {
            kind: QuestionKind::CubeRotation,
            prompt: format!(
                "Ein Würfel zeigt oben {}, vorne {} und rechts {}. Er wird {} gekippt. Welche Zahl liegt jetzt oben?",
                start.top,
                start.front,
                start.right,
                steps.join(", dann ")
            ),
            payload: Payload::Cube { start, moves },
            answer: Answer::Integer(i64::from(end.top)),
            explanation: format!(
                "Gegenüberliegende Seiten ergeben zusammen 7. Nach dem Kippen liegt {} oben und {} unten.",
                end.top,
                end.bottom()
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Cube nets
// ---------------------------------------------------------------------------

struct NetTemplate {
    rows: &'static [&'static str],
    opposites: [(char, char); 3],
}

const NETS: [NetTemplate; 3] = [
    NetTemplate {
        rows: &[" A ", "BCD", " E ", " F "],
        opposites: [('A', 'E'), ('B', 'D'), ('C', 'F')],
    },
    NetTemplate {
        rows: &["A   ", "BCD ", "  EF"],
        opposites: [('A', 'E'), ('B', 'D'), ('C', 'F')],
    },
    NetTemplate {
        rows: &["AB  ", " CD ", "  EF"],
        opposites: [('A', 'D'), ('B', 'E'), ('C', 'F')],
    },
];

/// Face opposite `face` once the net is folded, if `rows` is a known net.
pub fn net_opposite(rows: &[String], face: char) -> Option<char> {
    let template = NETS
        .iter()
        .find(|t| t.rows.len() == rows.len() && t.rows.iter().zip(rows).all(|(a, b)| *a == b))?;
    template.opposites.iter().find_map(|&(a, b)| {
        if a == face {
            Some(b)
        } else if b == face {
            Some(a)
        } else {
            None
        }
    })
}

/// Generates "which face is opposite" questions on unfolded cubes.
pub struct CubeNetGenerator;

impl Generator for CubeNetGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::CubeNet
    }

    fn supported(&self) -> &[Difficulty] {
        &[Difficulty::Medium, Difficulty::Hard, Difficulty::Expert]
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        // The cross is the easiest net to fold mentally.
        let template = match difficulty {
            Difficulty::Easy | Difficulty::Medium => &NETS[0],
            Difficulty::Hard | Difficulty::Expert => &NETS[rng.gen_range(1..NETS.len())],
        };
        let &(a, b) = template.opposites.choose(rng).unwrap_or(&template.opposites[0]);
        let (face, opposite) = if rng.gen_bool(0.5) { (a, b) } else { (b, a) };

        let others: Vec<char> = ['A', 'B', 'C', 'D', 'E', 'F']
            .into_iter()
            .filter(|c| *c != face && *c != opposite)
            .collect();
        let mut candidates = vec![opposite.to_string()];
        candidates.extend(others.choose_multiple(rng, 3).map(|c| c.to_string()));
        let (options, correct) = shuffle_options(&candidates, &[0], rng);

        QuestionBody {
            kind: QuestionKind::CubeNet,
            prompt: format!(
                "Das Netz wird zu einem Würfel gefaltet. Welche Fläche liegt {face} gegenüber?"
            ),
            payload: Payload::Net {
                rows: template.rows.iter().map(|r| r.to_string()).collect(),
                face,
                options,
            },
            answer: Answer::Choice(correct.first().copied().unwrap_or_default()),
            explanation: format!(
                "Beim Falten liegen {face} und {opposite} einander gegenüber."
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Paper folding
// ---------------------------------------------------------------------------

/// Holes after unfolding: every fold doubles each punch.
///
/// Returns `None` when the count does not fit in an `i64`.
pub fn unfolded_holes(folds: u32, punches: u32) -> Option<i64> {
    if folds >= i64::BITS - 1 {
        return None;
    }
    i64::from(punches).checked_mul(1 << folds)
}

/// Generates fold-and-punch questions.
pub struct PaperFoldingGenerator;

impl Generator for PaperFoldingGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::PaperFolding
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let (folds, punches) = match difficulty {
            Difficulty::Easy => (1, 1),
            Difficulty::Medium => (2, rng.gen_range(1..=2)),
            Difficulty::Hard => (3, rng.gen_range(1..=2)),
            Difficulty::Expert => (rng.gen_range(3..=4), rng.gen_range(2..=3)),
        };
        let holes = unfolded_holes(folds, punches).unwrap_or_default();

        QuestionBody {
            kind: QuestionKind::PaperFolding,
            prompt: format!(
                "Ein Blatt Papier wird {folds}-mal in der Mitte gefaltet und dann {punches}-mal gelocht. Wie viele Löcher hat das Blatt nach dem Auffalten?"
            ),
            payload: Payload::Folding { folds, punches },
            answer: Answer::Integer(holes),
            explanation: format!(
                "Jede Faltung verdoppelt die Lagen: {punches} · 2^{folds} = {holes}"
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Tangram
// ---------------------------------------------------------------------------

/// The seven pieces of a classic tangram set.
const TANGRAM_SET: [TangramPiece; 7] = [
    TangramPiece::LargeTriangle,
    TangramPiece::LargeTriangle,
    TangramPiece::MediumTriangle,
    TangramPiece::SmallTriangle,
    TangramPiece::SmallTriangle,
    TangramPiece::Square,
    TangramPiece::Parallelogram,
];

pub fn tangram_area(pieces: &[TangramPiece]) -> i64 {
    pieces.iter().map(|p| p.area_units()).sum()
}

/// Generates tangram area questions measured in small triangles.
pub struct TangramGenerator;

impl Generator for TangramGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::Tangram
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let count = match difficulty {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
            Difficulty::Expert => rng.gen_range(5..=7),
        };
        let pieces: Vec<TangramPiece> = TANGRAM_SET.choose_multiple(rng, count).copied().collect();
        let area = tangram_area(&pieces);
        let names: Vec<&str> = pieces.iter().map(|p| p.label()).collect();

        QuestionBody {
            kind: QuestionKind::Tangram,
            prompt: format!(
                "Ein kleines Tangram-Dreieck hat die Fläche 1. Welche Fläche haben zusammen: {}?",
                names.join(", ")
            ),
            payload: Payload::Pieces { pieces },
            answer: Answer::Integer(area),
            explanation: "Kleines Dreieck = 1, mittleres Dreieck, Quadrat und Parallelogramm = 2, großes Dreieck = 4".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn symbol_sequence_option_matches_rule() {
        let mut rng = StdRng::seed_from_u64(17);
        for difficulty in Difficulty::ALL {
            for _ in 0..20 {
                let q = SymbolSequenceGenerator.generate(difficulty, &mut rng);
                let Payload::Symbols { sequence, options, follows } = &q.payload else {
                    panic!("expected symbols payload");
                };
                assert_eq!(options.len(), 4);
                assert_eq!(q.answer, Answer::Choice(*follows));
                let unique: std::collections::HashSet<_> = options.iter().collect();
                assert_eq!(unique.len(), 4);
                if difficulty == Difficulty::Medium {
                    assert_eq!(options[*follows], sequence[2]);
                }
            }
        }
    }

    #[test]
    fn random_cube_is_consistent() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let c = random_cube(&mut rng);
            let mut faces = vec![c.top, c.front, c.right, 7 - c.top, 7 - c.front, 7 - c.right];
            faces.sort_unstable();
            assert_eq!(faces, vec![1, 2, 3, 4, 5, 6]);
        }
    }

    #[test]
    fn cube_rotation_answer_is_rolled_top() {
        let mut rng = StdRng::seed_from_u64(6);
        let q = CubeRotationGenerator.generate(Difficulty::Hard, &mut rng);
        let Payload::Cube { start, moves } = &q.payload else {
            panic!("expected cube payload");
        };
        assert_eq!(moves.len(), 3);
        assert_eq!(q.answer, Answer::Integer(i64::from(roll(*start, moves).top)));
    }

    #[test]
    fn cube_net_lookup() {
        let rows: Vec<String> = NETS[0].rows.iter().map(|r| r.to_string()).collect();
        assert_eq!(net_opposite(&rows, 'A'), Some('E'));
        assert_eq!(net_opposite(&rows, 'F'), Some('C'));
        assert_eq!(net_opposite(&["X".to_string()], 'A'), None);

        let mut rng = StdRng::seed_from_u64(12);
        for difficulty in Difficulty::ALL {
            let q = CubeNetGenerator.generate(difficulty, &mut rng);
            let Payload::Net { rows, face, options } = &q.payload else {
                panic!("expected net payload");
            };
            let Answer::Choice(i) = q.answer else {
                panic!("expected choice");
            };
            assert_eq!(options[i], net_opposite(rows, *face).unwrap().to_string());
        }
    }

    #[test]
    fn folding_doubles_per_fold() {
        assert_eq!(unfolded_holes(1, 1), Some(2));
        assert_eq!(unfolded_holes(3, 2), Some(16));
        assert_eq!(unfolded_holes(62, 1), Some(1 << 62));
        assert_eq!(unfolded_holes(62, 2), None);
        assert_eq!(unfolded_holes(64, 1), None);
        assert_eq!(unfolded_holes(u32::MAX, 1), None);
        let mut rng = StdRng::seed_from_u64(1);
        let q = PaperFoldingGenerator.generate(Difficulty::Easy, &mut rng);
        assert_eq!(q.answer, Answer::Integer(2));
    }

    #[test]
    fn full_tangram_set_covers_sixteen_units() {
        assert_eq!(tangram_area(&TANGRAM_SET), 16);
        let mut rng = StdRng::seed_from_u64(3);
        let q = TangramGenerator.generate(Difficulty::Medium, &mut rng);
        let Payload::Pieces { pieces } = &q.payload else {
            panic!("expected pieces payload");
        };
        assert_eq!(pieces.len(), 3);
        assert_eq!(q.answer, Answer::Integer(tangram_area(pieces)));
    }
}
