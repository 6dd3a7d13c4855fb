//! Memory and concentration drills.
//!
//! Memory generators produce material to memorize plus a [`Probe`] into it;
//! the expected answer is always `probe.expected(items)`. The material lives
//! only in the payload: front-ends show it, hide it, then show the prompt.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::model::{Answer, Difficulty, Payload, Probe, QuestionBody, QuestionKind, RecallItem};
use crate::traits::Generator;

const SURNAMES: [&str; 12] = [
    "Müller", "Schmidt", "Schneider", "Fischer", "Weber", "Meyer", "Wagner", "Becker", "Schulz",
    "Hoffmann", "Koch", "Richter",
];

/// Court register codes used in Aktenzeichen.
const REGISTERS: [&str; 7] = ["O", "C", "Ds", "Ls", "F", "K", "Js"];

/// Positions are spelled out so the prompt holds no digit of the material.
const ORDINALS: [&str; 9] = [
    "erster", "zweiter", "dritter", "vierter", "fünfter", "sechster", "siebter", "achter",
    "neunter",
];

fn recall_question(
    kind: QuestionKind,
    prompt: String,
    items: Vec<RecallItem>,
    probe: Probe,
) -> QuestionBody {
    let expected = probe.expected(&items).unwrap_or_default();
    let material: Vec<String> = items
        .iter()
        .map(|i| format!("{}: {}", i.key, i.value))
        .collect();

    QuestionBody {
        kind,
        prompt,
        explanation: format!("Merkinhalt: {}. Gesucht war: {expected}", material.join("; ")),
        payload: Payload::Recall { items, probe },
        answer: Answer::Text(expected),
    }
}

fn random_item_probe(items: &[RecallItem], rng: &mut dyn RngCore) -> (Probe, usize) {
    let index = rng.gen_range(0..items.len().max(1));
    (Probe::Item(index), index)
}

// ---------------------------------------------------------------------------
// Digit span
// ---------------------------------------------------------------------------

/// Digit span: remember a digit sequence, recall one digit, all of it, or
/// all of it backwards.
pub struct DigitSpanGenerator;

impl Generator for DigitSpanGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::DigitSpan
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let len = match difficulty {
            Difficulty::Easy => 4,
            Difficulty::Medium => 5,
            Difficulty::Hard => 7,
            Difficulty::Expert => 9,
        };
        let items: Vec<RecallItem> = (0..len)
            .map(|i| RecallItem {
                key: format!("Position {}", i + 1),
                value: rng.gen_range(0..=9u8).to_string(),
            })
            .collect();
        let (probe, prompt) = match difficulty {
            Difficulty::Easy => {
                let (probe, index) = random_item_probe(&items, rng);
                let ordinal = ORDINALS.get(index).copied().unwrap_or("letzter");
                (probe, format!("Welche Ziffer stand an {ordinal} Stelle?"))
            }
            Difficulty::Medium => (
                Probe::Sequence,
                "Geben Sie alle Ziffern in der gezeigten Reihenfolge ohne Leerzeichen ein.".to_string(),
            ),
            Difficulty::Hard | Difficulty::Expert => (
                Probe::Reversed,
                "Geben Sie alle Ziffern in umgekehrter Reihenfolge ohne Leerzeichen ein.".to_string(),
            ),
        };

        recall_question(QuestionKind::DigitSpan, prompt, items, probe)
    }
}

// ---------------------------------------------------------------------------
// Name recall
// ---------------------------------------------------------------------------

/// Name records: who sits in which room.
pub struct NameRecallGenerator;

impl Generator for NameRecallGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::NameRecall
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let count = match difficulty {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
            Difficulty::Expert => 7,
        };
        let names: Vec<&str> = SURNAMES.choose_multiple(rng, count).copied().collect();
        let items: Vec<RecallItem> = names
            .iter()
            .map(|name| {
                let title = if rng.gen_bool(0.5) { "Frau" } else { "Herr" };
                RecallItem {
                    key: format!("{title} {name}"),
                    value: format!("{}{:02}", rng.gen_range(1..=4u32), rng.gen_range(1..=40u32)),
                }
            })
            .collect();

        let (probe, index) = random_item_probe(&items, rng);
        let who = items.get(index).map(|i| i.key.clone()).unwrap_or_default();
        let prompt = format!("In welchem Raum sitzt {who}?");

        recall_question(QuestionKind::NameRecall, prompt, items, probe)
    }
}

// ---------------------------------------------------------------------------
// Case numbers
// ---------------------------------------------------------------------------

/// Build an Aktenzeichen such as `3 O 123/24`.
pub fn case_number(rng: &mut dyn RngCore) -> String {
    let department = rng.gen_range(1..=30u32);
    let register = REGISTERS.choose(rng).copied().unwrap_or("O");
    let running = rng.gen_range(1..=999u32);
    let year = rng.gen_range(20..=26u32);
    format!("{department} {register} {running}/{year}")
}

/// Case-number recall: remember which Aktenzeichen belongs to which matter.
pub struct CaseNumberGenerator;

impl Generator for CaseNumberGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::CaseNumber
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let count = match difficulty {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
            Difficulty::Expert => 5,
        };
        let parties: Vec<&str> = SURNAMES.choose_multiple(rng, count * 2).copied().collect();
        let items: Vec<RecallItem> = parties
            .chunks(2)
            .map(|pair| RecallItem {
                key: format!("{} ./. {}", pair[0], pair.get(1).copied().unwrap_or("Land")),
                value: case_number(rng),
            })
            .collect();

        let (probe, index) = random_item_probe(&items, rng);
        let matter = items.get(index).map(|i| i.key.clone()).unwrap_or_default();
        let prompt = format!("Wie lautet das Aktenzeichen im Verfahren {matter}?");

        recall_question(QuestionKind::CaseNumber, prompt, items, probe)
    }
}

// ---------------------------------------------------------------------------
// Symbol counting
// ---------------------------------------------------------------------------

/// Occurrences of `target` in `line`.
pub fn count_symbol(line: &str, target: char) -> i64 {
    line.chars().filter(|c| *c == target).count() as i64
}

/// Concentration drill: count one letter in a line of look-alikes.
pub struct SymbolCountGenerator;

impl Generator for SymbolCountGenerator {
    fn kind(&self) -> QuestionKind {
        QuestionKind::SymbolCount
    }

    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let pool: &[char] = match difficulty {
            Difficulty::Easy => &['d', 'b'],
            Difficulty::Medium => &['d', 'b', 'p'],
            Difficulty::Hard => &['d', 'b', 'p', 'q'],
            Difficulty::Expert => &['d', 'b', 'p', 'q', 'o', 'a'],
        };
        let len = match difficulty {
            Difficulty::Easy => 20,
            Difficulty::Medium => 30,
            Difficulty::Hard => 40,
            Difficulty::Expert => 50,
        };
        let target = 'd';

        let symbols: Vec<char> = (0..len)
            .map(|_| pool.choose(rng).copied().unwrap_or(target))
            .collect();
        let line = symbols
            .chunks(5)
            .map(|group| group.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(" ");
        let count = count_symbol(&line, target);

        QuestionBody {
            kind: QuestionKind::SymbolCount,
            prompt: format!("Wie oft kommt der Buchstabe »{target}« in der folgenden Zeile vor?\n{line}"),
            payload: Payload::Count { line, target },
            answer: Answer::Integer(count),
            explanation: format!("Der Buchstabe »{target}« kommt {count}-mal vor."),
        }
    }
}
