//! Core data model types for eignung.
//!
//! These are the types the whole engine passes around: difficulty tiers,
//! subject areas, question kinds, question payloads, canonical answers,
//! user submissions, tests, and attempt records.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Difficulty tier of a question or test.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Score multiplier applied by the grading engine.
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
            Difficulty::Expert => 3.0,
        }
    }

    /// German display label.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Leicht",
            Difficulty::Medium => "Mittel",
            Difficulty::Hard => "Schwer",
            Difficulty::Expert => "Experte",
        }
    }

    fn rank(self) -> i32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
            Difficulty::Expert => 3,
        }
    }

    /// Resolve this tier against the tiers a generator supports.
    ///
    /// Returns `self` when supported, otherwise the nearest supported tier,
    /// preferring the easier one on a tie. An empty list resolves to `Easy`.
    pub fn resolve(self, supported: &[Difficulty]) -> Difficulty {
        if supported.contains(&self) {
            return self;
        }
        supported
            .iter()
            .copied()
            .min_by_key(|d| ((d.rank() - self.rank()).abs(), d.rank()))
            .unwrap_or(Difficulty::Easy)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Expert => write!(f, "expert"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "leicht" => Ok(Difficulty::Easy),
            "medium" | "mittel" => Ok(Difficulty::Medium),
            "hard" | "schwer" => Ok(Difficulty::Hard),
            "expert" | "experte" => Ok(Difficulty::Expert),
            other => Err(QuizError::UnknownDifficulty(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Categories and selections
// ---------------------------------------------------------------------------

/// A subject area of the aptitude test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    NumberSequences,
    Matrices,
    Logic,
    Analogies,
    Spatial,
    Spelling,
    Grammar,
    Comprehension,
    GeneralKnowledge,
    Arithmetic,
    Memory,
    Concentration,
}

impl Category {
    /// Every subject area in registry order.
    pub const ALL: [Category; 12] = [
        Category::NumberSequences,
        Category::Matrices,
        Category::Logic,
        Category::Analogies,
        Category::Spatial,
        Category::Spelling,
        Category::Grammar,
        Category::Comprehension,
        Category::GeneralKnowledge,
        Category::Arithmetic,
        Category::Memory,
        Category::Concentration,
    ];

    /// German name as shown in the test.
    pub fn label(self) -> &'static str {
        match self {
            Category::NumberSequences => "Zahlenreihen",
            Category::Matrices => "Matrizen",
            Category::Logic => "Logik",
            Category::Analogies => "Analogien",
            Category::Spatial => "Räumlich",
            Category::Spelling => "Rechtschreibung",
            Category::Grammar => "Grammatik",
            Category::Comprehension => "Textverständnis",
            Category::GeneralKnowledge => "Allgemeinwissen",
            Category::Arithmetic => "Rechnen",
            Category::Memory => "Gedächtnis",
            Category::Concentration => "Konzentration",
        }
    }

    /// ASCII identifier used on the command line and in JSON.
    pub fn slug(self) -> &'static str {
        match self {
            Category::NumberSequences => "number-sequences",
            Category::Matrices => "matrices",
            Category::Logic => "logic",
            Category::Analogies => "analogies",
            Category::Spatial => "spatial",
            Category::Spelling => "spelling",
            Category::Grammar => "grammar",
            Category::Comprehension => "comprehension",
            Category::GeneralKnowledge => "general-knowledge",
            Category::Arithmetic => "arithmetic",
            Category::Memory => "memory",
            Category::Concentration => "concentration",
        }
    }

    /// Study recommendation shown when this area is weak.
    pub fn study_tip(self) -> &'static str {
        match self {
            Category::NumberSequences => {
                "Differenzen und Quotienten benachbarter Glieder bilden, bekannte Folgen (Quadrat-, Primzahlen, Fibonacci) auswendig kennen."
            }
            Category::Matrices => {
                "Zeilen und Spalten getrennt prüfen: Summe, Produkt oder Position als Regel testen."
            }
            Category::Logic => {
                "Prämissen als Mengendiagramm skizzieren und nur ableiten, was zwingend folgt."
            }
            Category::Analogies => {
                "Die Beziehung des ersten Paares in einem Satz formulieren und auf das zweite übertragen."
            }
            Category::Spatial => {
                "Würfel- und Faltaufgaben mit Papiermodellen nachbauen, Gegenseiten eines Würfels ergeben 7."
            }
            Category::Spelling => {
                "Regeln zu das/dass, Groß- und Kleinschreibung sowie Fremdwörtern täglich wiederholen."
            }
            Category::Grammar => "Kasus nach Präpositionen und die Konjunktivformen üben.",
            Category::Comprehension => {
                "Kurze Sachtexte lesen und die Kernaussage in eigenen Worten zusammenfassen."
            }
            Category::GeneralKnowledge => {
                "Grundgesetz, Staatsaufbau und Gerichtsbarkeit regelmäßig wiederholen."
            }
            Category::Arithmetic => "Prozent- und Dreisatzrechnung ohne Taschenrechner trainieren.",
            Category::Memory => {
                "Merkinhalte in Gruppen bündeln und mit Bildern oder Geschichten verknüpfen."
            }
            Category::Concentration => {
                "Kurze, zeitlich begrenzte Zählübungen machen und Fehler systematisch auswerten."
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == needle || c.label().to_lowercase() == needle)
            .or(match needle.as_str() {
                "raeumlich" => Some(Category::Spatial),
                "textverstaendnis" => Some(Category::Comprehension),
                "gedaechtnis" => Some(Category::Memory),
                _ => None,
            })
            .ok_or_else(|| QuizError::UnknownCategory(s.trim().to_string()))
    }
}

/// A selection that draws from several subject areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Composite {
    /// The reasoning areas: sequences, matrices, logic, analogies, spatial.
    Mixed,
    /// Spelling, grammar and reading comprehension.
    Language,
    /// Every subject area.
    FullTest,
}

impl Composite {
    pub const ALL: [Composite; 3] = [Composite::Mixed, Composite::Language, Composite::FullTest];

    pub fn label(self) -> &'static str {
        match self {
            Composite::Mixed => "Gemischt",
            Composite::Language => "Sprache",
            Composite::FullTest => "Volltest",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Composite::Mixed => "mixed",
            Composite::Language => "language",
            Composite::FullTest => "full-test",
        }
    }

    /// The subject areas this composite draws from.
    pub fn areas(self) -> &'static [Category] {
        match self {
            Composite::Mixed => &[
                Category::NumberSequences,
                Category::Matrices,
                Category::Logic,
                Category::Analogies,
                Category::Spatial,
            ],
            Composite::Language => &[
                Category::Spelling,
                Category::Grammar,
                Category::Comprehension,
            ],
            Composite::FullTest => &Category::ALL,
        }
    }
}

/// What a caller asks the assembler for: one area or a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Selection {
    Area(Category),
    Composite(Composite),
}

impl Selection {
    /// Subject areas questions may be drawn from.
    pub fn areas(&self) -> &[Category] {
        match self {
            Selection::Area(category) => std::slice::from_ref(category),
            Selection::Composite(composite) => composite.areas(),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Selection::Composite(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Selection::Area(c) => c.label(),
            Selection::Composite(c) => c.label(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Selection {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if let Some(composite) = Composite::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == needle || c.label().to_lowercase() == needle)
        {
            return Ok(Selection::Composite(composite));
        }
        s.parse::<Category>().map(Selection::Area)
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Area(c) => c.slug().to_string(),
            Selection::Composite(c) => c.slug().to_string(),
        }
    }
}

impl TryFrom<String> for Selection {
    type Error = QuizError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Question kinds
// ---------------------------------------------------------------------------

/// Tag selecting a question's payload shape and evaluation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    NumberSequence,
    Matrix,
    LatinSquare,
    Syllogism,
    SyllogismMulti,
    Analogy,
    SymbolSequence,
    CubeRotation,
    CubeNet,
    PaperFolding,
    Tangram,
    Spelling,
    Dictation,
    Grammar,
    Comprehension,
    GeneralKnowledge,
    WordProblem,
    DigitSpan,
    NameRecall,
    CaseNumber,
    SymbolCount,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 21] = [
        QuestionKind::NumberSequence,
        QuestionKind::Matrix,
        QuestionKind::LatinSquare,
        QuestionKind::Syllogism,
        QuestionKind::SyllogismMulti,
        QuestionKind::Analogy,
        QuestionKind::SymbolSequence,
        QuestionKind::CubeRotation,
        QuestionKind::CubeNet,
        QuestionKind::PaperFolding,
        QuestionKind::Tangram,
        QuestionKind::Spelling,
        QuestionKind::Dictation,
        QuestionKind::Grammar,
        QuestionKind::Comprehension,
        QuestionKind::GeneralKnowledge,
        QuestionKind::WordProblem,
        QuestionKind::DigitSpan,
        QuestionKind::NameRecall,
        QuestionKind::CaseNumber,
        QuestionKind::SymbolCount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QuestionKind::NumberSequence => "number-sequence",
            QuestionKind::Matrix => "matrix",
            QuestionKind::LatinSquare => "latin-square",
            QuestionKind::Syllogism => "syllogism",
            QuestionKind::SyllogismMulti => "syllogism-multi",
            QuestionKind::Analogy => "analogy",
            QuestionKind::SymbolSequence => "symbol-sequence",
            QuestionKind::CubeRotation => "cube-rotation",
            QuestionKind::CubeNet => "cube-net",
            QuestionKind::PaperFolding => "paper-folding",
            QuestionKind::Tangram => "tangram",
            QuestionKind::Spelling => "spelling",
            QuestionKind::Dictation => "dictation",
            QuestionKind::Grammar => "grammar",
            QuestionKind::Comprehension => "comprehension",
            QuestionKind::GeneralKnowledge => "general-knowledge",
            QuestionKind::WordProblem => "word-problem",
            QuestionKind::DigitSpan => "digit-span",
            QuestionKind::NameRecall => "name-recall",
            QuestionKind::CaseNumber => "case-number",
            QuestionKind::SymbolCount => "symbol-count",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuestionKind {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('_', "-");
        QuestionKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == needle)
            .ok_or_else(|| QuizError::UnknownKind(s.trim().to_string()))
    }
}

// ---------------------------------------------------------------------------
// Payload building blocks
// ---------------------------------------------------------------------------

/// The pattern that generated a number sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum SequenceRule {
    Arithmetic { step: i64 },
    Geometric { ratio: i64 },
    Squares,
    Fibonacci,
    Primes,
    Triangular,
    Alternating { add: i64, mul: i64 },
    Quadratic,
    Factorial,
    Tribonacci,
    Catalan { start: u32 },
    Composite { mul: i64, add: i64 },
    Modular { step: i64, modulus: i64 },
}

impl SequenceRule {
    /// Compute the term that follows `terms` under this rule.
    ///
    /// Returns `None` when `terms` is too short for the rule or the next term
    /// does not fit in an `i64`.
    pub fn next(&self, terms: &[i64]) -> Option<i64> {
        let last = *terms.last()?;
        let prev = terms.len().checked_sub(2).map(|i| terms[i]);
        match self {
            SequenceRule::Arithmetic { step } => last.checked_add(*step),
            SequenceRule::Geometric { ratio } => last.checked_mul(*ratio),
            SequenceRule::Squares => {
                let next = integer_sqrt(last).checked_add(1)?;
                next.checked_mul(next)
            }
            SequenceRule::Fibonacci => last.checked_add(prev?),
            SequenceRule::Primes => next_prime(last),
            // Triangular numbers grow by n, n+1, ...
            SequenceRule::Triangular => last
                .checked_sub(prev?)?
                .checked_add(1)?
                .checked_add(last),
            SequenceRule::Alternating { add, mul } => {
                if (terms.len() - 1) % 2 == 0 {
                    last.checked_add(*add)
                } else {
                    last.checked_mul(*mul)
                }
            }
            // n² + n + 1: second difference is 2.
            SequenceRule::Quadratic => last
                .checked_sub(prev?)?
                .checked_add(2)?
                .checked_add(last),
            SequenceRule::Factorial => {
                let factor = last.checked_div(prev?)?.checked_add(1)?;
                last.checked_mul(factor)
            }
            SequenceRule::Tribonacci => {
                let n = terms.len();
                if n < 3 {
                    return None;
                }
                terms[n - 1]
                    .checked_add(terms[n - 2])?
                    .checked_add(terms[n - 3])
            }
            SequenceRule::Catalan { start } => {
                let offset = u32::try_from(terms.len()).ok()?;
                catalan(start.checked_add(offset)?)
            }
            SequenceRule::Composite { mul, add } => last.checked_mul(*mul)?.checked_add(*add),
            SequenceRule::Modular { step, modulus } => {
                last.checked_add(*step)?.checked_rem_euclid(*modulus)
            }
        }
    }
}

fn integer_sqrt(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    let mut root = (n as f64).sqrt() as i64;
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    root
}

/// Returns `true` if `n` is prime.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Prime terms above this are not searched.
pub const PRIME_SEARCH_LIMIT: i64 = 1_000_000;

fn next_prime(after: i64) -> Option<i64> {
    if after >= PRIME_SEARCH_LIMIT {
        return None;
    }
    (after.max(1) + 1..).find(|n| is_prime(*n))
}

/// The n-th Catalan number (C0 = 1), or `None` on overflow.
pub fn catalan(n: u32) -> Option<i64> {
    let mut c: i64 = 1;
    for i in 0..i64::from(n) {
        c = c.checked_mul(2)?.checked_mul(2 * i + 1)? / (i + 2);
    }
    Some(c)
}

/// One cell of a matrix puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Number(i64),
    Symbol(String),
    Masked,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Symbol(s) => f.write_str(s),
            Cell::Masked => f.write_str("?"),
        }
    }
}

/// The rule a matrix puzzle was built under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum MatrixRule {
    /// Every row sums to `target`.
    RowSum { target: i64 },
    /// Row `i` is `base_i · 1, base_i · 2, ...`.
    RowMultiples,
    /// Cell `(i, j)` is `(i+1)(j+1) + k(i+j)`.
    Position { k: i64 },
    /// Every symbol appears once per row and column.
    LatinSquare,
}

/// Tilt direction for cube-rotation puzzles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tilt {
    Forward,
    Backward,
    Left,
    Right,
}

impl Tilt {
    pub const ALL: [Tilt; 4] = [Tilt::Forward, Tilt::Backward, Tilt::Left, Tilt::Right];

    pub fn label(self) -> &'static str {
        match self {
            Tilt::Forward => "nach vorne",
            Tilt::Backward => "nach hinten",
            Tilt::Left => "nach links",
            Tilt::Right => "nach rechts",
        }
    }
}

/// Visible faces of a die. Opposite faces always sum to 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeState {
    pub top: u8,
    pub front: u8,
    pub right: u8,
}

impl CubeState {
    pub fn bottom(self) -> u8 {
        7 - self.top
    }

    /// Tip the die over one edge.
    pub fn tilt(self, tilt: Tilt) -> CubeState {
        match tilt {
            // The top rolls towards the viewer and becomes the front.
            Tilt::Forward => CubeState {
                top: 7 - self.front,
                front: self.top,
                right: self.right,
            },
            Tilt::Backward => CubeState {
                top: self.front,
                front: 7 - self.top,
                right: self.right,
            },
            Tilt::Left => CubeState {
                top: self.right,
                front: self.front,
                right: 7 - self.top,
            },
            Tilt::Right => CubeState {
                top: 7 - self.right,
                front: self.front,
                right: self.top,
            },
        }
    }
}

/// The seven tangram pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TangramPiece {
    SmallTriangle,
    MediumTriangle,
    LargeTriangle,
    Square,
    Parallelogram,
}

impl TangramPiece {
    pub const ALL: [TangramPiece; 5] = [
        TangramPiece::SmallTriangle,
        TangramPiece::MediumTriangle,
        TangramPiece::LargeTriangle,
        TangramPiece::Square,
        TangramPiece::Parallelogram,
    ];

    /// Area measured in small triangles (the full square is 16).
    pub fn area_units(self) -> i64 {
        match self {
            TangramPiece::SmallTriangle => 1,
            TangramPiece::MediumTriangle | TangramPiece::Square | TangramPiece::Parallelogram => 2,
            TangramPiece::LargeTriangle => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TangramPiece::SmallTriangle => "kleines Dreieck",
            TangramPiece::MediumTriangle => "mittleres Dreieck",
            TangramPiece::LargeTriangle => "großes Dreieck",
            TangramPiece::Square => "Quadrat",
            TangramPiece::Parallelogram => "Parallelogramm",
        }
    }
}

/// Calculation behind an arithmetic word problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `operands[0]` percent of `operands[1]`.
    PercentOf,
    /// `operands[0]` reduced by `operands[1]` percent.
    Discount,
    /// `operands[0]` units cost `operands[1]`; price of `operands[2]` units.
    RuleOfThree,
    /// `operands[0]` workers need `operands[1]` days; days for `operands[2]` workers.
    InverseRuleOfThree,
    /// Sum of all operands.
    Total,
}

impl Operation {
    /// Apply the operation. Returns `None` for missing or zero divisors.
    pub fn apply(self, operands: &[f64]) -> Option<f64> {
        match self {
            Operation::PercentOf => Some(operands.first()? * operands.get(1)? / 100.0),
            Operation::Discount => Some(operands.first()? * (100.0 - operands.get(1)?) / 100.0),
            Operation::RuleOfThree => {
                let units = *operands.first()?;
                if units == 0.0 {
                    return None;
                }
                Some(operands.get(1)? / units * operands.get(2)?)
            }
            Operation::InverseRuleOfThree => {
                let workers = *operands.get(2)?;
                if workers == 0.0 {
                    return None;
                }
                Some(operands.first()? * operands.get(1)? / workers)
            }
            Operation::Total => Some(operands.iter().sum()),
        }
    }
}

/// One memorized fact: a key shown to the user and the value to recall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecallItem {
    pub key: String,
    pub value: String,
}

/// Which part of the memorized material is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "probe", content = "index", rename_all = "snake_case")]
pub enum Probe {
    /// The value of one item.
    Item(usize),
    /// All values concatenated in order.
    Sequence,
    /// All values concatenated in reverse order.
    Reversed,
}

impl Probe {
    /// Derive the expected recall from the material.
    pub fn expected(self, items: &[RecallItem]) -> Option<String> {
        match self {
            Probe::Item(i) => items.get(i).map(|item| item.value.clone()),
            Probe::Sequence => Some(items.iter().map(|i| i.value.as_str()).collect()),
            Probe::Reversed => Some(items.iter().rev().map(|i| i.value.as_str()).collect()),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload, answer, submission
// ---------------------------------------------------------------------------

/// Kind-specific structured content of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Payload {
    /// Displayed terms of a number sequence; the answer continues it.
    Sequence { terms: Vec<i64>, rule: SequenceRule },
    /// Square grid with exactly one masked cell. Symbol grids list their
    /// candidate symbols as options.
    Grid {
        cells: Vec<Vec<Cell>>,
        rule: MatrixRule,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<String>,
    },
    /// Syllogism premises with candidate conclusions.
    Premises {
        premises: Vec<String>,
        options: Vec<String>,
    },
    /// `pair[0] : pair[1] = target : ?`.
    Analogy {
        pair: [String; 2],
        target: String,
        options: Vec<String>,
    },
    /// Symbol sequence to continue, with candidate symbols.
    Symbols {
        sequence: Vec<String>,
        options: Vec<String>,
        /// Index into `options` of the symbol that follows.
        follows: usize,
    },
    /// Die start position and the tilts applied to it.
    Cube { start: CubeState, moves: Vec<Tilt> },
    /// Unfolded cube net and the face asked about.
    Net {
        rows: Vec<String>,
        face: char,
        options: Vec<String>,
    },
    /// A sheet folded `folds` times and punched `punches` times.
    Folding { folds: u32, punches: u32 },
    /// Tangram pieces whose combined area is asked for.
    Pieces { pieces: Vec<TangramPiece> },
    /// Plain multiple choice with an optional reading passage.
    Choices {
        #[serde(default)]
        context: Option<String>,
        options: Vec<String>,
    },
    /// Word problem with the numbers it uses.
    Arithmetic {
        operation: Operation,
        operands: Vec<f64>,
    },
    /// Material to memorize and the part asked for.
    Recall { items: Vec<RecallItem>, probe: Probe },
    /// Text to write down.
    Dictation { text: String },
    /// A line of symbols in which `target` must be counted.
    Count { line: String, target: char },
}

impl Payload {
    /// Options shown to the user, if the payload is multiple choice.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Payload::Premises { options, .. }
            | Payload::Analogy { options, .. }
            | Payload::Symbols { options, .. }
            | Payload::Net { options, .. }
            | Payload::Choices { options, .. } => Some(options),
            Payload::Grid { options, .. } if !options.is_empty() => Some(options),
            _ => None,
        }
    }
}

/// Canonical correct answer of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
    Integer(i64),
    Decimal(f64),
    Choice(usize),
    Choices(BTreeSet<usize>),
    Text(String),
    /// Any non-empty submission is accepted.
    Open,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Integer(n) => write!(f, "{n}"),
            Answer::Decimal(x) => write!(f, "{x:.2}"),
            Answer::Choice(i) => write!(f, "{}", option_letter(*i)),
            Answer::Choices(set) => {
                let letters: Vec<String> = set.iter().map(|i| option_letter(*i).to_string()).collect();
                f.write_str(&letters.join(", "))
            }
            Answer::Text(s) => f.write_str(s),
            Answer::Open => f.write_str("(freie Antwort)"),
        }
    }
}

/// Letter label for an option index (0 → A).
pub fn option_letter(index: usize) -> char {
    char::from_u32('A' as u32 + index as u32).unwrap_or('?')
}

/// A value submitted by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Submission {
    Number(f64),
    Choice(usize),
    Choices(BTreeSet<usize>),
    Text(String),
}

impl Submission {
    /// Convenience constructor for multi-choice submissions.
    pub fn choices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Submission::Choices(indices.into_iter().collect())
    }

    /// Returns `true` if nothing meaningful was submitted.
    pub fn is_empty(&self) -> bool {
        match self {
            Submission::Text(s) => s.trim().is_empty(),
            Submission::Choices(set) => set.is_empty(),
            Submission::Number(_) | Submission::Choice(_) => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Questions and tests
// ---------------------------------------------------------------------------

/// A generated question before the assembler assigns its category.
///
/// Only generators build bodies; everyone else reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBody {
    pub(crate) kind: QuestionKind,
    /// Display text.
    pub(crate) prompt: String,
    pub(crate) payload: Payload,
    pub(crate) answer: Answer,
    /// Justification shown after grading.
    pub(crate) explanation: String,
}

impl QuestionBody {
    pub fn new(
        kind: QuestionKind,
        prompt: impl Into<String>,
        payload: Payload,
        answer: Answer,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
            payload,
            answer,
            explanation: explanation.into(),
        }
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// A question as part of a test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub(crate) category: Category,
    #[serde(flatten)]
    pub(crate) body: QuestionBody,
}

impl Question {
    pub fn new(category: Category, body: QuestionBody) -> Self {
        Self { category, body }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn body(&self) -> &QuestionBody {
        &self.body
    }

    pub fn kind(&self) -> QuestionKind {
        self.body.kind
    }

    pub fn prompt(&self) -> &str {
        &self.body.prompt
    }

    pub fn payload(&self) -> &Payload {
        &self.body.payload
    }

    pub fn answer(&self) -> &Answer {
        &self.body.answer
    }

    pub fn explanation(&self) -> &str {
        &self.body.explanation
    }
}

/// An ordered, fixed-length list of questions.
///
/// Fields are read-only outside this crate; a test never changes once
/// assembled or loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Test {
    pub(crate) id: Uuid,
    pub(crate) selection: Selection,
    pub(crate) difficulty: Difficulty,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) questions: Vec<Question>,
}

impl Test {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

/// The outcome of one answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Zero-based position of the question in its test.
    pub question: usize,
    pub category: Category,
    pub kind: QuestionKind,
    pub correct: bool,
    /// Seconds spent on the question; `None` when untimed.
    #[serde(default)]
    pub elapsed_secs: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert_eq!("leicht".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("Experte".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        assert_eq!(
            "brutal".parse::<Difficulty>(),
            Err(QuizError::UnknownDifficulty("brutal".into()))
        );
    }

    #[test]
    fn difficulty_resolves_to_nearest_supported_tier() {
        let supported = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
        assert_eq!(Difficulty::Expert.resolve(&supported), Difficulty::Hard);
        assert_eq!(Difficulty::Medium.resolve(&supported), Difficulty::Medium);
        assert_eq!(
            Difficulty::Medium.resolve(&[Difficulty::Easy, Difficulty::Hard]),
            Difficulty::Easy
        );
        assert_eq!(Difficulty::Hard.resolve(&[]), Difficulty::Easy);
    }

    #[test]
    fn category_parse_accepts_label_and_slug() {
        assert_eq!(
            "Zahlenreihen".parse::<Category>().unwrap(),
            Category::NumberSequences
        );
        assert_eq!("räumlich".parse::<Category>().unwrap(), Category::Spatial);
        assert_eq!("raeumlich".parse::<Category>().unwrap(), Category::Spatial);
        assert_eq!(
            "general-knowledge".parse::<Category>().unwrap(),
            Category::GeneralKnowledge
        );
        assert!("Foo".parse::<Category>().is_err());
    }

    #[test]
    fn selection_parse_and_areas() {
        let mixed: Selection = "Gemischt".parse().unwrap();
        assert!(mixed.is_composite());
        assert_eq!(mixed.areas().len(), 5);
        let full: Selection = "full-test".parse().unwrap();
        assert_eq!(full.areas().len(), Category::ALL.len());
        let logic: Selection = "Logik".parse().unwrap();
        assert_eq!(logic.areas(), &[Category::Logic]);
        assert_eq!(
            "Foo".parse::<Selection>(),
            Err(QuizError::UnknownCategory("Foo".into()))
        );
    }

    #[test]
    fn selection_serde_uses_slug() {
        let json = serde_json::to_string(&Selection::Composite(Composite::Language)).unwrap();
        assert_eq!(json, "\"language\"");
        let back: Selection = serde_json::from_str("\"matrices\"").unwrap();
        assert_eq!(back, Selection::Area(Category::Matrices));
        assert!(serde_json::from_str::<Selection>("\"Foo\"").is_err());
    }

    #[test]
    fn question_kind_roundtrip_names() {
        for kind in QuestionKind::ALL {
            assert_eq!(kind.name().parse::<QuestionKind>().unwrap(), kind);
        }
        assert_eq!(
            "syllogism_multi".parse::<QuestionKind>().unwrap(),
            QuestionKind::SyllogismMulti
        );
    }

    #[test]
    fn sequence_rules_continue_known_sequences() {
        assert_eq!(
            SequenceRule::Arithmetic { step: 3 }.next(&[2, 5, 8, 11]),
            Some(14)
        );
        assert_eq!(SequenceRule::Squares.next(&[4, 9, 16, 25]), Some(36));
        assert_eq!(SequenceRule::Primes.next(&[7, 11, 13, 17]), Some(19));
        assert_eq!(SequenceRule::Triangular.next(&[1, 3, 6, 10]), Some(15));
        assert_eq!(SequenceRule::Quadratic.next(&[3, 7, 13, 21]), Some(31));
        assert_eq!(SequenceRule::Factorial.next(&[1, 2, 6, 24]), Some(120));
        assert_eq!(SequenceRule::Tribonacci.next(&[1, 1, 2, 4, 7]), Some(13));
        assert_eq!(SequenceRule::Catalan { start: 1 }.next(&[1, 2, 5, 14]), Some(42));
        assert_eq!(
            SequenceRule::Alternating { add: 3, mul: 2 }.next(&[2, 5, 10, 13]),
            Some(26)
        );
        assert_eq!(
            SequenceRule::Modular { step: 5, modulus: 7 }.next(&[1, 6, 4, 2]),
            Some(0)
        );
    }

    #[test]
    fn sequence_rules_refuse_terms_out_of_range() {
        let huge = i64::MAX - 1;
        assert_eq!(SequenceRule::Arithmetic { step: 5 }.next(&[huge]), None);
        assert_eq!(SequenceRule::Geometric { ratio: 3 }.next(&[huge / 2]), None);
        assert_eq!(SequenceRule::Squares.next(&[huge]), None);
        assert_eq!(SequenceRule::Fibonacci.next(&[huge, huge]), None);
        assert_eq!(SequenceRule::Triangular.next(&[i64::MIN, huge]), None);
        assert_eq!(SequenceRule::Factorial.next(&[0, 6]), None);
        assert_eq!(SequenceRule::Tribonacci.next(&[huge, huge, huge]), None);
        assert_eq!(SequenceRule::Catalan { start: u32::MAX }.next(&[1]), None);
        assert_eq!(SequenceRule::Catalan { start: 60 }.next(&[1]), None);
        assert_eq!(SequenceRule::Composite { mul: 2, add: 1 }.next(&[huge]), None);
        assert_eq!(SequenceRule::Modular { step: 1, modulus: 0 }.next(&[3]), None);
        assert_eq!(SequenceRule::Primes.next(&[huge]), None);
        assert_eq!(SequenceRule::Primes.next(&[PRIME_SEARCH_LIMIT]), None);
        assert_eq!(catalan(33), Some(212_336_130_412_243_110));
        assert_eq!(catalan(34), None);
    }

    #[test]
    fn cube_opposite_faces_stay_consistent() {
        let start = CubeState {
            top: 1,
            front: 2,
            right: 3,
        };
        for tilt in Tilt::ALL {
            let next = start.tilt(tilt);
            let faces = [next.top, next.front, next.right];
            assert!(faces.iter().all(|f| (1..=6).contains(f)));
            assert_ne!(next.top + next.front, 7);
            assert_ne!(next.top + next.right, 7);
        }
        assert_eq!(start.tilt(Tilt::Forward).tilt(Tilt::Backward), start);
        assert_eq!(start.tilt(Tilt::Left).tilt(Tilt::Right), start);
    }

    #[test]
    fn operations_compute_expected_values() {
        assert_eq!(Operation::PercentOf.apply(&[15.0, 200.0]), Some(30.0));
        assert_eq!(Operation::Discount.apply(&[80.0, 25.0]), Some(60.0));
        assert_eq!(Operation::RuleOfThree.apply(&[4.0, 10.0, 6.0]), Some(15.0));
        assert_eq!(
            Operation::InverseRuleOfThree.apply(&[3.0, 12.0, 4.0]),
            Some(9.0)
        );
        assert_eq!(Operation::RuleOfThree.apply(&[0.0, 10.0, 6.0]), None);
    }

    #[test]
    fn probe_derives_expected_recall() {
        let items: Vec<RecallItem> = ["4", "8", "1"]
            .iter()
            .enumerate()
            .map(|(i, v)| RecallItem {
                key: format!("Position {}", i + 1),
                value: v.to_string(),
            })
            .collect();
        assert_eq!(Probe::Item(1).expected(&items).as_deref(), Some("8"));
        assert_eq!(Probe::Sequence.expected(&items).as_deref(), Some("481"));
        assert_eq!(Probe::Reversed.expected(&items).as_deref(), Some("184"));
        assert_eq!(Probe::Item(9).expected(&items), None);
    }

    #[test]
    fn answer_display_uses_option_letters() {
        assert_eq!(Answer::Choice(0).to_string(), "A");
        assert_eq!(Answer::Choices([0, 3].into_iter().collect()).to_string(), "A, D");
        assert_eq!(Answer::Decimal(12.5).to_string(), "12.50");
    }

    #[test]
    fn question_serde_roundtrip() {
        let question = Question {
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
        let json = serde_json::to_string(&question).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back, question);
    }

    #[test]
    fn loaded_tests_are_read_through_accessors() {
        let body = QuestionBody::new(
            QuestionKind::PaperFolding,
            "Wie viele Löcher?",
            Payload::Folding {
                folds: 2,
                punches: 1,
            },
            Answer::Integer(4),
            "Jede Faltung verdoppelt die Löcher.",
        );
        let question = Question::new(Category::Spatial, body.clone());
        assert_eq!(question.category(), Category::Spatial);
        assert_eq!(question.body(), &body);
        assert_eq!(body.answer(), &Answer::Integer(4));

        let test = Test {
            id: Uuid::new_v4(),
            selection: Selection::Area(Category::Spatial),
            difficulty: Difficulty::Medium,
            created_at: Utc::now(),
            questions: vec![question.clone()],
        };
        let json = serde_json::to_string(&test).unwrap();
        let loaded: Test = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.id(), test.id());
        assert_eq!(loaded.selection(), Selection::Area(Category::Spatial));
        assert_eq!(loaded.difficulty(), Difficulty::Medium);
        assert_eq!(loaded.created_at(), test.created_at());
        assert_eq!(loaded.questions(), &[question]);
    }
}
