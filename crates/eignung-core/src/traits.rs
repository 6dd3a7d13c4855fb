//! Core trait definitions for question generators.
//!
//! Every generator family implements [`Generator`]; the registry keys them
//! by [`QuestionKind`] and the assembler only ever talks to the trait.

use rand::RngCore;

use crate::model::{Difficulty, QuestionBody, QuestionKind};

// ---------------------------------------------------------------------------
// Generator trait
// ---------------------------------------------------------------------------

/// A stateless producer of one kind of question.
pub trait Generator: Send + Sync {
    /// The kind every generated question carries.
    fn kind(&self) -> QuestionKind;

    /// Tiers with their own pattern pool or bank entries.
    ///
    /// Requests for other tiers are served from the nearest supported tier.
    fn supported(&self) -> &[Difficulty] {
        &Difficulty::ALL
    }

    /// Generate a question for an already resolved tier.
    fn generate_for(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody;

    /// Generate a question, resolving unsupported tiers first.
    fn generate(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> QuestionBody {
        let tier = difficulty.resolve(self.supported());
        if tier != difficulty {
            tracing::debug!(kind = %self.kind(), requested = %difficulty, resolved = %tier, "difficulty fallback");
        }
        self.generate_for(tier, rng)
    }
}

// ---------------------------------------------------------------------------
// Curated banks
// ---------------------------------------------------------------------------

/// A curated multiple-choice item.
#[derive(Debug, Clone, Copy)]
pub struct BankItem {
    pub prompt: &'static str,
    /// Reading passage or other context shown before the prompt.
    pub context: Option<&'static str>,
    pub options: &'static [&'static str],
    pub correct: usize,
    pub explanation: &'static str,
}

/// Curated items grouped by tier.
pub type Bank = &'static [(Difficulty, &'static [BankItem])];

/// Tiers for which `bank` has at least one item.
pub fn bank_tiers(bank: Bank) -> Vec<Difficulty> {
    bank.iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(tier, _)| *tier)
        .collect()
}

/// Items for exactly `tier`, or an empty slice.
pub fn bank_items(bank: Bank, tier: Difficulty) -> &'static [BankItem] {
    bank.iter()
        .find(|(t, _)| *t == tier)
        .map(|(_, items)| *items)
        .unwrap_or(&[])
}
