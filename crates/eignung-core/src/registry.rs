//! Enum-keyed generator registry.
//!
//! Built once at startup; maps every [`QuestionKind`] to its generator and
//! every [`Category`] to the kinds it draws from.

use std::collections::HashMap;

use crate::generators::{
    AnalogyGenerator, BankGenerator, CaseNumberGenerator, CubeNetGenerator, CubeRotationGenerator,
    DictationGenerator, DigitSpanGenerator, LatinSquareGenerator, MatrixGenerator,
    MultiSyllogismGenerator, NameRecallGenerator, NumberSequenceGenerator, PaperFoldingGenerator,
    SymbolCountGenerator, SymbolSequenceGenerator, SyllogismGenerator, TangramGenerator,
    WordProblemGenerator,
};
use crate::model::{Category, QuestionKind};
use crate::traits::Generator;

/// Kinds each subject area draws from.
pub fn kinds_for(category: Category) -> &'static [QuestionKind] {
    match category {
        Category::NumberSequences => &[QuestionKind::NumberSequence],
        Category::Matrices => &[QuestionKind::Matrix, QuestionKind::LatinSquare],
        Category::Logic => &[QuestionKind::Syllogism, QuestionKind::SyllogismMulti],
        Category::Analogies => &[QuestionKind::Analogy],
        Category::Spatial => &[
            QuestionKind::SymbolSequence,
            QuestionKind::CubeRotation,
            QuestionKind::CubeNet,
            QuestionKind::PaperFolding,
            QuestionKind::Tangram,
        ],
        Category::Spelling => &[QuestionKind::Spelling, QuestionKind::Dictation],
        Category::Grammar => &[QuestionKind::Grammar],
        Category::Comprehension => &[QuestionKind::Comprehension],
        Category::GeneralKnowledge => &[QuestionKind::GeneralKnowledge],
        Category::Arithmetic => &[QuestionKind::WordProblem],
        Category::Memory => &[
            QuestionKind::DigitSpan,
            QuestionKind::NameRecall,
            QuestionKind::CaseNumber,
        ],
        Category::Concentration => &[QuestionKind::SymbolCount],
    }
}

/// All generators, keyed by the kind they produce.
pub struct Registry {
    generators: HashMap<QuestionKind, Box<dyn Generator>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// The registry with every built-in generator.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(NumberSequenceGenerator));
        registry.register(Box::new(MatrixGenerator));
        registry.register(Box::new(LatinSquareGenerator));
        registry.register(Box::new(SyllogismGenerator));
        registry.register(Box::new(MultiSyllogismGenerator));
        registry.register(Box::new(AnalogyGenerator));
        registry.register(Box::new(SymbolSequenceGenerator));
        registry.register(Box::new(CubeRotationGenerator));
        registry.register(Box::new(CubeNetGenerator));
        registry.register(Box::new(PaperFoldingGenerator));
        registry.register(Box::new(TangramGenerator));
        registry.register(Box::new(DictationGenerator));
        registry.register(Box::new(WordProblemGenerator));
        registry.register(Box::new(DigitSpanGenerator));
        registry.register(Box::new(NameRecallGenerator));
        registry.register(Box::new(CaseNumberGenerator));
        registry.register(Box::new(SymbolCountGenerator));

        let banks = [
            BankGenerator::spelling(),
            BankGenerator::grammar(),
            BankGenerator::comprehension(),
            BankGenerator::general_knowledge(),
        ];
        for bank in banks {
            match bank {
                Ok(generator) => registry.register(Box::new(generator)),
                Err(e) => tracing::warn!(error = %e, "skipping curated bank"),
            }
        }
        registry
    }

    /// Add or replace the generator for its kind.
    pub fn register(&mut self, generator: Box<dyn Generator>) {
        let kind = generator.kind();
        if self.generators.insert(kind, generator).is_some() {
            tracing::debug!(%kind, "replaced generator");
        }
    }

    pub fn get(&self, kind: QuestionKind) -> Option<&dyn Generator> {
        self.generators.get(&kind).map(|g| g.as_ref())
    }

    /// Kinds registered for `category`, in declaration order.
    pub fn kinds(&self, category: Category) -> Vec<QuestionKind> {
        kinds_for(category)
            .iter()
            .copied()
            .filter(|k| self.generators.contains_key(k))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_every_kind() {
        let registry = Registry::standard();
        assert_eq!(registry.len(), QuestionKind::ALL.len());
        for kind in QuestionKind::ALL {
            let generator = registry.get(kind).unwrap();
            assert_eq!(generator.kind(), kind);
        }
    }

    #[test]
    fn every_kind_belongs_to_exactly_one_area() {
        for kind in QuestionKind::ALL {
            let owners = Category::ALL
                .iter()
                .filter(|c| kinds_for(**c).contains(&kind))
                .count();
            assert_eq!(owners, 1, "{kind}");
        }
    }

    #[test]
    fn empty_registry_has_no_kinds() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.kinds(Category::Spatial).is_empty());
    }
}
