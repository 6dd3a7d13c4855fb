//! Test assembly.
//!
//! Draws questions from the registry for a selection: a composite picks a
//! uniformly random area per question, then a uniformly random kind within
//! that area. Questions are not deduplicated.

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::RngCore;
use uuid::Uuid;

use crate::error::{QuizError, QuizResult};
use crate::model::{Category, Difficulty, Question, QuestionKind, Selection, Test};
use crate::registry::Registry;

/// Builds [`Test`]s from a [`Registry`].
pub struct Assembler {
    registry: Registry,
}

impl Assembler {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parse `category` and assemble a test using the thread-local RNG.
    ///
    /// Fails with [`QuizError::UnknownCategory`] for names that are neither
    /// a subject area nor a composite.
    pub fn create_test(&self, category: &str, difficulty: Difficulty, count: usize) -> QuizResult<Test> {
        let selection: Selection = category.parse()?;
        self.assemble(selection, difficulty, count, &mut rand::thread_rng())
    }

    /// Assemble exactly `count` questions for `selection`.
    pub fn assemble(
        &self,
        selection: Selection,
        difficulty: Difficulty,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> QuizResult<Test> {
        // Resolve every area up front so a gap never yields a partial test.
        let pools: Vec<(Category, Vec<QuestionKind>)> = selection
            .areas()
            .iter()
            .map(|area| (*area, self.registry.kinds(*area)))
            .collect();
        if let Some((area, _)) = pools.iter().find(|(_, kinds)| kinds.is_empty()) {
            return Err(QuizError::UnknownCategory(area.slug().to_string()));
        }

        let mut questions = Vec::with_capacity(count);
        for _ in 0..count {
            let Some((area, kinds)) = pools.choose(rng) else {
                return Err(QuizError::UnknownCategory(selection.to_string()));
            };
            let Some(generator) = kinds.choose(rng).and_then(|k| self.registry.get(*k)) else {
                return Err(QuizError::UnknownCategory(area.slug().to_string()));
            };
            let body = generator.generate(difficulty, rng);
            tracing::debug!(area = area.slug(), kind = %body.kind, "generated question");
            questions.push(Question {
                category: *area,
                body,
            });
        }

        tracing::info!(
            selection = %selection,
            %difficulty,
            count = questions.len(),
            "assembled test"
        );

        Ok(Test {
            id: Uuid::new_v4(),
            selection,
            difficulty,
            created_at: Utc::now(),
            questions,
        })
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(Registry::standard())
    }
}

/// Assemble a test with the standard registry.
pub fn create_test(category: &str, difficulty: Difficulty, count: usize) -> QuizResult<Test> {
    Assembler::default().create_test(category, difficulty, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Composite;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_has_requested_length_for_every_selection() {
        let assembler = Assembler::default();
        let mut rng = StdRng::seed_from_u64(42);
        let selections = Category::ALL
            .iter()
            .map(|c| Selection::Area(*c))
            .chain(Composite::ALL.iter().map(|c| Selection::Composite(*c)));
        for selection in selections {
            for count in [5, 12, 30] {
                let test = assembler
                    .assemble(selection, Difficulty::Medium, count, &mut rng)
                    .unwrap();
                assert_eq!(test.len(), count, "{selection}");
            }
        }
    }

    #[test]
    fn single_area_questions_keep_their_category() {
        let assembler = Assembler::default();
        let mut rng = StdRng::seed_from_u64(1);
        let test = assembler
            .assemble(Selection::Area(Category::Spatial), Difficulty::Hard, 20, &mut rng)
            .unwrap();
        for q in &test.questions {
            assert_eq!(q.category, Category::Spatial);
            assert!(kinds_in(Category::Spatial).contains(&q.kind()));
        }
    }

    fn kinds_in(category: Category) -> &'static [QuestionKind] {
        crate::registry::kinds_for(category)
    }

    #[test]
    fn mixed_draws_only_reasoning_areas() {
        let assembler = Assembler::default();
        let mut rng = StdRng::seed_from_u64(2);
        let test = assembler
            .assemble(Selection::Composite(Composite::Mixed), Difficulty::Easy, 30, &mut rng)
            .unwrap();
        for q in &test.questions {
            assert!(Composite::Mixed.areas().contains(&q.category));
            assert!(kinds_in(q.category).contains(&q.kind()));
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = create_test("Foo", Difficulty::Easy, 10).unwrap_err();
        assert_eq!(err, QuizError::UnknownCategory("Foo".into()));
    }

    #[test]
    fn empty_registry_yields_no_partial_test() {
        let assembler = Assembler::new(Registry::new());
        let mut rng = StdRng::seed_from_u64(3);
        let err = assembler
            .assemble(Selection::Area(Category::Logic), Difficulty::Easy, 5, &mut rng)
            .unwrap_err();
        assert!(matches!(err, QuizError::UnknownCategory(_)));
    }

    #[test]
    fn create_test_parses_german_names() {
        let test = create_test("Zahlenreihen", Difficulty::Easy, 5).unwrap();
        assert_eq!(test.selection, Selection::Area(Category::NumberSequences));
        assert!(test
            .questions
            .iter()
            .all(|q| q.kind() == QuestionKind::NumberSequence));
    }
}
