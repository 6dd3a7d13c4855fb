//! Question generator families.
//!
//! | Module       | Kinds |
//! |--------------|-------|
//! | `sequence`   | number sequences |
//! | `matrix`     | numeric matrices, Latin squares |
//! | `logic`      | syllogisms (single and multi-valid), analogies |
//! | `spatial`    | symbol sequences, cube rotation, cube nets, paper folding, tangram |
//! | `language`   | spelling, dictation, grammar, comprehension, general knowledge |
//! | `arithmetic` | word problems |
//! | `memory`     | digit span, name recall, case numbers, symbol counting |

pub mod arithmetic;
pub mod language;
pub mod logic;
pub mod matrix;
pub mod memory;
pub mod sequence;
pub mod spatial;

use rand::seq::SliceRandom;
use rand::RngCore;

pub use arithmetic::WordProblemGenerator;
pub use language::{BankGenerator, DictationGenerator};
pub use logic::{AnalogyGenerator, MultiSyllogismGenerator, SyllogismGenerator};
pub use matrix::{LatinSquareGenerator, MatrixGenerator};
pub use memory::{CaseNumberGenerator, DigitSpanGenerator, NameRecallGenerator, SymbolCountGenerator};
pub use sequence::NumberSequenceGenerator;
pub use spatial::{
    CubeNetGenerator, CubeRotationGenerator, PaperFoldingGenerator, SymbolSequenceGenerator,
    TangramGenerator,
};

/// Shuffle `options` and map the `correct` indices to their new positions.
pub(crate) fn shuffle_options<S: AsRef<str>>(
    options: &[S],
    correct: &[usize],
    rng: &mut dyn RngCore,
) -> (Vec<String>, Vec<usize>) {
    let mut order: Vec<usize> = (0..options.len()).collect();
    order.shuffle(rng);
    let shuffled = order.iter().map(|&i| options[i].as_ref().to_string()).collect();
    let mut remapped: Vec<usize> = correct
        .iter()
        .filter_map(|c| order.iter().position(|i| i == c))
        .collect();
    remapped.sort_unstable();
    (shuffled, remapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shuffle_keeps_correct_options_addressable() {
        let mut rng = StdRng::seed_from_u64(1);
        let options = ["richtig", "falsch", "auch richtig", "daneben"];
        for _ in 0..20 {
            let (shuffled, correct) = shuffle_options(&options, &[0, 2], &mut rng);
            assert_eq!(shuffled.len(), 4);
            let picked: Vec<&str> = correct.iter().map(|&i| shuffled[i].as_str()).collect();
            assert!(picked.contains(&"richtig"));
            assert!(picked.contains(&"auch richtig"));
        }
    }
}
