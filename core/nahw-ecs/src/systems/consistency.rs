use nahw_protocol::Word;

use crate::components::{Arch, Combination};
use crate::systems::arches::word_span;

/// Whether every combination inside the arch's span is settled.
///
/// An arch over words without combinations, or over words that no longer
/// exist, has nothing to contradict and is reported consistent.
pub fn arch_matches_combinations<'a>(
    arch: &Arch,
    combinations: impl IntoIterator<Item = &'a Combination>,
    words: &[Word],
) -> bool {
    let Some((start, end)) = word_span(arch.word1, arch.word2, words) else {
        return true;
    };
    let inside = |combination: &Combination| {
        match word_span(combination.first.word, combination.second.word, words) {
            Some((i, j)) => i >= start && j <= end,
            None => false,
        }
    };
    combinations
        .into_iter()
        .filter(|combination| inside(combination))
        .all(Combination::is_settled)
}
