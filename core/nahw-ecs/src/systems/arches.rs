use nahw_morph::word_index;
use nahw_protocol::{Word, WordId};

use crate::components::Arch;
use crate::config::EngineConfig;

/// Inclusive index range covered by two words, in sentence order.
pub fn word_span(word1: WordId, word2: WordId, words: &[Word]) -> Option<(usize, usize)> {
    let i = word_index(words, word1)?;
    let j = word_index(words, word2)?;
    Some((i.min(j), i.max(j)))
}

/// Number of existing arches whose span strictly contains `start..=end`.
pub fn nesting_depth<'a>(
    start: usize,
    end: usize,
    existing: impl IntoIterator<Item = &'a Arch>,
    words: &[Word],
) -> usize {
    existing
        .into_iter()
        .filter_map(|arch| word_span(arch.word1, arch.word2, words))
        .filter(|&(outer_start, outer_end)| outer_start < start && outer_end > end)
        .count()
}

/// Render height of a new arch over `word1..=word2`.
///
/// A single-word arch always gets the fixed single-word height. Otherwise each
/// containing arch lowers the base by one nesting step. The result is only
/// clamped when the config sets a floor.
pub fn arch_height<'a>(
    word1: WordId,
    word2: WordId,
    existing: impl IntoIterator<Item = &'a Arch>,
    words: &[Word],
    config: &EngineConfig,
) -> i32 {
    if word1 == word2 {
        return config.single_word_arch_height;
    }
    let depth = match word_span(word1, word2, words) {
        Some((start, end)) => nesting_depth(start, end, existing, words),
        None => 0,
    };
    let height = config.arch_base_height - depth as i32 * config.arch_nesting_step;
    match config.arch_min_height {
        Some(floor) => height.max(floor),
        None => height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nahw_protocol::ArchId;
    use proptest::prelude::*;

    fn sentence(n: u32) -> Vec<Word> {
        (0..n).map(|i| Word::new(WordId(i), format!("w{}", i))).collect()
    }

    fn arch(id: u32, word1: u32, word2: u32) -> Arch {
        Arch {
            id: ArchId(id),
            word1: WordId(word1),
            word2: WordId(word2),
            height: 0,
            syntactic_role: Some("נשוא".to_string()),
            is_main_roof: false,
            model: None,
            is_clause: false,
            external_role: None,
            validation: None,
            clause_validation: None,
        }
    }

    #[test]
    fn test_unnested_arch_uses_base_height() {
        let words = sentence(5);
        let height = arch_height(WordId(1), WordId(3), &Vec::<Arch>::new(), &words, &EngineConfig::default());
        assert_eq!(height, 120);
    }

    #[test]
    fn test_single_word_arch_has_fixed_height() {
        let words = sentence(5);
        let config = EngineConfig::default();
        let alone = arch_height(WordId(1), WordId(1), &Vec::<Arch>::new(), &words, &config);
        assert_eq!(alone, 80);

        let existing = [arch(1, 0, 4), arch(2, 0, 3)];
        assert_eq!(arch_height(WordId(2), WordId(2), &existing, &words, &config), 80);

        let config = EngineConfig { single_word_arch_height: 60, ..EngineConfig::default() };
        assert_eq!(arch_height(WordId(2), WordId(2), &existing, &words, &config), 60);
    }

    #[test]
    fn test_shared_boundary_is_not_containment() {
        let words = sentence(5);
        let existing = [arch(1, 0, 3)];
        let height = arch_height(WordId(0), WordId(2), &existing, &words, &EngineConfig::default());
        assert_eq!(height, 120);

        let height = arch_height(WordId(2), WordId(1), &existing, &words, &EngineConfig::default());
        assert_eq!(height, 80);
    }

    #[test]
    fn test_height_floor_is_optional() {
        let words = sentence(12);
        let existing: Vec<Arch> = (0..5).map(|k| arch(k, k, 11 - k)).collect();

        let unclamped = arch_height(WordId(5), WordId(6), &existing, &words, &EngineConfig::default());
        assert_eq!(unclamped, 120 - 5 * 40);

        let config = EngineConfig { arch_min_height: Some(20), ..EngineConfig::default() };
        assert_eq!(arch_height(WordId(5), WordId(6), &existing, &words, &config), 20);
    }

    proptest! {
        #[test]
        fn test_nesting_monotonicity(depth in 0u32..8) {
            let n = 2 * depth + 4;
            let words = sentence(n);
            let center = depth + 1;
            let config = EngineConfig::default();

            let mut previous = None;
            for level in 0..=depth {
                let existing: Vec<Arch> = (0..level).map(|k| arch(k, k, n - 1 - k)).collect();
                let height = arch_height(WordId(center), WordId(center + 1), &existing, &words, &config);
                prop_assert_eq!(height, 120 - 40 * level as i32);
                if let Some(prev) = previous {
                    prop_assert_eq!(prev - height, 40);
                }
                previous = Some(height);
            }
        }
    }
}
