use alloc::vec::Vec;

use nahw_protocol::{Feature, MorphFlags, Word, WordId};

/// Homonymic match of one category.
///
/// Each side is a set of candidate values; the match succeeds when the sets
/// share a value. Two absent values match each other, an absent value never
/// matches a present one.
pub fn values_match(a: MorphFlags, b: MorphFlags, feature: Feature) -> bool {
    let (a, b) = (a.of(feature), b.of(feature));
    if a.is_empty() && b.is_empty() {
        return true;
    }
    a.intersects(b)
}

/// Strict set intersection: an absent side short-circuits to `false`.
pub fn arrays_intersect(a: MorphFlags, b: MorphFlags, feature: Feature) -> bool {
    a.of(feature).intersects(b.of(feature))
}

/// Categories present on both sides whose candidate sets are disjoint.
pub fn mismatches(a: MorphFlags, b: MorphFlags, features: &[Feature]) -> Vec<Feature> {
    features
        .iter()
        .copied()
        .filter(|feature| a.has(*feature) && b.has(*feature) && !arrays_intersect(a, b, *feature))
        .collect()
}

pub fn word_index(words: &[Word], id: WordId) -> Option<usize> {
    words.iter().position(|word| word.id == id)
}

/// Two words are adjacent when their positions differ by exactly one.
pub fn check_adjacency(word1: WordId, word2: WordId, words: &[Word]) -> bool {
    match (word_index(words, word1), word_index(words, word2)) {
        (Some(i), Some(j)) => i.abs_diff(j) == 1,
        _ => false,
    }
}

const PLURAL_FORMS: MorphFlags = MorphFlags::FIRST_PL
    .union(MorphFlags::SECOND_MASC_PL)
    .union(MorphFlags::SECOND_FEM_PL)
    .union(MorphFlags::THIRD_MASC_PL)
    .union(MorphFlags::THIRD_FEM_PL);

const FEMININE_FORMS: MorphFlags = MorphFlags::THIRD_FEM_SG
    .union(MorphFlags::SECOND_FEM_SG)
    .union(MorphFlags::SECOND_FEM_PL)
    .union(MorphFlags::THIRD_FEM_PL);

// A verb preceding its subject stays singular in the third person.
const NUMBER_NEUTRAL_FORMS: MorphFlags = MorphFlags::THIRD_MASC_SG.union(MorphFlags::THIRD_FEM_SG);

// First person is gender-common; "נסתר" is the implicit default form.
const GENDER_NEUTRAL_FORMS: MorphFlags = MorphFlags::THIRD_MASC_SG
    .union(MorphFlags::FIRST_SG)
    .union(MorphFlags::FIRST_PL);

/// Number implied by a verb's person/gender candidates, or `None` when the
/// verb carries no person/gender or any candidate is number-neutral.
pub fn implied_number(verb: MorphFlags) -> Option<MorphFlags> {
    let forms = verb.of(Feature::PersonGender);
    if forms.is_empty() || forms.intersects(NUMBER_NEUTRAL_FORMS) {
        return None;
    }
    let mut number = MorphFlags::empty();
    if forms.intersects(PLURAL_FORMS) {
        number |= MorphFlags::PLURAL | MorphFlags::DUAL;
    }
    if !forms.difference(PLURAL_FORMS).is_empty() {
        number |= MorphFlags::SINGULAR;
    }
    Some(number)
}

/// Gender implied by a verb's person/gender candidates, or `None` when the
/// verb carries no person/gender or any candidate is gender-neutral.
pub fn implied_gender(verb: MorphFlags) -> Option<MorphFlags> {
    let forms = verb.of(Feature::PersonGender);
    if forms.is_empty() || forms.intersects(GENDER_NEUTRAL_FORMS) {
        return None;
    }
    let mut gender = MorphFlags::empty();
    if forms.intersects(FEMININE_FORMS) {
        gender |= MorphFlags::FEMININE;
    }
    if !forms.difference(FEMININE_FORMS).is_empty() {
        gender |= MorphFlags::MASCULINE;
    }
    Some(gender)
}

/// Subject/verb agreement: number first, then gender.
pub fn verb_subject_mismatches(verb: MorphFlags, subject: MorphFlags) -> Vec<Feature> {
    let mut issues = Vec::new();
    if let Some(number) = implied_number(verb) {
        if subject.has(Feature::Number) && !number.intersects(subject.of(Feature::Number)) {
            issues.push(Feature::Number);
        }
    }
    if let Some(gender) = implied_gender(verb) {
        if subject.has(Feature::Gender) && !gender.intersects(subject.of(Feature::Gender)) {
            issues.push(Feature::Gender);
        }
    }
    issues
}
