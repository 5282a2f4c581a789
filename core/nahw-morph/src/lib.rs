#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod agreement;

pub use agreement::{
    arrays_intersect, check_adjacency, implied_gender, implied_number, mismatches, values_match,
    verb_subject_mismatches, word_index,
};

use nahw_protocol::{Details, Feature, MorphFlags, PosType};

/// Resolved definiteness of a nominal tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definiteness {
    Definite,
    Indefinite,
}

/// Definiteness as the binding rules see it.
///
/// A suffix pronoun always makes the tag definite. Otherwise the tag's own
/// attribute decides, and any definite candidate counts as definite. An
/// absent attribute defaults to indefinite.
///
/// Annexation chains are not resolved here: a noun in an Idafa keeps its
/// own definiteness.
pub fn effective_definiteness(details: &Details) -> Definiteness {
    if details.suffix_pronoun.is_some() {
        return Definiteness::Definite;
    }
    if details.morph.contains(MorphFlags::DEFINITE) {
        Definiteness::Definite
    } else {
        Definiteness::Indefinite
    }
}

pub const ALL_CASES: MorphFlags = MorphFlags::NOMINATIVE
    .union(MorphFlags::ACCUSATIVE)
    .union(MorphFlags::GENITIVE);

/// Prefilled values of the settings panel for a freshly added tag.
pub fn default_details(pos: PosType) -> Details {
    let morph = match pos {
        PosType::Noun | PosType::Adjective => {
            MorphFlags::MASCULINE | MorphFlags::SINGULAR | MorphFlags::DEFINITE | ALL_CASES
        }
        PosType::Demonstrative => MorphFlags::MASCULINE | MorphFlags::SINGULAR,
        _ => MorphFlags::empty(),
    };
    Details::new(morph)
}

/// Normalizes details supplied when tagging.
///
/// With `open_cases`, nouns and adjectives without an explicit case are
/// open to all three cases. Categories that do not belong to the tag type
/// are dropped.
pub fn normalize_details(pos: PosType, mut details: Details, open_cases: bool) -> Details {
    details.morph &= allowed_features(pos);
    if open_cases
        && matches!(pos, PosType::Noun | PosType::Adjective)
        && !details.has(Feature::Case)
    {
        details.morph |= ALL_CASES;
    }
    if pos != PosType::Verb {
        details.roots.clear();
        details.forms.clear();
        details.tenses.clear();
        details.voice = None;
    }
    details
}

/// Union of the category masks a tag type may carry.
pub fn allowed_features(pos: PosType) -> MorphFlags {
    let features: &[Feature] = match pos {
        PosType::Noun | PosType::Adjective => &[
            Feature::Gender,
            Feature::Number,
            Feature::Definiteness,
            Feature::Case,
        ],
        PosType::Demonstrative => &[Feature::Gender, Feature::Number, Feature::Case],
        PosType::PersonalPronoun => &[
            Feature::Person,
            Feature::Gender,
            Feature::Number,
            Feature::Definiteness,
            Feature::Case,
        ],
        PosType::Verb => &[Feature::PersonGender],
        _ => &[],
    };
    features
        .iter()
        .fold(MorphFlags::empty(), |acc, feature| acc | feature.mask())
}
