use nahw_morph::{arrays_intersect, check_adjacency, effective_definiteness, values_match, Definiteness};
use nahw_protocol::{Feature, MorphFlags, PosType, Tag, Word, WordId};

use crate::components::CombinationKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const NOT_ADJACENT: &str = "צירוף אפשרי רק בין מילים סמוכות זו לזו";
pub const NOT_DEFINED: &str = "צירוף זה לא מוגדר עדיין במערכת";
pub const DEMONSTRATIVE_NEEDS_DEFINITE: &str =
    "מה אומר לנו סטטוס הלא-מיודע על מבנה המשפט? האם זה צירוף או משפט?";

/// Verdict of the pairwise rule engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Validation {
    pub valid: bool,
    pub complete: bool,
    pub message: String,
    pub kind: CombinationKind,
    pub is_demonstrative: bool,
}

impl Validation {
    fn complete(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            complete: true,
            message: message.into(),
            kind: CombinationKind::Valid,
            is_demonstrative: false,
        }
    }

    /// Permissible so far, but the phrase awaits a continuation.
    fn awaiting(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            complete: false,
            message: message.into(),
            kind: CombinationKind::Incomplete,
            is_demonstrative: false,
        }
    }

    /// A required attribute was never filled in.
    fn missing(feature: Feature) -> Self {
        Self {
            valid: false,
            complete: false,
            message: format!("חסרים פרטים נדרשים ({})", feature.key()),
            kind: CombinationKind::Incomplete,
            is_demonstrative: false,
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            complete: false,
            message: message.into(),
            kind: CombinationKind::Invalid,
            is_demonstrative: false,
        }
    }

    fn unknown() -> Self {
        Self {
            valid: false,
            complete: false,
            message: NOT_DEFINED.to_string(),
            kind: CombinationKind::Unknown,
            is_demonstrative: false,
        }
    }

    fn demonstrative(mut self) -> Self {
        self.is_demonstrative = true;
        self
    }

    /// Kind to store for a result that is kept.
    pub fn recorded_kind(&self) -> CombinationKind {
        if self.valid && self.complete {
            CombinationKind::Valid
        } else if self.valid {
            CombinationKind::Incomplete
        } else {
            CombinationKind::Invalid
        }
    }
}

/// Validates a proposed link between `tag1` on `word1` and `tag2` on `word2`.
///
/// `word1` is expected to precede `word2`. Rules are tried in a fixed
/// priority and the first matching pair of types decides.
pub fn validate_combination(
    tag1: &Tag,
    tag2: &Tag,
    word1: WordId,
    word2: WordId,
    words: &[Word],
) -> Validation {
    if !check_adjacency(word1, word2, words) {
        return Validation::invalid(NOT_ADJACENT);
    }

    let verdict = match (tag1.pos, tag2.pos) {
        (PosType::Demonstrative, PosType::Noun) => demonstrative_noun(tag1, tag2),
        (PosType::Noun, PosType::Demonstrative) => demonstrative_noun(tag2, tag1),
        (PosType::Noun, PosType::Adjective) => noun_adjective(tag1, tag2),
        (PosType::Adjective, PosType::Noun) => noun_adjective(tag2, tag1),
        (PosType::Noun, PosType::Noun) => annexation(tag1),
        (PosType::Preposition, other) | (other, PosType::Preposition)
            if matches!(other, PosType::Noun | PosType::Demonstrative) =>
        {
            prepositional(other)
        }
        _ => Validation::unknown(),
    };

    tracing::debug!(
        first = ?tag1.pos,
        second = ?tag2.pos,
        kind = ?verdict.kind,
        valid = verdict.valid,
        complete = verdict.complete,
        "combination validated"
    );
    verdict
}

// לוואי כינוי רמז
fn demonstrative_noun(demonstrative: &Tag, noun: &Tag) -> Validation {
    let (dem, nn) = (demonstrative.details.morph, noun.details.morph);

    if !values_match(dem, nn, Feature::Gender) {
        return Validation::invalid("חוסר התאמה במין בין כינוי הרמז לשם העצם");
    }
    if !values_match(dem, nn, Feature::Number) {
        return Validation::invalid("חוסר התאמה במספר בין כינוי הרמז לשם העצם");
    }

    let dual = dem.contains(MorphFlags::DUAL) || nn.contains(MorphFlags::DUAL);
    if dual && dem.has(Feature::Case) && nn.has(Feature::Case) && !arrays_intersect(dem, nn, Feature::Case) {
        return Validation::invalid("חוסר התאמה ביחסה בין כינוי הרמז לשם העצם");
    }

    if effective_definiteness(&noun.details) == Definiteness::Indefinite {
        return Validation::invalid(DEMONSTRATIVE_NEEDS_DEFINITE).demonstrative();
    }

    Validation::complete("צירוף תקין - כינוי רמז + שם עצם").demonstrative()
}

// מימי: gender, number, definiteness, and case when both carry one
fn noun_adjective(noun: &Tag, adjective: &Tag) -> Validation {
    let (nn, adj) = (noun.details.morph, adjective.details.morph);
    let mut mismatched = Vec::new();

    for feature in [Feature::Gender, Feature::Number, Feature::Definiteness] {
        if !nn.has(feature) || !adj.has(feature) {
            return Validation::missing(feature);
        }
        if !arrays_intersect(nn, adj, feature) {
            mismatched.push(feature);
        }
    }

    if nn.has(Feature::Case) && adj.has(Feature::Case) && !arrays_intersect(nn, adj, Feature::Case) {
        mismatched.push(Feature::Case);
    }

    if !mismatched.is_empty() {
        let names: Vec<&str> = mismatched.iter().map(|f| f.hebrew_name()).collect();
        return Validation::invalid(format!("חוסר התאמה ב{}", names.join(", ")));
    }

    Validation::complete("צירוף תקין - מימי תואמים")
}

// סמיכות: only the first noun's own definiteness matters
fn annexation(first: &Tag) -> Validation {
    let morph = first.details.morph;
    if morph.of(Feature::Definiteness) == MorphFlags::DEFINITE {
        return Validation::invalid("לסמיכות, שם העצם הראשון חייב להיות לא מיודע");
    }
    if !morph.has(Feature::Definiteness) {
        return Validation::missing(Feature::Definiteness);
    }
    Validation::complete("צירוף תקין - תבנית סמיכות")
}

fn prepositional(object: PosType) -> Validation {
    if object == PosType::Noun {
        Validation::complete("צירוף תקין - מילית יחס + שם עצם")
    } else {
        Validation::awaiting("צירוף תקין אך לא שלם - חייב להוסיף שם עצם")
    }
}
