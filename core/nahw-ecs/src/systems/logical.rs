use nahw_morph::mismatches;
use nahw_protocol::{Feature, Tag};

use crate::components::ConnectionKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConnectionVerdict {
    pub valid: bool,
    pub message: String,
}

/// Checks a logical link between two tags, possibly far apart.
///
/// Links between sentences are always accepted. Coordination and
/// apposition need the same tag type and compatible attributes.
pub fn validate_logical_connection(first: &Tag, second: &Tag, kind: ConnectionKind) -> ConnectionVerdict {
    match kind {
        ConnectionKind::BetweenSentences => ConnectionVerdict {
            valid: true,
            message: "קשר לוגי בין משפטים נוצר".to_string(),
        },
        ConnectionKind::Coordination if first.pos != second.pos => ConnectionVerdict {
            valid: false,
            message: "קשר תיאום דורש אותו סוג חלק דיבר".to_string(),
        },
        ConnectionKind::Coordination => {
            let issues = mismatches(
                first.details.morph,
                second.details.morph,
                &[Feature::Gender, Feature::Number, Feature::Definiteness, Feature::Case],
            );
            if issues.is_empty() {
                ConnectionVerdict { valid: true, message: "קשר תיאום/תמורה תקין".to_string() }
            } else {
                let names: Vec<&str> = issues.iter().map(|f| f.hebrew_name()).collect();
                ConnectionVerdict { valid: false, message: format!("חוסר התאמה ב{}", names.join(", ")) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nahw_protocol::{Details, MorphFlags, PosType, TagId};

    fn tag(pos: PosType, morph: MorphFlags) -> Tag {
        Tag { id: TagId(1), pos, details: Details::new(morph) }
    }

    #[test]
    fn test_between_sentences_always_valid() {
        let verb = tag(PosType::Verb, MorphFlags::THIRD_MASC_SG);
        let noun = tag(PosType::Noun, MorphFlags::FEMININE);
        assert!(validate_logical_connection(&verb, &noun, ConnectionKind::BetweenSentences).valid);
    }

    #[test]
    fn test_coordination_needs_same_type() {
        let verb = tag(PosType::Verb, MorphFlags::THIRD_MASC_SG);
        let noun = tag(PosType::Noun, MorphFlags::FEMININE);
        let verdict = validate_logical_connection(&verb, &noun, ConnectionKind::Coordination);
        assert!(!verdict.valid);
        assert_eq!(verdict.message, "קשר תיאום דורש אותו סוג חלק דיבר");
    }

    #[test]
    fn test_coordination_agreement() {
        let a = tag(PosType::Noun, MorphFlags::MASCULINE | MorphFlags::DEFINITE | MorphFlags::GENITIVE);
        let b = tag(PosType::Noun, MorphFlags::MASCULINE | MorphFlags::INDEFINITE | MorphFlags::NOMINATIVE);
        let verdict = validate_logical_connection(&a, &b, ConnectionKind::Coordination);
        assert_eq!(verdict.message, "חוסר התאמה ביידוע, יחסה");

        let c = tag(PosType::Noun, MorphFlags::MASCULINE | MorphFlags::DEFINITE | MorphFlags::GENITIVE);
        assert!(validate_logical_connection(&a, &c, ConnectionKind::Coordination).valid);
    }
}
