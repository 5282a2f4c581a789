use nahw_morph::{mismatches, verb_subject_mismatches, word_index};
use nahw_protocol::{Feature, PosType, SentenceModel, Tag, Word};

use crate::components::{Arch, ModelClaim, ModelVerdict};

/// A tag found on one of the arch's boundary words, with that word's index.
struct Role<'a> {
    tag: &'a Tag,
    index: usize,
}

/// The two boundary words of an arch, searched first-match from `word1`.
struct Span<'a> {
    first: (&'a Word, usize),
    second: (&'a Word, usize),
}

impl<'a> Span<'a> {
    fn resolve(arch: &Arch, words: &'a [Word]) -> Option<Self> {
        let i = word_index(words, arch.word1)?;
        let j = word_index(words, arch.word2)?;
        Some(Self { first: (&words[i], i), second: (&words[j], j) })
    }

    fn find(&self, pred: impl Fn(&Tag) -> bool) -> Option<Role<'a>> {
        self.search(|_| true, &pred)
    }

    /// Like `find`, but a tag on a word other than `index` wins.
    fn find_apart(&self, index: usize, pred: impl Fn(&Tag) -> bool) -> Option<Role<'a>> {
        self.search(|i| i != index, &pred).or_else(|| self.search(|_| true, &pred))
    }

    fn search(&self, keep: impl Fn(usize) -> bool, pred: &impl Fn(&Tag) -> bool) -> Option<Role<'a>> {
        [self.first, self.second]
            .into_iter()
            .filter(|&(_, index)| keep(index))
            .find_map(|(word, index)| word.tags.iter().find(|tag| pred(tag)).map(|tag| Role { tag, index }))
    }
}

/// Checks the sentence model an arch claims.
pub fn validate_sentence_model(arch: &Arch, words: &[Word]) -> ModelVerdict {
    if !arch.claims_model() {
        return ModelVerdict::neutral("לא הוגדר גג ראשי או פסוקית");
    }
    let model = match &arch.model {
        None => return ModelVerdict::info("חסר מודל משפט - יש לבחור דגם A, B או C"),
        Some(ModelClaim::Unrecognized(label)) => {
            tracing::debug!(arch = %arch.id, %label, "unrecognized sentence model");
            return ModelVerdict::unrecognized();
        }
        Some(ModelClaim::Known(model)) => *model,
    };
    let Some(span) = Span::resolve(arch, words) else {
        return ModelVerdict::neutral("חסרות מילים");
    };
    if !span.first.0.has_tags() || !span.second.0.has_tags() {
        return ModelVerdict::info("חסרים חלקי דיבר - יש להוסיף תגי PoS למילים");
    }

    let verdict = match model {
        SentenceModel::A => verbal(&span),
        SentenceModel::B => nominal(&span),
        SentenceModel::C => inverted_nominal(&span),
    };
    tracing::debug!(arch = %arch.id, %model, valid = verdict.valid, "sentence model validated");
    verdict
}

fn agreement_failure(issues: &[Feature]) -> ModelVerdict {
    let names: Vec<&str> = issues.iter().map(|f| f.hebrew_name()).collect();
    ModelVerdict::error(format!("חוסר התאמה: {}", names.join(", ")))
}

// جملة فعلية: verb predicate, then subject
fn verbal(span: &Span<'_>) -> ModelVerdict {
    let Some(predicate) = span.find(|tag| tag.is(PosType::Verb)) else {
        return ModelVerdict::info("מודל A דורש פועל (נשוא) - חסר תג פועל");
    };
    let Some(subject) = span.find(|tag| matches!(tag.pos, PosType::Noun | PosType::PersonalPronoun)) else {
        return ModelVerdict::info("מודל A דורש נושא (שם עצם או כינוי גוף) - חסר תג נושא");
    };

    if predicate.index >= subject.index {
        return ModelVerdict::error(format!(
            "במודל A, הפועל (נשוא) חייב לבוא לפני הנושא. מיקום הפועל: {}, מיקום הנושא: {}",
            predicate.index, subject.index
        ));
    }

    let issues = verb_subject_mismatches(predicate.tag.details.morph, subject.tag.details.morph);
    if !issues.is_empty() {
        return agreement_failure(&issues);
    }

    ModelVerdict::success("מודל A תקין - נשוא פועלי לפני נושא")
}

// جملة اسمية: subject, then any non-verbal predicate
fn nominal(span: &Span<'_>) -> ModelVerdict {
    let Some(subject) = span.find(|tag| tag.is(PosType::Noun)) else {
        return ModelVerdict::info("מודל B דורש נושא (מתחיל) - חסר תג שם עצם");
    };
    let Some(predicate) =
        span.find_apart(subject.index, |tag| !tag.is(PosType::Verb) && !core::ptr::eq(tag, subject.tag))
    else {
        return ModelVerdict::info("מודל B דורש נשוא (חבר) - חסר נשוא");
    };

    if subject.index >= predicate.index {
        return ModelVerdict::error(format!(
            "במודל B, הנושא (מתחיל) חייב לבוא לפני הנשוא (חבר). מיקום הנושא: {}, מיקום הנשוא: {}",
            subject.index, predicate.index
        ));
    }

    if predicate.tag.is(PosType::Adjective) {
        let issues = mismatches(
            subject.tag.details.morph,
            predicate.tag.details.morph,
            &[Feature::Gender, Feature::Number, Feature::Definiteness],
        );
        if !issues.is_empty() {
            return agreement_failure(&issues);
        }
    }

    ModelVerdict::success("מודל B תקין - נושא לפני נשוא שמני")
}

// شبه جملة: prepositional or adverbial predicate, then subject
fn inverted_nominal(span: &Span<'_>) -> ModelVerdict {
    let Some(predicate) = span.find(|tag| matches!(tag.pos, PosType::Preposition | PosType::Adverb)) else {
        return ModelVerdict::info("מודל C דורש נשוא (מילית יחס או תואר פועל) - חסר תג נשוא");
    };
    let Some(subject) = span.find(|tag| tag.is(PosType::Noun)) else {
        return ModelVerdict::info("מודל C דורש נושא (שם עצם) - חסר תג שם עצם");
    };

    if predicate.index >= subject.index {
        return ModelVerdict::error(format!(
            "במודל C, הנשוא חייב לבוא לפני הנושא. מיקום הנשוא: {}, מיקום הנושא: {}",
            predicate.index, subject.index
        ));
    }

    ModelVerdict::success("מודל C תקין - נשוא מילית יחס/תואר פועל לפני נושא")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::VerdictColor;
    use nahw_protocol::{ArchId, Details, MorphFlags, TagId, WordId};

    fn sentence(tags: &[&[(PosType, MorphFlags)]]) -> Vec<Word> {
        let mut next = 0;
        tags.iter()
            .enumerate()
            .map(|(i, word_tags)| {
                let mut word = Word::new(WordId(i as u32), format!("w{}", i));
                for (pos, morph) in word_tags.iter() {
                    next += 1;
                    word.add_tag(TagId(next), *pos, Details::new(*morph));
                }
                word
            })
            .collect()
    }

    fn main_roof(word1: u32, word2: u32, model: Option<SentenceModel>) -> Arch {
        let model = model.map(ModelClaim::from);
        Arch {
            id: ArchId(1),
            word1: WordId(word1),
            word2: WordId(word2),
            height: 120,
            syntactic_role: None,
            is_main_roof: true,
            model,
            is_clause: false,
            external_role: None,
            validation: None,
            clause_validation: None,
        }
    }

    const VERB: (PosType, MorphFlags) = (PosType::Verb, MorphFlags::THIRD_MASC_SG);
    const NOUN: (PosType, MorphFlags) = (
        PosType::Noun,
        MorphFlags::MASCULINE.union(MorphFlags::SINGULAR).union(MorphFlags::DEFINITE),
    );

    #[test]
    fn test_verbal_sentence_in_order_is_valid() {
        let words = sentence(&[&[VERB], &[NOUN]]);
        let verdict = validate_sentence_model(&main_roof(0, 1, Some(SentenceModel::A)), &words);
        assert!(verdict.valid);
        assert_eq!(verdict.color, VerdictColor::Success);
        assert_eq!(verdict.color.hex(), "#10b981");
    }

    #[test]
    fn test_verbal_sentence_reversed_is_order_violation() {
        let words = sentence(&[&[NOUN], &[VERB]]);
        let verdict = validate_sentence_model(&main_roof(0, 1, Some(SentenceModel::A)), &words);
        assert!(!verdict.valid);
        assert_eq!(verdict.color, VerdictColor::Error);
        assert!(verdict.message.contains("מיקום הפועל: 1, מיקום הנושא: 0"));
    }

    #[test]
    fn test_verbal_sentence_gender_mismatch() {
        let feminine_verb = (PosType::Verb, MorphFlags::THIRD_FEM_SG);
        let words = sentence(&[&[feminine_verb], &[NOUN]]);
        let verdict = validate_sentence_model(&main_roof(0, 1, Some(SentenceModel::A)), &words);
        assert_eq!(verdict.color, VerdictColor::Error);
        assert_eq!(verdict.message, "חוסר התאמה: מין");
    }

    #[test]
    fn test_plural_verb_before_singular_subject_fails_number() {
        let plural_verb = (PosType::Verb, MorphFlags::THIRD_MASC_PL);
        let words = sentence(&[&[plural_verb], &[NOUN]]);
        let verdict = validate_sentence_model(&main_roof(0, 1, Some(SentenceModel::A)), &words);
        assert!(verdict.message.contains("מספר"));
    }

    #[test]
    fn test_verbal_sentence_missing_roles_are_informational() {
        let words = sentence(&[&[NOUN], &[NOUN]]);
        let verdict = validate_sentence_model(&main_roof(0, 1, Some(SentenceModel::A)), &words);
        assert_eq!(verdict.color, VerdictColor::Info);

        let words = sentence(&[&[VERB], &[(PosType::Adverb, MorphFlags::empty())]]);
        let verdict = validate_sentence_model(&main_roof(0, 1, Some(SentenceModel::A)), &words);
        assert_eq!(verdict.color, VerdictColor::Info);
        assert!(verdict.message.contains("חסר תג נושא"));
    }

    #[test]
    fn test_nominal_sentence_order_rule() {
        let adjective = (
            PosType::Adjective,
            MorphFlags::MASCULINE | MorphFlags::SINGULAR | MorphFlags::DEFINITE,
        );
        let words = sentence(&[&[NOUN], &[adjective]]);
        let roof = main_roof(0, 1, Some(SentenceModel::B));
        let verdict = validate_sentence_model(&roof, &words);
        assert!(verdict.valid, "{}", verdict.message);

        let words = sentence(&[&[adjective], &[NOUN]]);
        let verdict = validate_sentence_model(&roof, &words);
        assert!(!verdict.valid);
        assert_eq!(verdict.color, VerdictColor::Error);
    }

    #[test]
    fn test_nominal_sentence_adjective_agreement() {
        let adjective = (PosType::Adjective, MorphFlags::FEMININE | MorphFlags::SINGULAR);
        let words = sentence(&[&[NOUN], &[adjective]]);
        let verdict = validate_sentence_model(&main_roof(0, 1, Some(SentenceModel::B)), &words);
        assert_eq!(verdict.message, "חוסר התאמה: מין");
    }

    #[test]
    fn test_nominal_subject_word_with_second_tag() {
        let adjective = (
            PosType::Adjective,
            MorphFlags::MASCULINE | MorphFlags::SINGULAR | MorphFlags::DEFINITE,
        );
        let words = sentence(&[&[NOUN, adjective], &[adjective]]);
        let verdict = validate_sentence_model(&main_roof(0, 1, Some(SentenceModel::B)), &words);
        assert!(verdict.valid, "{}", verdict.message);
        assert_eq!(verdict.color, VerdictColor::Success);
    }

    #[test]
    fn test_unrecognized_model_label() {
        let words = sentence(&[&[VERB], &[NOUN]]);
        let mut roof = main_roof(0, 1, None);
        roof.model = ModelClaim::parse("D");
        assert_eq!(roof.model, Some(ModelClaim::Unrecognized("D".to_string())));

        let verdict = validate_sentence_model(&roof, &words);
        assert_eq!(verdict, ModelVerdict::unrecognized());
        assert_eq!(verdict.message, "מודל לא מוכר");

        roof.is_main_roof = false;
        assert_eq!(validate_sentence_model(&roof, &words).color, VerdictColor::Neutral);
        assert!(validate_sentence_model(&roof, &words).message.starts_with("לא הוגדר"));
    }

    #[test]
    fn test_inverted_nominal_sentence() {
        let prep = (PosType::Preposition, MorphFlags::empty());
        let words = sentence(&[&[prep], &[NOUN]]);
        let roof = main_roof(0, 1, Some(SentenceModel::C));
        assert!(validate_sentence_model(&roof, &words).valid);

        let words = sentence(&[&[NOUN], &[prep]]);
        let verdict = validate_sentence_model(&roof, &words);
        assert!(verdict.message.contains("מיקום הנשוא: 1, מיקום הנושא: 0"));
    }

    #[test]
    fn test_preconditions() {
        let words = sentence(&[&[VERB], &[]]);
        let mut roof = main_roof(0, 1, None);
        assert_eq!(validate_sentence_model(&roof, &words).color, VerdictColor::Info);

        roof.model = Some(SentenceModel::A.into());
        let verdict = validate_sentence_model(&roof, &words);
        assert!(verdict.message.starts_with("חסרים חלקי דיבר"));

        roof.is_main_roof = false;
        assert_eq!(validate_sentence_model(&roof, &words).color, VerdictColor::Neutral);

        let missing = main_roof(0, 7, Some(SentenceModel::A));
        assert_eq!(validate_sentence_model(&missing, &words).message, "חסרות מילים");
    }
}
