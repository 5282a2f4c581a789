use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// Part-of-speech types a learner can attach to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PosType {
    Noun = 0,
    Adjective = 1,
    Verb = 2,
    Demonstrative = 3,
    PersonalPronoun = 4,
    RelativePronoun = 5,
    Preposition = 6,
    Conjunction = 7,
    Subordinating = 8,
    Negation = 9,
    QuestionWord = 10,
    Adverb = 11,
}

/// Top-level grouping used by the tagging menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosCategory {
    Noun,
    Verb,
    Particle,
    Other,
}

impl PosType {
    pub const ALL: [PosType; 12] = [
        PosType::Noun,
        PosType::Adjective,
        PosType::Verb,
        PosType::Demonstrative,
        PosType::PersonalPronoun,
        PosType::RelativePronoun,
        PosType::Preposition,
        PosType::Conjunction,
        PosType::Subordinating,
        PosType::Negation,
        PosType::QuestionWord,
        PosType::Adverb,
    ];

    /// Key used by the UI layer (`"personalPronoun"`, `"questionWord"`, ...).
    pub const fn key(self) -> &'static str {
        match self {
            PosType::Noun => "noun",
            PosType::Adjective => "adjective",
            PosType::Verb => "verb",
            PosType::Demonstrative => "demonstrative",
            PosType::PersonalPronoun => "personalPronoun",
            PosType::RelativePronoun => "relativePronoun",
            PosType::Preposition => "preposition",
            PosType::Conjunction => "conjunction",
            PosType::Subordinating => "subordinating",
            PosType::Negation => "negation",
            PosType::QuestionWord => "questionWord",
            PosType::Adverb => "adverb",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pos| pos.key() == key)
    }

    /// Display name shown to learners.
    pub const fn hebrew_name(self) -> &'static str {
        match self {
            PosType::Noun => "שם עצם",
            PosType::Adjective => "שם תואר",
            PosType::Verb => "פועל",
            PosType::Demonstrative => "כינוי רמז",
            PosType::PersonalPronoun => "כינוי גוף",
            PosType::RelativePronoun => "שם זיקה",
            PosType::Preposition => "מילית יחס",
            PosType::Conjunction => "מילית חיבור",
            PosType::Subordinating => "מילית שיעבוד",
            PosType::Negation => "מילית שלילה",
            PosType::QuestionWord => "מילת שאלה",
            PosType::Adverb => "תואר הפועל",
        }
    }

    pub const fn category(self) -> PosCategory {
        match self {
            PosType::Noun
            | PosType::Adjective
            | PosType::Demonstrative
            | PosType::PersonalPronoun
            | PosType::RelativePronoun
            | PosType::QuestionWord => PosCategory::Noun,
            PosType::Verb => PosCategory::Verb,
            PosType::Preposition
            | PosType::Conjunction
            | PosType::Subordinating
            | PosType::Negation => PosCategory::Particle,
            PosType::Adverb => PosCategory::Other,
        }
    }

    /// Particles carry no details and skip the settings panel.
    pub const fn is_particle(self) -> bool {
        matches!(self.category(), PosCategory::Particle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Voice {
    Active = 0,
    Passive = 1,
}

impl Voice {
    pub const fn label(self) -> &'static str {
        match self {
            Voice::Active => "פעיל",
            Voice::Passive => "סביל",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        [Voice::Active, Voice::Passive].into_iter().find(|v| v.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Tense {
    Past = 0,
    Imperfect = 1,
    Subjunctive = 2,
    Jussive = 3,
    Imperative = 4,
}

impl Tense {
    pub const ALL: [Tense; 5] = [
        Tense::Past,
        Tense::Imperfect,
        Tense::Subjunctive,
        Tense::Jussive,
        Tense::Imperative,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Tense::Past => "עבר",
            Tense::Imperfect => "עתיד",
            Tense::Subjunctive => "עתיד מנצוב",
            Tense::Jussive => "עתיד מג'זום",
            Tense::Imperative => "ציווי",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    /// Passive verbs have no imperative.
    pub const fn allowed_in(self, voice: Voice) -> bool {
        !matches!((self, voice), (Tense::Imperative, Voice::Passive))
    }
}

/// The ten derived verb forms (أوزان).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(transparent)]
pub struct VerbForm(u8);

impl VerbForm {
    const PATTERNS: [&'static str; 10] = [
        "فَعَلَ",
        "فَعَّلَ",
        "فَاعَلَ",
        "أَفْعَلَ",
        "تَفَعَّلَ",
        "تَفَاعَلَ",
        "إِنْفَعَلَ",
        "إِفْتَعَلَ",
        "إِفْعَلَّ",
        "إِسْتَفْعَلَ",
    ];

    /// Forms are numbered 1 through 10.
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number <= 10 {
            Some(Self(number))
        } else {
            None
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    pub const fn pattern(self) -> &'static str {
        Self::PATTERNS[(self.0 - 1) as usize]
    }
}

bitflags! {
    /// Candidate values of every agreement-relevant attribute.
    ///
    /// Each category occupies its own bit range. An empty category means the
    /// attribute was not supplied; more than one bit inside a category is a
    /// homonymic reading (the tag is valid if any candidate agrees).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct MorphFlags: u32 {
        // Gender (Bits 0-1)
        const MASCULINE = 1;
        const FEMININE = 1 << 1;

        // Number (Bits 2-4)
        const SINGULAR = 1 << 2;
        const DUAL = 1 << 3;
        const PLURAL = 1 << 4;

        // Definiteness (Bits 5-6)
        const DEFINITE = 1 << 5;
        const INDEFINITE = 1 << 6;

        // Case (Bits 7-9)
        const NOMINATIVE = 1 << 7;
        const ACCUSATIVE = 1 << 8;
        const GENITIVE = 1 << 9;

        // Person of pronouns (Bits 10-12)
        const FIRST_PERSON = 1 << 10;
        const SECOND_PERSON = 1 << 11;
        const THIRD_PERSON = 1 << 12;

        // Person/gender of verbs (Bits 13-22)
        const THIRD_MASC_SG = 1 << 13;
        const THIRD_FEM_SG = 1 << 14;
        const FIRST_SG = 1 << 15;
        const SECOND_MASC_SG = 1 << 16;
        const SECOND_FEM_SG = 1 << 17;
        const FIRST_PL = 1 << 18;
        const SECOND_MASC_PL = 1 << 19;
        const SECOND_FEM_PL = 1 << 20;
        const THIRD_MASC_PL = 1 << 21;
        const THIRD_FEM_PL = 1 << 22;
    }
}

/// An attribute category, i.e. one bit range of [`MorphFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Feature {
    Gender,
    Number,
    Definiteness,
    Case,
    Person,
    PersonGender,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Gender,
        Feature::Number,
        Feature::Definiteness,
        Feature::Case,
        Feature::Person,
        Feature::PersonGender,
    ];

    pub const fn mask(self) -> MorphFlags {
        match self {
            Feature::Gender => MorphFlags::MASCULINE.union(MorphFlags::FEMININE),
            Feature::Number => MorphFlags::SINGULAR
                .union(MorphFlags::DUAL)
                .union(MorphFlags::PLURAL),
            Feature::Definiteness => MorphFlags::DEFINITE.union(MorphFlags::INDEFINITE),
            Feature::Case => MorphFlags::NOMINATIVE
                .union(MorphFlags::ACCUSATIVE)
                .union(MorphFlags::GENITIVE),
            Feature::Person => MorphFlags::FIRST_PERSON
                .union(MorphFlags::SECOND_PERSON)
                .union(MorphFlags::THIRD_PERSON),
            Feature::PersonGender => MorphFlags::from_bits_truncate(0x3FF << 13),
        }
    }

    /// Field name in the UI's attribute map.
    pub const fn key(self) -> &'static str {
        match self {
            Feature::Gender => "gender",
            Feature::Number => "number",
            Feature::Definiteness => "definiteness",
            Feature::Case => "cases",
            Feature::Person => "person",
            Feature::PersonGender => "personGender",
        }
    }

    /// Localized field name used in learner-facing messages.
    pub const fn hebrew_name(self) -> &'static str {
        match self {
            Feature::Gender => "מין",
            Feature::Number => "מספר",
            Feature::Definiteness => "יידוע",
            Feature::Case => "יחסה",
            Feature::Person => "גוף",
            Feature::PersonGender => "גוף/מין",
        }
    }
}

const LABELS: [(MorphFlags, &str); 23] = [
    (MorphFlags::MASCULINE, "זכר"),
    (MorphFlags::FEMININE, "נקבה"),
    (MorphFlags::SINGULAR, "יחיד"),
    (MorphFlags::DUAL, "זוגי"),
    (MorphFlags::PLURAL, "רבים"),
    (MorphFlags::DEFINITE, "מיודע"),
    (MorphFlags::INDEFINITE, "לא מיודע"),
    (MorphFlags::NOMINATIVE, "יחסה ראשונה"),
    (MorphFlags::ACCUSATIVE, "יחסה שנייה"),
    (MorphFlags::GENITIVE, "יחסה שלישית"),
    (MorphFlags::FIRST_PERSON, "גוף ראשון"),
    (MorphFlags::SECOND_PERSON, "גוף שני"),
    (MorphFlags::THIRD_PERSON, "גוף שלישי"),
    (MorphFlags::THIRD_MASC_SG, "נסתר"),
    (MorphFlags::THIRD_FEM_SG, "נסתרת"),
    (MorphFlags::FIRST_SG, "מדבר"),
    (MorphFlags::SECOND_MASC_SG, "נוכח"),
    (MorphFlags::SECOND_FEM_SG, "נוכחת"),
    (MorphFlags::FIRST_PL, "מדברים"),
    (MorphFlags::SECOND_MASC_PL, "נוכחים"),
    (MorphFlags::SECOND_FEM_PL, "נוכחות"),
    (MorphFlags::THIRD_MASC_PL, "נסתרים"),
    (MorphFlags::THIRD_FEM_PL, "נסתרות"),
];

impl MorphFlags {
    /// Parses a single attribute value as written in the tagging panel.
    /// "רבות" is accepted as a spelling of the plural.
    pub fn from_label(label: &str) -> Option<Self> {
        if label == "רבות" {
            return Some(MorphFlags::PLURAL);
        }
        LABELS
            .iter()
            .find(|(_, text)| *text == label)
            .map(|(flag, _)| *flag)
    }

    /// The flag's display label, if it is a single value.
    pub fn label(self) -> Option<&'static str> {
        LABELS
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, text)| *text)
    }

    /// Candidates of one category.
    pub const fn of(self, feature: Feature) -> MorphFlags {
        self.intersection(feature.mask())
    }

    pub const fn has(self, feature: Feature) -> bool {
        !self.of(feature).is_empty()
    }

    /// Replaces the candidates of every category present in `other`.
    pub fn overlay(self, other: MorphFlags) -> MorphFlags {
        let mut merged = self;
        for feature in [
            Feature::Gender,
            Feature::Number,
            Feature::Definiteness,
            Feature::Case,
            Feature::Person,
            Feature::PersonGender,
        ] {
            if other.has(feature) {
                merged.remove(feature.mask());
                merged.insert(other.of(feature));
            }
        }
        merged
    }

    /// Labels of every single value set in `self`, in declaration order.
    pub fn labels(self) -> impl Iterator<Item = &'static str> {
        LABELS
            .iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, text)| *text)
    }
}
