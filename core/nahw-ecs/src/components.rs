use nahw_protocol::{ArchId, ConnectionId, SentenceModel, TagRef, WordId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Insertion order of an annotation entity; the world itself is unordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ordinal(pub u64);

/// Outcome class of a pairwise rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CombinationKind {
    Valid,
    Incomplete,
    Invalid,
    /// No rule covers this pair of tag types yet.
    Unknown,
}

/// A recorded link between two adjacent tags, `first` preceding `second`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Combination {
    pub first: TagRef,
    pub second: TagRef,
    pub complete: bool,
    pub kind: CombinationKind,
    pub is_demonstrative: bool,
}

impl Combination {
    pub fn involves(&self, tag: TagRef) -> bool {
        self.first == tag || self.second == tag
    }

    /// Order-independent identity of the tag pair.
    pub fn pair_key(&self) -> (TagRef, TagRef) {
        pair_key(self.first, self.second)
    }

    pub fn joins(&self, a: TagRef, b: TagRef) -> bool {
        self.pair_key() == pair_key(a, b)
    }

    pub fn is_settled(&self) -> bool {
        self.complete && self.kind == CombinationKind::Valid
    }
}

pub fn pair_key(a: TagRef, b: TagRef) -> (TagRef, TagRef) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VerdictColor {
    /// Not a model claim at all.
    Neutral,
    /// Something is still missing.
    Info,
    Error,
    Success,
}

impl VerdictColor {
    pub const fn hex(self) -> &'static str {
        match self {
            VerdictColor::Neutral => "#667eea",
            VerdictColor::Info => "#3b82f6",
            VerdictColor::Error => "#ef4444",
            VerdictColor::Success => "#10b981",
        }
    }
}

/// Result of checking a sentence model claim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModelVerdict {
    pub valid: bool,
    pub color: VerdictColor,
    pub message: String,
}

impl ModelVerdict {
    pub fn success(message: impl Into<String>) -> Self {
        Self { valid: true, color: VerdictColor::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { valid: false, color: VerdictColor::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { valid: false, color: VerdictColor::Info, message: message.into() }
    }

    pub fn neutral(message: impl Into<String>) -> Self {
        Self { valid: false, color: VerdictColor::Neutral, message: message.into() }
    }

    /// A model label outside A/B/C.
    pub fn unrecognized() -> Self {
        Self::neutral("מודל לא מוכר")
    }
}

/// The sentence model the learner attached to an arch. Labels outside A/B/C
/// are kept so the verdict can say the model is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ModelClaim {
    Known(SentenceModel),
    Unrecognized(String),
}

impl ModelClaim {
    /// `None` for a blank label.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        Some(match SentenceModel::from_label(label) {
            Some(model) => ModelClaim::Known(model),
            None => ModelClaim::Unrecognized(label.to_string()),
        })
    }

    pub fn known(&self) -> Option<SentenceModel> {
        match self {
            ModelClaim::Known(model) => Some(*model),
            ModelClaim::Unrecognized(_) => None,
        }
    }
}

impl From<SentenceModel> for ModelClaim {
    fn from(model: SentenceModel) -> Self {
        ModelClaim::Known(model)
    }
}

/// A bracket over a word span, either a syntactic role or a model claim.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Arch {
    pub id: ArchId,
    pub word1: WordId,
    pub word2: WordId,
    pub height: i32,
    pub syntactic_role: Option<String>,
    pub is_main_roof: bool,
    pub model: Option<ModelClaim>,
    pub is_clause: bool,
    pub external_role: Option<String>,
    pub validation: Option<ModelVerdict>,
    pub clause_validation: Option<ModelVerdict>,
}

impl Arch {
    pub fn is_single_word(&self) -> bool {
        self.word1 == self.word2
    }

    pub fn spans(&self, a: WordId, b: WordId) -> bool {
        (self.word1 == a && self.word2 == b) || (self.word1 == b && self.word2 == a)
    }

    /// Whether the sentence model validator applies to this arch.
    pub fn claims_model(&self) -> bool {
        self.is_main_roof || self.is_clause
    }
}

/// An arch that exists only until the learner confirms a role.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PendingArch {
    pub word1: WordId,
    pub word2: WordId,
    pub height: i32,
}

/// What the learner picked when confirming a pending arch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ArchRole {
    Syntactic(String),
    Clause {
        external_role: String,
        model: Option<ModelClaim>,
    },
}

/// Editable properties of a confirmed arch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArchProperties {
    pub is_main_roof: bool,
    pub is_clause: bool,
    pub model: Option<ModelClaim>,
    pub syntactic_role: Option<String>,
    pub external_role: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ConnectionKind {
    BetweenSentences,
    Coordination,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogicalConnection {
    pub id: ConnectionId,
    pub first: TagRef,
    pub second: TagRef,
    pub kind: ConnectionKind,
    pub split_point: f32,
}

impl LogicalConnection {
    pub fn involves(&self, tag: TagRef) -> bool {
        self.first == tag || self.second == tag
    }
}
