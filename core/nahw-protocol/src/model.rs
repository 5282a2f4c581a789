use core::fmt;

use rkyv::{Archive, Archived, Deserialize, Serialize};
use crate::ids::{TagId, WordId};
use crate::morphology::{Feature, MorphFlags, PosType, Tense, VerbForm, Voice};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Typed attribute record of a tag.
///
/// Agreement-relevant attributes live in `morph` as candidate sets; the
/// remaining verb attributes are plain collections because no rule compares
/// them across tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Details {
    pub morph: MorphFlags,
    pub roots: Vec<String>,
    pub forms: Vec<VerbForm>,
    pub tenses: Vec<Tense>,
    pub voice: Option<Voice>,
    pub suffix_pronoun: Option<String>,
}

impl Details {
    pub fn new(morph: MorphFlags) -> Self {
        Self { morph, ..Self::default() }
    }

    pub fn with_suffix_pronoun(mut self, suffix: impl Into<String>) -> Self {
        self.suffix_pronoun = Some(suffix.into());
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn with_form(mut self, form: VerbForm) -> Self {
        self.forms.push(form);
        self
    }

    pub fn with_tense(mut self, tense: Tense) -> Self {
        self.tenses.push(tense);
        self
    }

    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = Some(voice);
        self
    }

    pub fn has(&self, feature: Feature) -> bool {
        self.morph.has(feature)
    }

    /// Edit semantics of the settings panel: attributes present in `update`
    /// replace the current ones, everything else is kept.
    pub fn merge(&mut self, update: Details) {
        self.morph = self.morph.overlay(update.morph);
        if !update.roots.is_empty() {
            self.roots = update.roots;
        }
        if !update.forms.is_empty() {
            self.forms = update.forms;
        }
        if !update.tenses.is_empty() {
            self.tenses = update.tenses;
        }
        if update.voice.is_some() {
            self.voice = update.voice;
        }
        if update.suffix_pronoun.is_some() {
            self.suffix_pronoun = update.suffix_pronoun;
        }
    }
}

/// One grammatical reading attached to a word.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Tag {
    pub id: TagId,
    pub pos: PosType,
    pub details: Details,
}

impl Tag {
    pub fn is(&self, pos: PosType) -> bool {
        self.pos == pos
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Word {
    pub id: WordId,
    pub text: String,
    pub tags: Vec<Tag>,
}

impl Word {
    pub fn new(id: WordId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            tags: Vec::new(),
        }
    }

    pub fn add_tag(&mut self, id: TagId, pos: PosType, details: Details) -> &Tag {
        self.tags.push(Tag { id, pos, details });
        &self.tags[self.tags.len() - 1]
    }

    pub fn remove_tag(&mut self, id: TagId) -> Option<Tag> {
        let position = self.tags.iter().position(|tag| tag.id == id)?;
        Some(self.tags.remove(position))
    }

    /// Replaces a tag's details wholesale.
    pub fn set_tag_details(&mut self, id: TagId, details: Details) -> Option<&Tag> {
        let tag = self.tags.iter_mut().find(|tag| tag.id == id)?;
        tag.details = details;
        Some(tag)
    }

    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}

/// Sentence models a main roof or a clause can claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum SentenceModel {
    /// Verbal sentence: verb predicate before its subject.
    A,
    /// Nominal sentence: subject before a non-verbal predicate.
    B,
    /// Inverted nominal sentence: prepositional/adverbial predicate first.
    C,
}

impl SentenceModel {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "A" => Some(SentenceModel::A),
            "B" => Some(SentenceModel::B),
            "C" => Some(SentenceModel::C),
            _ => None,
        }
    }
}

impl fmt::Display for SentenceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentenceModel::A => "A",
            SentenceModel::B => "B",
            SentenceModel::C => "C",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum StageCategory {
    Workbook = 0,
    Midterm = 1,
}

/// A practice sentence from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Stage {
    pub id: String,
    pub number: String,
    pub sentence: String,
    pub category: StageCategory,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Catalogue {
    pub version: u32,
    pub stages: Vec<Stage>,
}

impl Catalogue {
    /// Validates and views a compiled catalogue without copying it.
    pub fn check_archived(bytes: &[u8]) -> Result<&Archived<Catalogue>, CatalogueError> {
        rkyv::check_archived_root::<Catalogue>(bytes).map_err(|_| CatalogueError::InvalidArchive)
    }
}

impl ArchivedCatalogue {
    /// Copies one stage out of the archive.
    pub fn stage(&self, id: &str) -> Option<Stage> {
        self.stages
            .iter()
            .find(|stage| stage.id.as_str() == id)
            .and_then(|stage| stage.deserialize(&mut rkyv::Infallible).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    InvalidArchive,
}

impl fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogueError::InvalidArchive => write!(f, "Stage catalogue archive failed validation"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CatalogueError {}
