use nahw_ecs::{Arch, ModelVerdict};
use std::collections::BTreeMap;

use nahw_protocol::{Details, Feature, Tag, TagRef, Word};
use nahw_solver::{Chain, ChainStyle};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagView {
    pub id: u32,
    #[serde(rename = "type")]
    pub pos: &'static str,
    pub name: &'static str,
    pub labels: Vec<&'static str>,
    pub suffix_pronoun: Option<String>,
}

impl From<&Tag> for TagView {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id.0,
            pos: tag.pos.key(),
            name: tag.pos.hebrew_name(),
            labels: tag.details.morph.labels().collect(),
            suffix_pronoun: tag.details.suffix_pronoun.clone(),
        }
    }
}

/// Settings-panel values keyed by field name, the shape the UI sends back.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsView {
    #[serde(flatten)]
    pub fields: BTreeMap<&'static str, Vec<&'static str>>,
    pub suffix_pronoun: Option<String>,
}

impl From<&Details> for DetailsView {
    fn from(details: &Details) -> Self {
        let fields = Feature::ALL
            .into_iter()
            .filter(|feature| details.morph.has(*feature))
            .map(|feature| (feature.key(), details.morph.of(feature).labels().collect()))
            .collect();
        Self { fields, suffix_pronoun: details.suffix_pronoun.clone() }
    }
}

#[derive(Serialize)]
pub struct WordView {
    pub id: u32,
    pub text: String,
    pub tags: Vec<TagView>,
}

impl From<&Word> for WordView {
    fn from(word: &Word) -> Self {
        Self {
            id: word.id.0,
            text: word.text.clone(),
            tags: word.tags.iter().map(TagView::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictView {
    pub valid: bool,
    pub color: &'static str,
    pub message: String,
}

impl From<ModelVerdict> for VerdictView {
    fn from(verdict: ModelVerdict) -> Self {
        Self {
            valid: verdict.valid,
            color: verdict.color.hex(),
            message: verdict.message,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchView {
    #[serde(flatten)]
    pub arch: Arch,
    pub consistent: bool,
    pub verdict: Option<VerdictView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainView {
    pub tags: Vec<TagRef>,
    pub stroke: &'static str,
    pub width: u8,
    pub style: ChainStyle,
}

impl ChainView {
    pub fn new(chain: &Chain, style: ChainStyle) -> Self {
        Self {
            tags: chain.tags(),
            stroke: style.stroke(),
            width: style.width(),
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nahw_protocol::{MorphFlags, PosType};

    #[test]
    fn test_default_details_by_field() {
        let view = DetailsView::from(&nahw_morph::default_details(PosType::Noun));
        assert_eq!(view.fields["gender"], vec!["זכר"]);
        assert_eq!(view.fields["cases"].len(), 3);
        assert!(!view.fields.contains_key("personGender"));

        let view = DetailsView::from(&nahw_morph::default_details(PosType::Preposition));
        assert!(view.fields.is_empty());

        let view = DetailsView::from(&Details::new(MorphFlags::MASCULINE | MorphFlags::FEMININE));
        assert_eq!(view.fields["gender"], vec!["זכר", "נקבה"]);
    }
}
