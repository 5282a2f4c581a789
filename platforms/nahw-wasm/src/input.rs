use nahw_ecs::{ArchProperties, ArchRole, ConnectionKind, ModelClaim};
use nahw_protocol::{Details, MorphFlags, PosType, Tense, VerbForm, Voice};
use serde::Deserialize;

/// A settings-panel field that holds one value or a homonymic set.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn values(&self) -> Vec<&str> {
        match self {
            OneOrMany::One(value) => vec![value.as_str()],
            OneOrMany::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Attribute map as the UI sends it, keyed by field name with Hebrew labels.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailsInput {
    pub gender: Option<OneOrMany>,
    pub number: Option<OneOrMany>,
    pub definiteness: Option<OneOrMany>,
    pub cases: Option<OneOrMany>,
    pub person: Option<OneOrMany>,
    pub person_gender: Option<OneOrMany>,
    pub roots: Vec<String>,
    pub forms: Vec<u8>,
    pub tenses: Vec<String>,
    pub voice: Option<String>,
    pub suffix_pronoun: Option<String>,
}

impl DetailsInput {
    pub fn into_details(self) -> Result<Details, String> {
        let mut morph = MorphFlags::empty();
        let fields = [
            &self.gender,
            &self.number,
            &self.definiteness,
            &self.cases,
            &self.person,
            &self.person_gender,
        ];
        for field in fields.into_iter().flatten() {
            for label in field.values() {
                morph |= MorphFlags::from_label(label).ok_or_else(|| format!("unknown label {:?}", label))?;
            }
        }

        let mut details = Details::new(morph);
        details.roots = self.roots;
        details.forms = self
            .forms
            .into_iter()
            .map(|n| VerbForm::new(n).ok_or_else(|| format!("no verb form {}", n)))
            .collect::<Result<_, _>>()?;
        details.tenses = self
            .tenses
            .iter()
            .map(|label| Tense::from_label(label).ok_or_else(|| format!("unknown tense {:?}", label)))
            .collect::<Result<_, _>>()?;
        details.voice = match self.voice.as_deref() {
            Some(label) => Some(Voice::from_label(label).ok_or_else(|| format!("unknown voice {:?}", label))?),
            None => None,
        };
        details.suffix_pronoun = self.suffix_pronoun.filter(|s| !s.is_empty());
        Ok(details)
    }
}

pub fn parse_pos(key: &str) -> Result<PosType, String> {
    PosType::from_key(key).ok_or_else(|| format!("unknown part of speech {:?}", key))
}

pub fn parse_connection_kind(key: &str) -> Result<ConnectionKind, String> {
    match key {
        "between-sentences" => Ok(ConnectionKind::BetweenSentences),
        "coordination" => Ok(ConnectionKind::Coordination),
        other => Err(format!("unknown connection type {:?}", other)),
    }
}

fn parse_model(label: Option<&str>) -> Option<ModelClaim> {
    label.and_then(ModelClaim::parse)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RoleInput {
    Syntactic { role: String },
    #[serde(rename_all = "camelCase")]
    Clause { external_role: String, model: Option<String> },
}

impl RoleInput {
    pub fn into_role(self) -> ArchRole {
        match self {
            RoleInput::Syntactic { role } => ArchRole::Syntactic(role),
            RoleInput::Clause { external_role, model } => {
                ArchRole::Clause { external_role, model: parse_model(model.as_deref()) }
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArchPropertiesInput {
    pub is_main_roof: bool,
    pub is_clause: bool,
    pub model: Option<String>,
    pub syntactic_role: Option<String>,
    pub external_role: Option<String>,
}

impl ArchPropertiesInput {
    pub fn into_properties(self) -> ArchProperties {
        ArchProperties {
            is_main_roof: self.is_main_roof,
            is_clause: self.is_clause,
            model: parse_model(self.model.as_deref()),
            syntactic_role: self.syntactic_role,
            external_role: self.external_role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nahw_protocol::{Feature, SentenceModel};

    #[test]
    fn test_homonymic_fields_become_candidate_sets() {
        let input: DetailsInput = serde_json::from_str(
            r#"{"gender": ["זכר", "נקבה"], "number": "יחיד", "definiteness": "לא מיודע", "suffixPronoun": ""}"#,
        )
        .unwrap();
        let details = input.into_details().unwrap();
        assert_eq!(details.morph.of(Feature::Gender), MorphFlags::MASCULINE | MorphFlags::FEMININE);
        assert!(details.morph.contains(MorphFlags::SINGULAR | MorphFlags::INDEFINITE));
        assert_eq!(details.suffix_pronoun, None);
    }

    #[test]
    fn test_verb_fields() {
        let input: DetailsInput = serde_json::from_str(
            r#"{"personGender": "נסתר", "roots": ["كتب"], "forms": [1, 10], "tenses": ["עבר"], "voice": "פעיל"}"#,
        )
        .unwrap();
        let details = input.into_details().unwrap();
        assert!(details.morph.contains(MorphFlags::THIRD_MASC_SG));
        assert_eq!(details.forms.len(), 2);
        assert_eq!(details.tenses, vec![Tense::Past]);
        assert_eq!(details.voice, Some(Voice::Active));
    }

    #[test]
    fn test_unknown_labels_are_rejected() {
        let input: DetailsInput = serde_json::from_str(r#"{"gender": "רבעי"}"#).unwrap();
        assert!(input.into_details().is_err());

        let input: DetailsInput = serde_json::from_str(r#"{"forms": [11]}"#).unwrap();
        assert!(input.into_details().is_err());
    }

    #[test]
    fn test_model_labels() {
        assert_eq!(parse_model(Some("B")), Some(ModelClaim::Known(SentenceModel::B)));
        assert_eq!(parse_model(Some("D")), Some(ModelClaim::Unrecognized("D".to_string())));
        assert_eq!(parse_model(Some("")), None);
        assert_eq!(parse_model(None), None);
    }

    #[test]
    fn test_role_input() {
        let role: RoleInput =
            serde_json::from_str(r#"{"kind": "clause", "externalRole": "חבר", "model": "A"}"#).unwrap();
        assert_eq!(
            role.into_role(),
            ArchRole::Clause { external_role: "חבר".to_string(), model: Some(SentenceModel::A.into()) }
        );
    }

    #[test]
    fn test_unrecognized_model_is_kept() {
        let props: ArchPropertiesInput = serde_json::from_str(r#"{"isMainRoof": true, "model": "D"}"#).unwrap();
        let props = props.into_properties();
        assert!(props.is_main_roof);
        assert_eq!(props.model, Some(ModelClaim::Unrecognized("D".to_string())));
    }
}
