pub mod components;
pub mod config;
pub mod error;
pub mod selection;
pub mod systems;

use hecs::{Entity, World};
use nahw_morph::word_index;
use nahw_protocol::{ArchId, ConnectionId, Details, PosType, Stage, Tag, TagId, TagRef, Word, WordId};

pub use components::{
    Arch, ArchProperties, ArchRole, Combination, CombinationKind, ConnectionKind, LogicalConnection,
    ModelClaim, ModelVerdict, Ordinal, PendingArch, VerdictColor,
};
pub use config::EngineConfig;
pub use error::{Result, SessionError};
pub use selection::{RepeatPolicy, Selection, SelectionEvent};
pub use systems::combination::{validate_combination, Validation};
pub use systems::logical::{validate_logical_connection, ConnectionVerdict};
pub use systems::sentence_model::validate_sentence_model;

/// One learner's work on one sentence.
///
/// Words and their tags live in a plain vector in reading order. Combinations,
/// arches and logical connections are entities in the inner world, each with an
/// [`Ordinal`] recording when it was created.
pub struct Session {
    words: Vec<Word>,
    world: World,
    config: EngineConfig,
    next_tag: u32,
    next_arch: u32,
    next_connection: u32,
    next_ordinal: u64,
}

fn find_tag(words: &[Word], tag: TagRef) -> Option<&Tag> {
    words.iter().find(|w| w.id == tag.word)?.tag(tag.tag)
}

impl Session {
    pub fn from_sentence(sentence: &str) -> Self {
        Self::with_config(sentence, EngineConfig::default())
    }

    pub fn with_config(sentence: &str, config: EngineConfig) -> Self {
        let mut session = Self {
            words: Vec::new(),
            world: World::new(),
            config,
            next_tag: 1,
            next_arch: 1,
            next_connection: 1,
            next_ordinal: 0,
        };
        session.load_sentence(sentence);
        session
    }

    /// Replaces the sentence and drops every annotation.
    pub fn load_sentence(&mut self, sentence: &str) {
        self.words = nahw_parser::words(sentence);
        self.world.clear();
        self.next_tag = 1;
        self.next_arch = 1;
        self.next_connection = 1;
        self.next_ordinal = 0;
        tracing::debug!(words = self.words.len(), "sentence loaded");
    }

    pub fn load_stage(&mut self, stage: &Stage) {
        tracing::debug!(stage = %stage.id, "loading stage");
        self.load_sentence(&stage.sentence);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, id: WordId) -> Result<&Word> {
        self.words.iter().find(|w| w.id == id).ok_or(SessionError::WordNotFound(id))
    }

    pub fn tag(&self, tag: TagRef) -> Result<&Tag> {
        find_tag(&self.words, tag).ok_or(SessionError::TagNotFound(tag))
    }

    fn word_mut(&mut self, id: WordId) -> Result<&mut Word> {
        self.words.iter_mut().find(|w| w.id == id).ok_or(SessionError::WordNotFound(id))
    }

    fn despawn(&mut self, entity: Entity) {
        if let Err(error) = self.world.despawn(entity) {
            tracing::warn!(?entity, %error, "despawn failed");
        }
    }

    fn ordinal(&mut self) -> Ordinal {
        let ordinal = Ordinal(self.next_ordinal);
        self.next_ordinal += 1;
        ordinal
    }

    // ---- tags ----

    pub fn add_tag(&mut self, word: WordId, pos: PosType, details: Details) -> Result<TagRef> {
        let details = nahw_morph::normalize_details(pos, details, self.config.default_cases_for_nominals);
        let id = TagId(self.next_tag);
        self.word_mut(word)?.add_tag(id, pos, details);
        self.next_tag += 1;
        tracing::debug!(%word, tag = %id, ?pos, "tag added");
        Ok(TagRef::new(word, id))
    }

    /// Merges `update` into a tag and re-validates every combination that
    /// touches it. Returns the combinations that no longer hold.
    pub fn edit_tag(&mut self, tag: TagRef, update: Details) -> Result<Vec<Combination>> {
        let open_cases = self.config.default_cases_for_nominals;
        let word = self.word_mut(tag.word)?;
        let existing = word.tag(tag.tag).ok_or(SessionError::TagNotFound(tag))?;
        let pos = existing.pos;
        let mut details = existing.details.clone();
        details.merge(update);
        let details = nahw_morph::normalize_details(pos, details, open_cases);
        word.set_tag_details(tag.tag, details);
        tracing::debug!(%tag, "tag edited");

        let dropped = self.revalidate_combinations(tag);
        self.refresh_arch_verdicts();
        Ok(dropped)
    }

    /// Removes a tag together with every combination and logical connection
    /// that references it.
    pub fn delete_tag(&mut self, tag: TagRef) -> Result<Tag> {
        let removed = self
            .word_mut(tag.word)?
            .remove_tag(tag.tag)
            .ok_or(SessionError::TagNotFound(tag))?;

        let mut doomed: Vec<Entity> = self
            .world
            .query::<&Combination>()
            .iter()
            .filter(|(_, c)| c.involves(tag))
            .map(|(entity, _)| entity)
            .collect();
        doomed.extend(
            self.world
                .query::<&LogicalConnection>()
                .iter()
                .filter(|(_, l)| l.involves(tag))
                .map(|(entity, _)| entity),
        );
        for entity in &doomed {
            self.despawn(*entity);
        }
        tracing::debug!(%tag, cascaded = doomed.len(), "tag deleted");

        self.refresh_arch_verdicts();
        Ok(removed)
    }

    fn revalidate_combinations(&mut self, tag: TagRef) -> Vec<Combination> {
        let mut dropped = Vec::new();
        let mut doomed = Vec::new();

        for (entity, combination) in self.world.query_mut::<&mut Combination>() {
            if !combination.involves(tag) {
                continue;
            }
            let (Some(first), Some(second)) = (
                find_tag(&self.words, combination.first),
                find_tag(&self.words, combination.second),
            ) else {
                doomed.push(entity);
                dropped.push(combination.clone());
                continue;
            };
            let verdict = validate_combination(
                first,
                second,
                combination.first.word,
                combination.second.word,
                &self.words,
            );
            if verdict.valid {
                combination.complete = verdict.complete;
                combination.kind = verdict.recorded_kind();
                combination.is_demonstrative = verdict.is_demonstrative;
            } else {
                tracing::warn!(
                    first = %combination.first,
                    second = %combination.second,
                    reason = %verdict.message,
                    "combination no longer holds"
                );
                doomed.push(entity);
                dropped.push(combination.clone());
            }
        }

        for entity in doomed {
            self.despawn(entity);
        }
        dropped
    }

    // ---- combinations ----

    /// Validates a link between two tags and records it when permissible.
    ///
    /// The pair is put in reading order first. Invalid and unknown verdicts
    /// are returned without being stored.
    pub fn propose_combination(&mut self, a: TagRef, b: TagRef) -> Result<Validation> {
        let index_a = word_index(&self.words, a.word).ok_or(SessionError::WordNotFound(a.word))?;
        let index_b = word_index(&self.words, b.word).ok_or(SessionError::WordNotFound(b.word))?;
        let (first, second) = if index_a <= index_b { (a, b) } else { (b, a) };

        let verdict = validate_combination(
            self.tag(first)?,
            self.tag(second)?,
            first.word,
            second.word,
            &self.words,
        );
        if !verdict.valid {
            return Ok(verdict);
        }

        let existing = self
            .world
            .query_mut::<&mut Combination>()
            .into_iter()
            .find(|(_, c)| c.joins(first, second))
            .map(|(_, c)| {
                c.complete = verdict.complete;
                c.kind = verdict.recorded_kind();
                c.is_demonstrative = verdict.is_demonstrative;
            });

        if existing.is_none() {
            let combination = Combination {
                first,
                second,
                complete: verdict.complete,
                kind: verdict.recorded_kind(),
                is_demonstrative: verdict.is_demonstrative,
            };
            let ordinal = self.ordinal();
            self.world.spawn((combination, ordinal));
            tracing::debug!(%first, %second, "combination recorded");
        }
        Ok(verdict)
    }

    /// Removes the combination joining `a` and `b`, in either order.
    pub fn delete_combination(&mut self, a: TagRef, b: TagRef) -> Option<Combination> {
        let (entity, combination) = self
            .world
            .query::<&Combination>()
            .iter()
            .find(|(_, c)| c.joins(a, b))
            .map(|(entity, c)| (entity, c.clone()))?;
        self.despawn(entity);
        tracing::debug!(first = %a, second = %b, "combination deleted");
        Some(combination)
    }

    /// Recorded combinations in creation order.
    pub fn combinations(&self) -> Vec<Combination> {
        let mut ordered: Vec<(Ordinal, Combination)> = self
            .world
            .query::<(&Combination, &Ordinal)>()
            .iter()
            .map(|(_, (c, ordinal))| (*ordinal, c.clone()))
            .collect();
        ordered.sort_by_key(|(ordinal, _)| *ordinal);
        ordered.into_iter().map(|(_, c)| c).collect()
    }

    // ---- arches ----

    /// Starts an arch over `word1..=word2`. Nothing is stored until
    /// [`Session::confirm_arch`].
    pub fn propose_arch(&self, word1: WordId, word2: WordId) -> Result<PendingArch> {
        self.word(word1)?;
        self.word(word2)?;
        self.ensure_span_free(word1, word2)?;

        let arches = self.arches();
        let height = systems::arches::arch_height(word1, word2, &arches, &self.words, &self.config);
        Ok(PendingArch { word1, word2, height })
    }

    fn ensure_span_free(&self, word1: WordId, word2: WordId) -> Result<()> {
        let taken = self
            .world
            .query::<&Arch>()
            .iter()
            .any(|(_, arch)| arch.spans(word1, word2));
        if taken {
            return Err(SessionError::DuplicateArch(word1, word2));
        }
        Ok(())
    }

    pub fn confirm_arch(&mut self, pending: PendingArch, role: ArchRole) -> Result<ArchId> {
        self.ensure_span_free(pending.word1, pending.word2)?;

        let id = ArchId(self.next_arch);
        let mut arch = Arch {
            id,
            word1: pending.word1,
            word2: pending.word2,
            height: pending.height,
            syntactic_role: None,
            is_main_roof: false,
            model: None,
            is_clause: false,
            external_role: None,
            validation: None,
            clause_validation: None,
        };
        match role {
            ArchRole::Syntactic(role) => arch.syntactic_role = Some(role),
            ArchRole::Clause { external_role, model } => {
                arch.is_clause = true;
                arch.external_role = Some(external_role);
                arch.model = model;
                arch.clause_validation = Some(validate_sentence_model(&arch, &self.words));
            }
        }

        self.next_arch += 1;
        let ordinal = self.ordinal();
        self.world.spawn((arch, ordinal));
        tracing::debug!(arch = %id, word1 = %pending.word1, word2 = %pending.word2, "arch confirmed");
        Ok(id)
    }

    fn arch_entity(&self, id: ArchId) -> Result<Entity> {
        self.world
            .query::<&Arch>()
            .iter()
            .find(|(_, arch)| arch.id == id)
            .map(|(entity, _)| entity)
            .ok_or(SessionError::ArchNotFound(id))
    }

    pub fn arch(&self, id: ArchId) -> Result<Arch> {
        let entity = self.arch_entity(id)?;
        self.world
            .get::<&Arch>(entity)
            .map(|arch| (*arch).clone())
            .map_err(|_| SessionError::ArchNotFound(id))
    }

    /// Updates main-roof, clause and model settings and re-runs the model check.
    pub fn set_arch_properties(&mut self, id: ArchId, props: ArchProperties) -> Result<Arch> {
        let entity = self.arch_entity(id)?;

        if props.is_main_roof {
            let other_roof = self
                .world
                .query::<&Arch>()
                .iter()
                .find(|(_, arch)| arch.is_main_roof && arch.id != id)
                .map(|(_, arch)| arch.id);
            if let Some(other) = other_roof {
                if self.config.enforce_single_main_roof {
                    return Err(SessionError::MainRoofTaken(other));
                }
                tracing::warn!(arch = %id, %other, "second main roof");
            }
        }

        let mut arch = self
            .world
            .get::<&mut Arch>(entity)
            .map_err(|_| SessionError::ArchNotFound(id))?;
        arch.is_main_roof = props.is_main_roof;
        arch.is_clause = props.is_clause;
        arch.model = props.model;
        arch.syntactic_role = props.syntactic_role;
        arch.external_role = props.external_role;
        refresh_verdicts(&mut arch, &self.words);
        tracing::debug!(arch = %id, main_roof = arch.is_main_roof, clause = arch.is_clause, "arch updated");
        Ok((*arch).clone())
    }

    pub fn delete_arch(&mut self, id: ArchId) -> Result<Arch> {
        let entity = self.arch_entity(id)?;
        let arch = self
            .world
            .remove_one::<Arch>(entity)
            .map_err(|_| SessionError::ArchNotFound(id))?;
        self.despawn(entity);
        tracing::debug!(arch = %id, "arch deleted");
        Ok(arch)
    }

    /// Confirmed arches in creation order.
    pub fn arches(&self) -> Vec<Arch> {
        let mut ordered: Vec<(Ordinal, Arch)> = self
            .world
            .query::<(&Arch, &Ordinal)>()
            .iter()
            .map(|(_, (arch, ordinal))| (*ordinal, arch.clone()))
            .collect();
        ordered.sort_by_key(|(ordinal, _)| *ordinal);
        ordered.into_iter().map(|(_, arch)| arch).collect()
    }

    /// Runs the sentence model check for an arch without storing the result.
    pub fn validate_arch(&self, id: ArchId) -> Result<ModelVerdict> {
        Ok(validate_sentence_model(&self.arch(id)?, &self.words))
    }

    /// Whether every combination under the arch is settled.
    pub fn arch_consistent(&self, id: ArchId) -> Result<bool> {
        let arch = self.arch(id)?;
        let combinations = self.combinations();
        Ok(systems::consistency::arch_matches_combinations(&arch, &combinations, &self.words))
    }

    fn refresh_arch_verdicts(&mut self) {
        for (_, arch) in self.world.query_mut::<&mut Arch>() {
            refresh_verdicts(arch, &self.words);
        }
    }

    // ---- logical connections ----

    pub fn add_logical_connection(&mut self, a: TagRef, b: TagRef, kind: ConnectionKind) -> Result<ConnectionId> {
        let verdict = validate_logical_connection(self.tag(a)?, self.tag(b)?, kind);
        if !verdict.valid {
            return Err(SessionError::InvalidConnection(verdict.message));
        }

        let index_a = word_index(&self.words, a.word).ok_or(SessionError::WordNotFound(a.word))?;
        let index_b = word_index(&self.words, b.word).ok_or(SessionError::WordNotFound(b.word))?;
        let id = ConnectionId(self.next_connection);
        let connection = LogicalConnection {
            id,
            first: a,
            second: b,
            kind,
            split_point: (index_a + index_b) as f32 / 2.0,
        };

        self.next_connection += 1;
        let ordinal = self.ordinal();
        self.world.spawn((connection, ordinal));
        tracing::debug!(connection = %id, ?kind, message = %verdict.message, "logical connection added");
        Ok(id)
    }

    pub fn delete_logical_connection(&mut self, id: ConnectionId) -> Result<LogicalConnection> {
        let entity = self
            .world
            .query::<&LogicalConnection>()
            .iter()
            .find(|(_, l)| l.id == id)
            .map(|(entity, _)| entity)
            .ok_or(SessionError::ConnectionNotFound(id))?;
        let connection = self
            .world
            .remove_one::<LogicalConnection>(entity)
            .map_err(|_| SessionError::ConnectionNotFound(id))?;
        self.despawn(entity);
        Ok(connection)
    }

    pub fn logical_connections(&self) -> Vec<LogicalConnection> {
        let mut ordered: Vec<(Ordinal, LogicalConnection)> = self
            .world
            .query::<(&LogicalConnection, &Ordinal)>()
            .iter()
            .map(|(_, (l, ordinal))| (*ordinal, l.clone()))
            .collect();
        ordered.sort_by_key(|(ordinal, _)| *ordinal);
        ordered.into_iter().map(|(_, l)| l).collect()
    }
}

fn refresh_verdicts(arch: &mut Arch, words: &[Word]) {
    arch.validation = arch.is_main_roof.then(|| validate_sentence_model(arch, words));
    arch.clause_validation = arch.is_clause.then(|| validate_sentence_model(arch, words));
}

#[cfg(test)]
mod tests {
    use super::*;
    use nahw_protocol::{MorphFlags, SentenceModel, StageCategory};

    const SENTENCE: &str = "ولد كبير في هذا";

    fn masc_sg(definiteness: MorphFlags) -> Details {
        Details::new(MorphFlags::MASCULINE | MorphFlags::SINGULAR | definiteness)
    }

    #[test]
    fn test_noun_adjective_scenario_is_recorded_as_valid() {
        let mut session = Session::from_sentence(SENTENCE);
        let noun = session.add_tag(WordId(0), PosType::Noun, masc_sg(MorphFlags::INDEFINITE)).unwrap();
        let adj = session.add_tag(WordId(1), PosType::Adjective, masc_sg(MorphFlags::INDEFINITE)).unwrap();

        let verdict = session.propose_combination(adj, noun).unwrap();
        assert!(verdict.valid && verdict.complete);

        let combinations = session.combinations();
        assert_eq!(combinations.len(), 1);
        assert_eq!(combinations[0].first, noun);
        assert_eq!(combinations[0].kind, CombinationKind::Valid);

        session.propose_combination(noun, adj).unwrap();
        assert_eq!(session.combinations().len(), 1);
    }

    #[test]
    fn test_invalid_combination_is_not_stored() {
        let mut session = Session::from_sentence(SENTENCE);
        let noun = session.add_tag(WordId(0), PosType::Noun, masc_sg(MorphFlags::DEFINITE)).unwrap();
        let adj = session.add_tag(WordId(1), PosType::Adjective, masc_sg(MorphFlags::INDEFINITE)).unwrap();

        let verdict = session.propose_combination(noun, adj).unwrap();
        assert!(!verdict.valid);
        assert!(verdict.message.contains("יידוע"));
        assert!(session.combinations().is_empty());
    }

    #[test]
    fn test_homonymic_first_noun_forms_annexation() {
        let mut session = Session::from_sentence("كتاب الولد");
        let either = MorphFlags::MASCULINE | MorphFlags::SINGULAR | MorphFlags::DEFINITE | MorphFlags::INDEFINITE;
        let head = session.add_tag(WordId(0), PosType::Noun, Details::new(either)).unwrap();
        let owner = session.add_tag(WordId(1), PosType::Noun, masc_sg(MorphFlags::DEFINITE)).unwrap();

        let verdict = session.propose_combination(head, owner).unwrap();
        assert!(verdict.valid && verdict.complete, "{}", verdict.message);
        assert_eq!(session.combinations().len(), 1);
    }

    #[test]
    fn test_preposition_demonstrative_is_stored_incomplete() {
        let mut session = Session::from_sentence(SENTENCE);
        let prep = session.add_tag(WordId(2), PosType::Preposition, Details::default()).unwrap();
        let dem = session.add_tag(WordId(3), PosType::Demonstrative, masc_sg(MorphFlags::empty())).unwrap();

        let verdict = session.propose_combination(prep, dem).unwrap();
        assert!(verdict.valid && !verdict.complete);
        assert_eq!(session.combinations()[0].kind, CombinationKind::Incomplete);
    }

    #[test]
    fn test_edit_revalidates_and_drops_broken_combinations() {
        let mut session = Session::from_sentence(SENTENCE);
        let noun = session.add_tag(WordId(0), PosType::Noun, masc_sg(MorphFlags::INDEFINITE)).unwrap();
        let adj = session.add_tag(WordId(1), PosType::Adjective, masc_sg(MorphFlags::INDEFINITE)).unwrap();
        session.propose_combination(noun, adj).unwrap();

        let dropped = session.edit_tag(adj, Details::new(MorphFlags::FEMININE)).unwrap();
        assert_eq!(dropped.len(), 1);
        assert!(session.combinations().is_empty());

        let details = &session.tag(adj).unwrap().details;
        assert_eq!(details.morph.of(nahw_protocol::Feature::Gender), MorphFlags::FEMININE);
        assert!(details.morph.contains(MorphFlags::SINGULAR));
    }

    #[test]
    fn test_delete_tag_cascades() {
        let mut session = Session::from_sentence(SENTENCE);
        let noun = session.add_tag(WordId(0), PosType::Noun, masc_sg(MorphFlags::INDEFINITE)).unwrap();
        let adj = session.add_tag(WordId(1), PosType::Adjective, masc_sg(MorphFlags::INDEFINITE)).unwrap();
        let other = session.add_tag(WordId(3), PosType::Noun, masc_sg(MorphFlags::INDEFINITE)).unwrap();
        session.propose_combination(noun, adj).unwrap();
        session.add_logical_connection(noun, other, ConnectionKind::Coordination).unwrap();

        session.delete_tag(noun).unwrap();
        assert!(session.combinations().is_empty());
        assert!(session.logical_connections().is_empty());
        assert_eq!(session.tag(noun), Err(SessionError::TagNotFound(noun)));
    }

    #[test]
    fn test_lookup_failures_are_errors() {
        let mut session = Session::from_sentence(SENTENCE);
        let missing = TagRef::new(WordId(0), TagId(42));
        assert_eq!(
            session.add_tag(WordId(9), PosType::Noun, Details::default()),
            Err(SessionError::WordNotFound(WordId(9)))
        );
        assert_eq!(session.delete_tag(missing).unwrap_err(), SessionError::TagNotFound(missing));
        assert_eq!(session.delete_arch(ArchId(1)).unwrap_err(), SessionError::ArchNotFound(ArchId(1)));
    }

    #[test]
    fn test_arch_lifecycle() {
        let mut session = Session::from_sentence("كتب الولد الدرس");
        let verb = session.add_tag(WordId(0), PosType::Verb, Details::new(MorphFlags::THIRD_MASC_SG)).unwrap();
        session.add_tag(WordId(1), PosType::Noun, masc_sg(MorphFlags::DEFINITE)).unwrap();
        assert_eq!(verb.word, WordId(0));

        let outer = session.propose_arch(WordId(0), WordId(2)).unwrap();
        assert_eq!(outer.height, 120);
        let outer = session.confirm_arch(outer, ArchRole::Syntactic("משפט".to_string())).unwrap();

        assert_eq!(
            session.propose_arch(WordId(2), WordId(0)),
            Err(SessionError::DuplicateArch(WordId(2), WordId(0)))
        );

        let inner = session.propose_arch(WordId(1), WordId(1)).unwrap();
        assert_eq!(inner.height, 80);

        let roof = session.propose_arch(WordId(0), WordId(1)).unwrap();
        let roof = session.confirm_arch(roof, ArchRole::Syntactic("נשוא".to_string())).unwrap();
        let arch = session
            .set_arch_properties(
                roof,
                ArchProperties { is_main_roof: true, model: Some(SentenceModel::A.into()), ..ArchProperties::default() },
            )
            .unwrap();
        let verdict = arch.validation.unwrap();
        assert!(verdict.valid);
        assert_eq!(verdict.color, VerdictColor::Success);
        assert!(session.arch_consistent(roof).unwrap());

        session.delete_arch(outer).unwrap();
        assert_eq!(session.arches().len(), 1);
    }

    #[test]
    fn test_single_word_arch_height() {
        let mut session = Session::from_sentence(SENTENCE);
        let pending = session.propose_arch(WordId(1), WordId(1)).unwrap();
        assert_eq!(pending.height, 80);

        let config = EngineConfig { single_word_arch_height: 50, ..EngineConfig::default() };
        let mut session = Session::with_config(SENTENCE, config);
        assert_eq!(session.propose_arch(WordId(1), WordId(1)).unwrap().height, 50);
    }

    #[test]
    fn test_unrecognized_model_is_kept_on_the_arch() {
        let mut session = Session::from_sentence("كتب الولد");
        session.add_tag(WordId(0), PosType::Verb, Details::new(MorphFlags::THIRD_MASC_SG)).unwrap();
        session.add_tag(WordId(1), PosType::Noun, masc_sg(MorphFlags::DEFINITE)).unwrap();

        let pending = session.propose_arch(WordId(0), WordId(1)).unwrap();
        let roof = session.confirm_arch(pending, ArchRole::Syntactic("משפט".to_string())).unwrap();
        let props = ArchProperties { is_main_roof: true, model: ModelClaim::parse("D"), ..ArchProperties::default() };
        let arch = session.set_arch_properties(roof, props).unwrap();

        assert_eq!(arch.validation, Some(ModelVerdict::unrecognized()));
        assert_eq!(session.validate_arch(roof).unwrap().message, "מודל לא מוכר");
        assert_eq!(session.arches()[0].validation, Some(ModelVerdict::unrecognized()));
    }

    #[test]
    fn test_clause_arch_is_validated_on_confirm() {
        let mut session = Session::from_sentence("الولد كبير");
        session.add_tag(WordId(0), PosType::Noun, masc_sg(MorphFlags::DEFINITE)).unwrap();
        session.add_tag(WordId(1), PosType::Adjective, masc_sg(MorphFlags::DEFINITE)).unwrap();

        let pending = session.propose_arch(WordId(0), WordId(1)).unwrap();
        let id = session
            .confirm_arch(
                pending,
                ArchRole::Clause { external_role: "חבר".to_string(), model: Some(SentenceModel::B.into()) },
            )
            .unwrap();
        let arch = session.arch(id).unwrap();
        assert!(arch.is_clause);
        assert!(arch.clause_validation.unwrap().valid);
        assert!(arch.validation.is_none());
    }

    #[test]
    fn test_single_main_roof_can_be_enforced() {
        let config = EngineConfig { enforce_single_main_roof: true, ..EngineConfig::default() };
        let mut session = Session::with_config(SENTENCE, config);
        let roof = ArchProperties { is_main_roof: true, ..ArchProperties::default() };

        let first = session.propose_arch(WordId(0), WordId(1)).unwrap();
        let first = session.confirm_arch(first, ArchRole::Syntactic("נושא".to_string())).unwrap();
        session.set_arch_properties(first, roof.clone()).unwrap();

        let second = session.propose_arch(WordId(2), WordId(3)).unwrap();
        let second = session.confirm_arch(second, ArchRole::Syntactic("נשוא".to_string())).unwrap();
        assert_eq!(session.set_arch_properties(second, roof), Err(SessionError::MainRoofTaken(first)));
    }

    #[test]
    fn test_rejected_logical_connection() {
        let mut session = Session::from_sentence(SENTENCE);
        let noun = session.add_tag(WordId(0), PosType::Noun, masc_sg(MorphFlags::INDEFINITE)).unwrap();
        let prep = session.add_tag(WordId(2), PosType::Preposition, Details::default()).unwrap();

        let err = session.add_logical_connection(noun, prep, ConnectionKind::Coordination).unwrap_err();
        assert!(matches!(err, SessionError::InvalidConnection(_)));

        let id = session.add_logical_connection(noun, prep, ConnectionKind::BetweenSentences).unwrap();
        assert_eq!(session.logical_connections()[0].split_point, 1.0);
        session.delete_logical_connection(id).unwrap();
        assert_eq!(
            session.delete_logical_connection(id).unwrap_err(),
            SessionError::ConnectionNotFound(id)
        );
    }

    #[test]
    fn test_load_stage_resets_session() {
        let mut session = Session::from_sentence(SENTENCE);
        session.add_tag(WordId(0), PosType::Noun, Details::default()).unwrap();

        let stage = Stage {
            id: "2.3".to_string(),
            number: "2.3".to_string(),
            sentence: "هذا الحصار قرصنة".to_string(),
            category: StageCategory::Workbook,
        };
        session.load_stage(&stage);
        assert_eq!(session.words().len(), 3);
        assert!(session.words().iter().all(|w| !w.has_tags()));
        assert!(session.arches().is_empty());
    }
}
