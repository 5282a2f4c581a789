pub mod input;
pub mod view;

use wasm_bindgen::prelude::*;
use nahw_ecs::{PendingArch, RepeatPolicy, Selection, SelectionEvent, Session};
use nahw_protocol::{ArchId, Catalogue, ConnectionId, TagId, TagRef, WordId};
use serde::Serialize;

use crate::input::{ArchPropertiesInput, DetailsInput, RoleInput};
use crate::view::{ArchView, ChainView, DetailsView, VerdictView, WordView};

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn js_error(error: impl ToString) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[derive(Serialize)]
#[serde(tag = "selection", rename_all = "lowercase")]
enum SelectionState {
    Pending,
    Cancelled,
}

fn tag_ref(word: u32, tag: u32) -> TagRef {
    TagRef::new(WordId(word), TagId(tag))
}

/// The Engine Instance running in the Browser
#[wasm_bindgen]
pub struct NahwEngine {
    session: Session,
    pending: Option<PendingArch>,
    tag_selection: Selection<TagRef>,
    word_selection: Selection<WordId>,
}

#[wasm_bindgen]
impl NahwEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(sentence: &str) -> Self {
        Self {
            session: Session::from_sentence(sentence),
            pending: None,
            tag_selection: Selection::new(RepeatPolicy::Cancel),
            word_selection: Selection::new(RepeatPolicy::Pair),
        }
    }

    /// Opens a stage from a compiled catalogue (fetched by JS).
    pub fn from_catalogue(data: Vec<u8>, stage_id: &str) -> Result<NahwEngine, JsValue> {
        let mut aligned = rkyv::AlignedVec::with_capacity(data.len());
        aligned.extend_from_slice(&data);
        let catalogue = Catalogue::check_archived(&aligned).map_err(js_error)?;
        let stage = catalogue
            .stage(stage_id)
            .ok_or_else(|| js_error(format!("no stage {}", stage_id)))?;

        let mut engine = Self::new("");
        engine.session.load_stage(&stage);
        Ok(engine)
    }

    pub fn load_sentence(&mut self, sentence: &str) {
        self.session.load_sentence(sentence);
        self.pending = None;
        self.tag_selection.cancel();
        self.word_selection.cancel();
    }

    /// A click on a tag badge. The second distinct tag proposes a combination.
    pub fn select_tag(&mut self, word: u32, tag: u32) -> Result<JsValue, JsValue> {
        match self.tag_selection.select(tag_ref(word, tag)) {
            SelectionEvent::Pending(_) => to_js(&SelectionState::Pending),
            SelectionEvent::Cancelled => to_js(&SelectionState::Cancelled),
            SelectionEvent::Pair(a, b) => {
                let verdict = self.session.propose_combination(a, b).map_err(js_error)?;
                to_js(&verdict)
            }
        }
    }

    /// A click on a word in arch mode. Clicking the same word twice spans
    /// just that word.
    pub fn select_word(&mut self, word: u32) -> Result<JsValue, JsValue> {
        match self.word_selection.select(WordId(word)) {
            SelectionEvent::Pair(first, second) => self.propose_arch(first.0, second.0),
            _ => to_js(&SelectionState::Pending),
        }
    }

    pub fn clear_selection(&mut self) {
        self.tag_selection.cancel();
        self.word_selection.cancel();
    }

    pub fn words(&self) -> Result<JsValue, JsValue> {
        let words: Vec<WordView> = self.session.words().iter().map(WordView::from).collect();
        to_js(&words)
    }

    /// Prefilled settings-panel values for a new tag of type `pos`.
    pub fn default_details(pos: &str) -> Result<JsValue, JsValue> {
        let pos = input::parse_pos(pos).map_err(js_error)?;
        to_js(&DetailsView::from(&nahw_morph::default_details(pos)))
    }

    pub fn add_tag(&mut self, word: u32, pos: &str, details: JsValue) -> Result<u32, JsValue> {
        let pos = input::parse_pos(pos).map_err(js_error)?;
        let details = from_js::<DetailsInput>(details)?.into_details().map_err(js_error)?;
        let tag = self.session.add_tag(WordId(word), pos, details).map_err(js_error)?;
        Ok(tag.tag.0)
    }

    /// Returns the combinations dropped by re-validation.
    pub fn edit_tag(&mut self, word: u32, tag: u32, details: JsValue) -> Result<JsValue, JsValue> {
        let details = from_js::<DetailsInput>(details)?.into_details().map_err(js_error)?;
        let dropped = self.session.edit_tag(tag_ref(word, tag), details).map_err(js_error)?;
        to_js(&dropped)
    }

    pub fn delete_tag(&mut self, word: u32, tag: u32) -> Result<(), JsValue> {
        self.session.delete_tag(tag_ref(word, tag)).map_err(js_error)?;
        Ok(())
    }

    pub fn propose_combination(&mut self, word1: u32, tag1: u32, word2: u32, tag2: u32) -> Result<JsValue, JsValue> {
        let verdict = self
            .session
            .propose_combination(tag_ref(word1, tag1), tag_ref(word2, tag2))
            .map_err(js_error)?;
        to_js(&verdict)
    }

    pub fn delete_combination(&mut self, word1: u32, tag1: u32, word2: u32, tag2: u32) -> bool {
        self.session
            .delete_combination(tag_ref(word1, tag1), tag_ref(word2, tag2))
            .is_some()
    }

    /// Deletes the whole phrase the combination belongs to.
    pub fn delete_chain(&mut self, word1: u32, tag1: u32, word2: u32, tag2: u32) -> Result<JsValue, JsValue> {
        let target = self
            .session
            .combinations()
            .into_iter()
            .find(|c| c.joins(tag_ref(word1, tag1), tag_ref(word2, tag2)));
        let removed = match target {
            Some(combination) => nahw_solver::remove_chain(&mut self.session, &combination),
            None => Vec::new(),
        };
        to_js(&removed)
    }

    pub fn combinations(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.combinations())
    }

    pub fn chains(&self) -> Result<JsValue, JsValue> {
        let words = self.session.words();
        let chains: Vec<ChainView> = nahw_solver::session_chains(&self.session)
            .iter()
            .map(|chain| ChainView::new(chain, nahw_solver::chain_style(chain, words)))
            .collect();
        to_js(&chains)
    }

    pub fn incomplete_phrases(&self) -> Result<JsValue, JsValue> {
        to_js(&nahw_solver::incomplete_phrases(&self.session))
    }

    /// First half of arch creation. The arch is kept aside until a role is
    /// confirmed.
    pub fn propose_arch(&mut self, word1: u32, word2: u32) -> Result<JsValue, JsValue> {
        let pending = self
            .session
            .propose_arch(WordId(word1), WordId(word2))
            .map_err(js_error)?;
        let view = to_js(&pending);
        self.pending = Some(pending);
        view
    }

    pub fn cancel_arch(&mut self) {
        self.pending = None;
    }

    pub fn confirm_arch(&mut self, role: JsValue) -> Result<JsValue, JsValue> {
        let role = from_js::<RoleInput>(role)?.into_role();
        let pending = self.pending.take().ok_or_else(|| js_error("no arch awaiting a role"))?;
        let id = self.session.confirm_arch(pending, role).map_err(js_error)?;
        self.arch_view(id)
    }

    pub fn set_arch_properties(&mut self, id: u32, props: JsValue) -> Result<JsValue, JsValue> {
        let props = from_js::<ArchPropertiesInput>(props)?.into_properties();
        self.session.set_arch_properties(ArchId(id), props).map_err(js_error)?;
        self.arch_view(ArchId(id))
    }

    pub fn delete_arch(&mut self, id: u32) -> Result<(), JsValue> {
        self.session.delete_arch(ArchId(id)).map_err(js_error)?;
        Ok(())
    }

    pub fn validate_arch(&self, id: u32) -> Result<JsValue, JsValue> {
        let verdict = self.session.validate_arch(ArchId(id)).map_err(js_error)?;
        to_js(&VerdictView::from(verdict))
    }

    pub fn arches(&self) -> Result<JsValue, JsValue> {
        let views = self
            .session
            .arches()
            .into_iter()
            .map(|arch| self.arch_view_of(arch))
            .collect::<Result<Vec<_>, _>>()?;
        to_js(&views)
    }

    pub fn add_logical_connection(
        &mut self,
        word1: u32,
        tag1: u32,
        word2: u32,
        tag2: u32,
        kind: &str,
    ) -> Result<u32, JsValue> {
        let kind = input::parse_connection_kind(kind).map_err(js_error)?;
        let id = self
            .session
            .add_logical_connection(tag_ref(word1, tag1), tag_ref(word2, tag2), kind)
            .map_err(js_error)?;
        Ok(id.0)
    }

    pub fn delete_logical_connection(&mut self, id: u32) -> Result<(), JsValue> {
        self.session.delete_logical_connection(ConnectionId(id)).map_err(js_error)?;
        Ok(())
    }

    pub fn logical_connections(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.logical_connections())
    }
}

impl NahwEngine {
    fn arch_view(&self, id: ArchId) -> Result<JsValue, JsValue> {
        let arch = self.session.arch(id).map_err(js_error)?;
        to_js(&self.arch_view_of(arch)?)
    }

    fn arch_view_of(&self, arch: nahw_ecs::Arch) -> Result<ArchView, JsValue> {
        let consistent = self.session.arch_consistent(arch.id).map_err(js_error)?;
        let verdict = arch.validation.clone().or_else(|| arch.clause_validation.clone());
        Ok(ArchView { arch, consistent, verdict: verdict.map(VerdictView::from) })
    }
}
