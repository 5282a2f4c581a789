#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunables of the validation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct EngineConfig {
    /// Height of an arch that no other arch contains.
    pub arch_base_height: i32,
    /// Height lost per containing arch.
    pub arch_nesting_step: i32,
    /// Fixed height of an arch over a single word.
    pub single_word_arch_height: i32,
    /// Lowest height an arch may get. `None` lets deep nesting go non-positive.
    pub arch_min_height: Option<i32>,
    /// Reject a second main roof instead of only flagging it in the UI.
    pub enforce_single_main_roof: bool,
    /// Open untagged-case nouns and adjectives to all three cases.
    pub default_cases_for_nominals: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            arch_base_height: 120,
            arch_nesting_step: 40,
            single_word_arch_height: 80,
            arch_min_height: None,
            enforce_single_main_roof: false,
            default_cases_for_nominals: true,
        }
    }
}
