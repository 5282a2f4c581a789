use std::collections::HashSet;

use nahw_ecs::{Combination, CombinationKind, Session};
use nahw_morph::{check_adjacency, word_index};
use nahw_protocol::{PosType, TagRef, Word};

use crate::graph::TagGraph;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const INCOMPLETE_PHRASE: &str = "הצירוף מחכה לשם עצם או צירוף שמני שיופיע אחרי מילית היחס";

/// A maximal run of combinations where each link starts at the tag the
/// previous one ended on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chain {
    pub links: Vec<Combination>,
}

impl Chain {
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Tags along the chain in reading order.
    pub fn tags(&self) -> Vec<TagRef> {
        let mut tags: Vec<TagRef> = self.links.iter().take(1).map(|c| c.first).collect();
        tags.extend(self.links.iter().map(|c| c.second));
        tags
    }

    pub fn contains(&self, combination: &Combination) -> bool {
        self.links.iter().any(|link| link.pair_key() == combination.pair_key())
    }

    pub fn is_settled(&self) -> bool {
        self.links.iter().all(Combination::is_settled)
    }

    pub fn has_demonstrative(&self) -> bool {
        self.links.iter().any(|link| link.is_demonstrative)
    }
}

/// How a chain is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ChainStyle {
    /// Open prepositional phrase.
    AwaitingNoun,
    Demonstrative,
    Unsettled,
    Settled,
}

impl ChainStyle {
    pub const fn stroke(self) -> &'static str {
        match self {
            ChainStyle::AwaitingNoun | ChainStyle::Unsettled => "#fbbf24",
            ChainStyle::Demonstrative => "#6b46c1",
            ChainStyle::Settled => "#10b981",
        }
    }

    pub const fn width(self) -> u8 {
        match self {
            ChainStyle::Demonstrative => 6,
            _ => 5,
        }
    }
}

/// Groups combinations into chains.
///
/// Seeds are taken in reading order so a contiguous path always starts at
/// its leftmost link. Each combination lands in exactly one chain.
pub fn build_chains(combinations: &[Combination], words: &[Word]) -> Vec<Chain> {
    let graph = TagGraph::from_combinations(combinations);

    let mut seeds: Vec<usize> = (0..combinations.len()).collect();
    seeds.sort_by_key(|&position| {
        let combination = &combinations[position];
        (
            word_index(words, combination.first.word),
            word_index(words, combination.second.word),
            position,
        )
    });

    let mut processed = HashSet::new();
    let mut chains = Vec::new();

    for seed in seeds {
        if !processed.insert(combinations[seed].pair_key()) {
            continue;
        }
        let mut links = vec![combinations[seed].clone()];

        loop {
            let tail = links[links.len() - 1].second;
            let next = graph.outgoing(tail).into_iter().find(|&position| {
                let candidate = &combinations[position];
                !processed.contains(&candidate.pair_key())
                    && check_adjacency(candidate.first.word, candidate.second.word, words)
            });
            let Some(position) = next else {
                break;
            };
            tracing::trace!(%tail, next = %combinations[position].second, "chain extended");
            processed.insert(combinations[position].pair_key());
            links.push(combinations[position].clone());
        }

        chains.push(Chain { links });
    }

    tracing::debug!(combinations = combinations.len(), chains = chains.len(), "chains built");
    chains
}

pub fn session_chains(session: &Session) -> Vec<Chain> {
    build_chains(&session.combinations(), session.words())
}

fn pos_of(words: &[Word], tag: TagRef) -> Option<PosType> {
    words
        .iter()
        .find(|w| w.id == tag.word)?
        .tag(tag.tag)
        .map(|t| t.pos)
}

/// Whether the chain leaves a preposition without its noun.
pub fn ends_with_preposition(chain: &Chain, words: &[Word]) -> bool {
    let Some(last) = chain.links.last() else {
        return false;
    };
    if pos_of(words, last.second) == Some(PosType::Preposition) {
        return true;
    }

    chain.links.iter().any(|link| {
        let open = !link.complete || link.kind == CombinationKind::Incomplete;
        open && [link.first, link.second]
            .into_iter()
            .any(|tag| pos_of(words, tag) == Some(PosType::Preposition))
    })
}

pub fn chain_style(chain: &Chain, words: &[Word]) -> ChainStyle {
    if ends_with_preposition(chain, words) {
        ChainStyle::AwaitingNoun
    } else if chain.has_demonstrative() {
        ChainStyle::Demonstrative
    } else if !chain.is_settled() {
        ChainStyle::Unsettled
    } else {
        ChainStyle::Settled
    }
}

/// A chain that keeps a warning on screen until it is completed or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IncompletePhrase {
    pub chain: Chain,
    pub message: String,
}

pub fn incomplete_phrases(session: &Session) -> Vec<IncompletePhrase> {
    session_chains(session)
        .into_iter()
        .filter(|chain| ends_with_preposition(chain, session.words()))
        .map(|chain| IncompletePhrase { chain, message: INCOMPLETE_PHRASE.to_string() })
        .collect()
}

/// Deletes every combination of the chain containing `combination`.
/// Returns the removed links.
pub fn remove_chain(session: &mut Session, combination: &Combination) -> Vec<Combination> {
    let Some(chain) = session_chains(session).into_iter().find(|chain| chain.contains(combination)) else {
        return Vec::new();
    };
    let removed: Vec<Combination> = chain
        .links
        .iter()
        .filter_map(|link| session.delete_combination(link.first, link.second))
        .collect();
    tracing::debug!(links = removed.len(), "chain removed");
    removed
}
