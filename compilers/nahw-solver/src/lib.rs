pub mod chains;
pub mod graph;

pub use chains::{
    build_chains, chain_style, ends_with_preposition, incomplete_phrases, remove_chain, session_chains, Chain,
    ChainStyle, IncompletePhrase, INCOMPLETE_PHRASE,
};
pub use graph::TagGraph;
