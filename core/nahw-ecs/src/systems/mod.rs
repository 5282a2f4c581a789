pub mod arches;
pub mod combination;
pub mod consistency;
pub mod logical;
pub mod sentence_model;
