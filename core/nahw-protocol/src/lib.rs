#![no_std] // Shared with the wasm facade

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod morphology;

pub use ids::{ArchId, ConnectionId, TagId, TagRef, WordId};
pub use morphology::*;

pub mod model;
pub use model::*;
