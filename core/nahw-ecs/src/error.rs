use nahw_protocol::{ArchId, ConnectionId, TagRef, WordId};
use thiserror::Error;

/// Reference failures. Grammatical verdicts are never errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("word {0} not found")]
    WordNotFound(WordId),

    #[error("tag {0} not found")]
    TagNotFound(TagRef),

    #[error("arch {0} not found")]
    ArchNotFound(ArchId),

    #[error("logical connection {0} not found")]
    ConnectionNotFound(ConnectionId),

    #[error("an arch already spans {0} and {1}")]
    DuplicateArch(WordId, WordId),

    #[error("arch {0} is already the main roof")]
    MainRoofTaken(ArchId),

    #[error("logical connection rejected: {0}")]
    InvalidConnection(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
