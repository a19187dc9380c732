use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("phrase length must be 12, 18, or 24 (got {0})")]
    InvalidPhraseLength(usize),

    #[error("words must be non-empty (word {position} is blank)")]
    BlankWord { position: usize },

    #[error("PIN must be digits only")]
    InvalidPin,

    #[error("stored slot {slot} does not fit a phrase of {len} words")]
    SlotOutOfRange { slot: usize, len: usize },

    #[error("index out of range: {index} not in 1..={len}")]
    IndexOutOfRange { index: usize, len: usize },
}
