//! Input validation, run before any key is derived.

use crate::error::{CoreError, Result};

/// Supported recovery phrase lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PhraseLength {
    Twelve,
    Eighteen,
    #[default]
    TwentyFour,
}

impl PhraseLength {
    pub const ALL: [PhraseLength; 3] = [Self::Twelve, Self::Eighteen, Self::TwentyFour];

    pub fn words(self) -> usize {
        match self {
            Self::Twelve => 12,
            Self::Eighteen => 18,
            Self::TwentyFour => 24,
        }
    }
}

impl TryFrom<usize> for PhraseLength {
    type Error = CoreError;

    fn try_from(n: usize) -> Result<Self> {
        match n {
            12 => Ok(Self::Twelve),
            18 => Ok(Self::Eighteen),
            24 => Ok(Self::TwentyFour),
            other => Err(CoreError::InvalidPhraseLength(other)),
        }
    }
}

impl std::fmt::Display for PhraseLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.words())
    }
}

/// Digits only, at least one.
pub fn validate_pin(pin: &str) -> Result<()> {
    if !pin.is_empty() && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(CoreError::InvalidPin)
    }
}

/// Length in {12, 18, 24} and no blank word. Positions are 1-based.
pub fn validate_words<S: AsRef<str>>(words: &[S]) -> Result<PhraseLength> {
    let len = PhraseLength::try_from(words.len())?;
    if let Some(position) = words.iter().position(|w| w.as_ref().trim().is_empty()) {
        return Err(CoreError::BlankWord {
            position: position + 1,
        });
    }
    Ok(len)
}
