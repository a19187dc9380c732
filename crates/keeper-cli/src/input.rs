//! Parsing of typed menu input.

use anyhow::{anyhow, Result};
use keeper_core::PhraseLength;

/// Comma-separated when the line contains a comma (each part trimmed, empty
/// parts kept so the count check catches them), whitespace-separated
/// otherwise.
pub fn parse_words(line: &str) -> Vec<String> {
    if line.contains(',') {
        line.split(',').map(|w| w.trim().to_string()).collect()
    } else {
        line.split_whitespace().map(str::to_string).collect()
    }
}

/// Empty input picks the default of 24.
pub fn parse_length(input: &str) -> Result<PhraseLength> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(PhraseLength::default());
    }
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| PhraseLength::try_from(n).ok())
        .ok_or_else(|| anyhow!("invalid length"))
}

pub fn parse_wallet_id(input: &str) -> Result<i64> {
    input.trim().parse().map_err(|_| anyhow!("invalid ID"))
}

pub fn parse_index(input: &str) -> Result<usize> {
    input.trim().parse().map_err(|_| anyhow!("invalid index"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_split_on_commas_first() {
        assert_eq!(parse_words("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_words("a b, c"), vec!["a b", "c"]);
        assert_eq!(parse_words("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn words_split_on_whitespace() {
        assert_eq!(parse_words("  one two\tthree  "), vec!["one", "two", "three"]);
        assert!(parse_words("   ").is_empty());
    }

    #[test]
    fn length_choices() {
        assert_eq!(parse_length("").unwrap(), PhraseLength::TwentyFour);
        assert_eq!(parse_length(" 12 ").unwrap(), PhraseLength::Twelve);
        assert_eq!(parse_length("18").unwrap(), PhraseLength::Eighteen);
        assert!(parse_length("15").is_err());
        assert!(parse_length("twelve").is_err());
    }

    #[test]
    fn ids_and_indices() {
        assert_eq!(parse_wallet_id(" 7 ").unwrap(), 7);
        assert!(parse_wallet_id("x").is_err());
        assert_eq!(parse_index("3").unwrap(), 3);
        assert!(parse_index("-1").is_err());
    }
}
