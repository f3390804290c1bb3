//! Tokenizers that turn raw text into element sets.
//!
//! The join core only consumes element sets; these helpers cover the two
//! common ways of producing them from strings. Anything fancier (stemming,
//! per-field normalization) belongs to the caller.

use std::collections::HashSet;

/// Split on whitespace, dropping empty tokens.
///
/// # Example
///
/// ```
/// use simjoin::tokenize::whitespace_tokens;
///
/// let tokens = whitespace_tokens("a  b c");
/// assert_eq!(tokens.len(), 3);
/// ```
#[must_use]
pub fn whitespace_tokens(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Character q-grams of `text`.
///
/// With `padded` the text is lowercased and wrapped in `_` markers so that
/// leading and trailing characters weigh as much as inner ones. Inputs
/// shorter than `q` yield the whole (possibly padded) string as a single
/// token.
///
/// # Example
///
/// ```
/// use simjoin::tokenize::qgram_tokens;
///
/// let grams = qgram_tokens("abcd", 3, false);
/// assert!(grams.contains("abc") && grams.contains("bcd"));
/// ```
#[must_use]
pub fn qgram_tokens(text: &str, q: usize, padded: bool) -> HashSet<String> {
    let text = if padded {
        format!("_{}_", text.to_lowercase())
    } else {
        text.to_string()
    };

    let chars: Vec<char> = text.chars().collect();
    if q == 0 || chars.len() < q {
        return std::iter::once(text).collect();
    }

    chars.windows(q).map(|w| w.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_tokens_deduplicate() {
        let tokens = whitespace_tokens("a b a\tb\nc");
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_whitespace_tokens_empty_input() {
        assert!(whitespace_tokens("   ").is_empty());
        assert!(whitespace_tokens("").is_empty());
    }

    #[test]
    fn test_qgram_tokens_unpadded() {
        let grams = qgram_tokens("abcd", 2, false);
        let expected: HashSet<String> =
            ["ab", "bc", "cd"].iter().map(|s| s.to_string()).collect();
        assert_eq!(grams, expected);
    }

    #[test]
    fn test_qgram_tokens_padded_lowercases() {
        let grams = qgram_tokens("Ab", 3, true);
        assert!(grams.contains("_ab"));
        assert!(grams.contains("ab_"));
    }

    #[test]
    fn test_short_input_is_a_single_token() {
        let grams = qgram_tokens("ab", 3, false);
        assert_eq!(grams.len(), 1);
        assert!(grams.contains("ab"));
    }
}
