//! Word splitting over normalized text.
//!
//! Given normalized input like `"luz agua clorofila"`, the tokenizer emits each
//! word with its position:
//!
//! ```ignore
//! ("luz", 0)
//! ("agua", 1)
//! ("clorofila", 2)
//! ```
//!
//! Tokens are slices of the input. The tokenizer expects **pre-normalized**
//! input (see [`TextNormalizer`]): no leading or trailing space and no
//! consecutive spaces. Empty tokens are skipped regardless, so a violated
//! contract never produces empty words.

use core::str;
use memchr::memchr_iter;

use crate::analyzer::normalizer::TextNormalizer;

/// Splits normalized text on single spaces.
#[derive(Debug, Copy, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes normalized input and emits `(text, position)`.
    #[inline]
    pub fn tokenize<'n, F>(&self, normalized: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, u32),
    {
        let bytes = normalized.as_bytes();
        if bytes.is_empty() {
            return;
        }

        let mut start = 0usize;
        let mut pos = 0u32;

        for i in memchr_iter(b' ', bytes) {
            if start < i {
                // SAFETY: `normalized` is valid UTF-8 and we split only on ASCII
                // space, which is never a continuation byte.
                let text = unsafe { str::from_utf8_unchecked(&bytes[start..i]) };
                emit(text, pos);
                pos = pos.saturating_add(1);
            }
            start = i + 1;
        }

        if start < bytes.len() {
            // SAFETY: same invariant as above.
            let text = unsafe { str::from_utf8_unchecked(&bytes[start..]) };
            emit(text, pos);
        }
    }
}

/// Normalizes `text` and returns its words in order.
pub fn extract_words(normalizer: &TextNormalizer, text: &str) -> Vec<String> {
    let normalized = normalizer.normalize(text);
    let mut words = Vec::new();
    Tokenizer::new().tokenize(&normalized, |word, _| words.push(word.to_owned()));
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<(&str, u32)> {
        let mut out = Vec::new();
        Tokenizer::new().tokenize(input, |text, pos| out.push((text, pos)));
        out
    }

    #[test]
    fn single_word() {
        assert_eq!(collect("hola"), vec![("hola", 0)]);
    }

    #[test]
    fn positions_are_sequential() {
        let out = collect("el rapido zorro marron");
        assert_eq!(out.len(), 4);
        for (i, (_, pos)) in out.iter().enumerate() {
            assert_eq!(*pos, i as u32);
        }
    }

    #[test]
    fn empty_emits_nothing() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn stray_spaces_never_yield_empty_tokens() {
        let out = collect(" a  b ");
        assert_eq!(out, vec![("a", 0), ("b", 1)]);
    }

    #[test]
    fn multibyte_words_split_cleanly() {
        let out = collect("привет мир");
        assert_eq!(out, vec![("привет", 0), ("мир", 1)]);
    }

    #[test]
    fn extract_words_normalizes_first() {
        let n = TextNormalizer::default();
        assert_eq!(
            extract_words(&n, "  La LUZ, el agua... ¡y la Clorofila!  "),
            vec!["la", "luz", "el", "agua", "y", "la", "clorofila"]
        );
    }

    #[test]
    fn extract_words_of_blank_is_empty() {
        let n = TextNormalizer::default();
        assert!(extract_words(&n, "").is_empty());
        assert!(extract_words(&n, " ?! ").is_empty());
    }
}
