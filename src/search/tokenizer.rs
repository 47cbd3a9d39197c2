//! Word tokenizer
//!
//! Splits on Unicode word boundaries (UAX #29) and lowercases each word.
//! No morphology: isiZulu agglutination is left intact, "ngiyabonga" is one token.

use unicode_segmentation::{UWordBounds, UnicodeSegmentation};

/// Lazy token stream over a borrowed string
#[derive(Clone)]
pub struct Tokens<'a> {
    bounds: UWordBounds<'a>,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        // Segments without a letter or digit are whitespace/punctuation
        self.bounds
            .by_ref()
            .find(|segment| segment.chars().any(char::is_alphanumeric))
            .map(str::to_lowercase)
    }
}

/// Tokenize text into lowercase words.
///
/// Calling this again on the same text restarts the sequence.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens {
        bounds: text.split_word_bounds(),
    }
}
