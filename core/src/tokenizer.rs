use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\S+").expect("valid regex");
}

/// A whitespace-delimited word of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word<'a> {
    /// The word as written, casing and punctuation intact.
    pub raw: &'a str,
    /// Normalized form; empty for words made only of punctuation.
    pub term: String,
}

impl Word<'_> {
    /// Whether the word takes a token position in the index.
    pub fn is_token(&self) -> bool { !self.term.is_empty() }
}

/// Lowercase a single word and drop every ASCII punctuation character.
pub fn normalize(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

/// Every whitespace-delimited word, punctuation-only ones included.
pub fn raw_words(text: &str) -> Vec<Word<'_>> {
    WORD.find_iter(text)
        .map(|m| Word { raw: m.as_str(), term: normalize(m.as_str()) })
        .collect()
}

/// The words that survive normalization.
///
/// The index of a word in the returned vec is its token position in the index.
pub fn words(text: &str) -> Vec<Word<'_>> {
    raw_words(text).into_iter().filter(|w| w.is_token()).collect()
}

/// Tokenize text: lowercase, strip ASCII punctuation, split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    words(text).into_iter().map(|w| w.term).collect()
}
