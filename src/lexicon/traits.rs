// Lexicon trait — swap-ready abstraction over the dictionary service.
//
// The pipeline only ever asks one question: does this word mean anything?
// Hosts can plug in their own dictionary, and tests use a small in-memory
// word set instead of a full WordNet install.

/// A word-sense lookup service.
pub trait Lexicon: Send + Sync {
    /// Whether `word` has at least one recognized sense.
    fn has_sense(&self, word: &str) -> bool;
}

impl<T: Lexicon + ?Sized> Lexicon for &T {
    fn has_sense(&self, word: &str) -> bool {
        (**self).has_sense(word)
    }
}

impl<T: Lexicon + ?Sized> Lexicon for std::sync::Arc<T> {
    fn has_sense(&self, word: &str) -> bool {
        (**self).has_sense(word)
    }
}
