// Word-sense lookup — decides whether a lone word is a recognizable
// dictionary word.
//
// The degeneracy filter only needs a yes/no answer, so everything sits behind
// the Lexicon trait. The bundled implementation reads a WordNet dictionary
// (or a plain word list) once, lazily, and answers lookups from memory.

pub mod lazy;
pub mod morphy;
pub mod traits;
pub mod wordset;

pub use lazy::LazyLexicon;
pub use traits::Lexicon;
pub use wordset::WordSet;
