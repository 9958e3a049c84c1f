// Text preparation — normalization and tokenization of review bodies.

pub mod normalize;

pub use normalize::{clean_text, tokenize, CleanedText};
