// Review body normalization.
//
// Strips everything that isn't a word character, drops digits, removes
// standalone single letters and collapses whitespace. The output is what the
// degeneracy filter and the semantic scorer both see, so the rules here
// decide what counts as a "word" for the whole pipeline.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").expect("static pattern"));
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("static pattern"));

/// A normalized review body together with its whitespace tokens.
///
/// Owned by the scoring pass that produced it and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedText {
    pub text: String,
    pub tokens: Vec<String>,
}

impl CleanedText {
    /// Normalize a raw review body and tokenize the result.
    pub fn from_raw(raw: &str) -> Self {
        let text = clean_text(raw);
        let tokens = tokenize(&text);
        Self { text, tokens }
    }

    /// Length of the cleaned text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Normalize a review body.
///
/// Non-word characters and digits become spaces, single-letter tokens are
/// removed wherever they appear, and whitespace runs collapse to a single
/// space with the ends trimmed. Never fails; empty input gives empty output.
pub fn clean_text(raw: &str) -> String {
    let text = NON_WORD.replace_all(raw, " ");
    let text = DIGIT.replace_all(&text, " ");

    text.split_whitespace()
        .filter(|token| !is_single_letter(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split cleaned text into whitespace-delimited tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

fn is_single_letter(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}
