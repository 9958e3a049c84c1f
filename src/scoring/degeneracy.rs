// Degeneracy filter — catches reviews too short to score.
//
// A review that cleans down to nothing, a single character, or one word with
// no dictionary sense carries no signal. It is flagged straight away and
// never enters the LSA pool.

use crate::lexicon::Lexicon;
use crate::text::CleanedText;

/// Whether a cleaned review is degenerate (flag without scoring).
///
/// Degenerate means at most one token AND either at most one character or
/// no recognized sense. A single dictionary word is not degenerate. The
/// lexicon is only consulted for single-token texts longer than one char.
pub fn is_degenerate(cleaned: &CleanedText, lexicon: &dyn Lexicon) -> bool {
    cleaned.tokens.len() <= 1 && (cleaned.char_len() <= 1 || !lexicon.has_sense(&cleaned.text))
}
