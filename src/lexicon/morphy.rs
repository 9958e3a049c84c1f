// Base-form reduction using WordNet's detachment rules.
//
// WordNet only stores lemmas ("product", "work"), so inflected forms
// ("products", "worked") have to be reduced before lookup. The rules are
// suffix substitutions per part of speech. We don't know the part of speech
// of a lone review word, so candidates from every rule set are produced.

/// Noun detachment rules (suffix, replacement).
const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJ_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

/// Normalize a lookup query the way WordNet does: lowercase, trimmed,
/// internal spaces joined with underscores.
pub fn normalize_query(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Candidate base forms for an (already normalized) word, in rule order.
///
/// The word itself is not included. Candidates that would be empty are
/// skipped, and duplicates are dropped.
pub fn base_forms(word: &str) -> Vec<String> {
    let mut forms: Vec<String> = Vec::new();

    for (suffix, replacement) in NOUN_RULES.iter().chain(VERB_RULES).chain(ADJ_RULES) {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.is_empty() {
                continue;
            }
            let candidate = format!("{stem}{replacement}");
            if !forms.contains(&candidate) {
                forms.push(candidate);
            }
        }
    }

    forms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  Hello World "), "hello_world");
        assert_eq!(normalize_query("GREAT"), "great");
        assert_eq!(normalize_query(""), "");
    }

    #[test]
    fn test_plural_nouns() {
        assert!(base_forms("products").contains(&"product".to_string()));
        assert!(base_forms("boxes").contains(&"box".to_string()));
        assert!(base_forms("batteries").contains(&"battery".to_string()));
        assert!(base_forms("women").contains(&"woman".to_string()));
    }

    #[test]
    fn test_verb_and_adjective_forms() {
        assert!(base_forms("worked").contains(&"work".to_string()));
        assert!(base_forms("loved").contains(&"love".to_string()));
        assert!(base_forms("charging").contains(&"charge".to_string()));
        assert!(base_forms("cheapest").contains(&"cheap".to_string()));
    }

    #[test]
    fn test_no_empty_or_duplicate_candidates() {
        let forms = base_forms("s");
        assert!(forms.is_empty());

        let forms = base_forms("uses");
        let unique: std::collections::HashSet<_> = forms.iter().collect();
        assert_eq!(unique.len(), forms.len());
    }
}
