// TF-IDF document-term matrix for one product group.
//
// Each call builds its own vocabulary from the texts it is given and nothing
// survives the call, so groups never share term statistics.
//
// Weighting: raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`, and
// every document row scaled to unit L2 norm. Terms are lowercased runs of two
// or more word characters, and the vocabulary is sorted so column order only
// depends on the set of terms.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

static TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("static pattern"));

/// Sparse, row-normalized TF-IDF matrix.
#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    /// Sorted vocabulary; column `j` is `vocabulary[j]`
    pub vocabulary: Vec<String>,
    /// One sparse row per document: (column, weight), ascending by column
    pub rows: Vec<Vec<(usize, f64)>>,
}

impl TfIdfMatrix {
    /// Build the matrix from raw document texts.
    pub fn fit(texts: &[String]) -> Self {
        let counts: Vec<BTreeMap<String, usize>> = texts.iter().map(|t| term_counts(t)).collect();

        let vocabulary: Vec<String> = counts
            .iter()
            .flat_map(|c| c.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let column: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(j, term)| (term.as_str(), j))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for doc in &counts {
            for term in doc.keys() {
                document_frequency[column[term.as_str()]] += 1;
            }
        }

        let n_docs = texts.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|doc| {
                let mut row: Vec<(usize, f64)> = doc
                    .iter()
                    .map(|(term, &tf)| {
                        let j = column[term.as_str()];
                        (j, tf as f64 * idf[j])
                    })
                    .collect();
                // BTreeMap iteration is term order, which is column order
                let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in &mut row {
                        *w /= norm;
                    }
                }
                row
            })
            .collect();

        Self { vocabulary, rows }
    }

    pub fn n_docs(&self) -> usize {
        self.rows.len()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty_vocabulary(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

/// Whether the text has at least one vocabulary term.
pub fn has_terms(text: &str) -> bool {
    TERM.is_match(text)
}

/// Count lowercased terms in one document.
fn term_counts(text: &str) -> BTreeMap<String, usize> {
    let lower = text.to_lowercase();
    let mut counts = BTreeMap::new();
    for m in TERM.find_iter(&lower) {
        *counts.entry(m.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_vocabulary_sorted_and_lowercased() {
        let m = TfIdfMatrix::fit(&docs(&["Zebra apple", "apple Mango"]));
        assert_eq!(m.vocabulary, vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_single_char_terms_ignored() {
        let m = TfIdfMatrix::fit(&docs(&["a b cd", "Acme Blender 3000!"]));
        assert_eq!(m.vocabulary, vec!["3000", "acme", "blender", "cd"]);
    }

    #[test]
    fn test_rows_are_unit_norm() {
        let m = TfIdfMatrix::fit(&docs(&["great great product", "great value", "fine"]));
        for row in &m.rows {
            let norm: f64 = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-12, "row norm {norm}");
        }
    }

    #[test]
    fn test_smoothed_idf_weights() {
        // "shared" appears in both docs: idf = ln(3/3) + 1 = 1
        // "only" appears in one:        idf = ln(3/2) + 1
        let m = TfIdfMatrix::fit(&docs(&["shared only", "shared"]));
        let row = &m.rows[0];
        let only = row[0].1;
        let shared = row[1].1;
        let expected_ratio = (1.5f64).ln() + 1.0;
        assert!(((only / shared) - expected_ratio).abs() < 1e-12);
        assert_eq!(m.rows[1], vec![(1, 1.0)]);
    }

    #[test]
    fn test_empty_vocabulary() {
        let m = TfIdfMatrix::fit(&docs(&["", "x"]));
        assert!(m.is_empty_vocabulary());
        assert_eq!(m.n_docs(), 2);
        assert!(m.rows.iter().all(|r| r.is_empty()));
    }
}
