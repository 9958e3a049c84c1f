// Latent semantic analysis scorer.
//
// For one product group: TF-IDF over the texts, a one-component truncated
// SVD, the top-weighted terms of that component (the concept term table),
// and finally a score per text that sums the table weights of the tokens it
// contains. A text sharing no vocabulary with the dominant concept scores
// exactly zero.

use serde::Serialize;
use tracing::{debug, warn};

use super::svd::leading_component;
use super::tfidf::TfIdfMatrix;
use super::traits::{SalienceAnalysis, SalienceScorer};

/// One row of the concept term table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptTerm {
    pub term: String,
    pub weight: f64,
}

/// The top-weighted terms of a group's dominant latent concept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConceptTable {
    /// Component index; there is only ever one component
    pub component: usize,
    /// Strength of the concept (leading singular value)
    pub singular_value: f64,
    /// Terms in descending weight order
    pub terms: Vec<ConceptTerm>,
}

impl ConceptTable {
    /// Sum of the weights of every token that appears in the table.
    ///
    /// Tokens are compared exactly. The vocabulary is lowercase, so a
    /// capitalized token never matches.
    pub fn score_tokens<'a, I>(&self, tokens: I) -> f64
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut score = 0.0;
        for token in tokens {
            for entry in &self.terms {
                if entry.term == token {
                    score += entry.weight;
                }
            }
        }
        score
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// LSA-based salience scorer — the default.
#[derive(Debug, Clone)]
pub struct LsaScorer {
    /// Size of the concept term table
    pub top_terms: usize,
    /// Power-iteration budget for the SVD
    pub iterations: usize,
}

impl Default for LsaScorer {
    fn default() -> Self {
        Self {
            top_terms: 10,
            iterations: 100,
        }
    }
}

impl LsaScorer {
    /// Build the concept term table for a collection of texts.
    ///
    /// Empty when the texts share no vocabulary at all.
    pub fn concept_table(&self, texts: &[String]) -> ConceptTable {
        let matrix = TfIdfMatrix::fit(texts);
        let Some(component) = leading_component(&matrix, self.iterations) else {
            return ConceptTable::default();
        };

        let mut ranked: Vec<(usize, f64)> = component.weights.iter().copied().enumerate().collect();
        // Stable sort: equal weights keep vocabulary order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(self.top_terms);

        ConceptTable {
            component: 0,
            singular_value: component.singular_value,
            terms: ranked
                .into_iter()
                .map(|(j, weight)| ConceptTerm {
                    term: matrix.vocabulary[j].clone(),
                    weight,
                })
                .collect(),
        }
    }
}

impl SalienceScorer for LsaScorer {
    fn analyze(&self, texts: &[String]) -> SalienceAnalysis {
        if texts.is_empty() {
            return SalienceAnalysis::default();
        }

        let concepts = self.concept_table(texts);
        if concepts.is_empty() {
            warn!(
                texts = texts.len(),
                "Empty vocabulary for LSA, every text scores zero"
            );
            return SalienceAnalysis {
                concepts,
                scores: vec![0.0; texts.len()],
            };
        }

        debug!(
            top_term = %concepts.terms[0].term,
            top_weight = concepts.terms[0].weight,
            sigma = concepts.singular_value,
            "Built concept term table"
        );

        let scores = texts
            .iter()
            .map(|text| concepts.score_tokens(text.split_whitespace()))
            .collect();

        SalienceAnalysis { concepts, scores }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_table_truncated_and_sorted() {
        let scorer = LsaScorer {
            top_terms: 3,
            iterations: 100,
        };
        let table = scorer.concept_table(&texts(&[
            "battery life excellent charging fast",
            "battery charging slow but life decent",
        ]));
        assert_eq!(table.terms.len(), 3);
        for pair in table.terms.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
    }

    #[test]
    fn test_disjoint_text_scores_zero() {
        let scorer = LsaScorer::default();
        let analysis = scorer.analyze(&texts(&[
            "great product amazing quality",
            "bad",
            "great amazing quality works well",
        ]));
        assert_eq!(analysis.scores.len(), 3);
        assert!(analysis.scores[0] > 0.0);
        assert_eq!(analysis.scores[1], 0.0);
        assert!(analysis.scores[2] > 0.0);
    }

    #[test]
    fn test_repeated_tokens_accumulate() {
        let table = ConceptTable {
            component: 0,
            singular_value: 1.0,
            terms: vec![ConceptTerm {
                term: "great".to_string(),
                weight: 0.5,
            }],
        };
        assert!((table.score_tokens(["great", "meh", "great"]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_capitalized_tokens_do_not_match() {
        let table = ConceptTable {
            component: 0,
            singular_value: 1.0,
            terms: vec![ConceptTerm {
                term: "great".to_string(),
                weight: 0.5,
            }],
        };
        assert_eq!(table.score_tokens(["Great", "GREAT"]), 0.0);
    }

    #[test]
    fn test_empty_vocabulary_scores_all_zero() {
        let analysis = LsaScorer::default().analyze(&texts(&["", "!!"]));
        assert!(analysis.concepts.is_empty());
        assert_eq!(analysis.scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_input() {
        let analysis = LsaScorer::default().analyze(&[]);
        assert!(analysis.scores.is_empty());
    }

    #[test]
    fn test_tokens_outside_top_terms_score_zero() {
        let scorer = LsaScorer {
            top_terms: 1,
            iterations: 100,
        };
        let analysis = scorer.analyze(&texts(&["apple apple apple banana", "apple cherry"]));
        let top = &analysis.concepts.terms[0].term;
        assert_eq!(top, "apple");
        assert!(analysis.scores.iter().all(|&s| s > 0.0));

        let analysis = scorer.analyze(&texts(&["apple apple apple", "apple cherry", "cherry"]));
        assert_eq!(analysis.concepts.terms.len(), 1);
    }
}
