// Salience scorer trait — swap-ready abstraction.
//
// The orchestrator only needs one real number per text, in input order, with
// zero meaning "contributes nothing to the group's theme". The default
// implementation is LSA; anything that honours that contract can replace it
// without touching the pipeline.

use serde::Serialize;

use super::lsa::ConceptTable;

/// Scores for one collection of texts, plus the concept table behind them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SalienceAnalysis {
    pub concepts: ConceptTable,
    /// One score per input text, same order
    pub scores: Vec<f64>,
}

/// Trait for assigning salience scores to the texts of one product group.
pub trait SalienceScorer: Send + Sync {
    /// Analyze the texts. Must return exactly one score per text and must
    /// not panic on empty or vocabulary-free input.
    fn analyze(&self, texts: &[String]) -> SalienceAnalysis;

    /// Scores only, in input order.
    fn score(&self, texts: &[String]) -> Vec<f64> {
        self.analyze(texts).scores
    }
}
