// Review scoring — degeneracy short-circuit and per-group LSA salience.

pub mod degeneracy;
pub mod lsa;
pub mod svd;
pub mod tfidf;
pub mod traits;

pub use degeneracy::is_degenerate;
pub use lsa::{ConceptTable, ConceptTerm, LsaScorer};
pub use traits::{SalienceAnalysis, SalienceScorer};
