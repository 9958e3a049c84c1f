// Analysis pipeline — groups reviews by product and decides which to flag.

pub mod analyze;
pub mod flagged;

pub use analyze::{
    analyze_reviews, group_by_product, AnalysisReport, GroupCounts, GroupEvaluation,
    ProductGroup, RemovalReason, ReviewAnalyzer, ReviewEvaluation, Verdict,
};
pub use flagged::FlaggedReviews;
