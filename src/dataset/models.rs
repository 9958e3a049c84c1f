// Review records — the rows the analysis consumes.

use serde::Serialize;

/// One product review.
///
/// Input data only. The analysis never mutates records; callers annotate
/// their own rows from the flagged set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRecord {
    /// Unique key within a dataset
    pub review_id: String,
    pub product_id: String,
    /// Raw review text, possibly empty
    pub review_body: String,
    pub product_title: String,
}

impl ReviewRecord {
    pub fn new(
        review_id: impl Into<String>,
        product_id: impl Into<String>,
        review_body: impl Into<String>,
        product_title: impl Into<String>,
    ) -> Self {
        Self {
            review_id: review_id.into(),
            product_id: product_id.into(),
            review_body: review_body.into(),
            product_title: product_title.into(),
        }
    }
}
