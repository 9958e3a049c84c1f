// Review analysis: per-product grouping, degeneracy short-circuit, LSA scoring.
//
// Every review walks the same path:
//
//   unvisited → degenerate?  yes → removed (degenerate)
//                            no  → pending score → zero?  yes → removed (zero score)
//                                                         no  → kept
//
// Products are scored independently. Each group gets a fresh TF-IDF space and
// decomposition, so one product's vocabulary never affects another's scores.
// A group whose reviews are all degenerate is never scored. A group with a
// single surviving review is scored against its product title, because a
// one-document decomposition would trivially give the review a high score.

use std::collections::HashMap;

use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{debug, info};

use super::flagged::FlaggedReviews;
use crate::dataset::ReviewRecord;
use crate::lexicon::Lexicon;
use crate::scoring::tfidf::has_terms;
use crate::scoring::{is_degenerate, ConceptTable, LsaScorer, SalienceScorer};
use crate::text::CleanedText;

/// Why a review was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RemovalReason {
    /// Too short or meaningless to score
    Degenerate,
    /// Shares nothing with the product's dominant concept
    ZeroScore,
}

/// Terminal decision for one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Kept,
    Removed(RemovalReason),
}

impl Verdict {
    pub fn is_removed(&self) -> bool {
        matches!(self, Verdict::Removed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Kept => "kept",
            Verdict::Removed(RemovalReason::Degenerate) => "degenerate",
            Verdict::Removed(RemovalReason::ZeroScore) => "zero score",
        }
    }
}

/// All reviews sharing one product id, in dataset order.
#[derive(Debug, Clone)]
pub struct ProductGroup<'a> {
    pub product_id: &'a str,
    pub reviews: Vec<&'a ReviewRecord>,
}

/// How one review fared inside its group.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewEvaluation {
    pub review_id: String,
    /// Normalized review body
    pub cleaned: String,
    pub verdict: Verdict,
    /// LSA score; `None` for degenerate reviews, which are never scored
    pub score: Option<f64>,
}

/// Full evaluation of one product group.
///
/// Scores and the concept table are kept here for inspection only; the
/// analysis itself only exports decisions.
#[derive(Debug, Clone, Serialize)]
pub struct GroupEvaluation {
    pub product_id: String,
    pub reviews: Vec<ReviewEvaluation>,
    /// `None` when nothing survived the degeneracy filter
    pub concepts: Option<ConceptTable>,
    /// Whether the single-survivor fallback (review vs. title) was used
    pub scored_against_title: bool,
}

impl GroupEvaluation {
    pub fn counts(&self) -> GroupCounts {
        let count = |v: Verdict| self.reviews.iter().filter(|r| r.verdict == v).count();
        GroupCounts {
            product_id: self.product_id.clone(),
            reviews: self.reviews.len(),
            degenerate: count(Verdict::Removed(RemovalReason::Degenerate)),
            zero_score: count(Verdict::Removed(RemovalReason::ZeroScore)),
            kept: count(Verdict::Kept),
        }
    }
}

/// Per-product tallies. `reviews == degenerate + zero_score + kept`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCounts {
    pub product_id: String,
    pub reviews: usize,
    pub degenerate: usize,
    pub zero_score: usize,
    pub kept: usize,
}

/// Result of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub flagged: FlaggedReviews,
    pub groups: Vec<GroupCounts>,
}

impl AnalysisReport {
    pub fn total_reviews(&self) -> usize {
        self.groups.iter().map(|g| g.reviews).sum()
    }

    pub fn total_degenerate(&self) -> usize {
        self.groups.iter().map(|g| g.degenerate).sum()
    }

    pub fn total_zero_score(&self) -> usize {
        self.groups.iter().map(|g| g.zero_score).sum()
    }

    pub fn total_kept(&self) -> usize {
        self.groups.iter().map(|g| g.kept).sum()
    }
}

/// Partition reviews by product id.
///
/// Groups come out in order of each product's first appearance; reviews keep
/// dataset order within a group.
pub fn group_by_product(records: &[ReviewRecord]) -> Vec<ProductGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<ProductGroup<'_>> = Vec::new();

    for record in records {
        let idx = *index.entry(record.product_id.as_str()).or_insert_with(|| {
            groups.push(ProductGroup {
                product_id: record.product_id.as_str(),
                reviews: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].reviews.push(record);
    }

    groups
}

/// Runs the per-product analysis with an injected lexicon and scorer.
///
/// Holds no state between calls, so one analyzer can serve any number of
/// datasets.
pub struct ReviewAnalyzer<'a> {
    lexicon: &'a dyn Lexicon,
    scorer: &'a dyn SalienceScorer,
}

impl<'a> ReviewAnalyzer<'a> {
    pub fn new(lexicon: &'a dyn Lexicon, scorer: &'a dyn SalienceScorer) -> Self {
        Self { lexicon, scorer }
    }

    /// Analyze a whole dataset.
    pub fn run(&self, records: &[ReviewRecord]) -> AnalysisReport {
        self.run_with_progress(records, &ProgressBar::hidden())
    }

    /// Analyze a whole dataset, advancing `progress` once per product.
    pub fn run_with_progress(&self, records: &[ReviewRecord], progress: &ProgressBar) -> AnalysisReport {
        let groups = group_by_product(records);
        progress.set_length(groups.len() as u64);

        let mut flagged = FlaggedReviews::new();
        let mut counts = Vec::with_capacity(groups.len());

        for group in &groups {
            let evaluation = self.evaluate_group(group);
            for review in &evaluation.reviews {
                if review.verdict.is_removed() {
                    flagged.insert(&review.review_id);
                }
            }
            counts.push(evaluation.counts());
            progress.inc(1);
        }

        info!(
            reviews = records.len(),
            products = groups.len(),
            flagged = flagged.len(),
            "Review analysis complete"
        );

        AnalysisReport {
            flagged,
            groups: counts,
        }
    }

    /// Evaluate a single product group.
    pub fn evaluate_group(&self, group: &ProductGroup<'_>) -> GroupEvaluation {
        let mut reviews: Vec<ReviewEvaluation> = Vec::with_capacity(group.reviews.len());
        // (position in `reviews`, record) for every non-degenerate review
        let mut survivors: Vec<(usize, &ReviewRecord)> = Vec::new();

        for &record in &group.reviews {
            let cleaned = CleanedText::from_raw(&record.review_body);
            let degenerate = is_degenerate(&cleaned, self.lexicon);
            if !degenerate {
                survivors.push((reviews.len(), record));
            }
            reviews.push(ReviewEvaluation {
                review_id: record.review_id.clone(),
                cleaned: cleaned.text,
                verdict: Verdict::Removed(RemovalReason::Degenerate),
                score: None,
            });
        }

        let mut evaluation = GroupEvaluation {
            product_id: group.product_id.to_string(),
            reviews,
            concepts: None,
            scored_against_title: false,
        };

        if survivors.is_empty() {
            debug!(product_id = group.product_id, "No scorable reviews, skipping group");
            return evaluation;
        }

        if let [(pos, record)] = survivors.as_slice() {
            if !has_terms(&record.product_title) {
                // Nothing in the title to overlap with
                debug!(product_id = group.product_id, "Product title has no terms");
                evaluation.scored_against_title = true;
                let review = &mut evaluation.reviews[*pos];
                review.score = Some(0.0);
                review.verdict = Verdict::Removed(RemovalReason::ZeroScore);
                return evaluation;
            }
        }

        let (texts, scored) = if let [(pos, record)] = survivors.as_slice() {
            // Second document gives the decomposition something to compare to
            evaluation.scored_against_title = true;
            let texts = vec![
                evaluation.reviews[*pos].cleaned.clone(),
                record.product_title.clone(),
            ];
            (texts, 1)
        } else {
            let texts = survivors
                .iter()
                .map(|(pos, _)| evaluation.reviews[*pos].cleaned.clone())
                .collect();
            (texts, survivors.len())
        };

        let analysis = self.scorer.analyze(&texts);

        for (i, (pos, _)) in survivors.iter().enumerate().take(scored) {
            let score = analysis.scores.get(i).copied().unwrap_or(0.0);
            let review = &mut evaluation.reviews[*pos];
            review.score = Some(score);
            review.verdict = if score == 0.0 {
                Verdict::Removed(RemovalReason::ZeroScore)
            } else {
                Verdict::Kept
            };
        }

        debug!(
            product_id = group.product_id,
            reviews = evaluation.reviews.len(),
            scored = survivors.len(),
            "Scored product group"
        );

        evaluation.concepts = Some(analysis.concepts);
        evaluation
    }
}

/// Flag low-information reviews using the default LSA scorer.
pub fn analyze_reviews(records: &[ReviewRecord], lexicon: &dyn Lexicon) -> FlaggedReviews {
    let scorer = LsaScorer::default();
    ReviewAnalyzer::new(lexicon, &scorer).run(records).flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::WordSet;
    use crate::scoring::SalienceAnalysis;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn lexicon() -> WordSet {
        WordSet::from_words(["bad", "great", "good", "awesome"])
    }

    /// Counts invocations and scores every text 1.0.
    #[derive(Default)]
    struct CountingScorer {
        calls: AtomicUsize,
    }

    impl SalienceScorer for CountingScorer {
        fn analyze(&self, texts: &[String]) -> SalienceAnalysis {
            self.calls.fetch_add(1, Ordering::SeqCst);
            SalienceAnalysis {
                concepts: ConceptTable::default(),
                scores: vec![1.0; texts.len()],
            }
        }
    }

    #[test]
    fn test_grouping_preserves_first_appearance_order() {
        let records = vec![
            ReviewRecord::new("r1", "p2", "a", "t"),
            ReviewRecord::new("r2", "p1", "b", "t"),
            ReviewRecord::new("r3", "p2", "c", "t"),
        ];
        let groups = group_by_product(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].product_id, "p2");
        assert_eq!(groups[0].reviews.len(), 2);
        assert_eq!(groups[0].reviews[1].review_id, "r3");
        assert_eq!(groups[1].product_id, "p1");
    }

    #[test]
    fn test_all_degenerate_group_never_scored() {
        let scorer = CountingScorer::default();
        let lex = lexicon();
        let analyzer = ReviewAnalyzer::new(&lex, &scorer);
        let records = vec![
            ReviewRecord::new("r1", "p1", "x", "Widget"),
            ReviewRecord::new("r2", "p1", "!!!", "Widget"),
        ];

        let report = analyzer.run(&records);
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(report.flagged.len(), 2);
        assert_eq!(report.groups[0].degenerate, 2);
    }

    #[test]
    fn test_single_survivor_scored_with_title() {
        let lex = lexicon();
        let scorer = LsaScorer::default();
        let analyzer = ReviewAnalyzer::new(&lex, &scorer);
        let records = vec![ReviewRecord::new("r1", "p1", "great blender", "Acme Blender")];

        let groups = group_by_product(&records);
        let eval = analyzer.evaluate_group(&groups[0]);
        assert!(eval.scored_against_title);
        assert_eq!(eval.reviews[0].verdict, Verdict::Kept);
        assert!(eval.reviews[0].score.unwrap() > 0.0);
    }

    #[test]
    fn test_single_survivor_without_title_overlap_flagged() {
        let lex = lexicon();
        let scorer = LsaScorer::default();
        let analyzer = ReviewAnalyzer::new(&lex, &scorer);
        let records = vec![ReviewRecord::new("r1", "p1", "nice thing", "Acme Blender")];

        let flagged = analyzer.run(&records).flagged;
        assert!(flagged.contains("r1"));
    }

    #[test]
    fn test_single_survivor_with_termless_title_flagged() {
        let lex = lexicon();
        let scorer = LsaScorer::default();
        let analyzer = ReviewAnalyzer::new(&lex, &scorer);

        for title in ["", "X 5", "!!!"] {
            let records = vec![ReviewRecord::new("r1", "p1", "nice thing", title)];
            let groups = group_by_product(&records);
            let eval = analyzer.evaluate_group(&groups[0]);
            assert!(eval.scored_against_title);
            assert_eq!(eval.reviews[0].score, Some(0.0), "title {title:?}");
            assert_eq!(
                eval.reviews[0].verdict,
                Verdict::Removed(RemovalReason::ZeroScore),
                "title {title:?}"
            );
        }
    }

    #[test]
    fn test_single_survivor_uses_its_own_text() {
        // The survivor comes first; the degenerate review after it must not
        // leak into the scored text.
        let lex = lexicon();
        let scorer = LsaScorer::default();
        let analyzer = ReviewAnalyzer::new(&lex, &scorer);
        let records = vec![
            ReviewRecord::new("r1", "p1", "sturdy blender", "Acme Blender"),
            ReviewRecord::new("r2", "p1", "zz", "Acme Blender"),
        ];

        let groups = group_by_product(&records);
        let eval = analyzer.evaluate_group(&groups[0]);
        assert_eq!(eval.reviews[0].verdict, Verdict::Kept);
        assert_eq!(eval.reviews[1].verdict, Verdict::Removed(RemovalReason::Degenerate));
    }

    #[test]
    fn test_concrete_scenario() {
        let lex = lexicon();
        let records = vec![
            ReviewRecord::new("R1", "P", "great product amazing quality", "Thing"),
            ReviewRecord::new("R2", "P", "bad", "Thing"),
            ReviewRecord::new("R3", "P", "great amazing quality works well", "Thing"),
        ];

        let flagged = analyze_reviews(&records, &lex);
        assert!(flagged.contains("R2"));
        assert!(!flagged.contains("R1"));
        assert!(!flagged.contains("R3"));
    }

    #[test]
    fn test_counts_add_up() {
        let lex = lexicon();
        let scorer = LsaScorer::default();
        let analyzer = ReviewAnalyzer::new(&lex, &scorer);
        let records = vec![
            ReviewRecord::new("r1", "p1", "great product amazing quality", "Thing"),
            ReviewRecord::new("r2", "p1", "x", "Thing"),
            ReviewRecord::new("r3", "p1", "unrelated words entirely", "Thing"),
            ReviewRecord::new("r4", "p2", "", "Other"),
        ];

        let report = analyzer.run(&records);
        for g in &report.groups {
            assert_eq!(g.reviews, g.degenerate + g.zero_score + g.kept);
        }
        assert_eq!(report.total_reviews(), 4);
        assert_eq!(
            report.flagged.len(),
            report.total_degenerate() + report.total_zero_score()
        );
    }
}
