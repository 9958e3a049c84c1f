// Colored terminal output for analysis summaries and group inspection.
//
// main.rs delegates all formatting here so the commands stay short.

use colored::Colorize;

use super::truncate_chars;
use crate::pipeline::{AnalysisReport, GroupEvaluation, RemovalReason, Verdict};
use crate::scoring::ConceptTable;

/// Display the summary of an analysis run.
pub fn display_summary(report: &AnalysisReport) {
    let total = report.total_reviews();
    println!(
        "\n{}",
        format!(
            "=== Review Analysis ({} reviews, {} products) ===",
            total,
            report.groups.len()
        )
        .bold()
    );
    println!();

    let pct = |n: usize| {
        if total > 0 {
            n as f64 / total as f64 * 100.0
        } else {
            0.0
        }
    };

    println!(
        "  {:<24} {:>7}  {:>5.1}%",
        "Kept".green(),
        report.total_kept(),
        pct(report.total_kept())
    );
    println!(
        "  {:<24} {:>7}  {:>5.1}%",
        "Flagged: degenerate".red(),
        report.total_degenerate(),
        pct(report.total_degenerate())
    );
    println!(
        "  {:<24} {:>7}  {:>5.1}%",
        "Flagged: zero score".yellow(),
        report.total_zero_score(),
        pct(report.total_zero_score())
    );
    println!("  {}", "-".repeat(42).dimmed());
    println!(
        "  {:<24} {:>7}  {:>5.1}%",
        "Flagged total".bold(),
        report.flagged.len(),
        pct(report.flagged.len())
    );

    // Products where every review was flagged are worth a second look
    let wiped: Vec<&str> = report
        .groups
        .iter()
        .filter(|g| g.reviews > 1 && g.kept == 0)
        .map(|g| g.product_id.as_str())
        .collect();
    if !wiped.is_empty() {
        println!();
        println!(
            "  {} {} products had every review flagged: {}",
            "!".bright_red(),
            wiped.len(),
            truncate_chars(&wiped.join(", "), 80).dimmed()
        );
    }
}

/// Display one product group review by review, followed by its concept terms.
pub fn display_group(evaluation: &GroupEvaluation) {
    println!(
        "\n{}",
        format!(
            "=== Product {} ({} reviews) ===",
            evaluation.product_id,
            evaluation.reviews.len()
        )
        .bold()
    );
    if evaluation.scored_against_title {
        println!(
            "{}",
            "Single scorable review: scored against the product title.".dimmed()
        );
    }
    println!();

    println!(
        "  {:<16} {:<12} {:>8}  {}",
        "Review".dimmed(),
        "Verdict".dimmed(),
        "Score".dimmed(),
        "Cleaned text".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for review in &evaluation.reviews {
        let score = review
            .score
            .map(|s| format!("{s:.4}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<16} {:<12} {:>8}  {}",
            truncate_chars(&review.review_id, 16),
            colorize_verdict(review.verdict),
            score,
            truncate_chars(&review.cleaned, 60),
        );
    }

    match &evaluation.concepts {
        Some(concepts) => display_concepts(concepts),
        None => println!("\n  {}", "No reviews survived filtering; nothing scored.".dimmed()),
    }
}

/// Display a concept term table.
pub fn display_concepts(concepts: &ConceptTable) {
    println!();
    if concepts.is_empty() {
        println!("  {}", "Empty vocabulary: no concept terms.".yellow());
        return;
    }

    println!(
        "  {} (strength {:.3})",
        format!("Concept {}", concepts.component).bold(),
        concepts.singular_value
    );

    let max = concepts.terms.first().map(|t| t.weight).unwrap_or(0.0);
    let bar_width: usize = 20;
    for entry in &concepts.terms {
        let filled = if max > 0.0 {
            ((entry.weight / max) * bar_width as f64).round() as usize
        } else {
            0
        };
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled),
            " ".repeat(bar_width.saturating_sub(filled))
        );
        println!(
            "    {:<24} {} {:.4}",
            entry.term,
            bar.bright_green(),
            entry.weight
        );
    }
}

/// Display lexicon lookup results.
pub fn display_lookups(results: &[(String, bool)]) {
    for (word, known) in results {
        let status = if *known {
            "known".green()
        } else {
            "unknown".red()
        };
        println!("  {word:<24} {status}");
    }
}

fn colorize_verdict(verdict: Verdict) -> String {
    let label = format!("{:<12}", verdict.label());
    match verdict {
        Verdict::Kept => label.green().to_string(),
        Verdict::Removed(RemovalReason::Degenerate) => label.red().to_string(),
        Verdict::Removed(RemovalReason::ZeroScore) => label.yellow().to_string(),
    }
}
