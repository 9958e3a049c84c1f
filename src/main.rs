use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use shill::config::Config;
use shill::dataset::{results_path, ReviewTable};
use shill::lexicon::{LazyLexicon, Lexicon};
use shill::pipeline::{group_by_product, ReviewAnalyzer};
use shill::scoring::LsaScorer;

/// Shill: flag low-information product reviews.
///
/// Groups reviews by product, drops ones too short to mean anything, and
/// scores the rest against each product's dominant latent concept. Reviews
/// that share nothing with it are flagged.
#[derive(Parser)]
#[command(name = "shill", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a review CSV and write it back with a fake_review column
    Analyze {
        /// CSV with review_id, product_id, review_body and product_title columns
        input: PathBuf,

        /// Where to write the annotated CSV (default: results_<input> next to the input)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write the flagged review ids as a JSON array
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Show how every review of one product was cleaned, scored and judged
    Inspect {
        /// CSV with review_id, product_id, review_body and product_title columns
        input: PathBuf,

        /// The product id to inspect
        #[arg(long)]
        product: String,
    },

    /// Check whether words are recognized by the configured lexicon
    Lookup {
        /// Words to look up
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Show configuration and lexicon status
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shill=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            json,
        } => {
            let config = Config::load()?;
            let lexicon = load_lexicon(&config)?;

            println!("Loading reviews from {}...", input.display());
            let table = ReviewTable::load(&input)?;
            if table.is_empty() {
                println!("No reviews found in {}.", input.display());
                return Ok(());
            }
            let records = table.records();

            let scorer = scorer_from(&config);
            let analyzer = ReviewAnalyzer::new(&lexicon, &scorer);

            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Products [{bar:30}] {pos}/{len} ({eta})")?,
            );
            let report = analyzer.run_with_progress(&records, &pb);
            pb.finish_and_clear();

            let output_path = output.unwrap_or_else(|| results_path(&input));
            table.save_annotated(&output_path, &report.flagged)?;

            if let Some(json_path) = json {
                write_flagged_json(&json_path, &report.flagged)?;
            }

            shill::output::terminal::display_summary(&report);
            println!(
                "\n{}",
                format!("Results saved to: {}", output_path.display()).bold()
            );
        }

        Commands::Inspect { input, product } => {
            let config = Config::load()?;
            let lexicon = load_lexicon(&config)?;

            let table = ReviewTable::load(&input)?;
            let records = table.records();
            let groups = group_by_product(&records);

            let Some(group) = groups.iter().find(|g| g.product_id == product) else {
                anyhow::bail!(
                    "No reviews for product {product} in {} ({} products present)",
                    input.display(),
                    groups.len()
                );
            };

            let scorer = scorer_from(&config);
            let analyzer = ReviewAnalyzer::new(&lexicon, &scorer);
            let evaluation = analyzer.evaluate_group(group);

            shill::output::terminal::display_group(&evaluation);
        }

        Commands::Lookup { words } => {
            let config = Config::load()?;
            let lexicon = load_lexicon(&config)?;

            let results: Vec<(String, bool)> = words
                .into_iter()
                .map(|w| {
                    let known = lexicon.has_sense(&w);
                    (w, known)
                })
                .collect();
            shill::output::terminal::display_lookups(&results);
        }

        Commands::Status => {
            let config = Config::load()?;
            shill::status::show(&config);
        }
    }

    Ok(())
}

/// Check the lexicon path and force the load so a broken dictionary fails
/// the command up front.
fn load_lexicon(config: &Config) -> Result<LazyLexicon> {
    config.require_lexicon()?;
    let lexicon = LazyLexicon::from_path(&config.lexicon_path);
    lexicon.load()?;
    Ok(lexicon)
}

fn scorer_from(config: &Config) -> LsaScorer {
    LsaScorer {
        top_terms: config.top_terms,
        iterations: config.svd_iterations,
    }
}

fn write_flagged_json(path: &Path, flagged: &shill::pipeline::FlaggedReviews) -> Result<()> {
    let json = serde_json::to_string_pretty(flagged)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write flagged ids to {}", path.display()))?;
    info!(file = %path.display(), count = flagged.len(), "Wrote flagged review ids");
    Ok(())
}
