// System status display — effective configuration and lexicon health.

use colored::Colorize;

use crate::config::{is_wordnet_dir, Config};
use crate::lexicon::LazyLexicon;

/// Display system status to the terminal.
pub fn show(config: &Config) {
    let path = &config.lexicon_path;

    let kind = if is_wordnet_dir(path) {
        "WordNet dictionary"
    } else if path.is_file() {
        "word list"
    } else if path.is_dir() {
        "directory (no index.noun)"
    } else {
        "missing"
    };
    println!("Lexicon: {} ({})", path.display(), kind);

    if path.exists() {
        let lexicon = LazyLexicon::from_path(path);
        match lexicon.load() {
            Ok(set) => println!("  {} {} lemmas loaded", "✓".green(), set.len()),
            Err(e) => println!("  {} {e:#}", "✗".red()),
        }
    } else {
        println!("  Set SHILL_LEXICON to a WordNet dict/ directory or a word list");
    }

    println!("Concept terms: {}", config.top_terms);
    println!("SVD iterations: {}", config.svd_iterations);
}
