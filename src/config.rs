use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default size of the concept term table.
pub const DEFAULT_TOP_TERMS: usize = 10;

/// Default power-iteration budget for the truncated SVD.
pub const DEFAULT_SVD_ITERATIONS: usize = 100;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy, so any of
/// these can live there instead of the shell environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// WordNet dict directory or plain word list (SHILL_LEXICON)
    pub lexicon_path: PathBuf,
    /// Number of concept terms used for scoring (SHILL_TOP_TERMS)
    pub top_terms: usize,
    /// SVD iteration budget (SHILL_SVD_ITERATIONS)
    pub svd_iterations: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; only malformed numbers are errors.
    pub fn load() -> Result<Self> {
        let lexicon_path = env::var("SHILL_LEXICON")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_lexicon_path());

        Ok(Self {
            lexicon_path,
            top_terms: parse_positive("SHILL_TOP_TERMS", DEFAULT_TOP_TERMS)?,
            svd_iterations: parse_positive("SHILL_SVD_ITERATIONS", DEFAULT_SVD_ITERATIONS)?,
        })
    }

    /// Check that the lexicon path exists.
    /// Call this before any operation that runs the degeneracy filter.
    pub fn require_lexicon(&self) -> Result<()> {
        if !self.lexicon_path.exists() {
            anyhow::bail!(
                "Lexicon not found at {}\n\
                 Point SHILL_LEXICON at a WordNet dict/ directory (containing index.noun, ...)\n\
                 or at a plain word list with one word per line. Add it to your .env file.",
                self.lexicon_path.display()
            );
        }
        Ok(())
    }
}

/// Returns the default lexicon location.
/// Uses the platform data directory: ~/.local/share/shill/wordnet/ on Linux.
pub fn default_lexicon_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shill")
        .join("wordnet")
}

/// Read a positive integer env var, falling back to `default` when unset.
fn parse_positive(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(raw) => {
            let value: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("{name} must be a positive integer, got {raw:?}"))?;
            if value == 0 {
                anyhow::bail!("{name} must be at least 1");
            }
            Ok(value)
        }
        Err(_) => Ok(default),
    }
}

/// Whether a path looks like a WordNet dictionary directory.
pub fn is_wordnet_dir(path: &Path) -> bool {
    path.is_dir() && path.join("index.noun").exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon_path_ends_in_shill_wordnet() {
        let path = default_lexicon_path();
        assert!(path.ends_with("shill/wordnet"));
    }

    #[test]
    fn test_require_lexicon_missing_path() {
        let config = Config {
            lexicon_path: PathBuf::from("/nonexistent/shill/lexicon"),
            top_terms: DEFAULT_TOP_TERMS,
            svd_iterations: DEFAULT_SVD_ITERATIONS,
        };
        let err = config.require_lexicon().unwrap_err();
        assert!(err.to_string().contains("SHILL_LEXICON"));
    }

    #[test]
    fn test_parse_positive_unset_uses_default() {
        assert_eq!(
            parse_positive("SHILL_TEST_SURELY_UNSET_VARIABLE", 7).unwrap(),
            7
        );
    }
}
