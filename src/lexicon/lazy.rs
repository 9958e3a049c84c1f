// Load-once lexicon wrapper.
//
// Reading a full WordNet dictionary takes a moment, and plenty of runs never
// hit a single-word review. LazyLexicon defers the read until the first
// lookup (or an explicit `load()`), then keeps the outcome for the lifetime
// of the instance. A failed load is remembered too, so a broken path is
// reported once instead of being retried on every lookup.

use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing::warn;

use super::traits::Lexicon;
use super::wordset::WordSet;

type Loader = Box<dyn Fn() -> Result<WordSet> + Send + Sync>;

/// A lexicon that loads its word set on first use.
pub struct LazyLexicon {
    /// Human-readable source description, used in messages
    source: String,
    loader: Loader,
    cell: OnceCell<std::result::Result<WordSet, String>>,
    warned: Once,
}

impl LazyLexicon {
    /// Lazily load a WordNet directory or word list from `path`.
    pub fn from_path(path: &Path) -> Self {
        let owned: PathBuf = path.to_path_buf();
        Self::with_loader(path.display().to_string(), move || WordSet::load(&owned))
    }

    /// Lazily build the word set with an arbitrary loader.
    pub fn with_loader<F>(source: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<WordSet> + Send + Sync + 'static,
    {
        Self {
            source: source.into(),
            loader: Box::new(loader),
            cell: OnceCell::new(),
            warned: Once::new(),
        }
    }

    /// Force the load and report any failure.
    ///
    /// Call this before an analysis run so a missing dictionary surfaces as
    /// an error instead of every single-word review being treated as unknown.
    pub fn load(&self) -> Result<&WordSet> {
        match self.cell.get_or_init(|| (self.loader)().map_err(|e| format!("{e:#}"))) {
            Ok(set) => Ok(set),
            Err(msg) => anyhow::bail!("Failed to load lexicon from {}: {msg}", self.source),
        }
    }

    /// Whether the load has already been attempted.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Lexicon for LazyLexicon {
    fn has_sense(&self, word: &str) -> bool {
        match self.load() {
            Ok(set) => set.has_sense(word),
            Err(e) => {
                self.warned.call_once(|| {
                    warn!(error = %e, "Lexicon unavailable, treating every word as unknown");
                });
                false
            }
        }
    }
}
