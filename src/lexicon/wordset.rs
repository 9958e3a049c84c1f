// In-memory lemma set loaded from a WordNet dictionary or a word list.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::morphy::{base_forms, normalize_query};
use super::traits::Lexicon;

/// WordNet index files, one per part of speech.
const INDEX_FILES: &[&str] = &["index.noun", "index.verb", "index.adj", "index.adv"];

/// WordNet irregular-form exception files.
const EXCEPTION_FILES: &[&str] = &["noun.exc", "verb.exc", "adj.exc", "adv.exc"];

/// A set of known lemmas plus WordNet's irregular-form exceptions.
///
/// Lookups lowercase the query, try the exception list, the surface form,
/// then every detachment-rule base form.
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    lemmas: HashSet<String>,
    /// Inflected form -> base forms (e.g. "mice" -> ["mouse"])
    exceptions: HashMap<String, Vec<String>>,
}

impl WordSet {
    /// Build a word set from an iterator of lemmas.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lemmas = words
            .into_iter()
            .map(|w| normalize_query(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            lemmas,
            exceptions: HashMap::new(),
        }
    }

    /// Register an irregular form and its base forms.
    pub fn with_exception(mut self, form: &str, bases: &[&str]) -> Self {
        self.exceptions.insert(
            normalize_query(form),
            bases.iter().map(|b| normalize_query(b)).collect(),
        );
        self
    }

    /// Load from a path: a directory is read as a WordNet dictionary, a file
    /// as a plain word list.
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::load_wordnet_dir(path)
        } else {
            Self::load_word_list(path)
        }
    }

    /// Load lemmas and exceptions from a WordNet `dict/` directory.
    ///
    /// At least one `index.*` file must be present. Exception files are
    /// optional.
    pub fn load_wordnet_dir(dir: &Path) -> Result<Self> {
        let mut set = Self::default();
        let mut index_files_read = 0;

        for name in INDEX_FILES {
            let path = dir.join(name);
            if !path.exists() {
                debug!(file = %path.display(), "WordNet index file missing, skipping");
                continue;
            }
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read WordNet index: {}", path.display()))?;
            set.lemmas.extend(parse_index(&contents));
            index_files_read += 1;
        }

        if index_files_read == 0 {
            anyhow::bail!(
                "No WordNet index files (index.noun, index.verb, ...) found in {}",
                dir.display()
            );
        }

        for name in EXCEPTION_FILES {
            let path = dir.join(name);
            if !path.exists() {
                continue;
            }
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read WordNet exceptions: {}", path.display()))?;
            for (form, bases) in parse_exceptions(&contents) {
                set.exceptions.entry(form).or_default().extend(bases);
            }
        }

        info!(
            lemmas = set.lemmas.len(),
            exceptions = set.exceptions.len(),
            dir = %dir.display(),
            "Loaded WordNet dictionary"
        );
        Ok(set)
    }

    /// Load a plain word list: one lemma per line, `#` comments and blank
    /// lines ignored.
    pub fn load_word_list(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list: {}", path.display()))?;

        let set = Self::from_words(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );

        if set.is_empty() {
            anyhow::bail!("Word list {} contains no words", path.display());
        }

        info!(lemmas = set.len(), file = %path.display(), "Loaded word list");
        Ok(set)
    }

    /// Number of distinct lemmas.
    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

impl Lexicon for WordSet {
    fn has_sense(&self, word: &str) -> bool {
        let query = normalize_query(word);
        if query.is_empty() {
            return false;
        }

        if let Some(bases) = self.exceptions.get(&query) {
            if bases.iter().any(|b| self.lemmas.contains(b)) {
                return true;
            }
        }

        if self.lemmas.contains(&query) {
            return true;
        }

        base_forms(&query).iter().any(|form| self.lemmas.contains(form))
    }
}

/// Extract lemmas from a WordNet `index.*` file.
///
/// License header lines start with a space; every other line starts with the
/// lemma followed by its part of speech and synset data.
fn parse_index(contents: &str) -> impl Iterator<Item = String> + '_ {
    contents
        .lines()
        .filter(|line| !line.starts_with(' '))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_lowercase)
}

/// Parse a WordNet `*.exc` file: `inflected base [base...]` per line.
fn parse_exceptions(contents: &str) -> Vec<(String, Vec<String>)> {
    contents
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let form = fields.next()?.to_lowercase();
            let bases: Vec<String> = fields.map(str::to_lowercase).collect();
            if bases.is_empty() {
                None
            } else {
                Some((form, bases))
            }
        })
        .collect()
}
