// Unit tests for the lexicon service.
//
// Exercises the file loaders against small dictionaries written to the
// system temp directory, and the lazy wrapper's load-once behaviour.

use std::fs;
use std::path::PathBuf;

use shill::lexicon::{LazyLexicon, Lexicon, WordSet};

/// Create a fresh scratch directory for one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shill-test-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

const INDEX_NOUN: &str = "  1 This software and database is being provided to you, the LICENSEE, by
  2 Princeton University under the following license.
battery n 2 3 @ ~ #p 2 1 02810471 14539268
mouse n 4 4 @ ~ #p %p 4 1 02330245 10335246 03793489 10335563
product n 6 4 @ ~ + ; 6 4 04007894 00922327 13869547 05913275
";

const INDEX_VERB: &str = "  1 This software and database is being provided to you, the LICENSEE, by
work v 27 4 @ ~ * > 27 23 01525666 02413480
";

const INDEX_ADJ: &str = "good a 21 4 ! & ^ = 21 16 01123148 01125429
";

const NOUN_EXC: &str = "mice mouse
";

const ADJ_EXC: &str = "better good well
";

fn write_wordnet(dir: &PathBuf) {
    fs::write(dir.join("index.noun"), INDEX_NOUN).unwrap();
    fs::write(dir.join("index.verb"), INDEX_VERB).unwrap();
    fs::write(dir.join("index.adj"), INDEX_ADJ).unwrap();
    fs::write(dir.join("noun.exc"), NOUN_EXC).unwrap();
    fs::write(dir.join("adj.exc"), ADJ_EXC).unwrap();
}

// ============================================================
// WordNet directory
// ============================================================

#[test]
fn wordnet_dir_loads_lemmas_without_license_lines() {
    let dir = scratch_dir("wn-lemmas");
    write_wordnet(&dir);

    let set = WordSet::load(&dir).unwrap();
    assert_eq!(set.len(), 5);
    assert!(set.has_sense("product"));
    assert!(!set.has_sense("princeton"));
}

#[test]
fn wordnet_dir_resolves_inflections_and_exceptions() {
    let dir = scratch_dir("wn-morph");
    write_wordnet(&dir);

    let set = WordSet::load(&dir).unwrap();
    assert!(set.has_sense("Products"));
    assert!(set.has_sense("working"));
    assert!(set.has_sense("batteries"));
    assert!(set.has_sense("mice"));
    assert!(set.has_sense("better"));
    assert!(!set.has_sense("qwerty"));
}

#[test]
fn wordnet_dir_without_index_files_fails() {
    let dir = scratch_dir("wn-empty");
    assert!(WordSet::load(&dir).is_err());
}

// ============================================================
// Plain word list
// ============================================================

#[test]
fn word_list_ignores_comments_and_blanks() {
    let dir = scratch_dir("list");
    let path = dir.join("words.txt");
    fs::write(&path, "# my words\n\ngreat\n  Quality \n").unwrap();

    let set = WordSet::load(&path).unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.has_sense("quality"));
    assert!(set.has_sense("GREAT"));
}

#[test]
fn empty_word_list_fails() {
    let dir = scratch_dir("list-empty");
    let path = dir.join("words.txt");
    fs::write(&path, "# nothing here\n").unwrap();
    assert!(WordSet::load(&path).is_err());
}

// ============================================================
// LazyLexicon
// ============================================================

#[test]
fn lazy_lexicon_defers_loading_until_first_lookup() {
    let dir = scratch_dir("lazy");
    write_wordnet(&dir);

    let lexicon = LazyLexicon::from_path(&dir);
    assert!(!lexicon.is_initialized());
    assert!(lexicon.has_sense("work"));
    assert!(lexicon.is_initialized());
}

#[test]
fn lazy_lexicon_with_missing_source_answers_false() {
    let lexicon = LazyLexicon::from_path(&std::env::temp_dir().join("shill-missing-lexicon-dir/x"));
    assert!(!lexicon.has_sense("work"));
    assert!(lexicon.load().is_err());
}

#[test]
fn lexicon_usable_through_trait_object_and_arc() {
    let set = std::sync::Arc::new(WordSet::from_words(["fine"]));
    let dynamic: &dyn Lexicon = &set;
    assert!(dynamic.has_sense("fine"));
}
