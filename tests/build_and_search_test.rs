//! Index build and search integration tests
//!
//! Covers the JSONL → index directory → searcher pipeline:
//! 1. A fresh build writes all index files
//! 2. An unchanged corpus is not rebuilt unless forced
//! 3. Rewritten queries narrow results by century, theme and form
//! 4. Malformed corpora are rejected with the offending line

use std::path::PathBuf;
use sukhan::index::{BuildOutcome, IndexBuilder, IndexMetadata, BM25_FILE, DOCSTORE_FILE, METADATA_FILE};
use sukhan::search::Searcher;
use sukhan::{Lang, SearchConfig};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/poems.jsonl")
}

fn build_index() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let outcome = IndexBuilder::new()
        .build(&fixture(), temp_dir.path())
        .unwrap();
    assert_eq!(outcome, BuildOutcome::Built { doc_count: 5 });
    temp_dir
}

fn ids(outcome: &sukhan::search::SearchOutcome) -> Vec<&str> {
    outcome.results.iter().map(|r| r.poem_id.as_str()).collect()
}

#[test]
fn test_build_writes_index_files() {
    let index_dir = build_index();
    for file in [BM25_FILE, DOCSTORE_FILE, METADATA_FILE] {
        assert!(index_dir.path().join(file).exists(), "{} missing", file);
    }

    let metadata = IndexMetadata::load_from_file(&index_dir.path().join(METADATA_FILE)).unwrap();
    assert_eq!(metadata.doc_count, 5);
    assert_eq!(metadata.lang_counts.get("en").copied(), Some(3));
    assert_eq!(metadata.lang_counts.get("sd").copied(), Some(2));
}

#[test]
fn test_unchanged_corpus_is_skipped() {
    let index_dir = build_index();

    let second = IndexBuilder::new()
        .build(&fixture(), index_dir.path())
        .unwrap();
    assert_eq!(second, BuildOutcome::UpToDate { doc_count: 5 });

    let forced = IndexBuilder::new()
        .with_force(true)
        .build(&fixture(), index_dir.path())
        .unwrap();
    assert_eq!(forced, BuildOutcome::Built { doc_count: 5 });
}

#[test]
fn test_changed_corpus_is_rebuilt() {
    let work = TempDir::new().unwrap();
    let corpus = work.path().join("poems.jsonl");
    let index_dir = work.path().join("index");
    std::fs::copy(fixture(), &corpus).unwrap();

    IndexBuilder::new().build(&corpus, &index_dir).unwrap();

    let mut content = std::fs::read_to_string(&corpus).unwrap();
    content.push_str(
        r#"{"id":"extra","slug":"extra","title":"Extra","poet":{"id":"x","name":"X","slug":"x"}}"#,
    );
    content.push('\n');
    std::fs::write(&corpus, content).unwrap();

    let outcome = IndexBuilder::new().build(&corpus, &index_dir).unwrap();
    assert_eq!(outcome, BuildOutcome::Built { doc_count: 6 });
}

#[test]
fn test_keyword_search_from_disk() {
    let index_dir = build_index();
    let searcher = Searcher::new(index_dir.path()).unwrap();
    assert_eq!(searcher.docstore().len(), 5);

    let outcome = searcher.search("desert caravan", &SearchConfig::new().with_lang(Lang::En));
    assert_eq!(ids(&outcome).first().copied(), Some("latif-sasui-en"));
    assert!(outcome.results[0].score > 0.0);
}

#[test]
fn test_century_and_theme_narrow_results() {
    let index_dir = build_index();
    let searcher = Searcher::new(index_dir.path()).unwrap();

    let outcome = searcher.search("17th century ishq", &SearchConfig::new().with_lang(Lang::En));
    assert_eq!(outcome.query.pills, vec!["17th century", "theme: love"]);
    assert_eq!(ids(&outcome), vec!["latif-sasui-en"]);
}

#[test]
fn test_theme_synonym_in_sindhi_query() {
    let index_dir = build_index();
    let searcher = Searcher::new(index_dir.path()).unwrap();

    let outcome = searcher.search("پيار", &SearchConfig::new());
    assert_eq!(outcome.query.filters.theme.as_deref(), Some("love"));
    assert_eq!(outcome.query.pills, vec!["موضوع: عشق"]);

    let mut found = ids(&outcome);
    found.sort();
    assert_eq!(found, vec!["ayaz-watan", "latif-sasui-en", "sachal-kafi"]);
}

#[test]
fn test_form_filter_from_query() {
    let index_dir = build_index();
    let searcher = Searcher::new(index_dir.path()).unwrap();

    let outcome = searcher.search("ghazal", &SearchConfig::new().with_lang(Lang::En));
    let mut found = ids(&outcome);
    found.sort();
    assert_eq!(found, vec!["ayaz-watan", "sachal-kafi"]);
}

#[test]
fn test_malformed_corpus_reports_line() {
    let work = TempDir::new().unwrap();
    let corpus = work.path().join("bad.jsonl");
    std::fs::write(
        &corpus,
        "{\"id\":\"ok\",\"slug\":\"ok\",\"title\":\"Ok\",\"poet\":{\"id\":\"p\",\"name\":\"P\",\"slug\":\"p\"}}\n{not json\n",
    )
    .unwrap();

    let err = IndexBuilder::new()
        .build(&corpus, &work.path().join("index"))
        .unwrap_err();
    assert!(format!("{:#}", err).contains("line 2"));
    assert!(!work.path().join("index").join(METADATA_FILE).exists());
}

#[test]
fn test_missing_corpus_is_an_error() {
    let work = TempDir::new().unwrap();
    let result = IndexBuilder::new().build(&work.path().join("nope.jsonl"), work.path());
    assert!(result.is_err());
}

#[test]
fn test_missing_index_file_forces_rebuild() {
    let index_dir = build_index();
    std::fs::remove_file(index_dir.path().join(BM25_FILE)).unwrap();

    let outcome = IndexBuilder::new()
        .build(&fixture(), index_dir.path())
        .unwrap();
    assert_eq!(outcome, BuildOutcome::Built { doc_count: 5 });
    assert!(index_dir.path().join(BM25_FILE).exists());

    let searcher = Searcher::new(index_dir.path()).unwrap();
    let outcome = searcher.search("desert", &SearchConfig::new().with_lang(Lang::En));
    assert!(!outcome.results.is_empty());
}
