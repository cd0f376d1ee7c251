use std::io::Write;

use similarity_index::corpus::{load_corpus, Corpus};
use similarity_index::tfidf_index::{TfidfIndex, TfidfParams};
use similarity_index::{BuildError, SimilaritySearcher};
use ticket_model::TicketRecord;

fn corpus_of(texts: &[&str]) -> Corpus {
    Corpus {
        headers: vec!["text".to_string()],
        records: texts
            .iter()
            .enumerate()
            .map(|(i, t)| TicketRecord::new(i as u32, vec![t.to_string()]))
            .collect(),
    }
}

fn printer_corpus() -> Corpus {
    corpus_of(&[
        "printer not printing",
        "printer out of paper",
        "login page blank",
    ])
}

#[test]
fn printer_query_returns_both_printer_rows() {
    let index = TfidfIndex::build(&printer_corpus(), &TfidfParams::default())
        .expect("corpus builds");
    let hits = index.query("printer jammed", 2);

    assert_eq!(hits.len(), 2);
    let mut rows: Vec<u32> = hits.iter().map(|h| h.row_index).collect();
    rows.sort_unstable();
    assert_eq!(rows, vec![0, 1]);
    assert!(hits[0].score >= hits[1].score);
    assert!(hits.iter().all(|h| h.score > 0.0));
}

#[test]
fn repeated_queries_are_deterministic() {
    let index = TfidfIndex::build(&printer_corpus(), &TfidfParams::default())
        .expect("corpus builds");
    let first = index.query("printer jammed", 3);
    for _ in 0..5 {
        assert_eq!(index.query("printer jammed", 3), first);
    }
}

#[test]
fn top_k_larger_than_corpus_returns_all() {
    let index = TfidfIndex::build(
        &corpus_of(&["printer broken", "screen cracked"]),
        &TfidfParams::default(),
    )
    .expect("corpus builds");
    assert_eq!(index.query("printer", 5).len(), 2);
}

#[test]
fn result_length_is_min_of_k_and_corpus_size() {
    let index = TfidfIndex::build(&printer_corpus(), &TfidfParams::default())
        .expect("corpus builds");
    assert_eq!(index.query("printer", 2).len(), 2);
    assert_eq!(index.query("printer", 3).len(), 3);
    assert!(index.query("printer", 0).is_empty());
}

#[test]
fn self_similarity_ranks_first_with_unit_score() {
    let index = TfidfIndex::build(&printer_corpus(), &TfidfParams::default())
        .expect("corpus builds");
    let hits = index.query("printer out of paper", 3);

    assert_eq!(hits[0].row_index, 1);
    assert!(hits[0].score > 0.999 && hits[0].score < 1.001);
    assert!(hits.iter().all(|h| h.score <= hits[0].score));
}

#[test]
fn identical_records_order_by_ascending_row_index() {
    let index = TfidfIndex::build(
        &corpus_of(&["password reset help", "password reset help", "printer jam"]),
        &TfidfParams::default(),
    )
    .expect("corpus builds");
    let hits = index.query("password reset help", 3);

    assert_eq!(hits[0].row_index, 0);
    assert_eq!(hits[1].row_index, 1);
    assert!((hits[0].score - hits[1].score).abs() < 1e-6);
}

#[test]
fn empty_query_returns_zero_scored_rows_in_row_order() {
    let index = TfidfIndex::build(&printer_corpus(), &TfidfParams::default())
        .expect("corpus builds");
    let hits = index.query("", 2);

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].row_index, 0);
    assert_eq!(hits[1].row_index, 1);
    assert!(hits.iter().all(|h| h.score == 0.0));
}

#[test]
fn out_of_vocabulary_query_scores_zero() {
    let index = TfidfIndex::build(&printer_corpus(), &TfidfParams::default())
        .expect("corpus builds");
    let hits = index.query("zzzz qqqq wwww", 3);

    assert_eq!(hits.len(), 3);
    assert!(hits.iter().all(|h| h.score == 0.0));
}

#[test]
fn vocabulary_cap_keeps_highest_document_frequency_terms() {
    let params = TfidfParams { max_features: 1, ..TfidfParams::default() };
    let index = TfidfIndex::build(
        &corpus_of(&["alpha beta", "alpha gamma", "alpha beta delta"]),
        &params,
    )
    .expect("corpus builds");

    assert_eq!(index.dimensions(), 1);
    // "alpha" appears in every document and survives the cap; "beta" does not.
    assert!(index.query("alpha", 3).iter().all(|h| h.score > 0.0));
    assert!(index.query("beta", 3).iter().all(|h| h.score == 0.0));
}

#[test]
fn vocabulary_cap_ties_break_by_first_seen_order() {
    let params = TfidfParams { max_features: 1, ..TfidfParams::default() };
    // Every term (and the bigram) has document frequency 2; the first token
    // encountered wins the single slot.
    let index = TfidfIndex::build(&corpus_of(&["aa bb", "aa bb"]), &params)
        .expect("corpus builds");

    assert!(index.query("aa", 2).iter().all(|h| h.score > 0.0));
    assert!(index.query("bb", 2).iter().all(|h| h.score == 0.0));
}

#[test]
fn vectorization_prefers_clean_column_display_prefers_raw() {
    let corpus = Corpus {
        headers: vec!["text_clean".to_string(), "text".to_string()],
        records: vec![
            TicketRecord::new(0, vec![
                "printer broken".to_string(),
                "Printer BROKEN!! (full display text)".to_string(),
            ]),
            TicketRecord::new(1, vec![
                "login failed".to_string(),
                "Login FAILED (full display text)".to_string(),
            ]),
        ],
    };
    let index = TfidfIndex::build(&corpus, &TfidfParams::default()).expect("corpus builds");
    let hits = index.query("printer", 1);

    assert_eq!(hits[0].row_index, 0);
    assert_eq!(hits[0].snippet, "Printer BROKEN!! (full display text)");
}

#[test]
fn join_all_columns_when_no_text_column_present() {
    let corpus = Corpus {
        headers: vec!["subject_line".to_string(), "details".to_string()],
        records: vec![TicketRecord::new(0, vec![
            "printer broken".to_string(),
            "paper jam in tray two".to_string(),
        ])],
    };
    let index = TfidfIndex::build(&corpus, &TfidfParams::default()).expect("corpus builds");
    let hits = index.query("paper jam", 1);

    assert_eq!(hits.len(), 1);
    assert!(hits[0].score > 0.0);
    assert_eq!(hits[0].snippet, "printer broken paper jam in tray two");
}

#[test]
fn snippet_is_truncated_to_configured_chars() {
    let long = "word ".repeat(200);
    let index = TfidfIndex::build(&corpus_of(&[&long]), &TfidfParams::default())
        .expect("corpus builds");
    let hits = index.query("word", 1);

    assert_eq!(hits[0].snippet.chars().count(), 400);
}

#[test]
fn usable_through_the_searcher_trait() {
    let index = TfidfIndex::build(&printer_corpus(), &TfidfParams::default())
        .expect("corpus builds");
    let searcher: &dyn SimilaritySearcher = &index;

    assert_eq!(searcher.name(), "tfidf");
    assert_eq!(searcher.query("printer", 1).len(), 1);
}

#[test]
fn missing_source_reports_source_missing() {
    let err = TfidfIndex::build_from_csv(
        "/nonexistent/processed_tickets.csv",
        &TfidfParams::default(),
    )
    .expect_err("missing file cannot build");

    assert!(matches!(err, BuildError::SourceMissing(_)));
    assert!(err.is_unavailable());
}

#[test]
fn header_only_corpus_reports_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tickets.csv");
    std::fs::write(&path, "text,Category\n").expect("write fixture");

    let err = TfidfIndex::build_from_csv(&path, &TfidfParams::default())
        .expect_err("empty corpus cannot build");
    assert!(matches!(err, BuildError::EmptyCorpus));
    assert!(err.is_unavailable());
}

#[test]
fn malformed_corpus_reports_csv_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tickets.csv");
    let mut f = std::fs::File::create(&path).expect("create fixture");
    f.write_all(b"text\n").expect("write header");
    f.write_all(&[0xff, 0xfe, 0xfd, b'\n']).expect("write bad bytes");
    drop(f);

    let err = TfidfIndex::build_from_csv(&path, &TfidfParams::default())
        .expect_err("invalid encoding cannot build");
    assert!(matches!(err, BuildError::Csv(_)));
    assert!(!err.is_unavailable());
}

#[test]
fn load_corpus_assigns_load_time_ordinals() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tickets.csv");
    std::fs::write(&path, "id,text\n40,printer broken\n7,screen cracked\n99,no sound\n")
        .expect("write fixture");

    let corpus = load_corpus(&path).expect("corpus loads");
    assert_eq!(corpus.headers, vec!["id".to_string(), "text".to_string()]);
    let ordinals: Vec<u32> = corpus.records.iter().map(|r| r.row_index).collect();
    assert_eq!(ordinals, vec![0, 1, 2]);
}
