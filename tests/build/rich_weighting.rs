//! Context-dependent weights in rich mode.

use std::collections::HashMap;

use folio::testing::{annotated, heading, page_meta, paragraph};
use folio::{
    build_corpus, Annotation, Block, BuildError, BuildOptions, Corpus, MemorySource,
    SearchConfig, TextRun, WeightTable, WeightingMode, MAX_FACTOR,
};

fn single_page(blocks: Vec<Block>, title: &str, options: &BuildOptions) -> Corpus {
    let mut source = MemorySource::new();
    source.insert_page("p", page_meta("p", title), blocks);
    // second page keeps n > 1 so nothing degenerates
    source.insert_page("q", page_meta("q", ""), vec![paragraph("q1", "filler text")]);
    build_corpus(&source, &["p", "q"], options).unwrap()
}

fn weight_of(corpus: &Corpus, term: &str) -> f64 {
    let doc = corpus.document_id("p").unwrap();
    corpus.weight(corpus.term_id(term).unwrap(), doc)
}

#[test]
fn test_heading_levels() {
    let corpus = single_page(
        vec![
            heading("h1", 1, "alpha"),
            heading("h2", 2, "beta"),
            heading("h3", 3, "gamma"),
            paragraph("p1", "delta"),
        ],
        "",
        &BuildOptions::rich(),
    );
    assert_eq!(weight_of(&corpus, "alpha"), 3.0);
    assert_eq!(weight_of(&corpus, "beta"), 2.0);
    assert_eq!(weight_of(&corpus, "gamma"), 1.5);
    assert_eq!(weight_of(&corpus, "delta"), 1.0);
}

#[test]
fn test_annotations_multiply_with_block_type() {
    let corpus = single_page(
        vec![
            annotated("a", "heading_1", "loud", &[Annotation::Bold]),
            annotated("b", "callout", "note", &[Annotation::Italic, Annotation::Underline]),
            annotated("c", "paragraph", "gone", &[Annotation::Strikethrough]),
            annotated("d", "paragraph", "snippet", &[Annotation::Code]),
        ],
        "",
        &BuildOptions::rich(),
    );
    assert!((weight_of(&corpus, "loud") - 3.6).abs() < 1e-12);
    assert!((weight_of(&corpus, "note") - 1.5 * 1.1 * 1.1).abs() < 1e-12);
    assert_eq!(weight_of(&corpus, "gone"), 0.5);
    assert_eq!(weight_of(&corpus, "snippet"), 1.0);
}

#[test]
fn test_weights_accumulate_across_occurrences() {
    let corpus = single_page(
        vec![heading("h", 1, "rust"), paragraph("p1", "rust rust")],
        "",
        &BuildOptions::rich(),
    );
    assert_eq!(weight_of(&corpus, "rust"), 5.0);
}

#[test]
fn test_title_words_get_title_weight() {
    let corpus = single_page(vec![paragraph("p1", "body")], "Quarterly Plan", &BuildOptions::rich());
    assert_eq!(weight_of(&corpus, "quarterly"), 1.5);
    assert_eq!(weight_of(&corpus, "plan"), 1.5);
}

#[test]
fn test_plain_mode_ignores_formatting() {
    let corpus = single_page(
        vec![
            heading("h", 1, "rust"),
            annotated("b", "callout", "rust", &[Annotation::Bold]),
        ],
        "Rust",
        &BuildOptions::plain(),
    );
    assert_eq!(weight_of(&corpus, "rust"), 3.0);
}

#[test]
fn test_document_length_is_independent_of_mode() {
    let blocks = vec![
        heading("h", 1, "one two"),
        annotated("b", "paragraph", "three", &[Annotation::Strikethrough]),
    ];
    let plain = single_page(blocks.clone(), "four", &BuildOptions::plain());
    let rich = single_page(blocks, "four", &BuildOptions::rich());

    let doc = plain.document_id("p").unwrap();
    assert_eq!(plain.document_length(doc), 4);
    assert_eq!(rich.document_length(doc), 4);
    assert_eq!(plain.average_document_length(), rich.average_document_length());
}

#[test]
fn test_run_without_block_type_falls_back_to_run_type() {
    let blocks = vec![Block::new("e", "", vec![TextRun::plain("orphan")])];
    let corpus = single_page(blocks, "", &BuildOptions::rich());
    assert_eq!(weight_of(&corpus, "orphan"), 1.0);
}

#[test]
fn test_configured_overrides_apply() {
    let config = SearchConfig::from_json(
        r#"{"mode": "rich", "weights": {"heading_1": 10.0, "quote": 2.5}}"#,
    )
    .unwrap();
    let corpus = single_page(
        vec![heading("h", 1, "big"), paragraph("p1", "small")],
        "",
        &config.build_options(),
    );
    assert_eq!(corpus.mode(), WeightingMode::Rich);
    assert_eq!(weight_of(&corpus, "big"), 10.0);

    let quote = Block::new("qb", "quote", vec![TextRun::plain("cited")]);
    let corpus = single_page(vec![quote], "", &config.build_options());
    assert_eq!(weight_of(&corpus, "cited"), 2.5);
}

#[test]
fn test_neutral_table_matches_plain_counts() {
    let blocks = vec![
        heading("h", 1, "rust"),
        annotated("b", "callout", "rust", &[Annotation::Bold]),
    ];
    let neutral = BuildOptions {
        mode: WeightingMode::Rich,
        weights: WeightTable::neutral(),
    };
    let rich = single_page(blocks.clone(), "", &neutral);
    let plain = single_page(blocks, "", &BuildOptions::plain());
    assert_eq!(weight_of(&rich, "rust"), weight_of(&plain, "rust"));
}

#[test]
fn test_zero_factor_leaves_no_posting() {
    let overrides = HashMap::from([("strikethrough".to_string(), 0.0)]);
    let options = BuildOptions {
        mode: WeightingMode::Rich,
        weights: WeightTable::with_overrides(&overrides),
    };
    let corpus = single_page(
        vec![
            annotated("s", "paragraph", "struck", &[Annotation::Strikethrough]),
            paragraph("p1", "kept"),
        ],
        "",
        &options,
    );
    let struck = corpus.term_id("struck").unwrap();
    assert_eq!(corpus.document_frequency(struck), 0);
    // still counts toward length
    assert_eq!(corpus.document_length(corpus.document_id("p").unwrap()), 2);
}

fn loud_and_quiet(options: &BuildOptions) -> Result<Corpus, BuildError> {
    let mut source = MemorySource::new();
    source.insert_page(
        "p",
        page_meta("p", ""),
        vec![annotated("h", "heading_1", "rust", &[Annotation::Bold])],
    );
    source.insert_page("q", page_meta("q", ""), vec![paragraph("q1", "other rust")]);
    build_corpus(&source, &["p", "q"], options)
}

#[test]
fn test_overflowing_factors_abort_build() {
    let overrides = HashMap::from([
        ("heading_1".to_string(), 1e300),
        ("bold".to_string(), 1e300),
    ]);
    let options = BuildOptions {
        mode: WeightingMode::Rich,
        weights: WeightTable::with_overrides(&overrides),
    };
    let err = loud_and_quiet(&options).unwrap_err();
    assert!(matches!(err, BuildError::NonFiniteWeight { .. }));
}

#[test]
fn test_largest_allowed_factors_keep_scores_finite() {
    let config = SearchConfig::from_json(&format!(
        r#"{{"mode": "rich", "weights": {{"heading_1": {m}, "bold": {m}}}}}"#,
        m = MAX_FACTOR
    ))
    .unwrap();
    let corpus = loud_and_quiet(&config.build_options()).unwrap();

    let results = corpus.query("rust");
    assert!(results.iter().all(|r| r.score.is_finite()));
    assert_eq!(results[0].key, "p");
}
