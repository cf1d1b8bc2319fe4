//! End-to-end tests for `Analyzer` with the bundled entity model.

use std::sync::{Arc, LazyLock};

use sentdyn_analytics::{AnalysisError, Analyzer, EntityModel};
use sentdyn_core::{AnalysisRequest, Engine, EntityCategory, SentimentLabel};

static ANALYZER: LazyLock<Analyzer> = LazyLock::new(|| Analyzer::load(None));

fn request(text: &str, engine: Engine) -> AnalysisRequest {
    AnalysisRequest::new(text, engine)
}

fn entity_texts(
    result: &sentdyn_core::AnalysisResult,
    category: EntityCategory,
) -> Vec<&str> {
    result
        .entities
        .get(&category)
        .map(|mentions| mentions.iter().map(|m| m.text.as_str()).collect())
        .unwrap_or_default()
}

#[test]
fn product_announcement_end_to_end() {
    let result = ANALYZER
        .analyze(&request(
            "I love this product. Apple released it in London on 5 May.",
            Engine::LexiconGrammar,
        ))
        .expect("analysis should succeed");

    assert_eq!(result.sentiment.label(), SentimentLabel::Positive);
    assert!(result.sentiment.polarity() > 0.0);
    assert!(result.sentiment.subjectivity().is_some());
    assert!(result.sentiment.compound().is_none());

    let terms: Vec<_> = result.keywords.iter().map(|k| k.term.as_str()).collect();
    assert_eq!(
        terms,
        vec!["love", "product", "apple", "released", "london", "may"]
    );
    assert!(result.keywords.iter().all(|k| k.count == 1));

    assert_eq!(entity_texts(&result, EntityCategory::Org), vec!["Apple"]);
    assert_eq!(entity_texts(&result, EntityCategory::Location), vec!["London"]);
    assert_eq!(entity_texts(&result, EntityCategory::Date), vec!["5 May"]);
    assert!(!result.entities.contains_key(&EntityCategory::Person));
    assert!(!result.entities.contains_key(&EntityCategory::Other));
}

#[test]
fn negative_review_with_social_engine() {
    let result = ANALYZER
        .analyze(&request(
            "Terrible service, I am never returning.",
            Engine::SocialLexicon,
        ))
        .expect("analysis should succeed");

    assert_eq!(result.sentiment.label(), SentimentLabel::Negative);
    let compound = result.sentiment.compound().expect("compound present");
    assert!(compound < 0.0);
    assert!(result.sentiment.subjectivity().is_none());
    assert!(result.sentiment.breakdown().is_some());
    assert!(result.entities.is_empty());
}

#[test]
fn factual_sentence_is_neutral_for_both_engines() {
    for engine in Engine::ALL {
        let result = ANALYZER
            .analyze(&request("The report was filed yesterday.", engine))
            .expect("analysis should succeed");
        assert_eq!(result.sentiment.label(), SentimentLabel::Neutral);
        assert!(result.sentiment.polarity().abs() < 1e-6);
        assert_eq!(entity_texts(&result, EntityCategory::Date), vec!["yesterday"]);
    }
}

#[test]
fn whitespace_only_input_is_rejected() {
    for text in ["", "   ", "\n\t "] {
        let err = ANALYZER
            .analyze(&request(text, Engine::SocialLexicon))
            .unwrap_err();
        assert_eq!(err, AnalysisError::EmptyInput);
    }
}

#[test]
fn punctuation_only_input_is_not_an_error() {
    let result = ANALYZER
        .analyze(&request("?!...", Engine::LexiconGrammar))
        .expect("analysis should succeed");
    assert!(result.keywords.is_empty());
    assert_eq!(result.sentiment.label(), SentimentLabel::Neutral);
}

#[test]
fn repeated_requests_give_identical_results() {
    let text = "Barack Obama praised the wonderful team in Chicago, but the food was awful!";
    for engine in Engine::ALL {
        let first = ANALYZER.analyze(&request(text, engine)).expect("first");
        let second = ANALYZER.analyze(&request(text, engine)).expect("second");
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).expect("serialize"),
            serde_json::to_string(&second).expect("serialize")
        );
    }
}

#[test]
fn keyword_counts_cover_all_kept_tokens() {
    let text = "Rust is fast. Rust is safe. Cargo builds Rust quickly and safely.";
    let result = ANALYZER
        .analyze(&request(text, Engine::LexiconGrammar))
        .expect("analysis should succeed");

    assert_eq!(result.keywords[0].term, "rust");
    assert_eq!(result.keywords[0].count, 3);
    let total: usize = result.keywords.iter().map(|k| k.count).sum();
    // rust x3, fast, safe, cargo, builds, quickly, safely
    assert_eq!(total, 9);
}

#[test]
fn unavailable_model_fails_the_whole_request() {
    let analyzer = Analyzer::new(EntityModel::Unavailable {
        reason: "model file missing".to_string(),
    });
    assert!(!analyzer.is_model_loaded());

    let err = analyzer
        .analyze(&request("A perfectly fine sentence.", Engine::LexiconGrammar))
        .unwrap_err();
    assert!(
        matches!(err, AnalysisError::ModelUnavailable { ref reason } if reason.contains("missing")),
        "expected ModelUnavailable, got {err:?}"
    );
}

#[test]
fn analyzer_is_shareable_across_threads() {
    let analyzer = Arc::new(Analyzer::load(None));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            std::thread::spawn(move || {
                analyzer
                    .analyze(&AnalysisRequest::new("Paris is lovely in spring.", Engine::SocialLexicon))
                    .expect("analysis should succeed")
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread should not panic"))
        .collect();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(entity_texts(&results[0], EntityCategory::Location), vec!["Paris"]);
}

#[test]
fn result_serializes_with_uppercase_keys() {
    let result = ANALYZER
        .analyze(&request("Apple opened an office in London.", Engine::SocialLexicon))
        .expect("analysis should succeed");
    let json = serde_json::to_value(&result).expect("serialize");

    assert_eq!(json["sentiment"]["engine"], "social_lexicon");
    assert!(json["sentiment"]["subjectivity"].is_null());
    assert_eq!(json["entities"]["ORG"][0]["text"], "Apple");
    assert_eq!(json["entities"]["LOCATION"][0]["label"], "GPE");
}
