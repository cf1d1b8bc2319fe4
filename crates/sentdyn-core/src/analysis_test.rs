use super::*;

// -----------------------------------------------------------------------
// Engine
// -----------------------------------------------------------------------

#[test]
fn engine_parses_canonical_names() {
    assert_eq!(
        "lexicon_grammar".parse::<Engine>().unwrap(),
        Engine::LexiconGrammar
    );
    assert_eq!(
        "social_lexicon".parse::<Engine>().unwrap(),
        Engine::SocialLexicon
    );
}

#[test]
fn engine_parses_aliases_case_insensitively() {
    assert_eq!("TextBlob".parse::<Engine>().unwrap(), Engine::LexiconGrammar);
    assert_eq!("VADER".parse::<Engine>().unwrap(), Engine::SocialLexicon);
    assert_eq!(
        "social-lexicon".parse::<Engine>().unwrap(),
        Engine::SocialLexicon
    );
}

#[test]
fn engine_rejects_unknown_name() {
    let err = "bert".parse::<Engine>().unwrap_err();
    assert_eq!(err, CoreError::UnsupportedEngine("bert".to_string()));
}

#[test]
fn engine_display_round_trips_through_from_str() {
    for engine in Engine::ALL {
        assert_eq!(engine.to_string().parse::<Engine>().unwrap(), engine);
    }
}

#[test]
fn engine_serializes_snake_case() {
    let json = serde_json::to_string(&Engine::SocialLexicon).expect("serialize");
    assert_eq!(json, "\"social_lexicon\"");
}

// -----------------------------------------------------------------------
// Label thresholds
// -----------------------------------------------------------------------

#[test]
fn polarity_threshold_is_strict() {
    assert_eq!(SentimentLabel::from_polarity(0.05), SentimentLabel::Neutral);
    assert_eq!(SentimentLabel::from_polarity(-0.05), SentimentLabel::Neutral);
    assert_eq!(SentimentLabel::from_polarity(0.051), SentimentLabel::Positive);
    assert_eq!(
        SentimentLabel::from_polarity(-0.051),
        SentimentLabel::Negative
    );
    assert_eq!(SentimentLabel::from_polarity(0.0), SentimentLabel::Neutral);
}

#[test]
fn compound_threshold_is_inclusive() {
    assert_eq!(SentimentLabel::from_compound(0.05), SentimentLabel::Positive);
    assert_eq!(SentimentLabel::from_compound(-0.05), SentimentLabel::Negative);
    assert_eq!(SentimentLabel::from_compound(0.049), SentimentLabel::Neutral);
    assert_eq!(SentimentLabel::from_compound(-0.049), SentimentLabel::Neutral);
}

// -----------------------------------------------------------------------
// SentimentResult
// -----------------------------------------------------------------------

#[test]
fn lexicon_grammar_result_populates_subjectivity_only() {
    let result = SentimentResult::lexicon_grammar(0.4, 0.6);
    assert_eq!(result.label(), SentimentLabel::Positive);
    assert_eq!(result.engine(), Engine::LexiconGrammar);
    assert_eq!(result.subjectivity(), Some(0.6));
    assert!(result.compound().is_none());
    assert!(result.breakdown().is_none());
}

#[test]
fn lexicon_grammar_result_clamps_inputs() {
    let result = SentimentResult::lexicon_grammar(-3.0, 1.7);
    assert_eq!(result.polarity(), -1.0);
    assert_eq!(result.subjectivity(), Some(1.0));
    assert_eq!(result.label(), SentimentLabel::Negative);
}

#[test]
fn social_result_populates_compound_only() {
    let result = SentimentResult::social(IntensityBreakdown {
        positive: 0.0,
        negative: 0.5,
        neutral: 0.5,
        compound: -0.48,
    });
    assert_eq!(result.label(), SentimentLabel::Negative);
    assert_eq!(result.compound(), Some(-0.48));
    assert_eq!(result.polarity(), -0.48);
    assert!(result.subjectivity().is_none());
    assert_eq!(result.breakdown().map(|b| b.negative), Some(0.5));
}

#[test]
fn sentiment_result_serializes_absent_fields_as_null() {
    let result = SentimentResult::lexicon_grammar(0.0, 0.0);
    let json: serde_json::Value = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["label"], "NEUTRAL");
    assert_eq!(json["engine"], "lexicon_grammar");
    assert!(json["compound"].is_null());
    assert!(json["breakdown"].is_null());
}

// -----------------------------------------------------------------------
// Entity categories
// -----------------------------------------------------------------------

#[test]
fn model_labels_map_to_categories() {
    assert_eq!(
        EntityCategory::from_model_label("PERSON"),
        EntityCategory::Person
    );
    assert_eq!(EntityCategory::from_model_label("ORG"), EntityCategory::Org);
    assert_eq!(
        EntityCategory::from_model_label("GPE"),
        EntityCategory::Location
    );
    assert_eq!(
        EntityCategory::from_model_label("LOC"),
        EntityCategory::Location
    );
    assert_eq!(EntityCategory::from_model_label("TIME"), EntityCategory::Date);
    assert_eq!(
        EntityCategory::from_model_label("MONEY"),
        EntityCategory::Other
    );
    assert_eq!(
        EntityCategory::from_model_label("NORP"),
        EntityCategory::Other
    );
}

#[test]
fn entity_groups_serialize_with_category_keys_in_order() {
    let mut groups = EntityGroups::new();
    groups.insert(
        EntityCategory::Location,
        vec![EntityMention {
            text: "London".to_string(),
            category: EntityCategory::Location,
            label: "GPE".to_string(),
            start: 0,
            end: 6,
        }],
    );
    groups.insert(
        EntityCategory::Org,
        vec![EntityMention {
            text: "Apple".to_string(),
            category: EntityCategory::Org,
            label: "ORG".to_string(),
            start: 10,
            end: 15,
        }],
    );
    let json = serde_json::to_string(&groups).expect("serialize");
    let org_at = json.find("\"ORG\"").expect("ORG key");
    let loc_at = json.find("\"LOCATION\"").expect("LOCATION key");
    assert!(org_at < loc_at, "ORG should precede LOCATION: {json}");
}

#[test]
fn analysis_request_keeps_text_verbatim() {
    let request = AnalysisRequest::new("  Hello World  ", Engine::SocialLexicon);
    assert_eq!(request.text(), "  Hello World  ");
    assert_eq!(request.engine(), Engine::SocialLexicon);
}
