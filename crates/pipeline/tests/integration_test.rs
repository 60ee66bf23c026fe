//! Integration tests for the pipeline.
//!
//! These tests run raw JSON bodies through the validator, the adapter and
//! a real `LinearPipeline` model, the same path a `/predict` request takes.

use pipeline::{PredictionAdapter, PredictionFailure};
use score_model::{LinearPipeline, ModelHandle};
use serde_json::{Value, json};
use student_schema::StudentInput;

/// A small model over every column the service provides
fn create_test_model() -> LinearPipeline {
    LinearPipeline::from_json(
        r#"{
            "name": "integration",
            "target": "math score",
            "intercept": -12.4,
            "numeric": [
                { "feature": "reading score", "coefficient": 0.24 },
                { "feature": "writing score", "coefficient": 0.73 }
            ],
            "categorical": [
                { "feature": "gender", "categories": { "female": 0.0, "male": 13.1 } },
                { "feature": "race/ethnicity", "categories": {
                    "group A": 0.0, "group B": 0.3, "group C": -0.1, "group D": 0.9, "group E": 4.8 } },
                { "feature": "parental level of education", "categories": {
                    "associate's degree": 0.0, "bachelor's degree": -0.6, "high school": 0.4,
                    "master's degree": -1.2, "some college": 0.2, "some high school": 0.6 } },
                { "feature": "lunch", "categories": { "free/reduced": 0.0, "standard": 3.4 } },
                { "feature": "test preparation course", "categories": { "completed": 0.0, "none": 3.3 } }
            ]
        }"#,
    )
    .expect("test model should be valid")
}

fn example_body() -> Value {
    json!({
        "gender": "female",
        "race_ethnicity": "group B",
        "parental_level_of_education": "bachelor's degree",
        "lunch": "standard",
        "test_preparation_course": "completed",
        "reading_score": 90,
        "writing_score": 88
    })
}

#[test]
fn test_end_to_end_prediction() {
    let adapter = PredictionAdapter::new(ModelHandle::new(create_test_model()));
    let input = StudentInput::from_json(&example_body()).unwrap();

    let result = adapter.predict(&input).unwrap();

    // -12.4 + 0.24 * 90 + 0.73 * 88 + 0.3 - 0.6 + 3.4 = 76.54
    assert!((result.predicted_math_score - 76.54).abs() < 1e-9);
    assert_eq!(result.message, "Prediction successful");
}

#[test]
fn test_score_has_at_most_two_decimals() {
    let adapter = PredictionAdapter::new(ModelHandle::new(create_test_model()));

    for reading in [0, 17, 33, 71, 100] {
        let mut body = example_body();
        body["reading_score"] = json!(reading);
        let input = StudentInput::from_json(&body).unwrap();
        let score = adapter.predict(&input).unwrap().predicted_math_score;
        let cents = score * 100.0;
        assert!((cents - cents.round()).abs() < 1e-6, "{} has more than 2 decimals", score);
    }
}

#[test]
fn test_prediction_is_deterministic() {
    let adapter = PredictionAdapter::new(ModelHandle::new(create_test_model()));
    let input = StudentInput::from_json(&example_body()).unwrap();

    let first = adapter.predict(&input).unwrap();
    let second = adapter.predict(&input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_model_missing_a_trained_category_fails_the_request() {
    let mut model = create_test_model();
    model.categorical[0].categories.remove("female");
    let adapter = PredictionAdapter::new(ModelHandle::new(model));
    let input = StudentInput::from_json(&example_body()).unwrap();

    match adapter.predict(&input) {
        Err(PredictionFailure::Invocation(msg)) => assert!(msg.contains("gender")),
        other => panic!("expected invocation failure, got {:?}", other),
    }
}

#[test]
fn test_unloaded_model_never_predicts() {
    let adapter = PredictionAdapter::new(ModelHandle::empty());
    let input = StudentInput::from_json(&example_body()).unwrap();
    assert_eq!(
        adapter.predict(&input),
        Err(PredictionFailure::ModelUnavailable)
    );
}
