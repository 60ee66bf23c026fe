//! The on-disk model artifact: a fitted linear pipeline.
//!
//! The training pipeline exports the fitted regression as JSON:
//! - numeric columns are standardised (`(x - mean) / scale`) then weighted
//! - categorical columns are one-hot encoded; each known category carries
//!   the weight of its indicator column (the dropped reference level is 0)
//! - the prediction is the intercept plus every contribution
//!
//! ```json
//! {
//!   "name": "linear_regression",
//!   "target": "math score",
//!   "intercept": 66.1,
//!   "numeric": [{ "feature": "reading score", "coefficient": 0.45, "mean": 69.2, "scale": 14.6 }],
//!   "categorical": [{ "feature": "gender", "categories": { "female": 0.0, "male": 13.0 } }],
//!   "handle_unknown": "error"
//! }
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use student_schema::{FeatureRow, FeatureValue};

use crate::error::{ModelError, Result};
use crate::predictor::Predictor;

/// What to do with a category value the model was not trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    /// Fail the prediction
    #[default]
    Error,
    /// Contribute nothing, as if every indicator column were zero
    Ignore,
}

/// A standardised numeric column and its coefficient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericTerm {
    pub feature: String,
    pub coefficient: f64,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl NumericTerm {
    fn contribution(&self, x: f64) -> f64 {
        self.coefficient * (x - self.mean) / self.scale
    }
}

/// A one-hot encoded column: weight per known category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalTerm {
    pub feature: String,
    pub categories: BTreeMap<String, f64>,
}

fn default_target() -> String {
    "math score".to_string()
}

/// A fitted linear regression over encoded student features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPipeline {
    pub name: String,
    #[serde(default = "default_target")]
    pub target: String,
    pub intercept: f64,
    #[serde(default)]
    pub numeric: Vec<NumericTerm>,
    #[serde(default)]
    pub categorical: Vec<CategoricalTerm>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

impl LinearPipeline {
    /// Parse and validate an artifact from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let pipeline: LinearPipeline = serde_json::from_str(text)
            .map_err(|e| ModelError::InvalidArtifact(e.to_string()))?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Check the structural invariants a usable artifact must hold.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| -> Result<()> { Err(ModelError::InvalidArtifact(reason)) };

        if self.numeric.is_empty() && self.categorical.is_empty() {
            return invalid("model has no features".to_string());
        }
        if !self.intercept.is_finite() {
            return invalid("intercept is not finite".to_string());
        }

        let mut seen = HashSet::new();
        for name in self.feature_names() {
            if !seen.insert(name) {
                return invalid(format!("feature '{}' is declared more than once", name));
            }
        }

        for term in &self.numeric {
            if !(term.coefficient.is_finite() && term.mean.is_finite() && term.scale.is_finite()) {
                return invalid(format!("feature '{}' has a non-finite parameter", term.feature));
            }
            if term.scale == 0.0 {
                return invalid(format!("feature '{}' has a zero scale", term.feature));
            }
        }

        for term in &self.categorical {
            if term.categories.is_empty() {
                return invalid(format!("feature '{}' has no categories", term.feature));
            }
            if let Some((category, _)) = term.categories.iter().find(|(_, w)| !w.is_finite()) {
                return invalid(format!(
                    "category '{}' of feature '{}' has a non-finite weight",
                    category, term.feature
                ));
            }
        }

        Ok(())
    }

    /// Every feature the model reads, numeric first
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.numeric
            .iter()
            .map(|t| t.feature.as_str())
            .chain(self.categorical.iter().map(|t| t.feature.as_str()))
    }

    /// Predict the target for a single row.
    pub fn predict_row(&self, row: &FeatureRow) -> Result<f64> {
        let mut y = self.intercept;

        for term in &self.numeric {
            match row.get(&term.feature) {
                Some(FeatureValue::Number(x)) => y += term.contribution(x),
                Some(FeatureValue::Category(_)) => {
                    return Err(ModelError::TypeMismatch {
                        feature: term.feature.clone(),
                        expected: "numeric",
                    });
                }
                None => return Err(ModelError::MissingFeature(term.feature.clone())),
            }
        }

        for term in &self.categorical {
            let value = match row.get(&term.feature) {
                Some(FeatureValue::Category(value)) => value,
                Some(FeatureValue::Number(_)) => {
                    return Err(ModelError::TypeMismatch {
                        feature: term.feature.clone(),
                        expected: "categorical",
                    });
                }
                None => return Err(ModelError::MissingFeature(term.feature.clone())),
            };

            match (term.categories.get(value), self.handle_unknown) {
                (Some(weight), _) => y += weight,
                (None, HandleUnknown::Ignore) => {}
                (None, HandleUnknown::Error) => {
                    return Err(ModelError::UnknownCategory {
                        feature: term.feature.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }

        Ok(y)
    }
}

impl Predictor for LinearPipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use student_schema::*;

    fn row(gender: Gender, reading: i64, writing: i64) -> FeatureRow {
        FeatureRow::from(&StudentInput {
            gender,
            race_ethnicity: RaceEthnicity::GroupB,
            parental_level_of_education: ParentalEducation::BachelorsDegree,
            lunch: Lunch::Standard,
            test_preparation_course: TestPreparation::Completed,
            reading_score: Score::new(reading).unwrap(),
            writing_score: Score::new(writing).unwrap(),
        })
    }

    fn pipeline() -> LinearPipeline {
        LinearPipeline::from_json(
            r#"{
                "name": "test-model",
                "intercept": 10.0,
                "numeric": [
                    { "feature": "reading score", "coefficient": 2.0, "mean": 50.0, "scale": 10.0 },
                    { "feature": "writing score", "coefficient": 0.5 }
                ],
                "categorical": [
                    { "feature": "gender", "categories": { "female": 0.0, "male": 5.0 } },
                    { "feature": "lunch", "categories": { "free/reduced": 0.0, "standard": 3.0 } }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_are_applied() {
        let model = pipeline();
        assert_eq!(model.target, "math score");
        assert_eq!(model.handle_unknown, HandleUnknown::Error);
        assert_eq!(model.numeric[1].mean, 0.0);
        assert_eq!(model.numeric[1].scale, 1.0);
    }

    #[test]
    fn test_predict_row_sums_contributions() {
        let model = pipeline();
        // 10 + 2 * (70 - 50) / 10 + 0.5 * 80 + 5 (male) + 3 (standard)
        let y = model.predict_row(&row(Gender::Male, 70, 80)).unwrap();
        assert!((y - 62.0).abs() < 1e-9);

        // 10 + 2 * (50 - 50) / 10 + 0.5 * 20 + 0 (female) + 3
        let y = model.predict_row(&row(Gender::Female, 50, 20)).unwrap();
        assert!((y - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_returns_one_value_per_row() {
        let model = pipeline();
        let rows = [row(Gender::Male, 70, 80), row(Gender::Female, 50, 20)];
        let out = model.predict(&rows).unwrap();
        assert_eq!(out.len(), 2);
        assert!(model.predict(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_category_errors_by_default() {
        let mut model = pipeline();
        model.categorical[0].categories.remove("male");
        let err = model.predict_row(&row(Gender::Male, 70, 80)).unwrap_err();
        assert!(matches!(err, ModelError::UnknownCategory { ref value, .. } if value == "male"));
    }

    #[test]
    fn test_unknown_category_can_be_ignored() {
        let mut model = pipeline();
        model.categorical[0].categories.remove("male");
        model.handle_unknown = HandleUnknown::Ignore;
        let y = model.predict_row(&row(Gender::Male, 70, 80)).unwrap();
        assert!((y - 57.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_feature() {
        let mut model = pipeline();
        model.numeric[0].feature = "math score".to_string();
        let err = model.predict_row(&row(Gender::Male, 70, 80)).unwrap_err();
        assert!(matches!(err, ModelError::MissingFeature(ref f) if f == "math score"));
        assert!(err.to_string().contains("math score"));
    }

    #[test]
    fn test_type_mismatch() {
        let mut model = pipeline();
        model.categorical[0].feature = "reading score".to_string();
        model.numeric[0].feature = "gender".to_string();
        let err = model.predict_row(&row(Gender::Male, 70, 80)).unwrap_err();
        assert!(matches!(err, ModelError::TypeMismatch { expected: "numeric", .. }));
    }

    #[test]
    fn test_invalid_artifacts_are_rejected() {
        let cases = [
            r#"{ "name": "empty", "intercept": 1.0 }"#,
            r#"{ "name": "zero", "intercept": 1.0,
                 "numeric": [{ "feature": "reading score", "coefficient": 1.0, "scale": 0.0 }] }"#,
            r#"{ "name": "dup", "intercept": 1.0,
                 "numeric": [{ "feature": "gender", "coefficient": 1.0 }],
                 "categorical": [{ "feature": "gender", "categories": { "male": 1.0 } }] }"#,
            r#"{ "name": "nocats", "intercept": 1.0,
                 "categorical": [{ "feature": "gender", "categories": {} }] }"#,
            r#"{ "name": "bad-unknown", "intercept": 1.0, "handle_unknown": "maybe",
                 "numeric": [{ "feature": "reading score", "coefficient": 1.0 }] }"#,
            r#"not json"#,
        ];
        for case in cases {
            let err = LinearPipeline::from_json(case).unwrap_err();
            assert!(matches!(err, ModelError::InvalidArtifact(_)), "accepted: {}", case);
        }
    }
}
