//! The model-facing view of a `StudentInput`.
//!
//! The trained model names its columns differently from the HTTP API
//! (`race/ethnicity` vs `race_ethnicity`, `reading score` vs
//! `reading_score`, ...). The mapping lives here in one place: the
//! `From<&StudentInput>` conversion plus the `get` match table.

use crate::types::*;

/// Column names exactly as the model was fit on them
pub mod columns {
    pub const GENDER: &str = "gender";
    pub const RACE_ETHNICITY: &str = "race/ethnicity";
    pub const PARENTAL_EDUCATION: &str = "parental level of education";
    pub const LUNCH: &str = "lunch";
    pub const TEST_PREPARATION: &str = "test preparation course";
    pub const READING_SCORE: &str = "reading score";
    pub const WRITING_SCORE: &str = "writing score";
}

/// A single cell of a feature row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Category(&'static str),
    Number(f64),
}

/// One row of model input, built per request and dropped after prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    gender: Gender,
    race_ethnicity: RaceEthnicity,
    parental_level_of_education: ParentalEducation,
    lunch: Lunch,
    test_preparation_course: TestPreparation,
    reading_score: Score,
    writing_score: Score,
}

impl FeatureRow {
    /// Column names in training order
    pub const COLUMNS: [&'static str; 7] = [
        columns::GENDER,
        columns::RACE_ETHNICITY,
        columns::PARENTAL_EDUCATION,
        columns::LUNCH,
        columns::TEST_PREPARATION,
        columns::READING_SCORE,
        columns::WRITING_SCORE,
    ];

    /// Value of the column called `name`, or `None` if the row has no such column
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        let value = match name {
            columns::GENDER => FeatureValue::Category(self.gender.as_str()),
            columns::RACE_ETHNICITY => FeatureValue::Category(self.race_ethnicity.as_str()),
            columns::PARENTAL_EDUCATION => {
                FeatureValue::Category(self.parental_level_of_education.as_str())
            }
            columns::LUNCH => FeatureValue::Category(self.lunch.as_str()),
            columns::TEST_PREPARATION => {
                FeatureValue::Category(self.test_preparation_course.as_str())
            }
            columns::READING_SCORE => FeatureValue::Number(f64::from(self.reading_score.value())),
            columns::WRITING_SCORE => FeatureValue::Number(f64::from(self.writing_score.value())),
            _ => return None,
        };
        Some(value)
    }

    /// All `(column, value)` pairs in training order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FeatureValue)> + '_ {
        Self::COLUMNS
            .into_iter()
            .filter_map(move |name| self.get(name).map(|value| (name, value)))
    }
}

impl From<&StudentInput> for FeatureRow {
    fn from(input: &StudentInput) -> Self {
        Self {
            gender: input.gender,
            race_ethnicity: input.race_ethnicity,
            parental_level_of_education: input.parental_level_of_education,
            lunch: input.lunch,
            test_preparation_course: input.test_preparation_course,
            reading_score: input.reading_score,
            writing_score: input.writing_score,
        }
    }
}
