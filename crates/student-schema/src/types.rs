//! Core domain types for student prediction requests.
//!
//! Every categorical attribute is a closed Rust enum, and scores go through
//! the `Score` newtype, so a constructed `StudentInput` is always within the
//! domain the model was trained on.

use std::fmt;

// =============================================================================
// Categorical Fields
// =============================================================================

/// A categorical request field with a fixed, case-sensitive set of values.
///
/// Implementors list their variants once in `ALL`; parsing and the
/// "allowed values" part of validation errors are derived from that list.
pub trait Categorical: Copy + Sized + 'static {
    /// Name of the field in request bodies (e.g. `race_ethnicity`)
    const FIELD: &'static str;

    /// Every variant, in the order they are reported to clients
    const ALL: &'static [Self];

    /// The exact string the model was trained on for this value
    fn as_str(self) -> &'static str;

    /// Exact, case-sensitive lookup of a value
    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// The allowed values, as they appear on the wire
    fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Categorical for Gender {
    const FIELD: &'static str = "gender";
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female];

    fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Anonymised race/ethnicity group, A through E
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaceEthnicity {
    GroupA,
    GroupB,
    GroupC,
    GroupD,
    GroupE,
}

impl Categorical for RaceEthnicity {
    const FIELD: &'static str = "race_ethnicity";
    const ALL: &'static [Self] = &[
        RaceEthnicity::GroupA,
        RaceEthnicity::GroupB,
        RaceEthnicity::GroupC,
        RaceEthnicity::GroupD,
        RaceEthnicity::GroupE,
    ];

    fn as_str(self) -> &'static str {
        match self {
            RaceEthnicity::GroupA => "group A",
            RaceEthnicity::GroupB => "group B",
            RaceEthnicity::GroupC => "group C",
            RaceEthnicity::GroupD => "group D",
            RaceEthnicity::GroupE => "group E",
        }
    }
}

/// Highest education level reached by a parent.
///
/// Variants are declared from lowest to highest, so the derived `Ord`
/// follows the education ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParentalEducation {
    SomeHighSchool,
    HighSchool,
    SomeCollege,
    AssociatesDegree,
    BachelorsDegree,
    MastersDegree,
}

impl Categorical for ParentalEducation {
    const FIELD: &'static str = "parental_level_of_education";
    const ALL: &'static [Self] = &[
        ParentalEducation::SomeHighSchool,
        ParentalEducation::HighSchool,
        ParentalEducation::SomeCollege,
        ParentalEducation::AssociatesDegree,
        ParentalEducation::BachelorsDegree,
        ParentalEducation::MastersDegree,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ParentalEducation::SomeHighSchool => "some high school",
            ParentalEducation::HighSchool => "high school",
            ParentalEducation::SomeCollege => "some college",
            ParentalEducation::AssociatesDegree => "associate's degree",
            ParentalEducation::BachelorsDegree => "bachelor's degree",
            ParentalEducation::MastersDegree => "master's degree",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lunch {
    Standard,
    FreeReduced,
}

impl Categorical for Lunch {
    const FIELD: &'static str = "lunch";
    const ALL: &'static [Self] = &[Lunch::Standard, Lunch::FreeReduced];

    fn as_str(self) -> &'static str {
        match self {
            Lunch::Standard => "standard",
            Lunch::FreeReduced => "free/reduced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestPreparation {
    None,
    Completed,
}

impl Categorical for TestPreparation {
    const FIELD: &'static str = "test_preparation_course";
    const ALL: &'static [Self] = &[TestPreparation::None, TestPreparation::Completed];

    fn as_str(self) -> &'static str {
        match self {
            TestPreparation::None => "none",
            TestPreparation::Completed => "completed",
        }
    }
}

// =============================================================================
// Scores
// =============================================================================

/// An exam score in `Score::MIN..=Score::MAX`.
///
/// The only way to build one is `Score::new`, which checks the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 100;

    /// Returns `None` when `value` is outside `MIN..=MAX`
    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Score(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// StudentInput
// =============================================================================

/// A fully validated prediction request.
///
/// Built by `StudentInput::from_json` (see `validate.rs`) or directly from
/// already-typed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentInput {
    pub gender: Gender,
    pub race_ethnicity: RaceEthnicity,
    pub parental_level_of_education: ParentalEducation,
    pub lunch: Lunch,
    pub test_preparation_course: TestPreparation,
    pub reading_score: Score,
    pub writing_score: Score,
}

/// Names of the seven request fields, in declaration order
pub const REQUEST_FIELDS: [&str; 7] = [
    Gender::FIELD,
    RaceEthnicity::FIELD,
    ParentalEducation::FIELD,
    Lunch::FIELD,
    TestPreparation::FIELD,
    "reading_score",
    "writing_score",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_exact_and_case_sensitive() {
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse("Female"), None);
        assert_eq!(RaceEthnicity::parse("group C"), Some(RaceEthnicity::GroupC));
        assert_eq!(RaceEthnicity::parse("group c"), None);
        assert_eq!(RaceEthnicity::parse("group F"), None);
        assert_eq!(Lunch::parse("free/reduced"), Some(Lunch::FreeReduced));
        assert_eq!(TestPreparation::parse(" none"), None);
    }

    #[test]
    fn test_every_variant_round_trips_through_its_string() {
        for level in ParentalEducation::ALL {
            assert_eq!(ParentalEducation::parse(level.as_str()), Some(*level));
        }
        assert_eq!(ParentalEducation::allowed().len(), 6);
    }

    #[test]
    fn test_parental_education_is_ordered() {
        assert!(ParentalEducation::SomeHighSchool < ParentalEducation::HighSchool);
        assert!(ParentalEducation::BachelorsDegree < ParentalEducation::MastersDegree);
        let max = ParentalEducation::ALL.iter().max().copied();
        assert_eq!(max, Some(ParentalEducation::MastersDegree));
    }

    #[test]
    fn test_score_bounds_are_inclusive() {
        assert_eq!(Score::new(0).map(Score::value), Some(0));
        assert_eq!(Score::new(100).map(Score::value), Some(100));
        assert!(Score::new(-1).is_none());
        assert!(Score::new(101).is_none());
    }
}
