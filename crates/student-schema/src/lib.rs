//! # Student Schema Crate
//!
//! Domain types and request validation for the student score service.
//!
//! ## Main Components
//!
//! - **types**: `StudentInput`, its categorical enums and the `Score` newtype
//! - **validate**: turn a JSON body into a `StudentInput` or field errors
//! - **feature_row**: the model-facing `FeatureRow` and its column names
//! - **error**: `FieldError` / `ValidationErrors`
//!
//! ## Example Usage
//!
//! ```ignore
//! use student_schema::{FeatureRow, StudentInput};
//!
//! let input = StudentInput::from_slice(body)?;
//! let row = FeatureRow::from(&input);
//! assert_eq!(row.get("race/ethnicity"), ...);
//! ```

pub mod error;
pub mod feature_row;
pub mod types;
pub mod validate;

pub use error::{ErrorKind, FieldError, ValidationErrors};
pub use feature_row::{FeatureRow, FeatureValue, columns};
pub use types::{
    Categorical,
    Gender,
    Lunch,
    ParentalEducation,
    REQUEST_FIELDS,
    RaceEthnicity,
    Score,
    StudentInput,
    TestPreparation,
};
