//! Request validator: raw JSON in, `StudentInput` or field errors out.
//!
//! Every field is checked even after the first failure, so a client gets
//! the complete list of problems in one response.

use serde_json::{Map, Number, Value, json};

use crate::error::{ErrorKind, FieldError, Result, ValidationErrors};
use crate::types::*;

impl StudentInput {
    /// Validate a raw request body.
    ///
    /// An empty (or all-whitespace) body is reported as a missing body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationErrors::single(FieldError::body(
                ErrorKind::Missing,
                "Field required",
            )));
        }
        let value: Value = serde_json::from_slice(bytes).map_err(|e| {
            ValidationErrors::single(FieldError::body(
                ErrorKind::JsonInvalid,
                format!("JSON decode error: {}", e),
            ))
        })?;
        Self::from_json(&value)
    }

    /// Validate an already-decoded JSON value.
    ///
    /// Unknown fields are ignored.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Some(body) = value.as_object() else {
            return Err(ValidationErrors::single(FieldError::body(
                ErrorKind::ModelAttributesType,
                "Input should be a valid dictionary or object to extract fields from",
            )));
        };

        let mut errors = Vec::new();

        let gender = categorical::<Gender>(body, &mut errors);
        let race_ethnicity = categorical::<RaceEthnicity>(body, &mut errors);
        let parental_level_of_education = categorical::<ParentalEducation>(body, &mut errors);
        let lunch = categorical::<Lunch>(body, &mut errors);
        let test_preparation_course = categorical::<TestPreparation>(body, &mut errors);
        let reading_score = score(body, "reading_score", &mut errors);
        let writing_score = score(body, "writing_score", &mut errors);

        match (
            gender,
            race_ethnicity,
            parental_level_of_education,
            lunch,
            test_preparation_course,
            reading_score,
            writing_score,
        ) {
            (Some(g), Some(r), Some(p), Some(l), Some(t), Some(rs), Some(ws)) => Ok(StudentInput {
                gender: g,
                race_ethnicity: r,
                parental_level_of_education: p,
                lunch: l,
                test_preparation_course: t,
                reading_score: rs,
                writing_score: ws,
            }),
            _ => Err(ValidationErrors::new(errors)),
        }
    }
}

/// Look up a field, treating explicit `null` the same as absence
fn required<'a>(
    body: &'a Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a Value> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::field(field, ErrorKind::Missing, "Field required"));
            None
        }
        Some(value) => Some(value),
    }
}

fn categorical<T: Categorical>(
    body: &Map<String, Value>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    let value = required(body, T::FIELD, errors)?;

    if let Some(parsed) = value.as_str().and_then(T::parse) {
        return Some(parsed);
    }

    let allowed = T::allowed();
    let quoted: Vec<String> = allowed.iter().map(|v| format!("'{}'", v)).collect();
    errors.push(
        FieldError::field(
            T::FIELD,
            ErrorKind::LiteralError,
            format!("Input should be one of {}", quoted.join(", ")),
        )
        .with_ctx(json!({ "expected": allowed, "input": value })),
    );
    None
}

fn score(body: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<Score> {
    let value = required(body, field, errors)?;

    // Integer strings and booleans are coerced, as a lax integer field would
    let coerced = match value {
        Value::Number(number) => {
            let Some(int) = integral(number) else {
                errors.push(FieldError::field(
                    field,
                    ErrorKind::IntFromFloat,
                    "Input should be a valid integer, got a number with a fractional part",
                ));
                return None;
            };
            Some(int)
        }
        Value::String(text) => text.trim().parse::<i64>().ok(),
        Value::Bool(flag) => Some(i64::from(*flag)),
        _ => None,
    };

    let Some(int) = coerced else {
        errors.push(FieldError::field(
            field,
            ErrorKind::IntType,
            "Input should be a valid integer",
        ));
        return None;
    };

    if int < Score::MIN {
        errors.push(
            FieldError::field(
                field,
                ErrorKind::GreaterThanEqual,
                format!("Input should be greater than or equal to {}", Score::MIN),
            )
            .with_ctx(json!({ "ge": Score::MIN })),
        );
        return None;
    }
    if int > Score::MAX {
        errors.push(
            FieldError::field(
                field,
                ErrorKind::LessThanEqual,
                format!("Input should be less than or equal to {}", Score::MAX),
            )
            .with_ctx(json!({ "le": Score::MAX })),
        );
        return None;
    }

    Score::new(int)
}

/// Integer value of a JSON number, accepting floats like `90.0`.
///
/// Values beyond `i64` saturate, which the range check then rejects.
fn integral(number: &Number) -> Option<i64> {
    if let Some(i) = number.as_i64() {
        return Some(i);
    }
    let f = number.as_f64()?;
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    Some(f as i64)
}
