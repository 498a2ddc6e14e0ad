//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure becomes an `invalid_request` error whose details
//! name the offending `field` and a machine-readable `code`.

use serde_json::json;

use crate::domain::{Error, GradeValidationError, SCORE_MAX, SCORE_MIN, StudentValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidEmail,
    OutOfRange,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidEmail => "invalid_email",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: i64) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "min": SCORE_MIN,
            "max": SCORE_MAX,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    ValidationError::new(field, "All fields are required").with_code(ErrorCode::MissingField)
}

/// Unwrap a required body field, reporting its absence by name.
///
/// Presence is all that is checked, so `0` and `""` pass through to the
/// domain rules.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn student_validation_error(err: StudentValidationError) -> Error {
    let message = err.to_string();
    match err {
        StudentValidationError::EmptyName => {
            ValidationError::new(FieldName::new("name"), message).with_code(ErrorCode::MissingField)
        }
        StudentValidationError::EmptyEmail => ValidationError::new(FieldName::new("email"), message)
            .with_code(ErrorCode::MissingField),
        StudentValidationError::InvalidEmail => {
            ValidationError::new(FieldName::new("email"), message)
                .with_code(ErrorCode::InvalidEmail)
        }
    }
}

pub(crate) fn grade_validation_error(err: GradeValidationError) -> Error {
    let message = err.to_string();
    match err {
        GradeValidationError::EmptySubject => {
            ValidationError::new(FieldName::new("subject"), message)
                .with_code(ErrorCode::MissingField)
        }
        GradeValidationError::ScoreOutOfRange { field, value } => {
            ValidationError::new(FieldName::new(field.as_str()), message)
                .with_value(ErrorCode::OutOfRange, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainCode, ScoreField};
    use rstest::rstest;

    #[rstest]
    fn require_accepts_zero() {
        assert_eq!(require(Some(0_i64), FieldName::new("quiz_score")), Ok(0));
    }

    #[rstest]
    fn require_names_the_missing_field() {
        let err = require::<i64>(None, FieldName::new("exam_score")).expect_err("absent");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(err.message(), "All fields are required");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "exam_score", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case(StudentValidationError::EmptyName, "name", "missing_field")]
    #[case(StudentValidationError::EmptyEmail, "email", "missing_field")]
    #[case(StudentValidationError::InvalidEmail, "email", "invalid_email")]
    fn student_errors_carry_field_and_code(
        #[case] err: StudentValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let message = err.to_string();
        let mapped = student_validation_error(err);
        assert_eq!(mapped.message(), message);
        assert_eq!(mapped.details(), Some(&json!({"field": field, "code": code})));
    }

    #[rstest]
    fn out_of_range_score_reports_value_and_bounds() {
        let mapped = grade_validation_error(GradeValidationError::ScoreOutOfRange {
            field: ScoreField::Quiz,
            value: 101,
        });
        assert_eq!(mapped.message(), "Scores must be between 0 and 100");
        assert_eq!(
            mapped.details(),
            Some(&json!({
                "field": "quiz_score",
                "value": 101,
                "min": 0,
                "max": 100,
                "code": "out_of_range",
            }))
        );
    }
}
