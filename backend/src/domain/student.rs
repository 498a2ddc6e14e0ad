//! Student records.
//!
//! Name and email rules live here so every write path (create and update)
//! enforces them identically.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned when building student values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    /// Name was blank once trimmed.
    #[error("Name and email are required")]
    EmptyName,
    /// Email was blank once trimmed.
    #[error("Name and email are required")]
    EmptyEmail,
    /// Email lacks an `@` separator.
    #[error("Invalid email format")]
    InvalidEmail,
}

/// Store-assigned student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(i32);

impl StudentId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blank student name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentName(String);

impl StudentName {
    /// Validate and construct a name. Surrounding whitespace is removed.
    pub fn new(name: impl Into<String>) -> Result<Self, StudentValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for StudentName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StudentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<StudentName> for String {
    fn from(value: StudentName) -> Self {
        value.0
    }
}

impl TryFrom<String> for StudentName {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address containing an `@`.
///
/// Deliberately loose: anything with an `@` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an email address.
    pub fn new(email: impl Into<String>) -> Result<Self, StudentValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(StudentValidationError::EmptyEmail);
        }
        if !trimmed.contains('@') {
            return Err(StudentValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated fields for creating or replacing a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    /// Display name.
    pub name: StudentName,
    /// Contact email.
    pub email: EmailAddress,
}

impl StudentDraft {
    /// Validate raw name and email together.
    ///
    /// # Examples
    /// ```
    /// use gradebook::domain::{StudentDraft, StudentValidationError};
    ///
    /// assert!(StudentDraft::try_from_parts("Jane", "jane@x.com").is_ok());
    /// assert_eq!(
    ///     StudentDraft::try_from_parts("Jane", "jane.x.com"),
    ///     Err(StudentValidationError::InvalidEmail)
    /// );
    /// ```
    pub fn try_from_parts(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, StudentValidationError> {
        Ok(Self {
            name: StudentName::new(name)?,
            email: EmailAddress::new(email)?,
        })
    }
}

/// Persisted student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Store-assigned identifier.
    pub id: StudentId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl Student {
    /// Combine an assigned identifier with the draft that produced it.
    #[must_use]
    pub fn from_draft(id: StudentId, draft: StudentDraft) -> Self {
        Self {
            id,
            name: draft.name.into(),
            email: draft.email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "a@b.com", StudentValidationError::EmptyName)]
    #[case("   ", "a@b.com", StudentValidationError::EmptyName)]
    #[case("A", "", StudentValidationError::EmptyEmail)]
    #[case("A", "  ", StudentValidationError::EmptyEmail)]
    #[case("A", "a.b.com", StudentValidationError::InvalidEmail)]
    fn rejects_invalid_parts(
        #[case] name: &str,
        #[case] email: &str,
        #[case] expected: StudentValidationError,
    ) {
        assert_eq!(StudentDraft::try_from_parts(name, email), Err(expected));
    }

    #[rstest]
    fn trims_surrounding_whitespace() {
        let draft = StudentDraft::try_from_parts("  Jane ", " jane@x.com ").expect("valid draft");
        assert_eq!(draft.name.as_ref(), "Jane");
        assert_eq!(draft.email.as_ref(), "jane@x.com");
    }

    #[rstest]
    fn messages_match_api_contract() {
        assert_eq!(
            StudentValidationError::EmptyName.to_string(),
            "Name and email are required"
        );
        assert_eq!(
            StudentValidationError::InvalidEmail.to_string(),
            "Invalid email format"
        );
    }

    #[rstest]
    fn student_serialises_flat() {
        let student = Student {
            id: StudentId::new(7),
            name: "A".to_owned(),
            email: "a@b.com".to_owned(),
        };
        let value = serde_json::to_value(&student).expect("serialise student");
        assert_eq!(
            value,
            serde_json::json!({ "id": 7, "name": "A", "email": "a@b.com" })
        );
    }
}
