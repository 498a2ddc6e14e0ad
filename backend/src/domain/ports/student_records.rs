//! Driving ports for student records.
//!
//! HTTP handlers call these traits; the domain services implement them on top
//! of [`super::StudentRepository`].

use async_trait::async_trait;

use crate::domain::{Error, Student, StudentDraft, StudentId};

/// Read side of student records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsQuery: Send + Sync {
    /// All students ordered by identifier.
    async fn list_students(&self) -> Result<Vec<Student>, Error>;
}

/// Write side of student records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsCommand: Send + Sync {
    /// Create a student and return the stored row.
    async fn create_student(&self, draft: StudentDraft) -> Result<Student, Error>;

    /// Replace name and email. Unknown identifiers are not an error.
    async fn update_student(&self, id: StudentId, draft: StudentDraft) -> Result<(), Error>;

    /// Delete a student together with its grades. Unknown identifiers are not
    /// an error.
    async fn delete_student(&self, id: StudentId) -> Result<(), Error>;
}
