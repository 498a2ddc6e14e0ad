//! Driving ports for grade records and their CSV export.

use async_trait::async_trait;

use crate::domain::{Error, Grade, GradeEntry, GradeExport, GradeId, GradeUpdate, NewGrade, StudentId};

/// Read side of grade records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GradesQuery: Send + Sync {
    /// Grades of a student with the student's name; empty when none exist.
    async fn list_grades(&self, student_id: StudentId) -> Result<Vec<GradeEntry>, Error>;

    /// CSV export of a student's grades.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the student has no grades.
    async fn export_grades(&self, student_id: StudentId) -> Result<GradeExport, Error>;
}

/// Write side of grade records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GradesCommand: Send + Sync {
    /// Record a grade and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error when the student does not exist.
    async fn record_grade(&self, grade: NewGrade) -> Result<Grade, Error>;

    /// Replace subject and scores of a grade. Unknown identifiers are not an
    /// error.
    async fn update_grade(&self, id: GradeId, update: GradeUpdate) -> Result<(), Error>;

    /// Delete a grade.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no row was removed.
    async fn delete_grade(&self, id: GradeId) -> Result<(), Error>;
}
