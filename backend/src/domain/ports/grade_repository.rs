//! Port abstraction for grade persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{GradeEntry, GradeId, GradeUpdate, NewGrade, StudentId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by grade repository adapters.
    pub enum GradePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "grade repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "grade repository query failed: {message}",
        /// The referenced student does not exist.
        UnknownStudent { student_id: i32 } => "student {student_id} does not exist",
    }
}

/// Storage for grade rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GradeRepository: Send + Sync {
    /// Grades of `student_id` joined with the student's name, ordered by id.
    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<GradeEntry>, GradePersistenceError>;

    /// Insert a grade and return its assigned identifier.
    async fn insert(&self, grade: &NewGrade) -> Result<GradeId, GradePersistenceError>;

    /// Replace subject and scores of `id`, returning affected rows.
    async fn update(&self, id: GradeId, update: &GradeUpdate)
    -> Result<usize, GradePersistenceError>;

    /// Delete `id`, returning affected rows.
    async fn delete(&self, id: GradeId) -> Result<usize, GradePersistenceError>;
}
