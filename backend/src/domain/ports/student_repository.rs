//! Port abstraction for student persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Student, StudentDraft, StudentId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by student repository adapters.
    pub enum StudentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "student repository query failed: {message}",
    }
}

/// Storage for student rows.
///
/// Mutations report the number of affected rows; callers decide whether zero
/// is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students ordered by identifier.
    async fn list(&self) -> Result<Vec<Student>, StudentPersistenceError>;

    /// Insert a student and return its assigned identifier.
    async fn insert(&self, draft: &StudentDraft) -> Result<StudentId, StudentPersistenceError>;

    /// Replace name and email of `id`.
    async fn update(
        &self,
        id: StudentId,
        draft: &StudentDraft,
    ) -> Result<usize, StudentPersistenceError>;

    /// Delete `id`; the store cascades to its grades.
    async fn delete(&self, id: StudentId) -> Result<usize, StudentPersistenceError>;

    /// Insert `draft` only when no students exist yet.
    ///
    /// Returns the new identifier when a row was written.
    async fn insert_if_empty(
        &self,
        draft: &StudentDraft,
    ) -> Result<Option<StudentId>, StudentPersistenceError>;
}
