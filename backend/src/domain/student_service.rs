//! Student records service implementing the student driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    StudentPersistenceError, StudentRepository, StudentsCommand, StudentsQuery,
};
use crate::domain::{Error, Student, StudentDraft, StudentId};

/// Name of the placeholder student written into an empty roster.
pub const EXAMPLE_STUDENT_NAME: &str = "Test Student";
/// Email of the placeholder student written into an empty roster.
pub const EXAMPLE_STUDENT_EMAIL: &str = "test@example.com";

/// Student service backed by a [`StudentRepository`].
#[derive(Clone)]
pub struct StudentService<R> {
    repo: Arc<R>,
}

impl<R> StudentService<R> {
    /// Create a new service over `repo`.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> StudentService<R>
where
    R: StudentRepository,
{
    fn map_persistence_error(err: StudentPersistenceError) -> Error {
        error!(error = %err, "student repository failure");
        match err {
            StudentPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("student repository unavailable: {message}"))
            }
            StudentPersistenceError::Query { message } => {
                Error::internal(format!("student repository error: {message}"))
            }
        }
    }

    /// Write the placeholder student when the roster is empty.
    ///
    /// Returns the inserted student, or `None` when students already exist.
    pub async fn seed_example_student(&self) -> Result<Option<Student>, Error> {
        let draft = StudentDraft::try_from_parts(EXAMPLE_STUDENT_NAME, EXAMPLE_STUDENT_EMAIL)
            .map_err(|err| Error::internal(format!("invalid example student: {err}")))?;
        let inserted = self
            .repo
            .insert_if_empty(&draft)
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(inserted.map(|id| {
            info!(student_id = %id, "seeded example student");
            Student::from_draft(id, draft)
        }))
    }
}

#[async_trait]
impl<R> StudentsQuery for StudentService<R>
where
    R: StudentRepository,
{
    async fn list_students(&self) -> Result<Vec<Student>, Error> {
        self.repo.list().await.map_err(Self::map_persistence_error)
    }
}

#[async_trait]
impl<R> StudentsCommand for StudentService<R>
where
    R: StudentRepository,
{
    async fn create_student(&self, draft: StudentDraft) -> Result<Student, Error> {
        let id = self
            .repo
            .insert(&draft)
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(Student::from_draft(id, draft))
    }

    async fn update_student(&self, id: StudentId, draft: StudentDraft) -> Result<(), Error> {
        let affected = self
            .repo
            .update(id, &draft)
            .await
            .map_err(Self::map_persistence_error)?;
        if affected == 0 {
            info!(student_id = %id, "update matched no student");
        }
        Ok(())
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), Error> {
        let affected = self
            .repo
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)?;
        if affected == 0 {
            info!(student_id = %id, "delete matched no student");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
