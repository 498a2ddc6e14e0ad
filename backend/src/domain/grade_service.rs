//! Grade records service implementing the grade driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{GradePersistenceError, GradeRepository, GradesCommand, GradesQuery};
use crate::domain::{
    Error, Grade, GradeEntry, GradeExport, GradeId, GradeUpdate, NewGrade, StudentId,
};

/// Grade service backed by a [`GradeRepository`].
#[derive(Clone)]
pub struct GradeService<R> {
    repo: Arc<R>,
}

impl<R> GradeService<R> {
    /// Create a new service over `repo`.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> GradeService<R>
where
    R: GradeRepository,
{
    fn map_persistence_error(err: GradePersistenceError) -> Error {
        match err {
            GradePersistenceError::Connection { message } => {
                error!(%message, "grade repository unavailable");
                Error::service_unavailable(format!("grade repository unavailable: {message}"))
            }
            GradePersistenceError::Query { message } => {
                error!(%message, "grade repository query failed");
                Error::internal(format!("grade repository error: {message}"))
            }
            GradePersistenceError::UnknownStudent { student_id } => {
                Error::invalid_request(format!("student {student_id} does not exist"))
                    .with_details(json!({ "field": "student_id", "code": "unknown_student" }))
            }
        }
    }
}

#[async_trait]
impl<R> GradesQuery for GradeService<R>
where
    R: GradeRepository,
{
    async fn list_grades(&self, student_id: StudentId) -> Result<Vec<GradeEntry>, Error> {
        self.repo
            .list_for_student(student_id)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn export_grades(&self, student_id: StudentId) -> Result<GradeExport, Error> {
        let entries = self.list_grades(student_id).await?;
        GradeExport::render(student_id, &entries).ok_or_else(|| Error::not_found("No grades found"))
    }
}

#[async_trait]
impl<R> GradesCommand for GradeService<R>
where
    R: GradeRepository,
{
    async fn record_grade(&self, grade: NewGrade) -> Result<Grade, Error> {
        let id = self
            .repo
            .insert(&grade)
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(Grade::from_new(id, grade))
    }

    async fn update_grade(&self, id: GradeId, update: GradeUpdate) -> Result<(), Error> {
        let affected = self
            .repo
            .update(id, &update)
            .await
            .map_err(Self::map_persistence_error)?;
        if affected == 0 {
            info!(grade_id = %id, "update matched no grade");
        }
        Ok(())
    }

    async fn delete_grade(&self, id: GradeId) -> Result<(), Error> {
        let affected = self
            .repo
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)?;
        if affected == 0 {
            return Err(Error::not_found("Grade not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "grade_service_tests.rs"]
mod tests;
