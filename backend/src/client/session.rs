//! Client session: runs user actions against the API and keeps the view in
//! step.
//!
//! Every mutation refetches the affected list instead of patching it locally.
//! Failures never escape as errors; they land in [`ViewState::error`] with a
//! message suitable for display, and the action reports that nothing
//! happened.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{GradeId, Student, StudentId};

use super::api::{ClientError, GradeInput, GradeRecord, HealthStatus, RecordsClient};
use super::view::{DashboardSummary, ViewState};

/// Shown when a grade action needs a selected student.
pub const SELECT_STUDENT_FIRST: &str = "Please select a student first";

/// The calls a [`Session`] makes; implemented by [`RecordsClient`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordsApi: Send + Sync {
    /// Ping the server.
    async fn health(&self) -> Result<HealthStatus, ClientError>;
    /// Fetch the roster.
    async fn list_students(&self) -> Result<Vec<Student>, ClientError>;
    /// Create a student.
    async fn create_student(&self, name: &str, email: &str) -> Result<Student, ClientError>;
    /// Replace a student's name and email.
    async fn update_student(
        &self,
        id: StudentId,
        name: &str,
        email: &str,
    ) -> Result<(), ClientError>;
    /// Delete a student.
    async fn delete_student(&self, id: StudentId) -> Result<(), ClientError>;
    /// Fetch a student's grades.
    async fn list_grades(&self, student_id: StudentId) -> Result<Vec<GradeRecord>, ClientError>;
    /// Record a grade.
    async fn create_grade(
        &self,
        student_id: StudentId,
        input: &GradeInput,
    ) -> Result<(), ClientError>;
    /// Replace a grade.
    async fn update_grade(&self, id: GradeId, input: &GradeInput) -> Result<(), ClientError>;
    /// Delete a grade.
    async fn delete_grade(&self, id: GradeId) -> Result<(), ClientError>;
    /// Download a student's grades as CSV.
    async fn export_grades(&self, student_id: StudentId) -> Result<String, ClientError>;
}

#[async_trait]
impl RecordsApi for RecordsClient {
    async fn health(&self) -> Result<HealthStatus, ClientError> {
        Self::health(self).await
    }

    async fn list_students(&self) -> Result<Vec<Student>, ClientError> {
        Self::list_students(self).await
    }

    async fn create_student(&self, name: &str, email: &str) -> Result<Student, ClientError> {
        Self::create_student(self, name, email).await
    }

    async fn update_student(
        &self,
        id: StudentId,
        name: &str,
        email: &str,
    ) -> Result<(), ClientError> {
        Self::update_student(self, id, name, email).await.map(drop)
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), ClientError> {
        Self::delete_student(self, id).await.map(drop)
    }

    async fn list_grades(&self, student_id: StudentId) -> Result<Vec<GradeRecord>, ClientError> {
        Self::list_grades(self, student_id).await
    }

    async fn create_grade(
        &self,
        student_id: StudentId,
        input: &GradeInput,
    ) -> Result<(), ClientError> {
        Self::create_grade(self, student_id, input).await.map(drop)
    }

    async fn update_grade(&self, id: GradeId, input: &GradeInput) -> Result<(), ClientError> {
        Self::update_grade(self, id, input).await.map(drop)
    }

    async fn delete_grade(&self, id: GradeId) -> Result<(), ClientError> {
        Self::delete_grade(self, id).await.map(drop)
    }

    async fn export_grades(&self, student_id: StudentId) -> Result<String, ClientError> {
        Self::export_grades(self, student_id).await
    }
}

/// CSV produced by an export, named the way the browser download was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Suggested file name, `grades_<student id>.csv`.
    pub filename: String,
    /// CSV text.
    pub contents: String,
}

/// User-facing controller over a [`RecordsApi`] and a [`ViewState`].
pub struct Session<A> {
    api: A,
    view: ViewState,
}

impl<A> Session<A>
where
    A: RecordsApi,
{
    /// Start a session with an empty view.
    pub fn new(api: A) -> Self {
        Self {
            api,
            view: ViewState::new(),
        }
    }

    /// Current view state.
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// Mutable view state for filters, screens and edit targets.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    fn fail(&mut self, action: &str, err: &ClientError, message: impl Into<String>) {
        warn!(action, error = %err, "client action failed");
        self.view.set_error(message);
    }

    /// Ping the server, then load the roster.
    pub async fn load_students(&mut self) -> bool {
        self.view.dismiss_error();
        self.view.set_loading(true);
        let result = match self.api.health().await {
            Ok(_) => self.api.list_students().await,
            Err(err) => Err(err),
        };
        self.view.set_loading(false);
        match result {
            Ok(students) => {
                self.view.set_students(students);
                true
            }
            Err(err) => {
                let message = err.to_string();
                self.fail("load students", &err, message);
                false
            }
        }
    }

    /// Create a student and reload the roster.
    pub async fn add_student(&mut self, name: &str, email: &str) -> bool {
        self.view.set_loading(true);
        let result = self.api.create_student(name, email).await;
        self.view.set_loading(false);
        match result {
            Ok(_) => self.load_students().await,
            Err(err) => {
                let message = err.server_message().map_or_else(|| err.to_string(), str::to_owned);
                self.fail("add student", &err, message);
                false
            }
        }
    }

    /// Replace a student's details and reload the roster.
    pub async fn update_student(&mut self, id: StudentId, name: &str, email: &str) -> bool {
        self.view.set_loading(true);
        let result = self.api.update_student(id, name, email).await;
        self.view.set_loading(false);
        match result {
            Ok(()) => self.load_students().await,
            Err(err) => {
                let message = err.server_message().map_or_else(|| err.to_string(), str::to_owned);
                self.fail("update student", &err, message);
                false
            }
        }
    }

    /// Delete a student and reload the roster.
    pub async fn delete_student(&mut self, id: StudentId) -> bool {
        self.view.set_loading(true);
        let result = self.api.delete_student(id).await;
        self.view.set_loading(false);
        match result {
            Ok(()) => self.load_students().await,
            Err(err) => {
                let message = err.to_string();
                self.fail("delete student", &err, message);
                false
            }
        }
    }

    /// Select a student and load their grades.
    pub async fn select_student(&mut self, id: StudentId) -> bool {
        self.view.select(Some(id));
        self.refresh_grades().await
    }

    /// Reload the selected student's grades.
    pub async fn refresh_grades(&mut self) -> bool {
        let Some(student_id) = self.view.selected() else {
            self.view.set_error(SELECT_STUDENT_FIRST);
            return false;
        };
        self.view.set_loading(true);
        let result = self.api.list_grades(student_id).await;
        self.view.set_loading(false);
        match result {
            Ok(grades) => {
                self.view.set_grades(grades);
                self.view.dismiss_error();
                true
            }
            Err(err) => {
                self.fail("fetch grades", &err, "Unable to fetch grades. Please try again.");
                false
            }
        }
    }

    /// Record a grade for the selected student.
    pub async fn add_grade(&mut self, input: &GradeInput) -> bool {
        let Some(student_id) = self.view.selected() else {
            self.view.set_error(SELECT_STUDENT_FIRST);
            return false;
        };
        self.view.set_loading(true);
        let result = self.api.create_grade(student_id, input).await;
        self.view.set_loading(false);
        match result {
            Ok(()) => self.refresh_grades().await,
            Err(err) => {
                let message = err
                    .server_message()
                    .unwrap_or("Failed to add grade")
                    .to_owned();
                self.fail("add grade", &err, message);
                false
            }
        }
    }

    /// Replace the grade currently being edited, then end the edit.
    pub async fn update_grade(&mut self, input: &GradeInput) -> bool {
        let Some(id) = self.view.editing() else {
            self.view.set_error("Failed to update grade");
            return false;
        };
        self.view.set_loading(true);
        let result = self.api.update_grade(id, input).await;
        self.view.set_loading(false);
        match result {
            Ok(()) => {
                self.view.cancel_edit();
                self.refresh_grades().await
            }
            Err(err) => {
                self.fail("update grade", &err, "Failed to update grade");
                false
            }
        }
    }

    /// Delete a grade and reload the selected student's grades.
    pub async fn delete_grade(&mut self, id: GradeId) -> bool {
        self.view.dismiss_error();
        self.view.set_loading(true);
        let result = self.api.delete_grade(id).await;
        self.view.set_loading(false);
        match result {
            Ok(()) if self.view.selected().is_some() => self.refresh_grades().await,
            Ok(()) => true,
            Err(err) => {
                self.fail("delete grade", &err, "Failed to delete grade. Please try again.");
                false
            }
        }
    }

    /// Download the selected student's grades.
    pub async fn export_grades(&mut self) -> Option<ExportedFile> {
        let Some(student_id) = self.view.selected() else {
            self.view.set_error(SELECT_STUDENT_FIRST);
            return None;
        };
        self.view.set_loading(true);
        let result = self.api.export_grades(student_id).await;
        self.view.set_loading(false);
        match result {
            Ok(contents) => {
                self.view.dismiss_error();
                Some(ExportedFile {
                    filename: format!("grades_{student_id}.csv"),
                    contents,
                })
            }
            Err(err) => {
                self.fail("export grades", &err, "Failed to export grades");
                None
            }
        }
    }

    /// Dashboard figures over the roster and the loaded grades.
    pub fn dashboard(&self) -> DashboardSummary {
        self.view.dashboard()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
