//! Student roster handlers.
//!
//! ```text
//! GET    /api/students
//! POST   /api/students      {"name":"Jane","email":"jane@x.com"}
//! PUT    /api/students/{id} {"name":"Jane","email":"jane@x.com"}
//! DELETE /api/students/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Student, StudentDraft, StudentId, StudentValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, StudentSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::student_validation_error;

/// Body for creating or replacing a student.
///
/// Both fields are optional at the schema level so absence is reported with
/// the same message as a blank value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct StudentRequest {
    /// Display name.
    #[schema(example = "Jane")]
    pub name: Option<String>,
    /// Contact email; must contain `@`.
    #[schema(example = "jane@x.com")]
    pub email: Option<String>,
}

impl TryFrom<StudentRequest> for StudentDraft {
    type Error = StudentValidationError;

    fn try_from(value: StudentRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.unwrap_or_default(),
            value.email.unwrap_or_default(),
        )
    }
}

/// Acknowledgement returned by student mutations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusMessage {
    /// Human-readable outcome.
    #[schema(example = "Student updated")]
    pub message: String,
}

impl StatusMessage {
    fn new(message: &str) -> web::Json<Self> {
        web::Json(Self {
            message: message.to_owned(),
        })
    }
}

/// List all students ordered by id.
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "Students", body = [StudentSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Student>>> {
    let students = state.students.list_students().await?;
    Ok(web::Json(students))
}

/// Create a student and return the stored row.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Created student", body = StudentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: web::Json<StudentRequest>,
) -> ApiResult<web::Json<Student>> {
    let draft = StudentDraft::try_from(payload.into_inner()).map_err(student_validation_error)?;
    let student = state.students_command.create_student(draft).await?;
    Ok(web::Json(student))
}

/// Replace a student's name and email.
///
/// Unknown ids succeed without effect.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student id")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StatusMessage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<StudentRequest>,
) -> ApiResult<web::Json<StatusMessage>> {
    let draft = StudentDraft::try_from(payload.into_inner()).map_err(student_validation_error)?;
    state
        .students_command
        .update_student(StudentId::new(path.into_inner()), draft)
        .await?;
    Ok(StatusMessage::new("Student updated"))
}

/// Delete a student and, through the store's cascade, all of their grades.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student deleted", body = StatusMessage),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<StatusMessage>> {
    state
        .students_command
        .delete_student(StudentId::new(path.into_inner()))
        .await?;
    Ok(StatusMessage::new("Student deleted"))
}
