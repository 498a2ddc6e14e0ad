//! Grade handlers.
//!
//! ```text
//! GET    /api/grades/{student_id}
//! POST   /api/grades      {"student_id":1,"subject":"Math","activity_score":80,...}
//! PUT    /api/grades/{id} {"subject":"Math","activity_score":80,...}
//! DELETE /api/grades/{id}
//! ```
//!
//! Scores are checked for presence, then range, before any port is called.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, Grade, GradeEntry, GradeId, GradeScores, GradeUpdate, NewGrade, StudentId, Subject,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, GradeEntrySchema, GradeSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, grade_validation_error, require};

/// Body for recording a grade.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct GradeRequest {
    /// Owning student; must exist.
    #[schema(example = 1)]
    pub student_id: Option<i32>,
    /// Subject label; must not be blank.
    #[schema(example = "Math")]
    pub subject: Option<String>,
    /// Activity score between 0 and 100.
    #[schema(minimum = 0, maximum = 100, example = 80)]
    pub activity_score: Option<i64>,
    /// Quiz score between 0 and 100.
    #[schema(minimum = 0, maximum = 100, example = 90)]
    pub quiz_score: Option<i64>,
    /// Exam score between 0 and 100.
    #[schema(minimum = 0, maximum = 100, example = 70)]
    pub exam_score: Option<i64>,
}

/// Body for replacing a grade's subject and scores.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct GradeUpdateRequest {
    /// Replacement subject label.
    #[schema(example = "Math")]
    pub subject: Option<String>,
    /// Replacement activity score.
    #[schema(minimum = 0, maximum = 100, example = 80)]
    pub activity_score: Option<i64>,
    /// Replacement quiz score.
    #[schema(minimum = 0, maximum = 100, example = 90)]
    pub quiz_score: Option<i64>,
    /// Replacement exam score.
    #[schema(minimum = 0, maximum = 100, example = 70)]
    pub exam_score: Option<i64>,
}

/// Echo of an applied grade update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GradeUpdated {
    /// Identifier from the request path.
    pub id: i32,
    /// Subject as stored.
    pub subject: String,
    /// Activity score as stored.
    pub activity_score: u8,
    /// Quiz score as stored.
    pub quiz_score: u8,
    /// Exam score as stored.
    pub exam_score: u8,
    /// Confirmation text.
    #[schema(example = "Grade updated successfully")]
    pub message: String,
}

/// Acknowledgement of a grade deletion.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GradeDeleted {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// Confirmation text.
    #[schema(example = "Grade deleted successfully")]
    pub message: String,
}

fn parse_subject(subject: Option<String>) -> Result<Subject, Error> {
    let subject = require(subject, FieldName::new("subject"))?;
    Subject::new(subject).map_err(grade_validation_error)
}

fn parse_scores(
    activity: Option<i64>,
    quiz: Option<i64>,
    exam: Option<i64>,
) -> Result<GradeScores, Error> {
    let activity = require(activity, FieldName::new("activity_score"))?;
    let quiz = require(quiz, FieldName::new("quiz_score"))?;
    let exam = require(exam, FieldName::new("exam_score"))?;
    GradeScores::try_from_raw(activity, quiz, exam).map_err(grade_validation_error)
}

impl TryFrom<GradeRequest> for NewGrade {
    type Error = Error;

    fn try_from(value: GradeRequest) -> Result<Self, Self::Error> {
        let student_id = require(value.student_id, FieldName::new("student_id"))?;
        let subject = parse_subject(value.subject)?;
        let scores = parse_scores(value.activity_score, value.quiz_score, value.exam_score)?;
        Ok(Self {
            student_id: StudentId::new(student_id),
            subject,
            scores,
        })
    }
}

impl TryFrom<GradeUpdateRequest> for GradeUpdate {
    type Error = Error;

    fn try_from(value: GradeUpdateRequest) -> Result<Self, Self::Error> {
        let subject = parse_subject(value.subject)?;
        let scores = parse_scores(value.activity_score, value.quiz_score, value.exam_score)?;
        Ok(Self { subject, scores })
    }
}

/// List a student's grades with the student's name; empty when none exist.
#[utoipa::path(
    get,
    path = "/api/grades/{student_id}",
    params(("student_id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Grades", body = [GradeEntrySchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["grades"],
    operation_id = "listGrades"
)]
#[get("/grades/{student_id}")]
pub async fn list_grades(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<GradeEntry>>> {
    let entries = state
        .grades
        .list_grades(StudentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(entries))
}

/// Record a grade and return it with its assigned id.
#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = GradeRequest,
    responses(
        (status = 200, description = "Recorded grade", body = GradeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["grades"],
    operation_id = "createGrade"
)]
#[post("/grades")]
pub async fn create_grade(
    state: web::Data<HttpState>,
    payload: web::Json<GradeRequest>,
) -> ApiResult<web::Json<Grade>> {
    let grade = NewGrade::try_from(payload.into_inner())?;
    let stored = state.grades_command.record_grade(grade).await?;
    Ok(web::Json(stored))
}

/// Replace a grade's subject and all three scores.
#[utoipa::path(
    put,
    path = "/api/grades/{id}",
    params(("id" = i32, Path, description = "Grade id")),
    request_body = GradeUpdateRequest,
    responses(
        (status = 200, description = "Updated fields", body = GradeUpdated),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["grades"],
    operation_id = "updateGrade"
)]
#[put("/grades/{id}")]
pub async fn update_grade(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<GradeUpdateRequest>,
) -> ApiResult<web::Json<GradeUpdated>> {
    let id = GradeId::new(path.into_inner());
    let update = GradeUpdate::try_from(payload.into_inner())?;
    let response = GradeUpdated {
        id: id.get(),
        subject: update.subject.to_string(),
        activity_score: update.scores.activity.get(),
        quiz_score: update.scores.quiz.get(),
        exam_score: update.scores.exam.get(),
        message: "Grade updated successfully".to_owned(),
    };
    state.grades_command.update_grade(id, update).await?;
    Ok(web::Json(response))
}

/// Delete a grade; 404 when no row matched.
#[utoipa::path(
    delete,
    path = "/api/grades/{id}",
    params(("id" = i32, Path, description = "Grade id")),
    responses(
        (status = 200, description = "Grade deleted", body = GradeDeleted),
        (status = 404, description = "Grade not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["grades"],
    operation_id = "deleteGrade"
)]
#[delete("/grades/{id}")]
pub async fn delete_grade(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<GradeDeleted>> {
    state
        .grades_command
        .delete_grade(GradeId::new(path.into_inner()))
        .await?;
    Ok(web::Json(GradeDeleted {
        success: true,
        message: "Grade deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
#[path = "grades_tests.rs"]
mod tests;
