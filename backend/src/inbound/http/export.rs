//! CSV export of a student's grades.
//!
//! ```text
//! GET /api/export/grades/{student_id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};

use crate::domain::StudentId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Download a student's grades as `student_<id>_grades.csv`.
#[utoipa::path(
    get,
    path = "/api/export/grades/{student_id}",
    params(("student_id" = i32, Path, description = "Student id")),
    responses(
        (
            status = 200,
            description = "CSV attachment",
            content_type = "text/csv",
            body = String,
            headers(
                ("Content-Disposition" = String, description = "attachment; filename=student_<id>_grades.csv"),
                ("Cache-Control" = String, description = "no-cache")
            )
        ),
        (status = 404, description = "No grades found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["grades"],
    operation_id = "exportGrades"
)]
#[get("/export/grades/{student_id}")]
pub async fn export_grades(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let export = state
        .grades
        .export_grades(StudentId::new(path.into_inner()))
        .await?;
    let disposition = format!("attachment; filename={}", export.filename());
    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((header::CONTENT_DISPOSITION, disposition))
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .body(export.into_body()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Error, ErrorCode, Grade, GradeEntry, GradeExport, GradeId, GradeScores,
    };
    use crate::inbound::http::test_utils::MockPorts;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;

    fn entry(subject: &str) -> GradeEntry {
        GradeEntry {
            grade: Grade {
                id: GradeId::new(1),
                student_id: StudentId::new(4),
                subject: subject.to_owned(),
                scores: GradeScores::try_from_raw(80, 90, 70).expect("scores in range"),
            },
            student_name: "Jane".to_owned(),
        }
    }

    #[actix_web::test]
    async fn serves_csv_attachment() {
        let mut ports = MockPorts::default();
        ports
            .grades
            .expect_export_grades()
            .withf(|id| *id == StudentId::new(4))
            .times(1)
            .return_once(|id| {
                GradeExport::render(id, &[entry("Math"), entry("Art, Design")])
                    .ok_or_else(|| Error::not_found("No grades found"))
            });

        let res = ports
            .call(actix_test::TestRequest::get().uri("/api/export/grades/4"))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let header_value = |name: header::HeaderName| {
            res.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        assert_eq!(header_value(header::CONTENT_TYPE).as_deref(), Some("text/csv"));
        assert_eq!(
            header_value(header::CONTENT_DISPOSITION).as_deref(),
            Some("attachment; filename=student_4_grades.csv")
        );
        assert_eq!(header_value(header::CACHE_CONTROL).as_deref(), Some("no-cache"));

        let body = actix_test::read_body(res).await;
        let body = std::str::from_utf8(&body).expect("utf8 body");
        let lines: Vec<_> = body.lines().collect();
        assert_eq!(
            lines,
            [
                "Student,Subject,Activity Score,Quiz Score,Exam Score,Average",
                "Jane,Math,80,90,70,80.00",
                "Jane,\"Art, Design\",80,90,70,80.00",
            ]
        );
        assert!(!body.ends_with('\n'));
    }

    #[actix_web::test]
    async fn empty_export_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .grades
            .expect_export_grades()
            .times(1)
            .return_once(|_| Err(Error::not_found("No grades found")));

        let res = ports
            .call(actix_test::TestRequest::get().uri("/api/export/grades/4"))
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let err: Error = actix_test::read_body_json(res).await;
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "No grades found");
    }
}
