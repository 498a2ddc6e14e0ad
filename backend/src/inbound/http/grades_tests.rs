//! Tests for grade handlers.

use super::*;
use crate::domain::ErrorCode;
use crate::inbound::http::test_utils::MockPorts;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn math_grade(id: i32) -> Grade {
    Grade {
        id: GradeId::new(id),
        student_id: StudentId::new(1),
        subject: "Math".to_owned(),
        scores: GradeScores::try_from_raw(80, 90, 70).expect("scores in range"),
    }
}

async fn expect_bad_request(request: actix_test::TestRequest) -> Error {
    let res = MockPorts::default().call(request).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Error = actix_test::read_body_json(res).await;
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    err
}

#[actix_web::test]
async fn lists_grades_with_student_name_and_average() {
    let mut ports = MockPorts::default();
    ports
        .grades
        .expect_list_grades()
        .withf(|id| *id == StudentId::new(1))
        .times(1)
        .return_once(|_| {
            Ok(vec![GradeEntry {
                grade: math_grade(4),
                student_name: "Jane".to_owned(),
            }])
        });

    let res = ports
        .call(actix_test::TestRequest::get().uri("/api/grades/1"))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        json!([{
            "id": 4,
            "student_id": 1,
            "subject": "Math",
            "activity_score": 80,
            "quiz_score": 90,
            "exam_score": 70,
            "average": "80.00",
            "student_name": "Jane",
        }])
    );
}

#[actix_web::test]
async fn create_records_grade() {
    let mut ports = MockPorts::default();
    ports
        .grades_command
        .expect_record_grade()
        .withf(|grade| grade.subject.as_ref() == "Math" && grade.scores.quiz.get() == 90)
        .times(1)
        .return_once(|_| Ok(math_grade(9)));

    let res = ports
        .call(actix_test::TestRequest::post().uri("/api/grades").set_json(json!({
            "student_id": 1,
            "subject": "Math",
            "activity_score": 80,
            "quiz_score": 90,
            "exam_score": 70,
        })))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["id"], json!(9));
    assert_eq!(body["average"], json!("80.00"));
}

#[rstest]
#[case(-1, "activity_score")]
#[case(101, "activity_score")]
#[case(1000, "activity_score")]
#[actix_web::test]
async fn create_rejects_out_of_range_scores(#[case] score: i64, #[case] field: &str) {
    let err = expect_bad_request(actix_test::TestRequest::post().uri("/api/grades").set_json(json!({
        "student_id": 1,
        "subject": "Math",
        "activity_score": score,
        "quiz_score": 50,
        "exam_score": 50,
    })))
    .await;
    assert_eq!(err.message(), "Scores must be between 0 and 100");
    assert_eq!(err.details().and_then(|d| d.get("field")), Some(&json!(field)));
}

#[rstest]
#[case(json!({"subject": "Math", "activity_score": 1, "quiz_score": 1, "exam_score": 1}), "student_id")]
#[case(json!({"student_id": 1, "activity_score": 1, "quiz_score": 1, "exam_score": 1}), "subject")]
#[case(json!({"student_id": 1, "subject": "Math", "quiz_score": 1, "exam_score": 1}), "activity_score")]
#[case(json!({"student_id": 1, "subject": "Math", "activity_score": 1, "quiz_score": 1}), "exam_score")]
#[actix_web::test]
async fn create_reports_missing_fields(#[case] body: Value, #[case] field: &str) {
    let err = expect_bad_request(actix_test::TestRequest::post().uri("/api/grades").set_json(body)).await;
    assert_eq!(err.message(), "All fields are required");
    assert_eq!(
        err.details(),
        Some(&json!({"field": field, "code": "missing_field"}))
    );
}

#[actix_web::test]
async fn create_rejects_non_integer_scores() {
    expect_bad_request(actix_test::TestRequest::post().uri("/api/grades").set_json(json!({
        "student_id": 1,
        "subject": "Math",
        "activity_score": "80",
        "quiz_score": 90,
        "exam_score": 70,
    })))
    .await;
}

#[actix_web::test]
async fn update_accepts_zero_scores() {
    let mut ports = MockPorts::default();
    ports
        .grades_command
        .expect_update_grade()
        .withf(|id, update| *id == GradeId::new(5) && update.scores.average().hundredths() == 0)
        .times(1)
        .return_once(|_, _| Ok(()));

    let res = ports
        .call(actix_test::TestRequest::put().uri("/api/grades/5").set_json(json!({
            "subject": "Math",
            "activity_score": 0,
            "quiz_score": 0,
            "exam_score": 0,
        })))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({
            "id": 5,
            "subject": "Math",
            "activity_score": 0,
            "quiz_score": 0,
            "exam_score": 0,
            "message": "Grade updated successfully",
        })
    );
}

#[rstest]
#[case(json!({"subject": "Math", "activity_score": 1, "quiz_score": 101, "exam_score": 1}))]
#[case(json!({"subject": "Math", "activity_score": 1, "quiz_score": 1}))]
#[case(json!({"subject": "   ", "activity_score": 1, "quiz_score": 1, "exam_score": 1}))]
#[actix_web::test]
async fn update_rejects_invalid_bodies(#[case] body: Value) {
    expect_bad_request(actix_test::TestRequest::put().uri("/api/grades/5").set_json(body)).await;
}

#[actix_web::test]
async fn delete_acknowledges_with_success_flag() {
    let mut ports = MockPorts::default();
    ports
        .grades_command
        .expect_delete_grade()
        .times(1)
        .return_once(|_| Ok(()));

    let res = ports
        .call(actix_test::TestRequest::delete().uri("/api/grades/2"))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({"success": true, "message": "Grade deleted successfully"})
    );
}

#[actix_web::test]
async fn delete_missing_grade_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .grades_command
        .expect_delete_grade()
        .times(1)
        .return_once(|_| Err(Error::not_found("Grade not found")));

    let res = ports
        .call(actix_test::TestRequest::delete().uri("/api/grades/2"))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let err: Error = actix_test::read_body_json(res).await;
    assert_eq!(err.message(), "Grade not found");
}
