//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The record store cannot be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Invalid email format")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "email", "code": "invalid_email"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Student`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Student)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i32,
    /// Display name.
    #[schema(example = "Jane")]
    name: String,
    /// Contact email.
    #[schema(example = "jane@x.com")]
    email: String,
}

/// OpenAPI schema for [`crate::domain::Grade`].
///
/// `average` is derived from the three scores and rendered with two decimals.
#[derive(ToSchema)]
#[schema(as = crate::domain::Grade)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GradeSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i32,
    /// Owning student.
    #[schema(example = 1)]
    student_id: i32,
    /// Subject label.
    #[schema(example = "Math")]
    subject: String,
    #[schema(minimum = 0, maximum = 100, example = 80)]
    activity_score: u8,
    #[schema(minimum = 0, maximum = 100, example = 90)]
    quiz_score: u8,
    #[schema(minimum = 0, maximum = 100, example = 70)]
    exam_score: u8,
    /// Mean of the three scores.
    #[schema(example = "80.00")]
    average: String,
}

/// OpenAPI schema for [`crate::domain::GradeEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::GradeEntry)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GradeEntrySchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = 1)]
    student_id: i32,
    #[schema(example = "Math")]
    subject: String,
    #[schema(minimum = 0, maximum = 100, example = 80)]
    activity_score: u8,
    #[schema(minimum = 0, maximum = 100, example = 90)]
    quiz_score: u8,
    #[schema(minimum = 0, maximum = 100, example = 70)]
    exam_score: u8,
    #[schema(example = "80.00")]
    average: String,
    /// Name of the owning student.
    #[schema(example = "Jane")]
    student_name: String,
}
