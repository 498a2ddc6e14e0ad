//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers every handler in the inbound
//! layer and the domain schema wrappers from
//! [`crate::inbound::http::schemas`], keeping domain types free of utoipa.
//!
//! The generated specification is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::export::__path_export_grades;
use crate::inbound::http::grades::{
    __path_create_grade, __path_delete_grade, __path_list_grades, __path_update_grade,
    GradeDeleted, GradeRequest, GradeUpdateRequest, GradeUpdated,
};
use crate::inbound::http::health::{__path_live, __path_ready, __path_root, ServerStatus};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, GradeEntrySchema, GradeSchema, StudentSchema,
};
use crate::inbound::http::students::{
    __path_create_student, __path_delete_student, __path_list_students, __path_update_student,
    StatusMessage, StudentRequest,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gradebook API",
        description = "Student roster, per-subject grades and CSV export."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        list_students,
        create_student,
        update_student,
        delete_student,
        list_grades,
        create_grade,
        update_grade,
        delete_grade,
        export_grades,
        root,
        ready,
        live,
    ),
    components(schemas(
        StudentSchema,
        GradeSchema,
        GradeEntrySchema,
        ErrorSchema,
        ErrorCodeSchema,
        StudentRequest,
        StatusMessage,
        GradeRequest,
        GradeUpdateRequest,
        GradeUpdated,
        GradeDeleted,
        ServerStatus,
    )),
    tags(
        (name = "students", description = "Student roster"),
        (name = "grades", description = "Grades and their export"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const GRADE_ENTRY_SCHEMA_NAME: &str = "crate.domain.GradeEntry";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "message")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case(GRADE_ENTRY_SCHEMA_NAME, "student_name")]
    #[case(GRADE_ENTRY_SCHEMA_NAME, "average")]
    fn registered_schemas_have_fields(#[case] schema_name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(schema_name).expect("schema registered");
        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/students")]
    #[case("/api/students/{id}")]
    #[case("/api/grades")]
    #[case("/api/grades/{id}")]
    #[case("/api/grades/{student_id}")]
    #[case("/api/export/grades/{student_id}")]
    #[case("/")]
    #[case("/health/ready")]
    fn every_endpoint_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("/api/students", "get", "200", "/items/$ref", "crate.domain.Student")]
    #[case("/api/students", "post", "200", "/$ref", "crate.domain.Student")]
    #[case("/api/students", "post", "400", "/$ref", ERROR_SCHEMA_NAME)]
    #[case("/api/grades/{student_id}", "get", "200", "/items/$ref", GRADE_ENTRY_SCHEMA_NAME)]
    #[case("/api/grades", "post", "200", "/$ref", "crate.domain.Grade")]
    #[case("/api/grades/{id}", "delete", "404", "/$ref", ERROR_SCHEMA_NAME)]
    #[case("/api/export/grades/{student_id}", "get", "404", "/$ref", ERROR_SCHEMA_NAME)]
    fn responses_reference_registered_schemas(
        #[case] path: &str,
        #[case] method: &str,
        #[case] status: &str,
        #[case] pointer: &str,
        #[case] schema_name: &str,
    ) {
        let doc = serde_json::to_value(ApiDoc::openapi()).expect("document serialises");
        let response = &doc["paths"][path][method]["responses"][status];
        let schema = &response["content"]["application/json"]["schema"];
        assert_eq!(
            schema.pointer(pointer).and_then(serde_json::Value::as_str),
            Some(format!("#/components/schemas/{schema_name}").as_str()),
            "{method} {path} {status}"
        );
    }
}
