//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed student and grade records, the rules that
//! validate them, and the services that implement the driving ports. Nothing
//! here depends on HTTP or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - Student, StudentDraft — student records and validated input.
//! - Grade, GradeEntry, NewGrade, GradeUpdate, Average — grades and the
//!   derived mean.
//! - GradeExport — CSV rendering of a student's grades.
//! - StudentService, GradeService — driving port implementations.

pub mod error;
pub mod grade;
pub mod grade_export;
pub mod grade_service;
pub mod ports;
pub mod student;
pub mod student_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::grade::{
    Average, Grade, GradeEntry, GradeId, GradeScores, GradeUpdate, GradeValidationError,
    NewGrade, SCORE_MAX, SCORE_MIN, Score, ScoreField, Subject,
};
pub use self::grade_export::{CSV_HEADER, GradeExport};
pub use self::grade_service::GradeService;
pub use self::student::{
    EmailAddress, Student, StudentDraft, StudentId, StudentName, StudentValidationError,
};
pub use self::student_service::{EXAMPLE_STUDENT_EMAIL, EXAMPLE_STUDENT_NAME, StudentService};
pub use self::trace_id::TraceId;
