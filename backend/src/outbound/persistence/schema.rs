//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the migrations in `backend/migrations`. When
//! the schema changes, regenerate them with `diesel print-schema` or update
//! them by hand.

diesel::table! {
    /// Enrolled students.
    students (id) {
        /// Primary key assigned by SQLite.
        id -> Integer,
        /// Display name, trimmed and non-empty.
        name -> Text,
        /// Contact address; the only format rule is that it contains `@`.
        email -> Text,
    }
}

diesel::table! {
    /// Per-subject assessment scores.
    ///
    /// Rows are removed with their student (`ON DELETE CASCADE`). Each score
    /// column carries a `CHECK` constraint for the 0..=100 range.
    grades (id) {
        /// Primary key assigned by SQLite.
        id -> Integer,
        /// Owning student.
        student_id -> Integer,
        subject -> Text,
        activity_score -> Integer,
        quiz_score -> Integer,
        exam_score -> Integer,
    }
}

diesel::joinable!(grades -> students (student_id));
diesel::allow_tables_to_appear_in_same_query!(students, grades);
