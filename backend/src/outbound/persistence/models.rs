//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;

use crate::domain::{
    Grade, GradeEntry, GradeId, GradeScores, GradeUpdate, GradeValidationError, NewGrade,
    Student, StudentDraft, StudentId,
};

use super::schema::{grades, students};

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct StudentRow {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: StudentId::new(row.id),
            name: row.name,
            email: row.email,
        }
    }
}

/// Insertable and changeset struct for student name and email.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a StudentDraft> for StudentFields<'a> {
    fn from(draft: &'a StudentDraft) -> Self {
        Self {
            name: draft.name.as_ref(),
            email: draft.email.as_ref(),
        }
    }
}

/// Row struct for reading from the grades table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = grades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct GradeRow {
    pub id: i32,
    pub student_id: i32,
    pub subject: String,
    pub activity_score: i32,
    pub quiz_score: i32,
    pub exam_score: i32,
}

impl GradeRow {
    /// Convert to a domain grade, re-validating the stored scores.
    pub fn into_grade(self) -> Result<Grade, GradeValidationError> {
        let scores = GradeScores::try_from_raw(
            i64::from(self.activity_score),
            i64::from(self.quiz_score),
            i64::from(self.exam_score),
        )?;
        Ok(Grade {
            id: GradeId::new(self.id),
            student_id: StudentId::new(self.student_id),
            subject: self.subject,
            scores,
        })
    }

    /// Pair the grade with its owner's name.
    pub fn into_entry(self, student_name: String) -> Result<GradeEntry, GradeValidationError> {
        Ok(GradeEntry {
            grade: self.into_grade()?,
            student_name,
        })
    }
}

/// Insertable struct for creating grade records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = grades)]
pub(crate) struct NewGradeRow<'a> {
    pub student_id: i32,
    pub subject: &'a str,
    pub activity_score: i32,
    pub quiz_score: i32,
    pub exam_score: i32,
}

impl<'a> From<&'a NewGrade> for NewGradeRow<'a> {
    fn from(grade: &'a NewGrade) -> Self {
        Self {
            student_id: grade.student_id.get(),
            subject: grade.subject.as_ref(),
            activity_score: i32::from(grade.scores.activity.get()),
            quiz_score: i32::from(grade.scores.quiz.get()),
            exam_score: i32::from(grade.scores.exam.get()),
        }
    }
}

/// Changeset struct for replacing a grade's subject and scores.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = grades)]
pub(crate) struct GradeChangeset<'a> {
    pub subject: &'a str,
    pub activity_score: i32,
    pub quiz_score: i32,
    pub exam_score: i32,
}

impl<'a> From<&'a GradeUpdate> for GradeChangeset<'a> {
    fn from(update: &'a GradeUpdate) -> Self {
        Self {
            subject: update.subject.as_ref(),
            activity_score: i32::from(update.scores.activity.get()),
            quiz_score: i32::from(update.scores.quiz.get()),
            exam_score: i32::from(update.scores.exam.get()),
        }
    }
}
