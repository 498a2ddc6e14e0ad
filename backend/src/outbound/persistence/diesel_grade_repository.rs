//! SQLite-backed `GradeRepository` implementation using Diesel ORM.
//!
//! Listing joins each grade with its student's name. Inserts rely on the
//! store's foreign key to reject unknown students.

use async_trait::async_trait;
use diesel::prelude::*;
use tracing::warn;

use crate::domain::ports::{GradePersistenceError, GradeRepository};
use crate::domain::{GradeEntry, GradeId, GradeUpdate, NewGrade, StudentId};

use super::diesel_basic_error_mapping::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::diesel_student_repository::last_insert_rowid;
use super::models::{GradeChangeset, GradeRow, NewGradeRow};
use super::pool::{DbPool, PoolError};
use super::schema::{grades, students};

/// Diesel-backed implementation of the `GradeRepository` port.
#[derive(Clone)]
pub struct DieselGradeRepository {
    pool: DbPool,
}

impl DieselGradeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GradePersistenceError {
    map_basic_pool_error(error, GradePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> GradePersistenceError {
    map_basic_diesel_error(
        error,
        GradePersistenceError::query,
        GradePersistenceError::connection,
    )
}

fn rows_to_entries(
    rows: Vec<(GradeRow, String)>,
) -> Result<Vec<GradeEntry>, GradePersistenceError> {
    rows.into_iter()
        .map(|(row, student_name)| {
            let grade_id = row.id;
            row.into_entry(student_name).map_err(|err| {
                warn!(grade_id, error = %err, "stored grade failed validation");
                GradePersistenceError::query(format!("grade {grade_id} is corrupt: {err}"))
            })
        })
        .collect()
}

#[async_trait]
impl GradeRepository for DieselGradeRepository {
    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<GradeEntry>, GradePersistenceError> {
        let rows = self
            .pool
            .run(
                move |conn| {
                    grades::table
                        .inner_join(students::table)
                        .filter(grades::student_id.eq(student_id.get()))
                        .order(grades::id.asc())
                        .select((GradeRow::as_select(), students::name))
                        .load::<(GradeRow, String)>(conn)
                        .map_err(map_diesel_error)
                },
                map_pool_error,
            )
            .await?;
        rows_to_entries(rows)
    }

    async fn insert(&self, grade: &NewGrade) -> Result<GradeId, GradePersistenceError> {
        let grade = grade.clone();
        self.pool
            .run(
                move |conn| {
                    let row = NewGradeRow::from(&grade);
                    conn.transaction(|conn| {
                        diesel::insert_into(grades::table)
                            .values(&row)
                            .execute(conn)?;
                        last_insert_rowid(conn)
                    })
                    .map(GradeId::new)
                    .map_err(|err| {
                        if is_foreign_key_violation(&err) {
                            GradePersistenceError::unknown_student(grade.student_id.get())
                        } else {
                            map_diesel_error(err)
                        }
                    })
                },
                map_pool_error,
            )
            .await
    }

    async fn update(
        &self,
        id: GradeId,
        update: &GradeUpdate,
    ) -> Result<usize, GradePersistenceError> {
        let update = update.clone();
        self.pool
            .run(
                move |conn| {
                    diesel::update(grades::table.find(id.get()))
                        .set(&GradeChangeset::from(&update))
                        .execute(conn)
                        .map_err(map_diesel_error)
                },
                map_pool_error,
            )
            .await
    }

    async fn delete(&self, id: GradeId) -> Result<usize, GradePersistenceError> {
        self.pool
            .run(
                move |conn| {
                    diesel::delete(grades::table.find(id.get()))
                        .execute(conn)
                        .map_err(map_diesel_error)
                },
                map_pool_error,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::StudentRepository;
    use crate::domain::{GradeScores, StudentDraft, Subject};
    use crate::outbound::persistence::{DieselStudentRepository, PoolConfig};
    use rstest::{fixture, rstest};

    struct Store {
        students: DieselStudentRepository,
        grades: DieselGradeRepository,
    }

    #[fixture]
    async fn store() -> Store {
        let pool = DbPool::new(PoolConfig::new(":memory:")).expect("pool");
        pool.run_migrations().await.expect("migrations");
        Store {
            students: DieselStudentRepository::new(pool.clone()),
            grades: DieselGradeRepository::new(pool),
        }
    }

    async fn enrol(store: &Store, name: &str) -> StudentId {
        let draft = StudentDraft::try_from_parts(name, format!("{name}@x.com"))
            .expect("valid draft");
        store.students.insert(&draft).await.expect("insert student")
    }

    fn new_grade(student_id: StudentId, subject: &str, scores: (i64, i64, i64)) -> NewGrade {
        NewGrade {
            student_id,
            subject: Subject::new(subject).expect("valid subject"),
            scores: GradeScores::try_from_raw(scores.0, scores.1, scores.2).expect("in range"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn lists_only_the_students_grades_with_name(#[future] store: Store) {
        let store = store.await;
        let jane = enrol(&store, "Jane").await;
        let omar = enrol(&store, "Omar").await;
        let math = store
            .grades
            .insert(&new_grade(jane, "Math", (80, 90, 70)))
            .await
            .expect("insert");
        store
            .grades
            .insert(&new_grade(omar, "Art", (50, 50, 50)))
            .await
            .expect("insert");
        store
            .grades
            .insert(&new_grade(jane, "Science", (60, 60, 61)))
            .await
            .expect("insert");

        let entries = store.grades.list_for_student(jane).await.expect("list");
        let subjects: Vec<_> = entries.iter().map(|e| e.grade.subject.as_str()).collect();
        assert_eq!(subjects, ["Math", "Science"]);
        assert!(entries.iter().all(|e| e.student_name == "Jane"));
        assert_eq!(entries[0].grade.id, math);
        assert_eq!(entries[0].grade.average().to_string(), "80.00");
    }

    #[rstest]
    #[tokio::test]
    async fn insert_for_unknown_student_is_rejected(#[future] store: Store) {
        let store = store.await;
        let err = store
            .grades
            .insert(&new_grade(StudentId::new(999), "Math", (1, 2, 3)))
            .await
            .expect_err("foreign key rejects row");
        assert_eq!(err, GradePersistenceError::unknown_student(999));
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_student_removes_their_grades(#[future] store: Store) {
        let store = store.await;
        let jane = enrol(&store, "Jane").await;
        store
            .grades
            .insert(&new_grade(jane, "Math", (80, 90, 70)))
            .await
            .expect("insert");

        store.students.delete(jane).await.expect("delete student");
        let entries = store.grades.list_for_student(jane).await.expect("list");
        assert!(entries.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_subject_and_scores(#[future] store: Store) {
        let store = store.await;
        let jane = enrol(&store, "Jane").await;
        let id = store
            .grades
            .insert(&new_grade(jane, "Math", (80, 90, 70)))
            .await
            .expect("insert");

        let update = GradeUpdate {
            subject: Subject::new("Algebra").expect("valid subject"),
            scores: GradeScores::try_from_raw(0, 0, 0).expect("in range"),
        };
        assert_eq!(store.grades.update(id, &update).await.expect("update"), 1);
        assert_eq!(
            store
                .grades
                .update(GradeId::new(id.get() + 100), &update)
                .await
                .expect("update missing"),
            0
        );

        let entries = store.grades.list_for_student(jane).await.expect("list");
        assert_eq!(entries[0].grade.subject, "Algebra");
        assert_eq!(entries[0].grade.average().to_string(), "0.00");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_affected_rows(#[future] store: Store) {
        let store = store.await;
        let jane = enrol(&store, "Jane").await;
        let id = store
            .grades
            .insert(&new_grade(jane, "Math", (80, 90, 70)))
            .await
            .expect("insert");

        assert_eq!(store.grades.delete(id).await.expect("delete"), 1);
        assert_eq!(store.grades.delete(id).await.expect("second delete"), 0);
    }
}
