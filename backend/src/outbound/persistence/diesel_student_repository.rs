//! SQLite-backed `StudentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::domain::ports::{StudentPersistenceError, StudentRepository};
use crate::domain::{Student, StudentDraft, StudentId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{StudentFields, StudentRow};
use super::pool::{DbPool, PoolError};
use super::schema::students;

/// Diesel-backed implementation of the `StudentRepository` port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentPersistenceError {
    map_basic_pool_error(error, StudentPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> StudentPersistenceError {
    map_basic_diesel_error(
        error,
        StudentPersistenceError::query,
        StudentPersistenceError::connection,
    )
}

/// Identifier SQLite assigned to the last row inserted on `conn`.
pub(crate) fn last_insert_rowid(conn: &mut SqliteConnection) -> QueryResult<i32> {
    diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
        "last_insert_rowid()",
    ))
    .get_result(conn)
}

fn insert_student(conn: &mut SqliteConnection, fields: &StudentFields<'_>) -> QueryResult<i32> {
    diesel::insert_into(students::table)
        .values(fields)
        .execute(conn)?;
    last_insert_rowid(conn)
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentPersistenceError> {
        self.pool
            .run(
                |conn| {
                    students::table
                        .order(students::id.asc())
                        .select(StudentRow::as_select())
                        .load(conn)
                        .map(|rows| rows.into_iter().map(Student::from).collect())
                        .map_err(map_diesel_error)
                },
                map_pool_error,
            )
            .await
    }

    async fn insert(&self, draft: &StudentDraft) -> Result<StudentId, StudentPersistenceError> {
        let name = draft.name.to_string();
        let email = draft.email.to_string();
        self.pool
            .run(
                move |conn| {
                    let fields = StudentFields {
                        name: &name,
                        email: &email,
                    };
                    conn.transaction(|conn| insert_student(conn, &fields))
                        .map(StudentId::new)
                        .map_err(map_diesel_error)
                },
                map_pool_error,
            )
            .await
    }

    async fn update(
        &self,
        id: StudentId,
        draft: &StudentDraft,
    ) -> Result<usize, StudentPersistenceError> {
        let name = draft.name.to_string();
        let email = draft.email.to_string();
        self.pool
            .run(
                move |conn| {
                    diesel::update(students::table.find(id.get()))
                        .set(&StudentFields {
                            name: &name,
                            email: &email,
                        })
                        .execute(conn)
                        .map_err(map_diesel_error)
                },
                map_pool_error,
            )
            .await
    }

    async fn delete(&self, id: StudentId) -> Result<usize, StudentPersistenceError> {
        self.pool
            .run(
                move |conn| {
                    diesel::delete(students::table.find(id.get()))
                        .execute(conn)
                        .map_err(map_diesel_error)
                },
                map_pool_error,
            )
            .await
    }

    async fn insert_if_empty(
        &self,
        draft: &StudentDraft,
    ) -> Result<Option<StudentId>, StudentPersistenceError> {
        let name = draft.name.to_string();
        let email = draft.email.to_string();
        self.pool
            .run(
                move |conn| {
                    conn.immediate_transaction(|conn| {
                        let existing: i64 = students::table.count().get_result(conn)?;
                        if existing > 0 {
                            return Ok(None);
                        }
                        let fields = StudentFields {
                            name: &name,
                            email: &email,
                        };
                        insert_student(conn, &fields).map(|id| Some(StudentId::new(id)))
                    })
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
    use crate::outbound::persistence::PoolConfig;
    use rstest::{fixture, rstest};

    #[fixture]
    async fn repo() -> DieselStudentRepository {
        let pool = DbPool::new(PoolConfig::new(":memory:")).expect("pool");
        pool.run_migrations().await.expect("migrations");
        DieselStudentRepository::new(pool)
    }

    fn draft(name: &str, email: &str) -> StudentDraft {
        StudentDraft::try_from_parts(name, email).expect("valid draft")
    }

    #[rstest]
    #[tokio::test]
    async fn inserted_students_are_listed_in_id_order(
        #[future] repo: DieselStudentRepository,
    ) {
        let repo = repo.await;
        let first = repo.insert(&draft("Jane", "jane@x.com")).await.expect("insert");
        let second = repo.insert(&draft("Omar", "omar@x.com")).await.expect("insert");
        assert!(second.get() > first.get());

        let listed = repo.list().await.expect("list");
        let names: Vec<_> = listed.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Jane", "Omar"]);
        assert_eq!(listed[0].id, first);
    }

    #[rstest]
    #[tokio::test]
    async fn update_and_delete_report_affected_rows(#[future] repo: DieselStudentRepository) {
        let repo = repo.await;
        let id = repo.insert(&draft("Jane", "jane@x.com")).await.expect("insert");

        let updated = repo
            .update(id, &draft("Janet", "janet@x.com"))
            .await
            .expect("update");
        assert_eq!(updated, 1);
        let listed = repo.list().await.expect("list");
        assert_eq!(listed[0].email, "janet@x.com");

        assert_eq!(repo.delete(id).await.expect("delete"), 1);
        assert_eq!(repo.delete(id).await.expect("second delete"), 0);
        assert_eq!(
            repo.update(id, &draft("Gone", "gone@x.com"))
                .await
                .expect("update missing"),
            0
        );
    }

    #[rstest]
    #[case("jane@localhost")]
    #[case("@")]
    #[case("j@x.co.uk")]
    #[tokio::test]
    async fn email_is_stored_as_given_once_it_contains_at(
        #[future] repo: DieselStudentRepository,
        #[case] email: &str,
    ) {
        let repo = repo.await;
        repo.insert(&draft("Jane", email)).await.expect("insert");
        let listed = repo.list().await.expect("list");
        assert_eq!(listed[0].email, email);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_if_empty_only_seeds_an_empty_roster(#[future] repo: DieselStudentRepository) {
        let repo = repo.await;
        let seeded = repo
            .insert_if_empty(&draft("Test Student", "test@example.com"))
            .await
            .expect("seed");
        assert!(seeded.is_some());

        let again = repo
            .insert_if_empty(&draft("Test Student", "test@example.com"))
            .await
            .expect("second seed");
        assert_eq!(again, None);
        assert_eq!(repo.list().await.expect("list").len(), 1);
    }
}
