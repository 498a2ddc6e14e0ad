//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by a single SQLite database file, pooled with `r2d2`.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leave this module.
//! - **Blocking isolation**: Diesel's SQLite driver is synchronous; all work
//!   runs on Tokio's blocking pool via [`DbPool::run`].
//! - **Strongly typed errors**: Database errors are mapped to the port error
//!   types before they reach the domain.
//!
//! # Example
//!
//! ```no_run
//! use gradebook::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
//!
//! # async fn demo() -> Result<(), gradebook::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("students.db"))?;
//! pool.run_migrations().await?;
//! let repo = DieselStudentRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_grade_repository;
mod diesel_student_repository;
mod models;
mod pool;
mod schema;

pub use diesel_grade_repository::DieselGradeRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use pool::{DbPool, MIGRATIONS, PoolConfig, PoolError, SqlitePooledConnection};
