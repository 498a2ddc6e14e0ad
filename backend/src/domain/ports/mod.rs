//! Domain ports for the hexagonal boundary.
//!
//! Repository ports are implemented by outbound adapters; driving ports
//! (`*Query`, `*Command`) are implemented by domain services and called by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod grade_records;
mod grade_repository;
mod student_records;
mod student_repository;

#[cfg(test)]
pub use grade_records::{MockGradesCommand, MockGradesQuery};
pub use grade_records::{GradesCommand, GradesQuery};
#[cfg(test)]
pub use grade_repository::MockGradeRepository;
pub use grade_repository::{GradePersistenceError, GradeRepository};
#[cfg(test)]
pub use student_records::{MockStudentsCommand, MockStudentsQuery};
pub use student_records::{StudentsCommand, StudentsQuery};
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentPersistenceError, StudentRepository};
