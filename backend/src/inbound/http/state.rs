//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{GradesCommand, GradesQuery, StudentsCommand, StudentsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Student roster reads.
    pub students: Arc<dyn StudentsQuery>,
    /// Student roster writes.
    pub students_command: Arc<dyn StudentsCommand>,
    /// Grade reads and CSV export.
    pub grades: Arc<dyn GradesQuery>,
    /// Grade writes.
    pub grades_command: Arc<dyn GradesCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use gradebook::domain::{GradeService, StudentService};
    /// use gradebook::inbound::http::state::HttpState;
    /// use gradebook::outbound::persistence::{
    ///     DbPool, DieselGradeRepository, DieselStudentRepository, PoolConfig,
    /// };
    ///
    /// # fn demo() -> Result<(), gradebook::outbound::persistence::PoolError> {
    /// let pool = DbPool::new(PoolConfig::new("students.db"))?;
    /// let students = Arc::new(StudentService::new(Arc::new(DieselStudentRepository::new(
    ///     pool.clone(),
    /// ))));
    /// let grades = Arc::new(GradeService::new(Arc::new(DieselGradeRepository::new(pool))));
    /// let state = HttpState::new(students.clone(), students, grades.clone(), grades);
    /// # let _ = state;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        students: Arc<dyn StudentsQuery>,
        students_command: Arc<dyn StudentsCommand>,
        grades: Arc<dyn GradesQuery>,
        grades_command: Arc<dyn GradesCommand>,
    ) -> Self {
        Self {
            students,
            students_command,
            grades,
            grades_command,
        }
    }
}
