//! Client-side view state: what is loaded, selected and filtered.
//!
//! Holds no I/O. [`super::session::Session`] drives it from API responses.

use std::collections::HashSet;

use crate::domain::{Average, GradeId, Student, StudentId};

use super::api::GradeRecord;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Roster and grade management.
    #[default]
    Students,
    /// Summary figures.
    Dashboard,
}

/// Figures shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Number of students in the roster.
    pub total_students: usize,
    /// Mean of the per-grade averages of the loaded grades.
    pub overall_average: Average,
    /// Distinct subjects among the loaded grades.
    pub subject_count: usize,
}

/// Mutable state behind the client screens.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    screen: Screen,
    students: Vec<Student>,
    selected: Option<StudentId>,
    grades: Vec<GradeRecord>,
    editing: Option<GradeId>,
    student_search: String,
    subject_filter: String,
    loading: bool,
    error: Option<String>,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl ViewState {
    /// Empty state on the students screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active screen.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Switch screens.
    pub fn show(&mut self, screen: Screen) {
        self.screen = screen;
    }

    /// Loaded roster.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Replace the roster. A selection whose student vanished is cleared.
    pub fn set_students(&mut self, students: Vec<Student>) {
        self.students = students;
        if let Some(id) = self.selected {
            if !self.students.iter().any(|s| s.id == id) {
                self.select(None);
            }
        }
    }

    /// Currently selected student id.
    #[must_use]
    pub const fn selected(&self) -> Option<StudentId> {
        self.selected
    }

    /// The selected student's row, if loaded.
    #[must_use]
    pub fn selected_student(&self) -> Option<&Student> {
        let id = self.selected?;
        self.students.iter().find(|s| s.id == id)
    }

    /// Change the selection. Grades and any edit in progress belong to the
    /// previous student and are dropped.
    pub fn select(&mut self, student: Option<StudentId>) {
        if self.selected != student {
            self.grades.clear();
            self.editing = None;
        }
        self.selected = student;
    }

    /// Loaded grades for the selected student.
    #[must_use]
    pub fn grades(&self) -> &[GradeRecord] {
        &self.grades
    }

    /// Replace the loaded grades. An edit target that no longer exists is
    /// cancelled.
    pub fn set_grades(&mut self, grades: Vec<GradeRecord>) {
        self.grades = grades;
        if let Some(id) = self.editing {
            if !self.grades.iter().any(|g| g.id == id) {
                self.editing = None;
            }
        }
    }

    /// Grade being edited.
    #[must_use]
    pub const fn editing(&self) -> Option<GradeId> {
        self.editing
    }

    /// The grade being edited, if still loaded.
    #[must_use]
    pub fn editing_grade(&self) -> Option<&GradeRecord> {
        let id = self.editing?;
        self.grades.iter().find(|g| g.id == id)
    }

    /// Start editing `id`.
    pub fn begin_edit(&mut self, id: GradeId) {
        self.editing = Some(id);
    }

    /// Stop editing.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Set the free-text student search.
    pub fn set_student_search(&mut self, search: impl Into<String>) {
        self.student_search = search.into();
    }

    /// Set the subject filter.
    pub fn set_subject_filter(&mut self, filter: impl Into<String>) {
        self.subject_filter = filter.into();
    }

    /// Students whose name or email contains the search text, ignoring case.
    pub fn filtered_students(&self) -> impl Iterator<Item = &Student> {
        self.students.iter().filter(|s| {
            contains_ignore_case(&s.name, &self.student_search)
                || contains_ignore_case(&s.email, &self.student_search)
        })
    }

    /// Grades whose subject contains the filter text, ignoring case.
    pub fn filtered_grades(&self) -> impl Iterator<Item = &GradeRecord> {
        self.grades
            .iter()
            .filter(|g| contains_ignore_case(&g.subject, &self.subject_filter))
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark a request as started or finished.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Last error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Record an error for display.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Clear the error banner.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Mean of the per-grade averages of all loaded grades; zero when none.
    ///
    /// The subject filter does not apply.
    #[must_use]
    pub fn overall_average(&self) -> Average {
        Average::mean_of(self.grades.iter().map(GradeRecord::scores))
    }

    /// Dashboard figures for the current state.
    #[must_use]
    pub fn dashboard(&self) -> DashboardSummary {
        let subjects: HashSet<&str> = self.grades.iter().map(|g| g.subject.as_str()).collect();
        DashboardSummary {
            total_students: self.students.len(),
            overall_average: self.overall_average(),
            subject_count: subjects.len(),
        }
    }
}
