//! CSV rendering of a student's grades.

use super::{GradeEntry, StudentId};

/// Column header row of the export.
pub const CSV_HEADER: &str = "Student,Subject,Activity Score,Quiz Score,Exam Score,Average";

/// Rendered CSV export for one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeExport {
    student_id: StudentId,
    body: String,
}

impl GradeExport {
    /// Render `entries` as CSV.
    ///
    /// Returns `None` when there is nothing to export. Rows are joined with
    /// `\n` without a trailing newline, so `n` grades produce `n + 1` lines.
    ///
    /// # Examples
    /// ```
    /// use gradebook::domain::{GradeExport, StudentId};
    ///
    /// assert!(GradeExport::render(StudentId::new(1), &[]).is_none());
    /// ```
    #[must_use]
    pub fn render(student_id: StudentId, entries: &[GradeEntry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let mut lines = Vec::with_capacity(entries.len() + 1);
        lines.push(CSV_HEADER.to_owned());
        lines.extend(entries.iter().map(render_row));
        Some(Self {
            student_id,
            body: lines.join("\n"),
        })
    }

    /// Attachment filename offered to the client.
    #[must_use]
    pub fn filename(&self) -> String {
        format!("student_{}_grades.csv", self.student_id)
    }

    /// CSV text.
    #[must_use]
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Consume the export, returning the CSV text.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }
}

fn render_row(entry: &GradeEntry) -> String {
    let grade = &entry.grade;
    format!(
        "{},{},{},{},{},{}",
        quote_field(&entry.student_name),
        quote_field(&grade.subject),
        grade.scores.activity,
        grade.scores.quiz,
        grade.scores.exam,
        grade.average()
    )
}

/// Quote a field when it contains a delimiter, quote or line break.
fn quote_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
