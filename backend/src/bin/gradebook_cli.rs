//! Command-line client for a running records server.
//!
//! Each invocation performs one action through a
//! [`gradebook::client::Session`], so mutations are followed by the same
//! refetch a long-lived client would do and failures surface with the same
//! messages.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use gradebook::client::{GradeInput, GradeRecord, RecordsClient, Screen, Session, ViewState};
use gradebook::domain::{GradeId, StudentId};
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

/// `gradebook-cli` arguments.
#[derive(Debug, Parser)]
#[command(
    name = "gradebook-cli",
    about = "Manage students and grades on a records server",
    version
)]
struct CliArgs {
    /// Base URL of the records server.
    #[arg(
        long = "server-url",
        env = "GRADEBOOK_SERVER_URL",
        default_value = "http://localhost:5000",
        value_name = "url"
    )]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::Args)]
struct ScoreArgs {
    /// Subject name.
    #[arg(long)]
    subject: String,
    /// Activity score, 0 to 100.
    #[arg(long, allow_negative_numbers = true)]
    activity: i64,
    /// Quiz score, 0 to 100.
    #[arg(long, allow_negative_numbers = true)]
    quiz: i64,
    /// Exam score, 0 to 100.
    #[arg(long, allow_negative_numbers = true)]
    exam: i64,
}

impl From<ScoreArgs> for GradeInput {
    fn from(value: ScoreArgs) -> Self {
        Self {
            subject: value.subject,
            activity_score: value.activity,
            quiz_score: value.quiz,
            exam_score: value.exam,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List students, optionally filtered by name or email.
    Students {
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a student.
    AddStudent {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Replace a student's name and email.
    UpdateStudent {
        id: i32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Delete a student and their grades.
    DeleteStudent { id: i32 },
    /// List a student's grades, optionally filtered by subject.
    Grades {
        student_id: i32,
        #[arg(long)]
        subject: Option<String>,
    },
    /// Record a grade for a student.
    AddGrade {
        student_id: i32,
        #[command(flatten)]
        scores: ScoreArgs,
    },
    /// Replace one of a student's grades.
    UpdateGrade {
        student_id: i32,
        grade_id: i32,
        #[command(flatten)]
        scores: ScoreArgs,
    },
    /// Delete one of a student's grades.
    DeleteGrade { student_id: i32, grade_id: i32 },
    /// Save a student's grades as CSV.
    Export {
        student_id: i32,
        /// Destination file; defaults to `grades_<student id>.csv`.
        #[arg(long, value_name = "path")]
        output: Option<PathBuf>,
    },
    /// Show roster size, subject count and the overall average.
    Dashboard {
        /// Student whose grades feed the average and subject count.
        #[arg(long)]
        student: Option<i32>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    // Logs go to stderr so command output stays parseable.
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| eyre!("tracing init failed: {err}"))?;

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(args))
}

/// Turn a failed action into an error carrying the message the session
/// recorded.
fn ensure(done: bool, session: &Session<RecordsClient>) -> Result<()> {
    if done {
        return Ok(());
    }
    Err(eyre!(
        "{}",
        session.view().error().unwrap_or("request failed")
    ))
}

async fn run(args: CliArgs) -> Result<()> {
    let client = RecordsClient::new(&args.server_url)
        .wrap_err_with(|| format!("invalid server URL {}", args.server_url))?;
    let mut session = Session::new(client);
    let mut out = io::stdout().lock();

    match args.command {
        Command::Students { search } => {
            ensure(session.load_students().await, &session)?;
            if let Some(search) = search {
                session.view_mut().set_student_search(search);
            }
            render_screen(&mut out, session.view())?;
        }
        Command::AddStudent { name, email } => {
            ensure(session.add_student(&name, &email).await, &session)?;
            writeln!(out, "Student added")?;
        }
        Command::UpdateStudent { id, name, email } => {
            let done = session
                .update_student(StudentId::new(id), &name, &email)
                .await;
            ensure(done, &session)?;
            writeln!(out, "Student updated")?;
        }
        Command::DeleteStudent { id } => {
            ensure(session.delete_student(StudentId::new(id)).await, &session)?;
            writeln!(out, "Student deleted")?;
        }
        Command::Grades {
            student_id,
            subject,
        } => {
            select(&mut session, student_id).await?;
            if let Some(subject) = subject {
                session.view_mut().set_subject_filter(subject);
            }
            for grade in session.view().filtered_grades() {
                write_grade(&mut out, grade)?;
            }
        }
        Command::AddGrade { student_id, scores } => {
            select(&mut session, student_id).await?;
            ensure(session.add_grade(&scores.into()).await, &session)?;
            writeln!(out, "Grade added")?;
        }
        Command::UpdateGrade {
            student_id,
            grade_id,
            scores,
        } => {
            select(&mut session, student_id).await?;
            let grade_id = GradeId::new(grade_id);
            if !session.view().grades().iter().any(|g| g.id == grade_id) {
                return Err(eyre!("student {student_id} has no grade {grade_id}"));
            }
            session.view_mut().begin_edit(grade_id);
            ensure(session.update_grade(&scores.into()).await, &session)?;
            writeln!(out, "Grade updated successfully")?;
        }
        Command::DeleteGrade {
            student_id,
            grade_id,
        } => {
            select(&mut session, student_id).await?;
            ensure(session.delete_grade(GradeId::new(grade_id)).await, &session)?;
            writeln!(out, "Grade deleted successfully")?;
        }
        Command::Export { student_id, output } => {
            select(&mut session, student_id).await?;
            let file = session
                .export_grades()
                .await
                .ok_or_else(|| eyre!("{}", session.view().error().unwrap_or("export failed")))?;
            let path = output.unwrap_or_else(|| PathBuf::from(&file.filename));
            fs::write(&path, file.contents)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            writeln!(out, "{}", path.display())?;
        }
        Command::Dashboard { student } => {
            ensure(session.load_students().await, &session)?;
            if let Some(student_id) = student {
                select(&mut session, student_id).await?;
            }
            session.view_mut().show(Screen::Dashboard);
            render_screen(&mut out, session.view())?;
        }
    }
    Ok(())
}

async fn select(session: &mut Session<RecordsClient>, student_id: i32) -> Result<()> {
    let done = session.select_student(StudentId::new(student_id)).await;
    ensure(done, session)
}

/// Print the active screen: the filtered roster or the dashboard figures.
fn render_screen(out: &mut impl Write, view: &ViewState) -> io::Result<()> {
    match view.screen() {
        Screen::Students => {
            for student in view.filtered_students() {
                writeln!(out, "{}\t{}\t{}", student.id, student.name, student.email)?;
            }
        }
        Screen::Dashboard => {
            let summary = view.dashboard();
            writeln!(out, "Total students: {}", summary.total_students)?;
            writeln!(out, "Overall average: {}", summary.overall_average)?;
            writeln!(out, "Subjects: {}", summary.subject_count)?;
        }
    }
    Ok(())
}

fn write_grade(out: &mut impl Write, grade: &GradeRecord) -> io::Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}\t{}\t{}\t{}",
        grade.id,
        grade.subject,
        grade.activity_score,
        grade.quiz_score,
        grade.exam_score,
        grade.scores().average()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook::domain::Student;
    use clap::CommandFactory;
    use rstest::rstest;

    #[rstest]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[rstest]
    fn add_grade_accepts_out_of_range_scores_for_the_server_to_reject() {
        let args = CliArgs::try_parse_from([
            "gradebook-cli",
            "add-grade",
            "1",
            "--subject",
            "Math",
            "--activity",
            "-1",
            "--quiz",
            "90",
            "--exam",
            "70",
        ])
        .expect("arguments parse");
        let Command::AddGrade { student_id, scores } = args.command else {
            panic!("expected add-grade");
        };
        assert_eq!(student_id, 1);
        assert_eq!(GradeInput::from(scores).activity_score, -1);
    }

    #[rstest]
    fn write_grade_includes_average() {
        let grade: GradeRecord = serde_json::from_value(serde_json::json!({
            "id": 3,
            "student_id": 1,
            "subject": "Math",
            "activity_score": 80,
            "quiz_score": 90,
            "exam_score": 70,
        }))
        .expect("valid grade row");
        let mut buf = Vec::new();
        write_grade(&mut buf, &grade).expect("write to buffer");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "3\tMath\t80\t90\t70\t80.00\n");
    }

    fn roster() -> ViewState {
        let mut view = ViewState::new();
        view.set_students(vec![
            Student {
                id: StudentId::new(1),
                name: "Jane".to_owned(),
                email: "jane@x.com".to_owned(),
            },
            Student {
                id: StudentId::new(2),
                name: "Omar".to_owned(),
                email: "omar@x.com".to_owned(),
            },
        ]);
        view
    }

    fn rendered(view: &ViewState) -> String {
        let mut buf = Vec::new();
        render_screen(&mut buf, view).expect("write to buffer");
        String::from_utf8(buf).expect("utf8")
    }

    #[rstest]
    fn students_screen_lists_filtered_roster() {
        let mut view = roster();
        view.set_student_search("OMAR");
        assert_eq!(rendered(&view), "2\tOmar\tomar@x.com\n");
    }

    #[rstest]
    fn dashboard_screen_prints_summary() {
        let mut view = roster();
        view.show(Screen::Dashboard);
        assert_eq!(
            rendered(&view),
            "Total students: 2\nOverall average: 0.00\nSubjects: 0\n"
        );
    }
}
