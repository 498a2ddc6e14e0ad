//! Grades and the derived average.
//!
//! Scores are whole numbers in `0..=100`. The average of a grade is the mean of
//! its three scores; it is never stored. Because every score is an integer the
//! average is computed in hundredths with integer arithmetic, which makes the
//! two-decimal rendering exact.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StudentId;

/// Lowest accepted score.
pub const SCORE_MIN: i64 = 0;
/// Highest accepted score.
pub const SCORE_MAX: i64 = 100;

/// Which of the three scores a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreField {
    /// Activity (coursework) score.
    Activity,
    /// Quiz score.
    Quiz,
    /// Exam score.
    Exam,
}

impl ScoreField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activity => "activity_score",
            Self::Quiz => "quiz_score",
            Self::Exam => "exam_score",
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors returned when building grade values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GradeValidationError {
    /// Subject was blank once trimmed.
    #[error("Subject is required")]
    EmptySubject,
    /// A score fell outside `0..=100`.
    #[error("Scores must be between 0 and 100")]
    ScoreOutOfRange {
        /// Offending field.
        field: ScoreField,
        /// Rejected value.
        value: i64,
    },
}

/// Store-assigned grade identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeId(i32);

impl GradeId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for GradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single score in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

/// Raw value rejected by [`Score::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("score {0} is outside 0..=100")]
pub struct ScoreOutOfRange(pub i64);

impl Score {
    /// Validate a raw score for `field`.
    pub fn new(field: ScoreField, value: i64) -> Result<Self, GradeValidationError> {
        Self::try_from(value).map_err(|_| GradeValidationError::ScoreOutOfRange { field, value })
    }

    /// Raw score value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = ScoreOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
            return Err(ScoreOutOfRange(value));
        }
        u8::try_from(value)
            .map(Self)
            .map_err(|_| ScoreOutOfRange(value))
    }
}

impl From<Score> for u8 {
    fn from(value: Score) -> Self {
        value.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blank subject label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subject(String);

impl Subject {
    /// Validate and construct a subject. Surrounding whitespace is removed.
    pub fn new(subject: impl Into<String>) -> Result<Self, GradeValidationError> {
        let subject = subject.into();
        let trimmed = subject.trim();
        if trimmed.is_empty() {
            return Err(GradeValidationError::EmptySubject);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Subject> for String {
    fn from(value: Subject) -> Self {
        value.0
    }
}

impl TryFrom<String> for Subject {
    type Error = GradeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The three scores recorded for a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeScores {
    /// Activity score.
    pub activity: Score,
    /// Quiz score.
    pub quiz: Score,
    /// Exam score.
    pub exam: Score,
}

impl GradeScores {
    /// Validate three raw scores, reporting the first offending field.
    ///
    /// # Examples
    /// ```
    /// use gradebook::domain::GradeScores;
    ///
    /// let scores = GradeScores::try_from_raw(80, 90, 70).expect("in range");
    /// assert_eq!(scores.average().to_string(), "80.00");
    /// assert!(GradeScores::try_from_raw(80, 101, 70).is_err());
    /// ```
    pub fn try_from_raw(activity: i64, quiz: i64, exam: i64) -> Result<Self, GradeValidationError> {
        Ok(Self {
            activity: Score::new(ScoreField::Activity, activity)?,
            quiz: Score::new(ScoreField::Quiz, quiz)?,
            exam: Score::new(ScoreField::Exam, exam)?,
        })
    }

    /// Sum of the three scores.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.activity.get()) + u64::from(self.quiz.get()) + u64::from(self.exam.get())
    }

    /// Mean of the three scores.
    #[must_use]
    pub fn average(&self) -> Average {
        Average::mean_of([*self])
    }
}

/// Mean score, held in hundredths and rendered with two decimals.
///
/// Rounds half away from zero, matching the usual two-decimal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Average {
    hundredths: u64,
}

impl Average {
    /// Mean of the per-grade averages of `grades`; zero when empty.
    ///
    /// Every per-grade average is `total / 3`, so the mean over `n` grades is
    /// `sum(total) / (3 * n)`, evaluated here in hundredths.
    ///
    /// # Examples
    /// ```
    /// use gradebook::domain::{Average, GradeScores};
    ///
    /// let a = GradeScores::try_from_raw(100, 100, 100).expect("in range");
    /// let b = GradeScores::try_from_raw(0, 0, 1).expect("in range");
    /// assert_eq!(Average::mean_of([a, b]).to_string(), "50.17");
    /// assert_eq!(Average::mean_of(Vec::<GradeScores>::new()).to_string(), "0.00");
    /// ```
    pub fn mean_of<I>(grades: I) -> Self
    where
        I: IntoIterator<Item = GradeScores>,
    {
        let (total, count) = grades
            .into_iter()
            .fold((0_u64, 0_u64), |(total, count), scores| {
                (total + scores.total(), count + 1)
            });
        if count == 0 {
            return Self::default();
        }
        // round(total * 100 / (3n)) == floor((total * 200 + 3n) / (6n))
        let denominator = 6 * count;
        let hundredths = (total * 200 + 3 * count).div_euclid(denominator);
        Self { hundredths }
    }

    /// Value in hundredths of a point.
    #[must_use]
    pub const fn hundredths(self) -> u64 {
        self.hundredths
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.hundredths.div_euclid(100),
            self.hundredths.rem_euclid(100)
        )
    }
}

impl Serialize for Average {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Validated fields for recording a new grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGrade {
    /// Owning student.
    pub student_id: StudentId,
    /// Subject label.
    pub subject: Subject,
    /// Recorded scores.
    pub scores: GradeScores,
}

/// Validated replacement fields for an existing grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeUpdate {
    /// Subject label.
    pub subject: Subject,
    /// Recorded scores.
    pub scores: GradeScores,
}

/// Persisted grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    /// Store-assigned identifier.
    pub id: GradeId,
    /// Owning student.
    pub student_id: StudentId,
    /// Subject label.
    pub subject: String,
    /// Recorded scores.
    pub scores: GradeScores,
}

impl Grade {
    /// Combine an assigned identifier with the fields that produced it.
    #[must_use]
    pub fn from_new(id: GradeId, grade: NewGrade) -> Self {
        Self {
            id,
            student_id: grade.student_id,
            subject: grade.subject.into(),
            scores: grade.scores,
        }
    }

    /// Mean of this grade's scores.
    #[must_use]
    pub fn average(&self) -> Average {
        self.scores.average()
    }
}

#[derive(Serialize)]
struct GradeDto<'a> {
    id: GradeId,
    student_id: StudentId,
    subject: &'a str,
    activity_score: Score,
    quiz_score: Score,
    exam_score: Score,
    average: Average,
}

impl<'a> From<&'a Grade> for GradeDto<'a> {
    fn from(value: &'a Grade) -> Self {
        Self {
            id: value.id,
            student_id: value.student_id,
            subject: value.subject.as_str(),
            activity_score: value.scores.activity,
            quiz_score: value.scores.quiz,
            exam_score: value.scores.exam,
            average: value.average(),
        }
    }
}

impl Serialize for Grade {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        GradeDto::from(self).serialize(serializer)
    }
}

/// Grade joined with its owner's name, as listed per student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeEntry {
    /// The grade itself.
    #[serde(flatten)]
    pub grade: Grade,
    /// Name of the owning student.
    pub student_name: String,
}
