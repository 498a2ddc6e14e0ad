//! Typed HTTP client for the records API.
//!
//! One method per endpoint. Non-success responses are decoded from the error
//! envelope into [`ClientError::Api`], keeping the status and server message.

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::{Error, ErrorCode, GradeId, GradeScores, Score, Student, StudentId};
use crate::inbound::http::grades::{GradeDeleted, GradeRequest, GradeUpdateRequest, GradeUpdated};
use crate::inbound::http::students::{StatusMessage, StudentRequest};

/// Failures surfaced by [`RecordsClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an error status.
    #[error("server returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: StatusCode,
        /// Server-provided message, or the status reason when absent.
        message: String,
        /// Machine-readable code from the envelope, when present.
        code: Option<ErrorCode>,
    },
    /// The request could not be sent or the body could not be decoded.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server URL could not be used as a base.
    #[error("invalid server URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// Message supplied by the server in its error envelope.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, code, .. } if code.is_some() => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// Status line.
    pub message: String,
    /// `OK` when running.
    pub status: String,
}

/// Grade row as listed for a student.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GradeRecord {
    /// Grade identifier.
    pub id: GradeId,
    /// Owning student.
    pub student_id: StudentId,
    /// Subject label.
    pub subject: String,
    /// Activity score.
    pub activity_score: Score,
    /// Quiz score.
    pub quiz_score: Score,
    /// Exam score.
    pub exam_score: Score,
    /// Owner's name; absent on a freshly created grade.
    #[serde(default)]
    pub student_name: Option<String>,
}

impl GradeRecord {
    /// The three scores as a domain value.
    #[must_use]
    pub const fn scores(&self) -> GradeScores {
        GradeScores {
            activity: self.activity_score,
            quiz: self.quiz_score,
            exam: self.exam_score,
        }
    }
}

/// Scores and subject sent when recording or replacing a grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeInput {
    /// Subject label.
    pub subject: String,
    /// Activity score.
    pub activity_score: i64,
    /// Quiz score.
    pub quiz_score: i64,
    /// Exam score.
    pub exam_score: i64,
}

/// Async client for the records API.
#[derive(Debug, Clone)]
pub struct RecordsClient {
    http: Client,
    base: Url,
}

impl RecordsClient {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Url`] when `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }

    async fn checked(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await?;
        debug!(%status, body, "request rejected");
        let (message, code) = match serde_json::from_str::<Error>(&body) {
            Ok(err) => (err.message().to_owned(), Some(err.code())),
            Err(_) => (
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_owned(),
                None,
            ),
        };
        Err(ClientError::Api {
            status,
            message,
            code,
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        Ok(Self::checked(response).await?.json().await?)
    }

    /// `GET /`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the server is unreachable or unhealthy.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self.http.get(self.endpoint("")?).send().await?;
        Self::json(response).await
    }

    /// `GET /api/students`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or server failure.
    pub async fn list_students(&self) -> Result<Vec<Student>, ClientError> {
        let response = self
            .http
            .get(self.endpoint("api/students")?)
            .send()
            .await?;
        Self::json(response).await
    }

    /// `POST /api/students`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or validation rejection.
    pub async fn create_student(&self, name: &str, email: &str) -> Result<Student, ClientError> {
        let body = StudentRequest {
            name: Some(name.to_owned()),
            email: Some(email.to_owned()),
        };
        let response = self
            .http
            .post(self.endpoint("api/students")?)
            .json(&body)
            .send()
            .await?;
        Self::json(response).await
    }

    /// `PUT /api/students/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or validation rejection.
    pub async fn update_student(
        &self,
        id: StudentId,
        name: &str,
        email: &str,
    ) -> Result<String, ClientError> {
        let body = StudentRequest {
            name: Some(name.to_owned()),
            email: Some(email.to_owned()),
        };
        let response = self
            .http
            .put(self.endpoint(&format!("api/students/{id}"))?)
            .json(&body)
            .send()
            .await?;
        Self::json::<StatusMessage>(response)
            .await
            .map(|ack| ack.message)
    }

    /// `DELETE /api/students/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or server failure.
    pub async fn delete_student(&self, id: StudentId) -> Result<String, ClientError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("api/students/{id}"))?)
            .send()
            .await?;
        Self::json::<StatusMessage>(response)
            .await
            .map(|ack| ack.message)
    }

    /// `GET /api/grades/{student_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or server failure.
    pub async fn list_grades(&self, student_id: StudentId) -> Result<Vec<GradeRecord>, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&format!("api/grades/{student_id}"))?)
            .send()
            .await?;
        Self::json(response).await
    }

    /// `POST /api/grades`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or validation rejection.
    pub async fn create_grade(
        &self,
        student_id: StudentId,
        input: &GradeInput,
    ) -> Result<GradeRecord, ClientError> {
        let body = GradeRequest {
            student_id: Some(student_id.get()),
            subject: Some(input.subject.clone()),
            activity_score: Some(input.activity_score),
            quiz_score: Some(input.quiz_score),
            exam_score: Some(input.exam_score),
        };
        let response = self
            .http
            .post(self.endpoint("api/grades")?)
            .json(&body)
            .send()
            .await?;
        Self::json(response).await
    }

    /// `PUT /api/grades/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or validation rejection.
    pub async fn update_grade(
        &self,
        id: GradeId,
        input: &GradeInput,
    ) -> Result<GradeUpdated, ClientError> {
        let body = GradeUpdateRequest {
            subject: Some(input.subject.clone()),
            activity_score: Some(input.activity_score),
            quiz_score: Some(input.quiz_score),
            exam_score: Some(input.exam_score),
        };
        let response = self
            .http
            .put(self.endpoint(&format!("api/grades/{id}"))?)
            .json(&body)
            .send()
            .await?;
        Self::json(response).await
    }

    /// `DELETE /api/grades/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] with status 404 when the grade does not exist.
    pub async fn delete_grade(&self, id: GradeId) -> Result<GradeDeleted, ClientError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("api/grades/{id}"))?)
            .send()
            .await?;
        Self::json(response).await
    }

    /// `GET /api/export/grades/{student_id}`, returning the CSV text.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] with status 404 when the student has no grades.
    pub async fn export_grades(&self, student_id: StudentId) -> Result<String, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&format!("api/export/grades/{student_id}"))?)
            .send()
            .await?;
        Ok(Self::checked(response).await?.text().await?)
    }
}
