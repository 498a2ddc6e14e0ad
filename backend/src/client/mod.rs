//! Client side of the records API.
//!
//! [`api::RecordsClient`] speaks HTTP, [`view::ViewState`] holds what the
//! screens show, and [`session::Session`] ties the two together so every
//! action refetches what it changed.

pub mod api;
pub mod session;
pub mod view;

pub use api::{ClientError, GradeInput, GradeRecord, HealthStatus, RecordsClient};
pub use session::{ExportedFile, RecordsApi, SELECT_STUDENT_FIRST, Session};
pub use view::{DashboardSummary, Screen, ViewState};
