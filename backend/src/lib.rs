//! Student records backend library.
//!
//! A small REST service that keeps a roster of students and their graded
//! activities in SQLite, exports a student's grades as CSV, and ships a
//! typed client for the same API.

pub mod client;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
