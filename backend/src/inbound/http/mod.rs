//! HTTP inbound adapter exposing REST endpoints.
//!
//! All record endpoints live under `/api`; the status message and probes sit
//! at the root.

pub mod error;
pub mod export;
pub mod grades;
pub mod health;
pub mod schemas;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api` scope and the extractor error handlers.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use gradebook::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(
            web::scope("/api")
                .service(students::list_students)
                .service(students::create_student)
                .service(students::update_student)
                .service(students::delete_student)
                .service(grades::list_grades)
                .service(grades::create_grade)
                .service(grades::update_grade)
                .service(grades::delete_grade)
                .service(export::export_grades),
        );
}
