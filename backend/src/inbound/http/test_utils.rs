//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::{App, test as actix_test, web};

use crate::domain::ports::{
    MockGradesCommand, MockGradesQuery, MockStudentsCommand, MockStudentsQuery,
};
use crate::middleware::Trace;

use super::state::HttpState;

/// Mocked driving ports; set expectations before calling [`MockPorts::call`].
#[derive(Default)]
pub struct MockPorts {
    pub students: MockStudentsQuery,
    pub students_command: MockStudentsCommand,
    pub grades: MockGradesQuery,
    pub grades_command: MockGradesCommand,
}

impl MockPorts {
    fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.students),
            Arc::new(self.students_command),
            Arc::new(self.grades),
            Arc::new(self.grades_command),
        )
    }

    /// Serve `request` through the full API configuration.
    pub async fn call(self, request: actix_test::TestRequest) -> ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .wrap(Trace)
                .app_data(web::Data::new(self.into_state()))
                .configure(super::configure),
        )
        .await;
        actix_test::call_service(&app, request.to_request()).await
    }
}
