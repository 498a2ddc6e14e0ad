//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{GradeService, StudentService};
use crate::inbound::http::error::route_not_found;
use crate::inbound::http::health::{HealthState, live, ready, root};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::persistence::{DbPool, DieselGradeRepository, DieselStudentRepository};

/// Wire the Diesel repositories into the domain services behind the ports.
#[must_use]
pub fn build_http_state(pool: &DbPool) -> HttpState {
    let students = Arc::new(StudentService::new(Arc::new(DieselStudentRepository::new(
        pool.clone(),
    ))));
    let grades = Arc::new(GradeService::new(Arc::new(DieselGradeRepository::new(
        pool.clone(),
    ))));
    HttpState::new(students.clone(), students, grades.clone(), grades)
}

/// Assemble the application: middleware, probes, API scope and fallback.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(crate::inbound::http::configure)
        .service(root)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(route_not_found))
}

/// A server bound to its listening socket but not yet driven.
pub struct BoundServer {
    /// Server future; await it to serve requests.
    pub server: Server,
    /// Address actually bound, useful when the configured port was 0.
    pub local_addr: SocketAddr,
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness is flagged once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<BoundServer> {
    let ServerConfig {
        bind_addr,
        db_pool,
        workers,
    } = config;
    let http_state = web::Data::new(build_http_state(&db_pool));
    let server_health_state = health_state.clone();

    let mut server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    });
    if let Some(workers) = workers {
        server = server.workers(workers);
    }
    let server = server.bind(bind_addr)?;
    let local_addr = server
        .addrs()
        .first()
        .copied()
        .ok_or_else(|| std::io::Error::other("server bound no addresses"))?;
    info!(%local_addr, "listening");

    health_state.mark_ready();
    Ok(BoundServer {
        server: server.run(),
        local_addr,
    })
}
