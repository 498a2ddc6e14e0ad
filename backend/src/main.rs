//! Backend entry-point: loads settings, prepares the SQLite store and serves
//! the records API.

use std::ffi::OsString;
use std::io;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gradebook::domain::StudentService;
use gradebook::inbound::http::health::HealthState;
use gradebook::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
use gradebook::server::{ServerConfig, create_server};
use gradebook::settings::ServerSettings;
use ortho_config::OrthoConfig;
use std::sync::Arc;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| io::Error::other(format!("invalid host {:?}: {e}", settings.host())))?;

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url()).with_max_size(settings.pool_size()),
    )
    .map_err(io::Error::other)?;
    pool.run_migrations().await.map_err(io::Error::other)?;

    if settings.seed_example_student {
        let students = StudentService::new(Arc::new(DieselStudentRepository::new(pool.clone())));
        match students.seed_example_student().await {
            Ok(Some(student)) => info!(student_id = %student.id, "seeded example student"),
            Ok(None) => info!("roster not empty; skipping example student"),
            Err(e) => return Err(io::Error::other(format!("seeding failed: {e}"))),
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let bound = create_server(health_state, ServerConfig::new(bind_addr, pool))?;
    info!(
        database_url = settings.database_url(),
        addr = %bound.local_addr,
        "gradebook server started"
    );
    bound.server.await
}
