use std::sync::Arc;

use actix_governor::Governor;
use actix_web::middleware::{Condition, Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod repository;
mod routes;
mod service;

use crate::config::Config;
use crate::docs::ApiDoc;
use crate::repository::{MySqlAttendanceRepository, MySqlEmployeeRepository};
use crate::service::{AttendanceService, EmployeeService};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = db::init_db(&config)
        .await
        .context("Failed to connect to database")?;

    if config.run_migrations {
        db::run_migrations(&pool)
            .await
            .context("Failed to apply migrations")?;
    } else {
        warn!("RUN_MIGRATIONS is off, assuming the schema is current");
    }

    let employee_repo = Arc::new(MySqlEmployeeRepository::new(pool.clone()));
    let attendance_repo = Arc::new(MySqlAttendanceRepository::new(pool.clone()));

    let employee_service = Data::new(EmployeeService::new(employee_repo.clone()));
    let attendance_service = Data::new(AttendanceService::new(attendance_repo, employee_repo));

    let limiter = routes::build_limiter(config.rate_limit_per_min)?;
    let rate_limited = config.rate_limit_per_min > 0;
    let cors_origin = config.cors_origin.clone();
    let server_addr = config.server_addr();

    info!(host = %server_addr.0, port = server_addr.1, rate_limited, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Condition::new(rate_limited, Governor::new(&limiter)))
            .wrap(NormalizePath::trim())
            .wrap(routes::build_cors(&cors_origin))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(employee_service.clone())
            .app_data(attendance_service.clone())
            .configure(routes::configure)
    })
    .bind(server_addr)?
    .run()
    .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}
